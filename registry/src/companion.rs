//! Companion class writers.
//!
//! One writer exists per nest host. Rewriting tasks for different members of
//! the same nest share it, so its sink sits behind a per-host mutex.

use crate::{NestError, NestResult};
use desugar_core::ClassName;
use parking_lot::Mutex;

/// Destination for the binary content of a companion class.
pub trait BinarySink: Send {
    /// Consume the sink and return the assembled bytes.
    fn finish(self) -> Vec<u8>;
}

/// Append-only buffer of serialized members.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteSink {
    buffer: Vec<u8>,
    member_count: usize,
}

impl ByteSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one serialized member.
    pub fn write_member(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
        self.member_count += 1;
    }

    pub fn member_count(&self) -> usize {
        self.member_count
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl BinarySink for ByteSink {
    fn finish(self) -> Vec<u8> {
        self.buffer
    }
}

#[derive(Debug)]
enum SinkState<S> {
    Open(S),
    Sealed,
}

/// The writer of one nest companion.
#[derive(Debug)]
pub struct CompanionWriter<S> {
    nest_host: ClassName,
    companion: ClassName,
    state: Mutex<SinkState<S>>,
}

impl<S: BinarySink> CompanionWriter<S> {
    pub(crate) fn new(nest_host: ClassName, companion: ClassName, sink: S) -> Self {
        Self {
            nest_host,
            companion,
            state: Mutex::new(SinkState::Open(sink)),
        }
    }

    /// The nest host owning this companion.
    pub fn nest_host(&self) -> &ClassName {
        &self.nest_host
    }

    /// The companion class being written.
    pub fn companion(&self) -> &ClassName {
        &self.companion
    }

    /// Run `f` with exclusive access to the sink.
    ///
    /// Writes for the same host are serialized; writes for different hosts
    /// never contend.
    pub fn write<R>(&self, f: impl FnOnce(&mut S) -> R) -> NestResult<R> {
        let mut state = self.state.lock();
        match &mut *state {
            SinkState::Open(sink) => Ok(f(sink)),
            SinkState::Sealed => Err(NestError::already_sealed(&self.companion)),
        }
    }

    /// Freeze the companion and return its bytes. Terminal.
    pub fn seal(&self) -> NestResult<Vec<u8>> {
        let mut state = self.state.lock();
        match std::mem::replace(&mut *state, SinkState::Sealed) {
            SinkState::Open(sink) => {
                tracing::trace!(companion = %self.companion, "sealing nest companion");
                Ok(sink.finish())
            }
            SinkState::Sealed => Err(NestError::already_sealed(&self.companion)),
        }
    }

    pub fn is_sealed(&self) -> bool {
        matches!(*self.state.lock(), SinkState::Sealed)
    }

    /// Move the sink under new names, keeping whatever was written so far.
    pub(crate) fn rename(self, nest_host: ClassName, companion: ClassName) -> Self {
        Self {
            nest_host,
            companion,
            state: Mutex::new(self.state.into_inner()),
        }
    }
}
