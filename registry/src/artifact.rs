//! Companion artifacts handed to the packaging stage.

use crate::companion::{BinarySink, CompanionWriter};
use crate::{CompanionRegistry, FinalizedRegistry, NestError, NestResult};
use rayon::prelude::*;
use std::fmt;
use std::io::{self, Cursor, Read};
use std::sync::Arc;

/// An output file whose content is produced on demand.
pub struct FileContentProvider<R> {
    binary_path_name: String,
    content_supplier: Box<dyn Fn() -> R + Send + Sync>,
}

impl<R: Read> FileContentProvider<R> {
    pub fn new(
        binary_path_name: impl Into<String>,
        content_supplier: impl Fn() -> R + Send + Sync + 'static,
    ) -> Self {
        Self {
            binary_path_name: binary_path_name.into(),
            content_supplier: Box::new(content_supplier),
        }
    }

    /// Archive path of the file, e.g. `a/b/C$NestCC.class`.
    pub fn binary_path_name(&self) -> &str {
        &self.binary_path_name
    }

    /// A fresh stream over the content.
    pub fn open(&self) -> R {
        (self.content_supplier)()
    }

    /// Read the whole content.
    pub fn read_all(&self) -> io::Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.open().read_to_end(&mut bytes)?;
        Ok(bytes)
    }
}

impl<R> fmt::Debug for FileContentProvider<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileContentProvider")
            .field("binary_path_name", &self.binary_path_name)
            .finish_non_exhaustive()
    }
}

/// A sealed companion class file.
pub type CompanionFile = FileContentProvider<Cursor<Arc<[u8]>>>;

/// Seal every companion of the registry and describe its output file.
///
/// Files come out in the order of
/// [`all_companion_identifiers`](CompanionRegistry::all_companion_identifiers).
pub fn produce_artifacts<S: BinarySink>(
    registry: CompanionRegistry<S>,
) -> NestResult<(FinalizedRegistry, Vec<CompanionFile>)> {
    let companions = registry.all_companion_identifiers();
    let sealed = {
        let writers = companions
            .iter()
            .map(|companion| {
                registry
                    .companion_writer(companion)
                    .ok_or_else(|| NestError::missing_companion_writer(companion))
            })
            .collect::<NestResult<Vec<&CompanionWriter<S>>>>()?;

        if registry.config().parallel_sealing {
            writers
                .par_iter()
                .map(|writer| writer.seal())
                .collect::<NestResult<Vec<_>>>()?
        } else {
            writers
                .iter()
                .map(|writer| writer.seal())
                .collect::<NestResult<Vec<_>>>()?
        }
    };

    let config = registry.config();
    let files: Vec<CompanionFile> = companions
        .iter()
        .zip(sealed)
        .map(|(companion, bytes)| {
            let bytes: Arc<[u8]> = bytes.into();
            FileContentProvider::new(config.output_path(companion), move || {
                Cursor::new(Arc::clone(&bytes))
            })
        })
        .collect();

    tracing::debug!(companions = files.len(), "produced nest companion files");

    Ok((FinalizedRegistry::from_prepared(registry), files))
}
