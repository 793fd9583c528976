//! Nest resolution and companion allocation scenarios.

use desugar_tests::prelude::*;

fn name(binary: &str) -> ClassName {
    ClassName::new(binary).unwrap()
}

/// Host a/b/H with members M1 and M2 and two tracked host constructors.
fn host_with_two_members() -> Scenario {
    Scenario::new("host_with_two_members")
        .nest("a/b/H", &["a/b/H$M1", "a/b/H$M2"])
        .tracked_constructor("a/b/H", "()V")
        .tracked_constructor("a/b/H", "(I)V")
}

mod resolution {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_members_and_host_resolve_to_host() {
        // GIVEN
        let registry = host_with_two_members().prepare().unwrap();

        // WHEN/THEN
        assert_eq!(registry.nest_host(&name("a/b/H$M1")), Some(name("a/b/H")));
        assert_eq!(registry.nest_host(&name("a/b/H$M2")), Some(name("a/b/H")));
        assert_eq!(registry.nest_host(&name("a/b/H")), Some(name("a/b/H")));
        assert_eq!(registry.resolve(&name("a/b/H")), NestResolution::SelfHost);
    }

    #[test]
    fn test_class_declaring_only_members_is_self_hosted() {
        // GIVEN a host whose NestMembers omits itself and no class names it as host
        let registry = Scenario::new("members_only")
            .nest_member("p/Outer", "p/Outer$Inner")
            .tracked_constructor("p/Outer", "()V")
            .prepare()
            .unwrap();

        // WHEN/THEN
        assert_eq!(registry.nest_host(&name("p/Outer")), Some(name("p/Outer")));
        assert_eq!(
            registry.all_companion_identifiers(),
            vec![name("p/Outer$NestCC")]
        );
    }

    #[test]
    fn test_nest_host_is_idempotent() {
        let registry = host_with_two_members().prepare().unwrap();

        for class in ["a/b/H", "a/b/H$M1", "a/b/H$NestCC", "a/b/Unrelated"] {
            let class = name(class);
            assert_eq!(registry.nest_host(&class), registry.nest_host(&class));
        }
    }

    #[test]
    fn test_companion_round_trip() {
        let registry = host_with_two_members().prepare().unwrap();

        let companion = registry.companion_identifier(&name("a/b/H")).unwrap();

        assert_eq!(companion, name("a/b/H$NestCC"));
        assert_eq!(registry.nest_host(&companion), Some(name("a/b/H")));
        assert_eq!(registry.companion_identifier(&companion).unwrap(), companion);
    }
}

mod allocation {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_example_nest_produces_one_companion_file() {
        // GIVEN
        let registry = host_with_two_members().prepare().unwrap();
        assert_eq!(
            registry.all_companion_identifiers(),
            vec![name("a/b/H$NestCC")]
        );

        // WHEN
        let (finalized, files) = registry.produce_artifacts().unwrap();

        // THEN
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].binary_path_name(), "a/b/H$NestCC.class");
        assert_eq!(finalized.nest_host(&name("a/b/H$M1")), Some(name("a/b/H")));
    }

    #[test]
    fn test_constructors_of_one_nest_share_a_companion() {
        // GIVEN five tracked constructors spread over one nest
        let registry = Scenario::new("dedup")
            .nest("q/H", &["q/H$A", "q/H$B"])
            .tracked_constructor("q/H$A", "()V")
            .tracked_constructor("q/H$B", "()V")
            .tracked_constructor("q/H", "()V")
            .tracked_constructor("q/H$A", "(J)V")
            .tracked_constructor("q/H$B", "(Ljava/lang/String;)V")
            .prepare()
            .unwrap();

        // WHEN
        let companions = registry.all_companion_identifiers();

        // THEN exactly one companion and one writer
        assert_eq!(companions, vec![name("q/H$NestCC")]);
        assert_eq!(registry.nest_hosts().count(), 1);
        let a = registry.companion_writer(&name("q/H$A")).unwrap();
        let b = registry.companion_writer(&name("q/H$B")).unwrap();
        assert!(std::ptr::eq(a, b));
    }

    #[test]
    fn test_class_outside_nests_gets_nothing() {
        // GIVEN a plain class next to a nest
        let registry = host_with_two_members()
            .member_use("a/b/Plain", "run", "()V", MemberUseKind::InvokeVirtual)
            .prepare()
            .unwrap();

        // WHEN
        let plain = name("a/b/Plain");

        // THEN
        assert_eq!(registry.nest_host(&plain), None);
        assert!(registry.companion_writer(&plain).is_none());
        assert!(matches!(
            registry.companion_identifier(&plain),
            Err(NestError::MissingNestHost { .. })
        ));
        let (_, files) = registry.produce_artifacts().unwrap();
        assert!(files
            .iter()
            .all(|file| !file.binary_path_name().starts_with("a/b/Plain")));
    }

    #[test]
    fn test_nest_without_tracked_constructors_gets_no_companion() {
        let registry = Scenario::new("untracked")
            .nest("u/H", &["u/H$M"])
            .member_use("u/H", "secret", "I", MemberUseKind::GetField)
            .prepare()
            .unwrap();

        assert!(registry.all_companion_identifiers().is_empty());
        assert_eq!(registry.nest_host(&name("u/H$M")), Some(name("u/H")));
        assert!(registry.companion_writer(&name("u/H$M")).is_none());
    }

    #[test]
    fn test_enumeration_is_stable_across_runs() {
        let scenario = Scenario::new("stable")
            .nest("s/A", &["s/A$X"])
            .nest("s/B", &["s/B$Y"])
            .nest("s/C", &["s/C$Z"])
            .tracked_constructor("s/C$Z", "()V")
            .tracked_constructor("s/A", "()V")
            .tracked_constructor("s/B$Y", "()V")
            .tracked_constructor("s/A$X", "()V");

        let first = scenario.prepare().unwrap().all_companion_identifiers();
        let second = scenario.prepare().unwrap().all_companion_identifiers();

        assert_eq!(
            first,
            vec![name("s/C$NestCC"), name("s/A$NestCC"), name("s/B$NestCC")]
        );
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_companion_name() {
        let registry = host_with_two_members()
            .config(NestConfig::default().with_companion_simple_name("$Bridges"))
            .prepare()
            .unwrap();

        assert_eq!(
            registry.all_companion_class_names(),
            vec!["a/b/H$$Bridges".to_string()]
        );
    }
}

mod sealing {
    use super::*;

    #[test]
    fn test_write_after_seal_is_rejected() {
        // GIVEN a sealed companion
        let registry = host_with_two_members().prepare().unwrap();
        let writer = registry.companion_writer(&name("a/b/H$M1")).unwrap();
        writer.seal().unwrap();

        // WHEN
        let result = writer.write(|sink| sink.write_member(b"late bridge"));

        // THEN
        assert!(matches!(
            result,
            Err(NestError::AlreadySealed { companion }) if companion == name("a/b/H$NestCC")
        ));
    }
}
