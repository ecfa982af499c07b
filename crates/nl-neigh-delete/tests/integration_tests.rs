//! Integration tests for nl-neigh-delete
//!
//! Drives the full argument → filter → deletion pass stack against an
//! in-memory neighbour table standing in for the kernel.

#[cfg(test)]
mod tests {
    use neigh_types::{AddressFamily, NeighbourState};
    use nl_neigh_delete::{
        DeletionExecutor, FilterBuilder, KernelError, LinkCache, NeighDeleteError,
        NeighbourBackend, NeighbourCache, NeighbourEntry, Result, RunConfig, config,
    };
    use pretty_assertions::assert_eq;
    use std::io::{Cursor, empty};

    /// Kernel stand-in recording every delete request
    #[derive(Default)]
    struct FakeKernel {
        deleted: Vec<NeighbourEntry>,
        /// 1-based request number that fails with the given errno
        fail_on: Option<(usize, i32)>,
        requests: usize,
    }

    impl NeighbourBackend for FakeKernel {
        fn delete_neighbour(
            &mut self,
            entry: &NeighbourEntry,
        ) -> std::result::Result<(), KernelError> {
            self.requests += 1;
            if let Some((n, errno)) = self.fail_on {
                if n == self.requests {
                    return Err(KernelError::new(Some(errno), "rejected by kernel"));
                }
            }
            self.deleted.push(entry.clone());
            Ok(())
        }
    }

    fn links() -> LinkCache {
        [(1, "lo"), (2, "eth0"), (3, "eth1")].into_iter().collect()
    }

    /// Test helper to create a neighbour entry
    fn make_test_entry(ifindex: u32, ip: &str, mac: &str, state: NeighbourState) -> NeighbourEntry {
        let destination: neigh_types::NeighbourAddress = ip.parse().expect("valid IP");
        NeighbourEntry {
            ifindex,
            interface: links().display_name(ifindex),
            family: destination.family(),
            destination,
            lladdr: mac.parse().expect("valid lladdr"),
            state,
        }
    }

    /// Three entries on eth0, two on eth1
    fn sample_cache() -> NeighbourCache {
        vec![
            make_test_entry(2, "10.0.0.1", "00:11:22:33:44:01", NeighbourState::REACHABLE),
            make_test_entry(3, "10.1.0.1", "00:11:22:33:44:02", NeighbourState::STALE),
            make_test_entry(2, "10.0.0.2", "00:11:22:33:44:03", NeighbourState::PERMANENT),
            make_test_entry(3, "fe80::1", "00:11:22:33:44:04", NeighbourState::REACHABLE),
            make_test_entry(2, "2001:db8::1", "00:11:22:33:44:05", NeighbourState::STALE),
        ]
        .into_iter()
        .collect()
    }

    /// Run the whole stack for `argv`, returning the pass result and stdout
    fn run_cli(argv: &[&str], answers: &str, kernel: &mut FakeKernel) -> (Result<usize>, String) {
        let mut full = vec!["nl-neigh-delete"];
        full.extend_from_slice(argv);
        let invocation = config::parse_from(full).expect("valid arguments");

        let links = links();
        let cache = sample_cache();
        let mut out = Vec::new();

        let result = FilterBuilder::new(&links)
            .build(invocation.filter_tokens())
            .and_then(|filter| {
                DeletionExecutor::new(
                    &mut *kernel,
                    invocation.config,
                    Cursor::new(answers.as_bytes().to_vec()),
                    &mut out,
                )
                .run(&cache, &filter)
            });

        (result, String::from_utf8(out).expect("utf8 output"))
    }

    #[test]
    fn test_device_filter_deletes_only_that_device() {
        let mut kernel = FakeKernel::default();
        let (result, out) = run_cli(&["-d", "eth0"], "", &mut kernel);

        assert_eq!(result.unwrap(), 3);
        assert!(kernel.deleted.iter().all(|e| e.ifindex == 2));
        assert_eq!(
            out.lines().collect::<Vec<_>>(),
            vec![
                "Deleted 10.0.0.1 dev eth0 lladdr 00:11:22:33:44:01 <reachable>",
                "Deleted 10.0.0.2 dev eth0 lladdr 00:11:22:33:44:03 <permanent>",
                "Deleted 2001:db8::1 dev eth0 lladdr 00:11:22:33:44:05 <stale>",
                "Deleted 3 neighbours",
            ]
        );
    }

    #[test]
    fn test_empty_filter_deletes_whole_table() {
        let mut kernel = FakeKernel::default();
        let (result, out) = run_cli(&[], "", &mut kernel);

        assert_eq!(result.unwrap(), 5);
        let expected: Vec<_> = sample_cache().iter().cloned().collect();
        assert_eq!(kernel.deleted, expected);
        assert!(out.ends_with("Deleted 5 neighbours\n"));
    }

    #[test]
    fn test_interactive_no_to_everything() {
        let mut kernel = FakeKernel::default();
        let (result, out) = run_cli(&["-i"], "n\nn\nn\nn\nn\n", &mut kernel);

        assert_eq!(result.unwrap(), 0);
        assert_eq!(kernel.requests, 0);
        assert_eq!(out.matches("Delete? (y/N) ").count(), 5);
        assert!(out.ends_with("Deleted 0 neighbours\n"));
    }

    #[test]
    fn test_interactive_default_yes_with_bare_newlines() {
        let mut kernel = FakeKernel::default();
        let (result, out) = run_cli(&["-i", "--yes", "--family", "inet6"], "\n\n", &mut kernel);

        assert_eq!(result.unwrap(), 2);
        assert_eq!(out.matches("Delete? (Y/n) ").count(), 2);
        assert!(kernel
            .deleted
            .iter()
            .all(|e| e.family == AddressFamily::INET6));
    }

    #[test]
    fn test_failed_delete_halts_pass() {
        let mut kernel = FakeKernel {
            fail_on: Some((2, -libc::EPERM)),
            ..FakeKernel::default()
        };
        let (result, out) = run_cli(&["--family", "inet"], "", &mut kernel);

        let err = result.unwrap_err();
        match &err {
            NeighDeleteError::Deletion { entry, deleted, .. } => {
                assert_eq!(*deleted, 1);
                assert!(entry.starts_with("10.1.0.1 dev eth1"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.code(), libc::EPERM);
        assert_eq!(kernel.requests, 2);
        assert_eq!(kernel.deleted.len(), 1);
        assert!(!out.contains("neighbours"));
    }

    #[test]
    fn test_unparsable_address_stops_before_iteration() {
        let mut kernel = FakeKernel::default();
        let (result, out) = run_cli(&["-d", "eth0", "--addr", "10.0.0.300"], "", &mut kernel);

        let err = result.unwrap_err();
        assert!(matches!(err, NeighDeleteError::Parse(_)));
        assert_ne!(err.code(), 0);
        assert_eq!(kernel.requests, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_last_flag_wins_end_to_end() {
        let mut kernel = FakeKernel::default();
        let (result, _) = run_cli(&["-q", "--dev", "eth0", "--dev", "eth1"], "", &mut kernel);

        assert_eq!(result.unwrap(), 2);
        assert!(kernel.deleted.iter().all(|e| e.interface == "eth1"));
    }

    #[test]
    fn test_unspec_family_does_not_restrict() {
        let mut kernel = FakeKernel::default();
        let (result, _) = run_cli(&["-q", "--family", "unspec"], "", &mut kernel);
        assert_eq!(result.unwrap(), 5);

        let mut kernel = FakeKernel::default();
        let (result, _) = run_cli(
            &["-q", "--addr", "10.0.0.1", "--family", "unspec"],
            "",
            &mut kernel,
        );
        assert_eq!(result.unwrap(), 1);
        assert_eq!(kernel.deleted[0].family, AddressFamily::INET);
    }

    #[test]
    fn test_quiet_run_has_no_output() {
        let mut kernel = FakeKernel::default();
        let (result, out) = run_cli(&["-q", "--state", "stale"], "", &mut kernel);

        assert_eq!(result.unwrap(), 2);
        assert!(out.is_empty());
    }

    #[test]
    fn test_address_and_lladdr_filter() {
        let mut kernel = FakeKernel::default();
        let (result, _) = run_cli(
            &["-a", "fe80::1", "-l", "00:11:22:33:44:04", "-q"],
            "",
            &mut kernel,
        );
        assert_eq!(result.unwrap(), 1);
        assert_eq!(kernel.deleted[0].destination.to_string(), "fe80::1");

        let mut kernel = FakeKernel::default();
        let (result, _) = run_cli(
            &["-a", "fe80::1", "-l", "00:11:22:33:44:05", "-q"],
            "",
            &mut kernel,
        );
        assert_eq!(result.unwrap(), 0);
    }

    #[test]
    fn test_no_match_reports_zero() {
        let mut kernel = FakeKernel::default();
        let (result, out) = run_cli(&["--state", "noarp"], "", &mut kernel);
        assert_eq!(result.unwrap(), 0);
        assert_eq!(out, "Deleted 0 neighbours\n");
    }

    #[test]
    fn test_empty_cache_and_empty_input() {
        let mut kernel = FakeKernel::default();
        let deleted = DeletionExecutor::new(&mut kernel, RunConfig::default(), empty(), Vec::new())
            .run(&NeighbourCache::default(), &Default::default())
            .unwrap();
        assert_eq!(deleted, 0);
    }
}
