//! In-process determinism tests.
//!
//! Repeated runs of the same configuration produce byte-identical reports
//! and bundles, and an observer that only watches never changes the result.

use moo_harness::config::RunConfig;
use moo_harness::progress::ProgressLines;
use moo_harness::runner::run_explore;
use moo_search::explorer::explore;
use moo_search::observer::NoopObserver;
use moo_search::policy::ExplorePolicyV1;

#[test]
fn repeated_runs_are_byte_identical() {
    let policy = ExplorePolicyV1 {
        max_pops: Some(2_000),
        ..ExplorePolicyV1::default()
    };
    let first = explore(3, &policy, &mut NoopObserver).unwrap();
    for _ in 0..5 {
        let again = explore(3, &policy, &mut NoopObserver).unwrap();
        assert_eq!(
            again.to_canonical_json_bytes().unwrap(),
            first.to_canonical_json_bytes().unwrap()
        );
    }
}

#[test]
fn repeated_bundles_share_digest_and_artifacts() {
    let config = RunConfig::new(2);
    let a = run_explore(&config, &mut NoopObserver).unwrap().bundle;
    let b = run_explore(&config, &mut NoopObserver).unwrap().bundle;
    assert_eq!(a.digest, b.digest);
    assert_eq!(a.manifest, b.manifest);
    assert_eq!(a.digest_basis, b.digest_basis);
    assert_eq!(a.artifacts, b.artifacts);
}

#[test]
fn watching_observer_does_not_change_report() {
    let config = RunConfig {
        progress_interval: 7,
        ..RunConfig::new(2)
    };
    let quiet = run_explore(&config, &mut NoopObserver).unwrap();
    let mut lines = ProgressLines::new(Vec::new());
    let watched = run_explore(&config, &mut lines).unwrap();
    assert!(lines.lines_written() > 0);
    assert_eq!(quiet.bundle.digest, watched.bundle.digest);
}

#[test]
fn progress_interval_is_part_of_the_digest() {
    let a = run_explore(&RunConfig::new(2), &mut NoopObserver).unwrap();
    let b = run_explore(
        &RunConfig {
            progress_interval: 50,
            ..RunConfig::new(2)
        },
        &mut NoopObserver,
    )
    .unwrap();
    assert_eq!(a.report.counters, b.report.counters);
    assert_ne!(a.bundle.digest, b.bundle.digest);
}
