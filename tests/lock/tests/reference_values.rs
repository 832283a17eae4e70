//! Reference value lock tests.
//!
//! Proves:
//! 1. Every reference case reproduces its longest path, termination reason
//!    and full counter set
//! 2. Golden fingerprints and digests for N=1 and N=2 are stable
//! 3. The N=1 report and run config serialize to exact canonical bytes

use lock_tests::reference::reference_cases;
use moo_harness::config::RunConfig;
use moo_harness::runner::run_explore;
use moo_kernel::proof::canon::canonical_json_bytes;
use moo_search::explorer::{compute_longest_path, explore};
use moo_search::observer::NoopObserver;
use moo_search::policy::ExplorePolicyV1;

const N1_ROOT_FP: &str =
    "sha256:ad2444f3b5bef2962565caea67816f3100d74999aa03086cb831bd55a8c7b84b";
const N1_DEEPEST_FP: &str =
    "sha256:e836a17257b8ff7bda57d74497113054298e4388735967818c96247603564735";
const N1_REPORT_DIGEST: &str =
    "sha256:68b5eb2b2ae559eb5d39cc63c7e29eeb321454d922fa41d7ea400a3b0e7c4421";
const N1_BUNDLE_DIGEST: &str =
    "sha256:b9e973bc9293748f63b2fcc13e5dbbbcc2bf0e3b7413f271522a85f5d57ec4ab";

const N2_ROOT_FP: &str =
    "sha256:61dd9cc458ac7a60dac95f8d510be4d55b0f42756e55f8e235efe7c0343dbc3e";
const N2_DEEPEST_FP: &str =
    "sha256:454ccc416eb5b29fac9c11cc5c23d544982dad102a7bd2710d7d6ff70f57f469";
const N2_REPORT_DIGEST: &str =
    "sha256:b0fe968164dabdcff93bd01e67362d4964516761c78bd91002693bc59726e742";
const N2_BUNDLE_DIGEST: &str =
    "sha256:40e391d6ee1c614f244a156578552c8d294aacdd7db9dffe25b7107ca8f631fe";

// ---------------------------------------------------------------------------
// 1. Counter locks
// ---------------------------------------------------------------------------

#[test]
fn every_reference_case_reproduces() {
    for case in reference_cases() {
        let report = explore(case.bound, &case.policy, &mut NoopObserver).unwrap();
        assert_eq!(report.longest_path, case.longest_path, "{}", case.name);
        assert_eq!(
            report.termination_reason, case.termination_reason,
            "{}",
            case.name
        );
        assert_eq!(report.counters, case.counters, "{}", case.name);
        assert_eq!(report.policy, case.policy, "{}", case.name);
    }
}

#[test]
fn compute_longest_path_matches_exhaustive_cases() {
    assert_eq!(compute_longest_path(1).unwrap(), 2);
    assert_eq!(compute_longest_path(2).unwrap(), 131);
}

#[test]
fn deepest_goal_is_first_reached_at_longest_depth() {
    let report = explore(2, &ExplorePolicyV1::default(), &mut NoopObserver).unwrap();
    let deepest = report.deepest_goal.unwrap();
    assert_eq!(deepest.total_moves(), 131);
    assert!(deepest.is_goal());
}

// ---------------------------------------------------------------------------
// 2. Golden digests
// ---------------------------------------------------------------------------

#[test]
fn n1_golden_digests() {
    let output = run_explore(&RunConfig::new(1), &mut NoopObserver).unwrap();
    let report = &output.report;
    assert_eq!(report.root_fingerprint.as_str(), N1_ROOT_FP);
    assert_eq!(
        report.deepest_goal.as_ref().unwrap().key().fingerprint().as_str(),
        N1_DEEPEST_FP
    );
    assert_eq!(report.digest().unwrap().as_str(), N1_REPORT_DIGEST);
    assert_eq!(output.bundle.digest.as_str(), N1_BUNDLE_DIGEST);
}

#[test]
fn n2_golden_digests() {
    let output = run_explore(&RunConfig::new(2), &mut NoopObserver).unwrap();
    let report = &output.report;
    assert_eq!(report.root_fingerprint.as_str(), N2_ROOT_FP);
    assert_eq!(
        report.deepest_goal.as_ref().unwrap().key().fingerprint().as_str(),
        N2_DEEPEST_FP
    );
    assert_eq!(report.digest().unwrap().as_str(), N2_REPORT_DIGEST);
    assert_eq!(output.bundle.digest.as_str(), N2_BUNDLE_DIGEST);
}

// ---------------------------------------------------------------------------
// 3. Exact bytes
// ---------------------------------------------------------------------------

#[test]
fn n1_report_exact_bytes() {
    let report = explore(1, &ExplorePolicyV1::default(), &mut NoopObserver).unwrap();
    let expected = format!(
        concat!(
            r#"{{"bound":1,"counters":{{"admitted":2,"dominated":0,"expansions":2,"#,
            r#""frontier_high_water":1,"frontier_remaining":0,"goals_reached":1,"#,
            r#""known_states":3,"pops":3,"pruned_by_ordering":0,"successors_generated":2}},"#,
            r#""deepest_goal":{{"fingerprint":"{deepest}","state":{{"injection_cycle":0,"#,
            r#""magnitudes":[1],"position":0,"since_boost":2,"total_moves":2}}}},"#,
            r#""longest_path":2,"policy":{{"max_known_states":null,"max_pops":null,"#,
            r#""progress_interval":10000}},"root_fingerprint":"{root}","#,
            r#""schema_version":"explore_report.v1","#,
            r#""termination_reason":{{"type":"frontier_exhausted"}}}}"#
        ),
        deepest = N1_DEEPEST_FP,
        root = N1_ROOT_FP,
    );
    let bytes = report.to_canonical_json_bytes().unwrap();
    assert_eq!(String::from_utf8(bytes).unwrap(), expected);
}

#[test]
fn n1_run_config_exact_bytes() {
    let bytes = canonical_json_bytes(&RunConfig::new(1).to_json_value()).unwrap();
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        r#"{"bound":1,"policy":{"max_known_states":null,"max_pops":null,"progress_interval":10000},"schema_version":"run_config.v1"}"#
    );
}
