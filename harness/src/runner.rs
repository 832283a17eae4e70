//! Harness runner: drives one exploration and packages it as a bundle.
//!
//! The runner uses ONLY `moo_search::explorer::explore` for the search and
//! the kernel's canonical JSON writer for artifacts. It does not implement
//! any search logic itself.
//!
//! # Pipeline
//!
//! ```text
//! RunConfig::validate() → to_policy() → explore()
//!   → run_config.json + explore_report.json + summary.txt → build_bundle()
//! ```

use moo_kernel::proof::canon::canonical_json_bytes;
use moo_search::error::ExploreError;
use moo_search::explorer::explore;
use moo_search::observer::ExploreObserver;
use moo_search::report::ExploreReportV1;

use crate::bundle::{
    build_bundle, ArtifactBundleV1, ArtifactInput, BundleBuildError, EXPLORE_REPORT_ARTIFACT,
    RUN_CONFIG_ARTIFACT, SUMMARY_ARTIFACT,
};
use crate::config::{ConfigError, RunConfig};

/// Error during a harness run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    /// Configuration rejected before the explorer ran.
    Config(ConfigError),
    /// Explorer pre-flight failure.
    Explore(ExploreError),
    /// Canonical JSON serialization failed.
    CanonFailed { detail: String },
    /// Bundle assembly failed.
    BundleFailed(BundleBuildError),
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config error: {e}"),
            Self::Explore(e) => write!(f, "explore error: {e}"),
            Self::CanonFailed { detail } => write!(f, "canonical JSON error: {detail}"),
            Self::BundleFailed(e) => write!(f, "bundle error: {e}"),
        }
    }
}

impl std::error::Error for RunError {}

/// Everything one run produces.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub report: ExploreReportV1,
    pub bundle: ArtifactBundleV1,
}

/// Run the exploration described by `config` and assemble its bundle.
///
/// # Errors
///
/// Returns [`RunError`] if the configuration is invalid, the explorer
/// rejects it, or an artifact cannot be serialized.
pub fn run_explore(
    config: &RunConfig,
    observer: &mut dyn ExploreObserver,
) -> Result<RunOutput, RunError> {
    config.validate().map_err(RunError::Config)?;

    let report = explore(config.bound, &config.to_policy(), observer).map_err(RunError::Explore)?;

    let config_bytes = canonical_json_bytes(&config.to_json_value()).map_err(|e| {
        RunError::CanonFailed {
            detail: e.to_string(),
        }
    })?;
    let report_bytes = report
        .to_canonical_json_bytes()
        .map_err(|e| RunError::CanonFailed {
            detail: e.to_string(),
        })?;

    let bundle = build_bundle(vec![
        ArtifactInput {
            name: RUN_CONFIG_ARTIFACT.into(),
            content: config_bytes,
            normative: true,
        },
        ArtifactInput {
            name: EXPLORE_REPORT_ARTIFACT.into(),
            content: report_bytes,
            normative: true,
        },
        ArtifactInput {
            name: SUMMARY_ARTIFACT.into(),
            content: render_summary(&report).into_bytes(),
            normative: false,
        },
    ])
    .map_err(RunError::BundleFailed)?;

    Ok(RunOutput { report, bundle })
}

/// Final `key=value` summary, one pair per line.
///
/// `outcome` is `terminated` when the report holds a deepest goal, else
/// `no_terminating_sequence`.
#[must_use]
pub fn render_summary(report: &ExploreReportV1) -> String {
    let c = &report.counters;
    let outcome = if report.reached_goal() {
        "terminated"
    } else {
        "no_terminating_sequence"
    };
    let pairs: [(&str, String); 14] = [
        ("bound", report.bound.to_string()),
        ("longest_path", report.longest_path.to_string()),
        ("termination_reason", report.termination_reason.to_string()),
        ("pops", c.pops.to_string()),
        ("expansions", c.expansions.to_string()),
        ("goals_reached", c.goals_reached.to_string()),
        ("successors_generated", c.successors_generated.to_string()),
        ("pruned_by_ordering", c.pruned_by_ordering.to_string()),
        ("admitted", c.admitted.to_string()),
        ("dominated", c.dominated.to_string()),
        ("known_states", c.known_states.to_string()),
        ("frontier_high_water", c.frontier_high_water.to_string()),
        ("frontier_remaining", c.frontier_remaining.to_string()),
        ("outcome", outcome.to_string()),
    ];
    let mut out = String::new();
    for (key, value) in pairs {
        out.push_str(key);
        out.push('=');
        out.push_str(&value);
        out.push('\n');
    }
    out
}
