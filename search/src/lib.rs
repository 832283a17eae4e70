//! MOO search: dominance-pruned depth-first exploration of the MOO state
//! graph, with an auditable report.
//!
//! This crate depends only on `moo_kernel`. It does NOT depend on
//! `moo_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! moo_kernel  ←  moo_search  ←  moo_harness
//! (state,        (transitions,   (config, bundles,
//!  canon, hash)   explorer)       runner, CLI)
//! ```
//!
//! # Key types
//!
//! - [`explorer::explore`] / [`explorer::compute_longest_path`] -- entry points
//! - [`frontier::DepthFirstFrontier`] -- LIFO stack plus best-known-depth map
//! - [`transition::generate_successors`] -- ordered successor generation
//! - [`observer::ExploreObserver`] -- progress and goal notifications
//! - [`report::ExploreReportV1`] -- result with canonical JSON and digest
//! - [`policy::ExplorePolicyV1`] -- optional budgets and progress cadence

#![forbid(unsafe_code)]

pub mod effects;
pub mod error;
pub mod explorer;
pub mod frontier;
pub mod observer;
pub mod policy;
pub mod report;
pub mod transition;
