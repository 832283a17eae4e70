//! MOO harness: configuration, run orchestration and artifact bundles.
//!
//! The harness drives one exploration through `moo_search::explorer::explore`
//! and packages the result as a self-contained, content-addressed bundle
//! that can be written to and verified from a directory.
//!
//! The harness does NOT implement search logic; it delegates to the search
//! crate and owns only orchestration and persistence.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bundle;
pub mod bundle_dir;
pub mod config;
pub mod progress;
pub mod runner;
