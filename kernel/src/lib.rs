//! MOO kernel: the state model and the deterministic proof primitives.
//!
//! # API Surface
//!
//! - [`carrier::state::StateV1`] -- one search configuration, with structural
//!   identity ([`carrier::state::StateKeyV1`]), goal predicate, ordering
//!   invariant and flip
//! - [`proof::canon::canonical_json_bytes`] -- the single canonical JSON writer
//! - [`proof::hash::canonical_hash`] -- domain-separated SHA-256
//!
//! # Module Dependency Direction
//!
//! `proof` ← `carrier`. One-way only.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod carrier;
pub mod proof;
