//! Canonical serialization and content addressing.

pub mod canon;
pub mod hash;
pub mod hash_domain;
