//! State carrier: the value type the explorer moves around.

pub mod state;
