// monitoring/mod.rs
pub mod cli;
pub mod phase_log;
pub mod plotting;
pub mod snapshots;
