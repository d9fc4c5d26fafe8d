//! CLI command implementations.

pub mod catalog;
pub mod common;
pub mod diagram;
pub mod run;
pub mod stress;
pub mod sweep;
pub mod trace;
pub mod version;
