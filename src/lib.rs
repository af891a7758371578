//! cwforge - reproducible release builds for CosmWasm contracts
//!
//! Drives the pinned optimizer image with persistent cache volumes, verifies
//! the produced artifact, and runs integration test targets in isolation.

pub mod cli;
pub mod config;
pub mod error;
pub mod orchestration;
pub mod pipeline;
pub mod project;
pub mod testrunner;

pub use error::{ForgeError, ForgeResult};
