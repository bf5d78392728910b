//! Runtime detection
//!
//! This module provides language runtime and package manager detection
//! (Node.js, Bun, npm/yarn/pnpm/bun) used to preflight a scaffold.

pub mod check;

pub use check::{
    check_bun, check_environment, check_node, check_package_manager, EnvironmentReport,
    MissingRuntime, RuntimeInfo,
};
