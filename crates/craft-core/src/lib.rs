//! Craft Core - Shared library for the create-craft-app CLI
//!
//! This library provides the core functionality for scaffolding Craft.js
//! applications from a template, plus the sandboxed file-tool layer the
//! generated app's AI builder exposes to a language-model agent.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - Pure functions and typed operations for
//!   name validation, template fetching/copying, runtime detection, and the
//!   allow-list path sandbox
//! - **Layer 2: Workflow Orchestration** - `ProductConfig` trait and the
//!   one-shot `create_project` sequence
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts
//!   (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module

pub mod error;
pub mod product;
pub mod runtime;
pub mod scaffold;
pub mod tools;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use product::ProductConfig;
pub use runtime::{check_environment, EnvironmentReport, RuntimeInfo};
pub use scaffold::{
    create_project, PackageManager, ScaffoldRequest, TemplateFetcher, TemplateManifest,
    TemplateSource,
};
pub use tools::{default_tools, FileWorkspace, PathSandbox, Tool};

#[cfg(feature = "tui")]
pub use tui::run;
