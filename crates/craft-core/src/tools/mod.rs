//! Agent tool layer
//!
//! Bounded operations an external language-model agent can invoke during a
//! chat turn: sandboxed file operations plus small utility tools. Every tool
//! accepts a JSON argument object and returns a structured result object -
//! `{ "success": true, ... }` or `{ "success": false, "error": "..." }` -
//! so the agent loop can branch on failures instead of unwinding.

pub mod calculator;
pub mod datetime;
pub mod file_tools;
pub mod sandbox;
pub mod workspace;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

pub use calculator::CalculatorTool;
pub use datetime::DateTimeTool;
pub use file_tools::{
    CreateFileTool, DeleteFileTool, ListDirectoryTool, ReadFileTool, UpdateFileTool,
};
pub use sandbox::{PathSandbox, PathViolation, DEFAULT_ALLOWED_SUBTREES};
pub use workspace::{DirListing, FileWorkspace};

/// A named operation an external agent runtime can invoke.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    /// Agent-facing description of what the tool does and when to use it
    fn description(&self) -> &str;

    /// JSON Schema for the argument object
    fn parameters_schema(&self) -> Value;

    /// Run the tool. Expected failures (rejected paths, missing files, bad
    /// arguments) come back as structured results, never as panics.
    async fn execute(&self, args: Value) -> Value;
}

/// The default toolset handed to the chat agent: the five file tools bound
/// to `workspace`, plus calculator and date-time.
pub fn default_tools(workspace: Arc<FileWorkspace>) -> Vec<Arc<dyn Tool>> {
    vec![
        Arc::new(CreateFileTool::new(workspace.clone())),
        Arc::new(ReadFileTool::new(workspace.clone())),
        Arc::new(UpdateFileTool::new(workspace.clone())),
        Arc::new(DeleteFileTool::new(workspace.clone())),
        Arc::new(ListDirectoryTool::new(workspace)),
        Arc::new(CalculatorTool),
        Arc::new(DateTimeTool),
    ]
}
