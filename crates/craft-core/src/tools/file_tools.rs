//! Sandboxed file tools for the chat agent
//!
//! Thin adapters from the JSON tool-call contract onto [`FileWorkspace`].
//! Create and update are deliberately separate operations with full-content
//! writes: an agent that means to edit must read first and supply the whole
//! file back, which avoids partial-write corruption from incomplete edits.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::workspace::FileWorkspace;
use super::Tool;
use crate::error::Error;

fn failure(message: impl Into<String>) -> Value {
    json!({ "success": false, "error": message.into() })
}

fn failure_for(err: &Error) -> Value {
    failure(err.to_string())
}

fn required_str<'a>(args: &'a Value, key: &str) -> Result<&'a str, Value> {
    args.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| failure(format!("missing required argument: {key}")))
}

fn file_args_schema(with_content: bool) -> Value {
    let mut properties = json!({
        "filePath": {
            "type": "string",
            "description": "Path relative to the project root, e.g. src/app/page.tsx"
        }
    });
    let mut required = vec!["filePath"];

    if with_content {
        properties["content"] = json!({
            "type": "string",
            "description": "The complete file content"
        });
        required.push("content");
    }

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

/// Create a new file inside the allowed project subtrees.
pub struct CreateFileTool {
    workspace: Arc<FileWorkspace>,
}

impl CreateFileTool {
    pub fn new(workspace: Arc<FileWorkspace>) -> Self {
        Self { workspace }
    }
}

#[async_trait]
impl Tool for CreateFileTool {
    fn name(&self) -> &str {
        "create_file"
    }

    fn description(&self) -> &str {
        "Create a new file in the project. Fails if the file already exists - use update_file to modify existing files."
    }

    fn parameters_schema(&self) -> Value {
        file_args_schema(true)
    }

    async fn execute(&self, args: Value) -> Value {
        let path = match required_str(&args, "filePath") {
            Ok(path) => path,
            Err(rejection) => return rejection,
        };
        let content = match required_str(&args, "content") {
            Ok(content) => content,
            Err(rejection) => return rejection,
        };

        match self.workspace.create_file(path, content).await {
            Ok(_) => json!({
                "success": true,
                "filePath": path,
                "message": format!("Created {path}"),
            }),
            Err(Error::AlreadyExists(path)) => failure(format!(
                "File already exists: {path}. Use update_file to modify it."
            )),
            Err(err) => failure_for(&err),
        }
    }
}

/// Read a file's content.
pub struct ReadFileTool {
    workspace: Arc<FileWorkspace>,
}

impl ReadFileTool {
    pub fn new(workspace: Arc<FileWorkspace>) -> Self {
        Self { workspace }
    }
}

#[async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Read the full content of a file in the project."
    }

    fn parameters_schema(&self) -> Value {
        file_args_schema(false)
    }

    async fn execute(&self, args: Value) -> Value {
        let path = match required_str(&args, "filePath") {
            Ok(path) => path,
            Err(rejection) => return rejection,
        };

        match self.workspace.read_file(path).await {
            Ok(content) => json!({
                "success": true,
                "filePath": path,
                "content": content,
            }),
            Err(err) => failure_for(&err),
        }
    }
}

/// Overwrite an existing file with complete new content.
pub struct UpdateFileTool {
    workspace: Arc<FileWorkspace>,
}

impl UpdateFileTool {
    pub fn new(workspace: Arc<FileWorkspace>) -> Self {
        Self { workspace }
    }
}

#[async_trait]
impl Tool for UpdateFileTool {
    fn name(&self) -> &str {
        "update_file"
    }

    fn description(&self) -> &str {
        "Overwrite an existing file with new content. Always supply the complete file content - partial edits are not merged. Fails if the file does not exist; use create_file for new files."
    }

    fn parameters_schema(&self) -> Value {
        file_args_schema(true)
    }

    async fn execute(&self, args: Value) -> Value {
        let path = match required_str(&args, "filePath") {
            Ok(path) => path,
            Err(rejection) => return rejection,
        };
        let content = match required_str(&args, "content") {
            Ok(content) => content,
            Err(rejection) => return rejection,
        };

        match self.workspace.update_file(path, content).await {
            Ok(_) => json!({
                "success": true,
                "filePath": path,
                "message": format!("Updated {path}"),
            }),
            Err(Error::NotFound(path)) => failure(format!(
                "File not found: {path}. Use create_file to create it."
            )),
            Err(err) => failure_for(&err),
        }
    }
}

/// Delete a file.
pub struct DeleteFileTool {
    workspace: Arc<FileWorkspace>,
}

impl DeleteFileTool {
    pub fn new(workspace: Arc<FileWorkspace>) -> Self {
        Self { workspace }
    }
}

#[async_trait]
impl Tool for DeleteFileTool {
    fn name(&self) -> &str {
        "delete_file"
    }

    fn description(&self) -> &str {
        "Delete a file from the project."
    }

    fn parameters_schema(&self) -> Value {
        file_args_schema(false)
    }

    async fn execute(&self, args: Value) -> Value {
        let path = match required_str(&args, "filePath") {
            Ok(path) => path,
            Err(rejection) => return rejection,
        };

        match self.workspace.delete_file(path).await {
            Ok(()) => json!({
                "success": true,
                "filePath": path,
                "message": format!("Deleted {path}"),
            }),
            Err(err) => failure_for(&err),
        }
    }
}

/// List a directory's entries.
pub struct ListDirectoryTool {
    workspace: Arc<FileWorkspace>,
}

impl ListDirectoryTool {
    pub fn new(workspace: Arc<FileWorkspace>) -> Self {
        Self { workspace }
    }
}

#[async_trait]
impl Tool for ListDirectoryTool {
    fn name(&self) -> &str {
        "list_directory"
    }

    fn description(&self) -> &str {
        "List the files and subdirectories of a project directory. Directory names are suffixed with '/'."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "dirPath": {
                    "type": "string",
                    "description": "Directory path relative to the project root, e.g. src/app"
                }
            },
            "required": ["dirPath"],
        })
    }

    async fn execute(&self, args: Value) -> Value {
        let path = match required_str(&args, "dirPath") {
            Ok(path) => path,
            Err(rejection) => return rejection,
        };

        match self.workspace.list_directory(path).await {
            Ok(listing) => json!({
                "success": true,
                "dirPath": path,
                "directories": listing.directories,
                "files": listing.files,
            }),
            Err(err) => failure_for(&err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::sandbox::PathSandbox;

    fn tool_workspace(root: &std::path::Path) -> Arc<FileWorkspace> {
        Arc::new(FileWorkspace::new(PathSandbox::with_default_subtrees(root)))
    }

    #[tokio::test]
    async fn test_create_and_read_results() {
        let root = tempfile::tempdir().unwrap();
        let ws = tool_workspace(root.path());

        let create = CreateFileTool::new(ws.clone());
        let result = create
            .execute(json!({ "filePath": "src/app/page.tsx", "content": "export default Page" }))
            .await;
        assert_eq!(result["success"], true);
        assert_eq!(result["filePath"], "src/app/page.tsx");

        let read = ReadFileTool::new(ws);
        let result = read.execute(json!({ "filePath": "src/app/page.tsx" })).await;
        assert_eq!(result["success"], true);
        assert_eq!(result["content"], "export default Page");
    }

    #[tokio::test]
    async fn test_create_conflict_directs_to_update() {
        let root = tempfile::tempdir().unwrap();
        let ws = tool_workspace(root.path());
        let create = CreateFileTool::new(ws);

        let args = json!({ "filePath": "src/a.ts", "content": "x" });
        assert_eq!(create.execute(args.clone()).await["success"], true);

        let second = create.execute(args).await;
        assert_eq!(second["success"], false);
        let error = second["error"].as_str().unwrap();
        assert!(error.contains("update_file"));
    }

    #[tokio::test]
    async fn test_update_missing_directs_to_create() {
        let root = tempfile::tempdir().unwrap();
        let ws = tool_workspace(root.path());
        let update = UpdateFileTool::new(ws);

        let result = update
            .execute(json!({ "filePath": "src/missing.ts", "content": "x" }))
            .await;
        assert_eq!(result["success"], false);
        assert!(result["error"].as_str().unwrap().contains("create_file"));
    }

    #[tokio::test]
    async fn test_traversal_is_rejected_as_result() {
        let root = tempfile::tempdir().unwrap();
        let ws = tool_workspace(root.path());
        let read = ReadFileTool::new(ws);

        let result = read.execute(json!({ "filePath": "../../etc/passwd" })).await;
        assert_eq!(result["success"], false);
        assert!(result["error"].as_str().unwrap().contains("escapes"));
    }

    #[tokio::test]
    async fn test_missing_argument_is_rejected_as_result() {
        let root = tempfile::tempdir().unwrap();
        let ws = tool_workspace(root.path());
        let create = CreateFileTool::new(ws);

        let result = create.execute(json!({ "content": "x" })).await;
        assert_eq!(result["success"], false);
        assert!(result["error"].as_str().unwrap().contains("filePath"));
    }

    #[tokio::test]
    async fn test_list_directory_result_shape() {
        let root = tempfile::tempdir().unwrap();
        let ws = tool_workspace(root.path());

        CreateFileTool::new(ws.clone())
            .execute(json!({ "filePath": "src/app/page.tsx", "content": "p" }))
            .await;
        CreateFileTool::new(ws.clone())
            .execute(json!({ "filePath": "src/app/api/route.ts", "content": "r" }))
            .await;

        let list = ListDirectoryTool::new(ws);
        let result = list.execute(json!({ "dirPath": "src/app" })).await;
        assert_eq!(result["success"], true);
        assert_eq!(result["directories"], json!(["api/"]));
        assert_eq!(result["files"], json!(["page.tsx"]));
    }
}
