//! Template manifest types and package.json rewriting

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::fs;

use crate::error::Result;

/// Name of the metadata file at the template root. Never copied into
/// scaffolded projects.
pub const MANIFEST_FILE: &str = "template.yaml";

/// Template manifest (template.yaml at the template root)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateManifest {
    /// Display name of the template
    pub name: String,

    /// Description of what the template provides
    pub description: String,

    /// Semver version for CLI compatibility checking
    pub version: String,
}

/// Rewrite a copied template's package.json for the new project.
///
/// Sets the name, removes the template's `private` flag so users can publish
/// if they want to, and resets the version to 0.1.0. A template without a
/// package.json is left alone.
pub async fn rewrite_package_manifest(project_dir: &Path, project_name: &str) -> Result<()> {
    let manifest_path = project_dir.join("package.json");

    if !manifest_path.exists() {
        return Ok(());
    }

    let content = fs::read_to_string(&manifest_path).await?;
    let mut manifest: Value = serde_json::from_str(&content)?;

    patch_package_manifest(&mut manifest, project_name);

    let mut updated = serde_json::to_string_pretty(&manifest)?;
    updated.push('\n');
    fs::write(&manifest_path, updated).await?;

    Ok(())
}

/// Apply the project-name patch to a parsed package.json value.
pub fn patch_package_manifest(manifest: &mut Value, project_name: &str) {
    if let Some(fields) = manifest.as_object_mut() {
        fields.insert("name".to_string(), json!(project_name));
        fields.insert("version".to_string(), json!("0.1.0"));
        fields.remove("private");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_sets_name_and_version() {
        let mut manifest = json!({
            "name": "craft-template",
            "version": "1.4.2",
            "private": true,
            "scripts": { "dev": "next dev" }
        });

        patch_package_manifest(&mut manifest, "my-app");

        assert_eq!(manifest["name"], "my-app");
        assert_eq!(manifest["version"], "0.1.0");
        assert!(manifest.get("private").is_none());
        assert_eq!(manifest["scripts"]["dev"], "next dev");
    }

    #[test]
    fn test_patch_without_private_flag() {
        let mut manifest = json!({ "name": "x" });
        patch_package_manifest(&mut manifest, "@acme/my-app");
        assert_eq!(manifest["name"], "@acme/my-app");
        assert_eq!(manifest["version"], "0.1.0");
    }

    #[tokio::test]
    async fn test_rewrite_missing_manifest_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        rewrite_package_manifest(dir.path(), "my-app").await.unwrap();
        assert!(!dir.path().join("package.json").exists());
    }

    #[tokio::test]
    async fn test_rewrite_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("package.json"),
            r#"{ "name": "craft-template", "version": "1.0.0", "private": true }"#,
        )
        .unwrap();

        rewrite_package_manifest(dir.path(), "my-app").await.unwrap();

        let content = std::fs::read_to_string(dir.path().join("package.json")).unwrap();
        let manifest: Value = serde_json::from_str(&content).unwrap();
        assert_eq!(manifest["name"], "my-app");
        assert_eq!(manifest["version"], "0.1.0");
        assert!(manifest.get("private").is_none());
    }
}
