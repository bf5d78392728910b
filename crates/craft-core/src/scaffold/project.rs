//! One-shot project creation from a template
//!
//! The sequence is linear and non-resumable with no rollback: a failure
//! after the copy step leaves a partially-populated directory on disk.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use colored::Colorize;
use tokio::fs;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;

use super::fetcher::TemplateFetcher;
use super::package_manager::PackageManager;
use super::{manifest, name};
use crate::error::{Error, Result};

/// A validated request to scaffold one project. Immutable once constructed.
#[derive(Debug, Clone)]
pub struct ScaffoldRequest {
    project_name: String,
    package_manager: PackageManager,
    target_dir: PathBuf,
}

impl ScaffoldRequest {
    /// Validate a request, resolving the target against the current working
    /// directory
    pub fn new(project_name: &str, package_manager: PackageManager) -> Result<Self> {
        let parent = std::env::current_dir()?;
        Self::in_dir(project_name, package_manager, parent)
    }

    /// Validate a request with an explicit parent directory
    pub fn in_dir(
        project_name: &str,
        package_manager: PackageManager,
        parent: impl Into<PathBuf>,
    ) -> Result<Self> {
        name::validate_project_name(project_name)?;
        let target_dir = parent.into().join(project_name);
        Ok(Self {
            project_name: project_name.to_string(),
            package_manager,
            target_dir,
        })
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn package_manager(&self) -> PackageManager {
        self.package_manager
    }

    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }
}

/// Run the full scaffold sequence: stage the project tree, bootstrap version
/// control (best-effort), then install dependencies (fatal on non-zero exit).
pub async fn create_project(
    fetcher: &mut TemplateFetcher,
    request: &ScaffoldRequest,
) -> Result<PathBuf> {
    stage_project(fetcher, request).await?;
    init_repository(request.target_dir()).await;
    install_dependencies(request).await?;
    Ok(request.target_dir().to_path_buf())
}

/// The steps that run before any subprocess: existence check, template copy,
/// package.json rewrite, ignore-file rename. All fatal.
///
/// The existence check is not atomic against a concurrent second scaffold of
/// the same name; that race is accepted for a developer bootstrap tool.
pub async fn stage_project(
    fetcher: &mut TemplateFetcher,
    request: &ScaffoldRequest,
) -> Result<Vec<String>> {
    let target = request.target_dir();

    if target.exists() {
        return Err(Error::DirectoryExists(target.to_path_buf()));
    }

    let copied = fetcher.materialize(target).await?;

    manifest::rewrite_package_manifest(target, request.project_name()).await?;

    // npm strips .gitignore on publish, so the template ships it un-dotted
    let gitignore = target.join("gitignore");
    if gitignore.exists() {
        fs::rename(&gitignore, target.join(".gitignore")).await?;
    }

    Ok(copied)
}

/// Initialize a git repository with an initial commit.
///
/// Best-effort: any failure (git not installed, commit hooks, missing user
/// identity) is swallowed. Returns whether the initial commit landed.
pub async fn init_repository(project_dir: &Path) -> bool {
    let steps: [&[&str]; 3] = [
        &["init"],
        &["add", "-A"],
        &["commit", "-m", "Initial commit from create-craft-app"],
    ];

    for args in steps {
        let succeeded = Command::new("git")
            .args(args)
            .current_dir(project_dir)
            .output()
            .await
            .map(|output| output.status.success())
            .unwrap_or(false);

        if !succeeded {
            return false;
        }
    }

    true
}

/// Run the chosen package manager's install in the project directory,
/// streaming its output. A non-zero exit is fatal.
///
/// The install inherits the caller's process lifetime; there is no timeout.
pub async fn install_dependencies(request: &ScaffoldRequest) -> Result<()> {
    let pm = request.package_manager();

    let mut child = Command::new(pm.command())
        .args(pm.install_args())
        .current_dir(request.target_dir())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let stdout = child.stdout.take().expect("Failed to capture stdout");
    let stderr = child.stderr.take().expect("Failed to capture stderr");

    let mut stdout_reader = BufReader::new(stdout).lines();
    let mut stderr_reader = BufReader::new(stderr).lines();

    loop {
        tokio::select! {
            line = stdout_reader.next_line() => {
                match line {
                    Ok(Some(line)) => println!("  {}", line.dimmed()),
                    Ok(None) => break,
                    Err(e) => {
                        eprintln!("{} {}", "Error reading stdout:".red(), e);
                        break;
                    }
                }
            }
            line = stderr_reader.next_line() => {
                match line {
                    Ok(Some(line)) => eprintln!("  {}", line.yellow()),
                    Ok(None) => {}
                    Err(e) => {
                        eprintln!("{} {}", "Error reading stderr:".red(), e);
                    }
                }
            }
        }
    }

    let status = child.wait().await?;
    if status.success() {
        Ok(())
    } else {
        Err(Error::ExternalProcess {
            command: format!("{} install", pm.command()),
            code: status.code().unwrap_or(-1),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn fixture_template() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("template.yaml"),
            "name: Craft.js\ndescription: AI-enabled SaaS starter\nversion: 1.0.0\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("package.json"),
            r#"{ "name": "craft-template", "version": "1.0.0", "private": true }"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("gitignore"), "node_modules\n.env\n").unwrap();
        std::fs::create_dir_all(dir.path().join("src/app")).unwrap();
        std::fs::write(dir.path().join("src/app/page.tsx"), "export default Page").unwrap();
        dir
    }

    #[test]
    fn test_request_rejects_invalid_name() {
        let err = ScaffoldRequest::in_dir("My App", PackageManager::Pnpm, "/tmp");
        assert!(matches!(err, Err(Error::InvalidProjectName(_))));
    }

    #[tokio::test]
    async fn test_stage_project_scenario() {
        let template = fixture_template();
        let parent = tempfile::tempdir().unwrap();

        let request =
            ScaffoldRequest::in_dir("my-app", PackageManager::Pnpm, parent.path()).unwrap();
        let mut fetcher = TemplateFetcher::from_local(template.path().to_path_buf(), "test");

        stage_project(&mut fetcher, &request).await.unwrap();

        let project_dir = parent.path().join("my-app");
        assert!(project_dir.is_dir());

        let manifest: Value = serde_json::from_str(
            &std::fs::read_to_string(project_dir.join("package.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(manifest["name"], "my-app");
        assert_eq!(manifest["version"], "0.1.0");
        assert!(manifest.get("private").is_none());

        assert!(project_dir.join(".gitignore").exists());
        assert!(!project_dir.join("gitignore").exists());
    }

    #[tokio::test]
    async fn test_stage_project_refuses_existing_directory() {
        let template = fixture_template();
        let parent = tempfile::tempdir().unwrap();

        let request =
            ScaffoldRequest::in_dir("my-app", PackageManager::Pnpm, parent.path()).unwrap();
        let mut fetcher = TemplateFetcher::from_local(template.path().to_path_buf(), "test");

        stage_project(&mut fetcher, &request).await.unwrap();

        // Leave a marker, then scaffold the same name again
        let marker = parent.path().join("my-app/marker.txt");
        std::fs::write(&marker, "untouched").unwrap();

        let mut fetcher = TemplateFetcher::from_local(template.path().to_path_buf(), "test");
        let second = stage_project(&mut fetcher, &request).await;
        assert!(matches!(second, Err(Error::DirectoryExists(_))));

        // First result untouched
        assert_eq!(std::fs::read_to_string(&marker).unwrap(), "untouched");
    }
}
