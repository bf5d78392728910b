//! Allow-list path sandbox for agent file tools
//!
//! Every file operation an agent requests must stay inside the project root
//! AND under one of the declared allowed subtrees. The check is purely
//! lexical (no I/O) so it can be tested exhaustively against traversal
//! payloads independent of the operations that consume its verdict.

use std::path::{Component, Path, PathBuf};

use thiserror::Error;

/// Subtrees agents may touch when none are configured explicitly
pub const DEFAULT_ALLOWED_SUBTREES: &[&str] = &["src", "public"];

/// A requested path was rejected before any filesystem access.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathViolation {
    /// The request did not name a path at all.
    #[error("path is empty")]
    Empty,

    /// The path climbs above the project root.
    #[error("path '{0}' escapes the project root")]
    EscapesRoot(String),

    /// The path resolves inside the root but outside every allowed subtree.
    #[error("path '{path}' is outside the allowed directories ({allowed})")]
    OutsideAllowList { path: String, allowed: String },
}

/// Path validator bound to a project root and a set of allowed subtrees.
#[derive(Debug, Clone)]
pub struct PathSandbox {
    root: PathBuf,
    allowed: Vec<String>,
}

impl PathSandbox {
    /// Create a sandbox over `root` permitting the given top-level subtrees.
    pub fn new(
        root: impl Into<PathBuf>,
        allowed: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            root: root.into(),
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a sandbox with the default allowed subtrees (`src`, `public`).
    pub fn with_default_subtrees(root: impl Into<PathBuf>) -> Self {
        Self::new(root, DEFAULT_ALLOWED_SUBTREES.iter().copied())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn allowed_subtrees(&self) -> &[String] {
        &self.allowed
    }

    /// Validate a requested path, returning the accepted absolute path.
    ///
    /// Normalizes lexically: leading separators and drive prefixes are
    /// stripped, `.` components dropped, and `..` collapsed. A `..` that
    /// would climb above the root rejects, as does any path whose first
    /// surviving component is not an allowed subtree. Performs no I/O.
    pub fn validate(&self, requested: &str) -> Result<PathBuf, PathViolation> {
        if requested.trim().is_empty() {
            return Err(PathViolation::Empty);
        }

        let mut normalized: Vec<String> = Vec::new();
        for component in Path::new(requested).components() {
            match component {
                Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
                Component::ParentDir => {
                    if normalized.pop().is_none() {
                        return Err(PathViolation::EscapesRoot(requested.to_string()));
                    }
                }
                Component::Normal(part) => {
                    normalized.push(part.to_string_lossy().into_owned());
                }
            }
        }

        let Some(first) = normalized.first() else {
            return Err(PathViolation::EscapesRoot(requested.to_string()));
        };

        if !self.allowed.iter().any(|allowed| allowed == first) {
            return Err(PathViolation::OutsideAllowList {
                path: requested.to_string(),
                allowed: self.allowed.join(", "),
            });
        }

        let mut accepted = self.root.clone();
        for part in &normalized {
            accepted.push(part);
        }
        Ok(accepted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sandbox() -> PathSandbox {
        PathSandbox::with_default_subtrees("/project")
    }

    #[test]
    fn test_accepts_paths_under_allowed_subtrees() {
        assert_eq!(
            sandbox().validate("src/app/page.tsx").unwrap(),
            PathBuf::from("/project/src/app/page.tsx")
        );
        assert_eq!(
            sandbox().validate("public/logo.svg").unwrap(),
            PathBuf::from("/project/public/logo.svg")
        );
        // Listing an allowed root itself is fine
        assert_eq!(
            sandbox().validate("src").unwrap(),
            PathBuf::from("/project/src")
        );
    }

    #[test]
    fn test_collapses_dot_segments() {
        assert_eq!(
            sandbox().validate("src/./app/../lib/db.ts").unwrap(),
            PathBuf::from("/project/src/lib/db.ts")
        );
    }

    #[test]
    fn test_rejects_traversal_above_root() {
        assert!(matches!(
            sandbox().validate("../../etc/passwd"),
            Err(PathViolation::EscapesRoot(_))
        ));
        assert!(matches!(
            sandbox().validate("src/../../etc/passwd"),
            Err(PathViolation::EscapesRoot(_))
        ));
        assert!(matches!(
            sandbox().validate(".."),
            Err(PathViolation::EscapesRoot(_))
        ));
    }

    #[test]
    fn test_strips_leading_separators() {
        // Absolute input is re-rooted, then allow-listed
        assert_eq!(
            sandbox().validate("/src/app/page.tsx").unwrap(),
            PathBuf::from("/project/src/app/page.tsx")
        );
        assert!(matches!(
            sandbox().validate("/etc/passwd"),
            Err(PathViolation::OutsideAllowList { .. })
        ));
    }

    #[test]
    fn test_rejects_outside_allow_list() {
        assert!(matches!(
            sandbox().validate("package.json"),
            Err(PathViolation::OutsideAllowList { .. })
        ));
        assert!(matches!(
            sandbox().validate("node_modules/react/index.js"),
            Err(PathViolation::OutsideAllowList { .. })
        ));
        // Escaping an allowed subtree into a disallowed sibling
        assert!(matches!(
            sandbox().validate("src/../secrets/key.pem"),
            Err(PathViolation::OutsideAllowList { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_input() {
        assert_eq!(sandbox().validate(""), Err(PathViolation::Empty));
        assert_eq!(sandbox().validate("   "), Err(PathViolation::Empty));
        assert!(matches!(
            sandbox().validate("."),
            Err(PathViolation::EscapesRoot(_))
        ));
    }

    #[test]
    fn test_custom_allow_list() {
        let sandbox = PathSandbox::new("/project", ["content"]);
        assert!(sandbox.validate("content/post.md").is_ok());
        assert!(matches!(
            sandbox.validate("src/app/page.tsx"),
            Err(PathViolation::OutsideAllowList { .. })
        ));
    }
}
