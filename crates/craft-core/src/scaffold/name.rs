//! Project name validation

use crate::error::{Error, Result};

/// Validate a project name, returning a user-facing message on failure.
///
/// Accepts the npm-style slug shape: lowercase, URL-safe, with an optional
/// `@scope/` prefix. Equivalent to the pattern
/// `^(?:@[a-z0-9-*~][a-z0-9-*._~]*/)?[a-z0-9-~][a-z0-9-._~]*$`.
pub fn project_name_error(name: &str) -> Option<&'static str> {
    if name.trim().is_empty() {
        return Some("Project name cannot be empty");
    }

    if is_valid_slug(name) {
        None
    } else {
        Some("Project name must be lowercase and URL-friendly")
    }
}

/// Validate a project name, returning a typed error on failure.
pub fn validate_project_name(name: &str) -> Result<()> {
    match project_name_error(name) {
        None => Ok(()),
        Some(message) => Err(Error::InvalidProjectName(message)),
    }
}

fn is_valid_slug(name: &str) -> bool {
    let bare = match name.strip_prefix('@') {
        Some(scoped) => {
            // Scoped: "@scope/name" - exactly one separating slash
            let Some((scope, rest)) = scoped.split_once('/') else {
                return false;
            };
            if !matches_class(scope, is_scope_first, is_scope_rest) {
                return false;
            }
            rest
        }
        None => name,
    };

    !bare.contains('/') && matches_class(bare, is_name_first, is_name_rest)
}

fn matches_class(s: &str, first: fn(char) -> bool, rest: fn(char) -> bool) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if first(c) => chars.all(rest),
        _ => false,
    }
}

fn is_name_first(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '~'
}

fn is_name_rest(c: char) -> bool {
    is_name_first(c) || c == '.' || c == '_'
}

fn is_scope_first(c: char) -> bool {
    is_name_first(c) || c == '*'
}

fn is_scope_rest(c: char) -> bool {
    is_name_rest(c) || c == '*'
}
