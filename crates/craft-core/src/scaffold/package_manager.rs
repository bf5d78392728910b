//! Package manager selection and metadata

use std::fmt;

/// Supported package managers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManager {
    Npm,
    Yarn,
    Pnpm,
    Bun,
}

impl PackageManager {
    /// All supported package managers, in prompt order (recommended first)
    pub const ALL: [PackageManager; 4] = [
        PackageManager::Pnpm,
        PackageManager::Npm,
        PackageManager::Yarn,
        PackageManager::Bun,
    ];

    /// The executable name
    pub fn command(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Bun => "bun",
        }
    }

    /// Arguments for installing project dependencies
    pub fn install_args(&self) -> &'static [&'static str] {
        &["install"]
    }

    /// Prefix for running a package.json script (npm needs `run`)
    pub fn run_command(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm run",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Bun => "bun",
        }
    }

    /// Installation documentation, shown when the executable is missing
    pub fn install_docs_url(&self) -> &'static str {
        match self {
            PackageManager::Npm => "https://docs.npmjs.com/downloading-and-installing-node-js-and-npm",
            PackageManager::Yarn => "https://yarnpkg.com/getting-started/install",
            PackageManager::Pnpm => "https://pnpm.io/installation",
            PackageManager::Bun => "https://bun.sh/docs/installation",
        }
    }

    /// Resolve from the mutually exclusive `--use-*` CLI flags
    pub fn from_flags(npm: bool, yarn: bool, pnpm: bool, bun: bool) -> Option<Self> {
        if npm {
            Some(PackageManager::Npm)
        } else if yarn {
            Some(PackageManager::Yarn)
        } else if pnpm {
            Some(PackageManager::Pnpm)
        } else if bun {
            Some(PackageManager::Bun)
        } else {
            None
        }
    }
}

impl Default for PackageManager {
    fn default() -> Self {
        PackageManager::Pnpm
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flags_precedence() {
        assert_eq!(
            PackageManager::from_flags(true, false, false, false),
            Some(PackageManager::Npm)
        );
        assert_eq!(
            PackageManager::from_flags(false, false, false, true),
            Some(PackageManager::Bun)
        );
        assert_eq!(PackageManager::from_flags(false, false, false, false), None);
    }

    #[test]
    fn test_default_is_pnpm() {
        assert_eq!(PackageManager::default(), PackageManager::Pnpm);
    }

    #[test]
    fn test_run_command() {
        assert_eq!(PackageManager::Npm.run_command(), "npm run");
        assert_eq!(PackageManager::Pnpm.run_command(), "pnpm");
    }
}
