//! Runtime detection for Node.js, Bun, and package managers

use std::process::Command;

use crate::scaffold::package_manager::PackageManager;

/// Runtime detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

/// A runtime the scaffold needs but could not find
#[derive(Debug, Clone)]
pub struct MissingRuntime {
    pub name: &'static str,
    pub install_hint: &'static str,
    pub docs_url: &'static str,
}

/// Preflight result for one scaffold request
#[derive(Debug, Clone)]
pub struct EnvironmentReport {
    /// Runtimes that were detected (with versions where available)
    pub detected: Vec<RuntimeInfo>,
    /// Runtimes that are required but missing; non-empty means the scaffold
    /// cannot proceed
    pub missing: Vec<MissingRuntime>,
}

impl EnvironmentReport {
    pub fn is_ok(&self) -> bool {
        self.missing.is_empty()
    }
}

fn probe(name: &'static str, command: &str) -> RuntimeInfo {
    let output = Command::new(command).arg("--version").output();

    match output {
        Ok(out) if out.status.success() => {
            let version = String::from_utf8_lossy(&out.stdout).trim().to_string();
            RuntimeInfo {
                name,
                version: Some(version),
                available: true,
            }
        }
        _ => RuntimeInfo {
            name,
            version: None,
            available: false,
        },
    }
}

/// Check if Node.js is available
pub fn check_node() -> RuntimeInfo {
    probe("Node.js", "node")
}

/// Check if Bun is available
pub fn check_bun() -> RuntimeInfo {
    probe("Bun", "bun")
}

/// Check if a package manager is available
pub fn check_package_manager(pm: PackageManager) -> RuntimeInfo {
    probe(pm.command(), pm.command())
}

/// Preflight the environment for a scaffold: a JavaScript runtime (Node.js
/// or Bun) and the chosen package manager must both be installed before the
/// install step can work.
pub fn check_environment(pm: PackageManager) -> EnvironmentReport {
    let mut detected = Vec::new();
    let mut missing = Vec::new();

    let bun = check_bun();
    let node = check_node();
    let any_js = bun.available || node.available;
    if bun.available {
        detected.push(bun);
    }
    if node.available {
        detected.push(node);
    }
    if !any_js {
        missing.push(MissingRuntime {
            name: "Node.js or Bun",
            install_hint: "install from https://nodejs.org or https://bun.sh",
            docs_url: "https://nodejs.org",
        });
    }

    // Bun doubles as its own package manager, so a detected Bun runtime
    // already covers `bun install`
    let pm_probe = check_package_manager(pm);
    if pm_probe.available {
        if pm != PackageManager::Bun {
            detected.push(pm_probe);
        }
    } else {
        missing.push(MissingRuntime {
            name: pm.command(),
            install_hint: "see the installation docs",
            docs_url: pm.install_docs_url(),
        });
    }

    EnvironmentReport { detected, missing }
}
