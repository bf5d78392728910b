//! Product configuration trait for CLI binaries
//!
//! This trait defines the interface a product binary implements to configure
//! the scaffolding behavior for its specific needs.

use crate::scaffold::package_manager::PackageManager;

/// Configuration trait for CLI products
///
/// A product binary implements this trait to define:
/// - Product identity (name, display name)
/// - Template source URLs
/// - Documentation links
/// - Post-setup instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command, env vars)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Default URL for fetching the template
    fn default_template_url(&self) -> &'static str;

    /// Environment variable name for overriding the template URL
    fn template_url_env(&self) -> &'static str;

    /// URL for product documentation
    fn docs_url(&self) -> &'static str;

    /// Project name used when none is supplied (interactive placeholder,
    /// `--yes` default)
    fn default_project_name(&self) -> &'static str;

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, project_name: &str, package_manager: PackageManager) -> Vec<String>;

    /// CLI description shown in help text
    fn cli_description(&self) -> &'static str;

    /// Upgrade/install command shown in version warnings
    fn upgrade_command(&self) -> &'static str;

    /// User agent string for HTTP requests
    fn user_agent(&self) -> &'static str {
        self.name()
    }
}
