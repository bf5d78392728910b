//! Template fetching from remote (GitHub) or local directory
//!
//! Both sources are loaded into an in-memory file cache so the copy step has
//! a single write path:
//! - Remote: fetches a pre-built `template.zip` from the base URL
//! - Local: walks the template folder (development use)

use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use tokio::fs;
use url::Url;
use walkdir::WalkDir;
use zip::ZipArchive;

use super::copier;
use super::manifest::{TemplateManifest, MANIFEST_FILE};
use crate::error::{Error, Result};
use crate::product::ProductConfig;

/// Template source - either remote URL or local directory
#[derive(Debug, Clone)]
pub enum TemplateSource {
    Remote(Url),
    Local(PathBuf),
}

impl TemplateSource {
    /// Create a remote template source from a product config
    pub fn from_config<C: ProductConfig>(config: &C) -> Result<Self> {
        let url_str = std::env::var(config.template_url_env())
            .unwrap_or_else(|_| config.default_template_url().to_string());
        let url = Url::parse(&url_str)?;
        Ok(Self::Remote(url))
    }

    /// Create a local template source from a path
    pub fn local(path: PathBuf) -> Self {
        Self::Local(path)
    }
}

/// Cached template data
struct TemplateCache {
    manifest: TemplateManifest,
    files: HashMap<String, Vec<u8>>,
}

/// Template fetcher - retrieves the template tree from remote or local sources
pub struct TemplateFetcher {
    source: TemplateSource,
    client: reqwest::Client,
    cache: Option<TemplateCache>,
}

impl TemplateFetcher {
    /// Create a new fetcher with a custom user agent
    pub fn new(source: TemplateSource, user_agent: &str) -> Self {
        Self {
            source,
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
            cache: None,
        }
    }

    /// Create a fetcher from a product config
    pub fn from_config<C: ProductConfig>(config: &C) -> Result<Self> {
        let source = TemplateSource::from_config(config)?;
        Ok(Self::new(source, config.user_agent()))
    }

    /// Create a fetcher for a local template directory
    pub fn from_local(path: PathBuf, user_agent: &str) -> Self {
        Self::new(TemplateSource::local(path), user_agent)
    }

    /// Get the template source
    pub fn source(&self) -> &TemplateSource {
        &self.source
    }

    /// Build a URL by appending a path segment, preserving query parameters
    fn build_url(base: &Url, path_segment: &str) -> Result<Url> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Template(format!("URL cannot have path segments: {base}")))?
            .pop_if_empty()
            .push(path_segment);
        Ok(url)
    }

    /// Fetch the template manifest
    pub async fn fetch_manifest(&mut self) -> Result<TemplateManifest> {
        let cache = self.ensure_cache().await?;
        Ok(cache.manifest.clone())
    }

    /// Write every cached template file (except the manifest itself) under
    /// `target_dir`, creating parent directories as needed. Returns the
    /// sorted list of relative paths written.
    pub async fn materialize(&mut self, target_dir: &Path) -> Result<Vec<String>> {
        let cache = self.ensure_cache().await?;

        fs::create_dir_all(target_dir).await?;

        let mut copied = Vec::new();
        for (relative_path, contents) in &cache.files {
            if relative_path == MANIFEST_FILE {
                continue;
            }

            let target_path = target_dir.join(relative_path);
            if let Some(parent) = target_path.parent() {
                fs::create_dir_all(parent).await?;
            }
            fs::write(&target_path, contents).await?;
            copied.push(relative_path.clone());
        }

        copied.sort();
        Ok(copied)
    }

    /// Fetch/build and cache the template contents
    async fn ensure_cache(&mut self) -> Result<&TemplateCache> {
        if self.cache.is_none() {
            self.cache = Some(self.load_cache().await?);
        }
        self.cache
            .as_ref()
            .ok_or_else(|| Error::Template("template cache missing after load".to_string()))
    }

    async fn load_cache(&self) -> Result<TemplateCache> {
        let cache = match &self.source {
            TemplateSource::Remote(base_url) => {
                let zip_url = Self::build_url(base_url, "template.zip")?;
                let response = self.client.get(zip_url.clone()).send().await?;

                if !response.status().is_success() {
                    return Err(Error::Template(format!(
                        "failed to fetch template from {}: HTTP {}",
                        zip_url,
                        response.status()
                    )));
                }

                let bytes = response.bytes().await?.to_vec();
                Self::extract_zip_to_cache(&bytes)?
            }
            TemplateSource::Local(path) => Self::read_dir_to_cache(path)?,
        };

        Ok(cache)
    }

    /// Extract a template zip into the cache
    ///
    /// Zip entries may carry a leading `template/` directory (the published
    /// archive layout); that prefix is stripped so cache keys are
    /// template-root-relative.
    fn extract_zip_to_cache(zip_bytes: &[u8]) -> Result<TemplateCache> {
        let cursor = Cursor::new(zip_bytes);
        let mut archive = ZipArchive::new(cursor)?;

        let mut files: HashMap<String, Vec<u8>> = HashMap::new();

        for i in 0..archive.len() {
            let mut file = archive.by_index(i)?;
            if file.is_dir() {
                continue;
            }

            let full_path = file.name().to_string();
            let relative_path = full_path
                .strip_prefix("template/")
                .unwrap_or(&full_path)
                .to_string();

            if relative_path.is_empty() || copier::is_excluded(&relative_path) {
                continue;
            }

            let mut contents = Vec::new();
            file.read_to_end(&mut contents)?;
            files.insert(relative_path, contents);
        }

        Self::finish_cache(files, "template zip")
    }

    /// Walk a local template directory into the cache, pruning excluded
    /// subtrees
    fn read_dir_to_cache(template_dir: &Path) -> Result<TemplateCache> {
        if !template_dir.is_dir() {
            return Err(Error::Template(format!(
                "template directory not found: {}",
                template_dir.display()
            )));
        }

        let mut files: HashMap<String, Vec<u8>> = HashMap::new();

        let walker = WalkDir::new(template_dir)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !copier::is_excluded_name(e.file_name()));

        for entry in walker {
            let entry = entry.map_err(|e| {
                Error::Template(format!("failed to walk template directory: {e}"))
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative_path = entry
                .path()
                .strip_prefix(template_dir)
                .map_err(|_| Error::Template("template walk escaped its root".to_string()))?
                .to_string_lossy()
                .replace('\\', "/");

            let contents = std::fs::read(entry.path())?;
            files.insert(relative_path, contents);
        }

        Self::finish_cache(files, &template_dir.display().to_string())
    }

    fn finish_cache(files: HashMap<String, Vec<u8>>, origin: &str) -> Result<TemplateCache> {
        let manifest_bytes = files
            .get(MANIFEST_FILE)
            .ok_or_else(|| Error::Template(format!("{origin} is missing {MANIFEST_FILE}")))?;
        let manifest: TemplateManifest = serde_yaml::from_slice(manifest_bytes)?;

        Ok(TemplateCache { manifest, files })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_template() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(MANIFEST_FILE),
            "name: Craft.js\ndescription: AI-enabled SaaS starter\nversion: 1.0.0\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("package.json"), "{\"name\":\"craft-template\"}").unwrap();
        std::fs::write(dir.path().join("gitignore"), "node_modules\n").unwrap();
        std::fs::create_dir_all(dir.path().join("src/app")).unwrap();
        std::fs::write(dir.path().join("src/app/page.tsx"), "export default Page").unwrap();
        std::fs::create_dir_all(dir.path().join("node_modules/react")).unwrap();
        std::fs::write(dir.path().join("node_modules/react/index.js"), "x").unwrap();
        std::fs::create_dir_all(dir.path().join(".git")).unwrap();
        std::fs::write(dir.path().join(".git/HEAD"), "ref").unwrap();
        dir
    }

    #[tokio::test]
    async fn test_local_manifest() {
        let template = fixture_template();
        let mut fetcher = TemplateFetcher::from_local(template.path().to_path_buf(), "test");

        let manifest = fetcher.fetch_manifest().await.unwrap();
        assert_eq!(manifest.name, "Craft.js");
        assert_eq!(manifest.version, "1.0.0");
    }

    #[tokio::test]
    async fn test_materialize_excludes_caches_and_manifest() {
        let template = fixture_template();
        let target = tempfile::tempdir().unwrap();
        let project_dir = target.path().join("my-app");

        let mut fetcher = TemplateFetcher::from_local(template.path().to_path_buf(), "test");
        let copied = fetcher.materialize(&project_dir).await.unwrap();

        assert_eq!(copied, vec!["gitignore", "package.json", "src/app/page.tsx"]);
        assert!(project_dir.join("src/app/page.tsx").exists());
        assert!(!project_dir.join("node_modules").exists());
        assert!(!project_dir.join(".git").exists());
        assert!(!project_dir.join(MANIFEST_FILE).exists());
    }

    #[tokio::test]
    async fn test_missing_template_dir() {
        let mut fetcher = TemplateFetcher::from_local(PathBuf::from("/nonexistent/tpl"), "test");
        assert!(matches!(
            fetcher.fetch_manifest().await,
            Err(Error::Template(_))
        ));
    }
}
