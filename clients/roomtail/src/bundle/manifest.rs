//! Bundle Manifest
//!
//! Models the packaging input consumed by the bundler: named entry points,
//! an output naming pattern, the rebuild-on-change flag, and the extensions
//! the bundler resolves.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Placeholder substituted with the entry name in output filenames
const NAME_PLACEHOLDER: &str = "[name]";

/// Structural problems in a bundle manifest
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("manifest has no entry points")]
    NoEntries,

    #[error("output filename pattern {0:?} is missing the [name] placeholder")]
    MissingNamePlaceholder(String),

    #[error("resolve extension {0:?} must start with a dot")]
    BadExtension(String),
}

/// Bundle manifest loaded from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleManifest {
    /// Named entry points, bundle name to source file
    pub entry: BTreeMap<String, PathBuf>,

    /// Output naming settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Rebuild bundles whenever a source file changes
    #[serde(default)]
    pub watch: bool,

    /// Module resolution settings
    #[serde(default)]
    pub resolve: ResolveConfig,
}

/// Output naming settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Output filename pattern; `[name]` is replaced per entry
    #[serde(default = "default_filename")]
    pub filename: String,
}

/// Module resolution settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveConfig {
    /// Extensions tried when resolving imports, dot-prefixed
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

// Default value functions
fn default_filename() -> String {
    "dist/[name].bundle.js".to_string()
}

fn default_extensions() -> Vec<String> {
    vec![".js".to_string(), ".ts".to_string()]
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            filename: default_filename(),
        }
    }
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
        }
    }
}

impl BundleManifest {
    /// Load a manifest from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read bundle manifest: {}", path.display()))?;

        let manifest: BundleManifest = toml::from_str(&content)
            .with_context(|| format!("Failed to parse bundle manifest: {}", path.display()))?;

        Ok(manifest)
    }

    /// Output path for a named entry, with `[name]` substituted
    pub fn output_path(&self, name: &str) -> PathBuf {
        PathBuf::from(self.output.filename.replace(NAME_PLACEHOLDER, name))
    }

    /// Whether the bundler would resolve the given source path
    pub fn resolves(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.resolve
            .extensions
            .iter()
            .any(|e| e.trim_start_matches('.') == ext)
    }

    /// Check the manifest for structural problems
    pub fn validate(&self) -> std::result::Result<(), ManifestError> {
        if self.entry.is_empty() {
            return Err(ManifestError::NoEntries);
        }
        if !self.output.filename.contains(NAME_PLACEHOLDER) {
            return Err(ManifestError::MissingNamePlaceholder(
                self.output.filename.clone(),
            ));
        }
        if let Some(bad) = self.resolve.extensions.iter().find(|e| !e.starts_with('.')) {
            return Err(ManifestError::BadExtension(bad.clone()));
        }
        Ok(())
    }
}
