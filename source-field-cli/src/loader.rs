use anyhow::{Context, Result, anyhow};
use serde::de::DeserializeOwned;
use source_field::{FieldSettings, SourceCatalog};
use std::fs;
use std::path::Path;
use tracing::info;

/// File formats accepted for catalog and settings files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    /// Format by extension; anything that is not `.yaml`/`.yml` is read as JSON.
    #[must_use]
    pub fn for_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

/// Parse `content` in the given format.
///
/// # Errors
/// Returns an error if the content does not parse into `T`.
pub fn parse<T: DeserializeOwned>(content: &str, format: FileFormat) -> Result<T> {
    match format {
        FileFormat::Json => Ok(serde_json::from_str(content)?),
        FileFormat::Yaml => serde_saphyr::from_str(content).map_err(|e| anyhow!("{e}")),
    }
}

fn load<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {what} file {}", path.display()))?;
    let value = parse(&content, FileFormat::for_path(path))
        .with_context(|| format!("Failed to parse {what} file {}", path.display()))?;
    info!(path = %path.display(), "loaded {what}");
    Ok(value)
}

/// Load a source catalog, or an empty one (no commerce) when no path is given.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load_catalog(path: Option<&Path>) -> Result<SourceCatalog> {
    path.map_or_else(|| Ok(SourceCatalog::default()), |p| load(p, "catalog"))
}

/// Load field settings, or the defaults when no path is given.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load_settings(path: Option<&Path>) -> Result<FieldSettings> {
    path.map_or_else(|| Ok(FieldSettings::default()), |p| load(p, "field settings"))
}
