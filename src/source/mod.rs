//! Where structure documents come from.
//!
//! A [`StructureSource`] produces the raw JSON text of a document. Sources
//! are fetched on a background thread by the [`ReloadWorker`], so they must
//! be `Send + Sync`.

mod worker;

use std::fmt;
use std::path::PathBuf;

pub use worker::{ReloadResult, ReloadWorker};

use crate::error::MolviewError;

/// Produces the JSON text of a structure document.
pub trait StructureSource: Send + Sync + fmt::Debug {
    /// Fetch the document text.
    ///
    /// # Errors
    ///
    /// Source-specific I/O or network failures.
    fn fetch(&self) -> Result<String, MolviewError>;

    /// Short description for logs.
    fn describe(&self) -> String;
}

/// Document read from a local file on every fetch.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Source reading `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StructureSource for FileSource {
    fn fetch(&self) -> Result<String, MolviewError> {
        Ok(std::fs::read_to_string(&self.path)?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Document held in memory.
#[derive(Debug, Clone)]
pub struct InlineSource {
    text: String,
}

impl InlineSource {
    /// Source returning `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl StructureSource for InlineSource {
    fn fetch(&self) -> Result<String, MolviewError> {
        Ok(self.text.clone())
    }

    fn describe(&self) -> String {
        format!("inline ({} bytes)", self.text.len())
    }
}

/// Document downloaded over HTTP(S).
#[cfg(feature = "fetch")]
#[derive(Debug, Clone)]
pub struct UrlSource {
    url: String,
}

#[cfg(feature = "fetch")]
impl UrlSource {
    /// Source downloading `url`.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[cfg(feature = "fetch")]
impl StructureSource for UrlSource {
    fn fetch(&self) -> Result<String, MolviewError> {
        log::info!("downloading {}", self.url);
        ureq::get(&self.url)
            .call()
            .map_err(|e| {
                MolviewError::Fetch(format!("failed to download {}: {e}", self.url))
            })?
            .into_body()
            .read_to_string()
            .map_err(|e| MolviewError::Fetch(format!("failed to read response: {e}")))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Whether `input` looks like an HTTP(S) URL.
#[must_use]
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Pick a source for a command-line style input: URLs are downloaded,
/// anything else is a file path.
///
/// # Errors
///
/// [`MolviewError::Fetch`] for a URL when the crate was built without the
/// `fetch` feature.
pub fn source_for(input: &str) -> Result<Box<dyn StructureSource>, MolviewError> {
    if is_url(input) {
        #[cfg(feature = "fetch")]
        return Ok(Box::new(UrlSource::new(input)));
        #[cfg(not(feature = "fetch"))]
        return Err(MolviewError::Fetch(format!(
            "cannot download {input}: built without the `fetch` feature"
        )));
    }
    Ok(Box::new(FileSource::new(input)))
}
