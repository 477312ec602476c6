//! Crate-level error types.

use std::fmt;

use web_time::Duration;

/// Errors produced by the molview crate.
#[derive(Debug)]
pub enum MolviewError {
    /// The structure document, or one of its models, has no atom list.
    /// `model` is the 0-based index of the missing model, `None` when the
    /// whole document is absent.
    DataMissing {
        /// Index of the missing model, if a specific one.
        model: Option<usize>,
    },
    /// The structure document is not valid JSON of the expected shape.
    Parse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Failed to spawn a background thread.
    ThreadSpawn(std::io::Error),
    /// Fetching a structure document over the network failed.
    Fetch(String),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// The lone-pair marker asset did not arrive in time.
    AssetTimeout {
        /// How long the scene waited before giving up.
        waited: Duration,
    },
}

impl fmt::Display for MolviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DataMissing { model: Some(index) } => {
                write!(f, "data not found for model {}", index + 1)
            }
            Self::DataMissing { model: None } => {
                write!(f, "structure document has no data")
            }
            Self::Parse(msg) => write!(f, "structure parse error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ThreadSpawn(e) => {
                write!(f, "failed to spawn thread: {e}")
            }
            Self::Fetch(msg) => write!(f, "fetch error: {msg}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::AssetTimeout { waited } => write!(
                f,
                "lone-pair marker asset not ready after {:.1}s",
                waited.as_secs_f64()
            ),
        }
    }
}

impl std::error::Error for MolviewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) | Self::ThreadSpawn(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MolviewError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for MolviewError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_model_is_reported_one_based() {
        let err = MolviewError::DataMissing { model: Some(2) };
        assert_eq!(err.to_string(), "data not found for model 3");
    }

    #[test]
    fn io_errors_keep_their_source() {
        use std::error::Error;

        let err = MolviewError::from(std::io::Error::other("disk"));
        assert!(err.source().is_some());
        assert!(MolviewError::Parse("x".into()).source().is_none());
    }
}
