//! Structure documents: one or more models, each an ordered atom list.
//!
//! Two JSON shapes are accepted:
//!
//! ```json
//! [ { "uid": "o1", ... }, { "uid": "h1", ... } ]
//! ```
//!
//! for a single model, and
//!
//! ```json
//! { "data": [ [ { "uid": "o1", ... } ], [ ... ] ] }
//! ```
//!
//! for several. A `null` model entry is kept as a hole so the loader can
//! report exactly which model is missing.

use serde_json::Value;

use super::atom::Atom;
use crate::error::MolviewError;

/// Parsed structure document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StructureDocument {
    /// Models in document order. `None` marks a model whose atom list was
    /// absent or null.
    pub models: Vec<Option<Vec<Atom>>>,
}

impl StructureDocument {
    /// Document holding a single model.
    #[must_use]
    pub fn single(atoms: Vec<Atom>) -> Self {
        Self {
            models: vec![Some(atoms)],
        }
    }

    /// Document holding several complete models.
    #[must_use]
    pub fn from_models(models: Vec<Vec<Atom>>) -> Self {
        Self {
            models: models.into_iter().map(Some).collect(),
        }
    }

    /// Parse a document from JSON text.
    ///
    /// # Errors
    ///
    /// [`MolviewError::Parse`] for malformed JSON or atom records,
    /// [`MolviewError::DataMissing`] when the document carries no data.
    pub fn from_json(text: &str) -> Result<Self, MolviewError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Interpret an already-parsed JSON value.
    ///
    /// # Errors
    ///
    /// See [`from_json`](Self::from_json).
    pub fn from_value(value: Value) -> Result<Self, MolviewError> {
        match value {
            Value::Object(mut object) => match object.remove("data") {
                Some(Value::Array(models)) => Self::from_model_list(models),
                _ => Err(MolviewError::DataMissing { model: None }),
            },
            Value::Array(items) if is_model_list(&items) => {
                Self::from_model_list(items)
            }
            Value::Array(items) => {
                let atoms = serde_json::from_value(Value::Array(items))?;
                Ok(Self::single(atoms))
            }
            _ => Err(MolviewError::DataMissing { model: None }),
        }
    }

    fn from_model_list(models: Vec<Value>) -> Result<Self, MolviewError> {
        let models = models
            .into_iter()
            .map(|model| match model {
                Value::Null => Ok(None),
                atoms => serde_json::from_value(atoms).map(Some),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { models })
    }

    /// Number of model slots, including missing ones.
    #[must_use]
    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    /// Fail on the first model whose atom list is absent.
    ///
    /// # Errors
    ///
    /// [`MolviewError::DataMissing`] naming the missing model.
    pub fn validate(&self) -> Result<(), MolviewError> {
        match self.models.iter().position(Option::is_none) {
            Some(index) => Err(MolviewError::DataMissing { model: Some(index) }),
            None => Ok(()),
        }
    }

    /// Iterate over present models with their document index.
    pub fn present_models(&self) -> impl Iterator<Item = (usize, &[Atom])> {
        self.models
            .iter()
            .enumerate()
            .filter_map(|(i, m)| m.as_deref().map(|atoms| (i, atoms)))
    }
}

/// A bare top-level array is a list of models when its entries are
/// themselves arrays (or null holes) rather than atom objects.
fn is_model_list(items: &[Value]) -> bool {
    items
        .iter()
        .find(|item| !item.is_null())
        .is_some_and(Value::is_array)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WATER: &str = r#"[
        {"uid": "o", "name": "O", "position": [0, 0, 0],
         "targets": [{"ref": "h1"}, {"ref": "h2"}]},
        {"uid": "h1", "name": "H", "position": [0.8, 0.6, 0],
         "targets": [{"ref": "o"}]},
        {"uid": "h2", "name": "H", "position": [-0.8, 0.6, 0],
         "targets": [{"ref": "o"}]}
    ]"#;

    #[test]
    fn bare_atom_list_is_one_model() {
        let doc = StructureDocument::from_json(WATER).unwrap();
        assert_eq!(doc.model_count(), 1);
        assert_eq!(doc.models[0].as_ref().unwrap().len(), 3);
    }

    #[test]
    fn data_wrapper_holds_many_models() {
        let text = format!(r#"{{"data": [{WATER}, {WATER}]}}"#);
        let doc = StructureDocument::from_json(&text).unwrap();
        assert_eq!(doc.model_count(), 2);
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn null_model_is_reported_by_index() {
        let text = format!(r#"{{"data": [{WATER}, null]}}"#);
        let doc = StructureDocument::from_json(&text).unwrap();
        assert!(matches!(
            doc.validate(),
            Err(MolviewError::DataMissing { model: Some(1) })
        ));
        assert_eq!(doc.present_models().count(), 1);
    }

    #[test]
    fn documents_without_data_are_missing() {
        for text in ["null", "{}", r#"{"data": 4}"#, "12"] {
            assert!(
                matches!(
                    StructureDocument::from_json(text),
                    Err(MolviewError::DataMissing { model: None })
                ),
                "{text} should be reported as missing data"
            );
        }
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            StructureDocument::from_json("[{"),
            Err(MolviewError::Parse(_))
        ));
    }
}
