use glam::DVec3;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::color::Rgb;

/// Sphere radius used when a record does not carry one.
pub const DEFAULT_ATOM_RADIUS: f64 = 0.3;

/// Bond multiplicity. Any unrecognized spelling falls back to
/// [`BondType::Single`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(from = "Option<String>", rename_all = "lowercase")]
pub enum BondType {
    /// One rod.
    #[default]
    Single,
    /// Two parallel rods.
    Double,
    /// Three parallel rods.
    Triple,
}

impl From<Option<String>> for BondType {
    fn from(kind: Option<String>) -> Self {
        match kind.as_deref().map(str::to_ascii_lowercase).as_deref() {
            Some("double") => Self::Double,
            Some("triple") => Self::Triple,
            _ => Self::Single,
        }
    }
}

/// One-sided declaration that an atom wants a bond to another atom.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BondRef {
    /// `uid` of the atom on the other end.
    #[serde(rename = "ref")]
    pub target: String,
    /// Requested bond multiplicity.
    #[serde(rename = "type", default)]
    pub kind: BondType,
}

impl BondRef {
    /// Bond intent toward `target`.
    pub fn new(target: impl Into<String>, kind: BondType) -> Self {
        Self {
            target: target.into(),
            kind,
        }
    }
}

/// A positioned, colored atom record with its outgoing bond intents.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Atom {
    /// Identifier, unique within one model.
    pub uid: String,
    /// Display name shown in the atom's label.
    #[serde(default)]
    pub name: String,
    /// Model-local position.
    pub position: DVec3,
    /// Sphere radius.
    #[serde(default = "default_radius")]
    pub radius: f64,
    /// Sphere color.
    #[serde(default)]
    pub color: Rgb,
    /// Outgoing bond intents, in declaration order.
    #[serde(default, deserialize_with = "lenient_list")]
    pub targets: Vec<BondRef>,
    /// Explicit model-local lone-pair marker positions.
    #[serde(
        default,
        rename = "lonePairs",
        alias = "lone_pairs",
        deserialize_with = "lenient_list"
    )]
    pub lone_pairs: Vec<DVec3>,
}

impl Atom {
    /// Atom with default radius and color and no targets.
    pub fn new(
        uid: impl Into<String>,
        name: impl Into<String>,
        position: DVec3,
    ) -> Self {
        Self {
            uid: uid.into(),
            name: name.into(),
            position,
            radius: DEFAULT_ATOM_RADIUS,
            color: Rgb::WHITE,
            targets: Vec::new(),
            lone_pairs: Vec::new(),
        }
    }

    /// Append a bond intent toward `target`.
    #[must_use]
    pub fn with_target(
        mut self,
        target: impl Into<String>,
        kind: BondType,
    ) -> Self {
        self.targets.push(BondRef::new(target, kind));
        self
    }

    /// Append a lone-pair marker position.
    #[must_use]
    pub fn with_lone_pair(mut self, position: DVec3) -> Self {
        self.lone_pairs.push(position);
        self
    }

    /// Label text: the name, or the uid when the name is blank.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.uid
        } else {
            &self.name
        }
    }
}

fn default_radius() -> f64 {
    DEFAULT_ATOM_RADIUS
}

/// Deserialize a list, treating a missing, null or non-array value as empty
/// and skipping entries that do not parse.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let entries = match value {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            log::warn!("expected a list, found {other}; treating as empty");
            return Ok(Vec::new());
        }
    };

    Ok(entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value(entry) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                log::warn!("skipping malformed entry: {e}");
                None
            }
        })
        .collect())
}
