use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Arrangement of the two outer rods of a triple bond.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum TripleBondLayout {
    /// Outer rods at `+offset` and `-offset`, centered on the bond axis.
    #[default]
    Symmetric,
    /// Both outer rods at `+offset`, overlapping on one side of the axis.
    OneSided,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Geometry", inline)]
#[serde(default)]
/// Primitive dimensions for atoms, bonds and lone-pair markers.
pub struct GeometryOptions {
    /// Rod radius for single bonds.
    #[schemars(title = "Single Bond Radius", range(min = 0.01, max = 0.3), extend("step" = 0.005))]
    pub single_bond_radius: f64,
    /// Rod radius for each rod of a double bond.
    #[schemars(title = "Double Bond Radius", range(min = 0.01, max = 0.3), extend("step" = 0.005))]
    pub double_bond_radius: f64,
    /// Lateral distance of each double-bond rod from the bond axis.
    #[schemars(skip)]
    pub double_bond_offset: f64,
    /// Rod radius for each rod of a triple bond.
    #[schemars(title = "Triple Bond Radius", range(min = 0.01, max = 0.3), extend("step" = 0.005))]
    pub triple_bond_radius: f64,
    /// Lateral distance of the outer triple-bond rods from the bond axis.
    #[schemars(skip)]
    pub triple_bond_offset: f64,
    /// Outer rod arrangement for triple bonds.
    #[schemars(title = "Triple Bond Layout")]
    pub triple_bond_layout: TripleBondLayout,
    /// Tessellation hint for atom spheres (segments around and across).
    #[schemars(skip)]
    pub sphere_segments: u32,
    /// Uniform scale applied to the lone-pair marker asset.
    #[schemars(title = "Lone Pair Scale", range(min = 0.05, max = 1.0), extend("step" = 0.05))]
    pub lone_pair_scale: f64,
}

impl Default for GeometryOptions {
    fn default() -> Self {
        Self {
            single_bond_radius: 0.05,
            double_bond_radius: 0.042,
            double_bond_offset: 0.05,
            triple_bond_radius: 0.039,
            triple_bond_offset: 0.08,
            triple_bond_layout: TripleBondLayout::Symmetric,
            sphere_segments: 64,
            lone_pair_scale: 0.3,
        }
    }
}
