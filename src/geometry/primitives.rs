//! Placeable primitive descriptions, expressed in model-local coordinates.
//!
//! The host renderer turns these into meshes (or instanced impostors) under
//! the owning model's root node.

use glam::{DQuat, DVec3};

use super::orient::quarter_turn_x;
use crate::model::{BondType, Rgb};
use crate::scene::MarkerHandle;

/// Atom sphere.
#[derive(Debug, Clone, PartialEq)]
pub struct SpherePrimitive {
    /// Index of the atom within its model.
    pub atom: usize,
    /// Model-local center.
    pub center: DVec3,
    /// Sphere radius.
    pub radius: f64,
    /// Surface color.
    pub color: Rgb,
    /// Tessellation hint (segments around and across).
    pub segments: u32,
}

/// One cylinder of a bond, described in the bond group's frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rod {
    /// Offset along the group's local X axis.
    pub lateral_offset: f64,
    /// Cylinder radius.
    pub radius: f64,
}

/// A rod resolved to model-local endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RodSegment {
    /// End nearest the bond's first atom.
    pub start: DVec3,
    /// End nearest the bond's second atom.
    pub end: DVec3,
    /// Cylinder radius.
    pub radius: f64,
}

/// A bond: a group placed at the midpoint of its atoms, oriented so its
/// local +Z axis points at the second atom, holding one to three rods.
#[derive(Debug, Clone, PartialEq)]
pub struct BondPrimitive {
    /// Index of the first atom.
    pub a: usize,
    /// Index of the second atom.
    pub b: usize,
    /// Bond multiplicity.
    pub kind: BondType,
    /// Model-local group position.
    pub midpoint: DVec3,
    /// Rod length (distance between the atoms).
    pub length: f64,
    /// Group rotation.
    pub orientation: DQuat,
    /// Rods in the group.
    pub rods: Vec<Rod>,
}

impl BondPrimitive {
    /// Unit direction from the first atom toward the second.
    #[must_use]
    pub fn axis(&self) -> DVec3 {
        self.orientation * DVec3::Z
    }

    /// Rotation of each rod mesh: the group rotation composed with the
    /// quarter turn that lays a Y-aligned cylinder along the group's Z axis.
    #[must_use]
    pub fn rod_orientation(&self) -> DQuat {
        self.orientation * quarter_turn_x()
    }

    /// Model-local center of `rod`.
    #[must_use]
    pub fn rod_center(&self, rod: &Rod) -> DVec3 {
        self.midpoint + self.orientation * DVec3::new(rod.lateral_offset, 0.0, 0.0)
    }

    /// Every rod as a model-local segment.
    #[must_use]
    pub fn rod_segments(&self) -> Vec<RodSegment> {
        let half = self.axis() * (self.length / 2.0);
        self.rods
            .iter()
            .map(|rod| {
                let center = self.rod_center(rod);
                RodSegment {
                    start: center - half,
                    end: center + half,
                    radius: rod.radius,
                }
            })
            .collect()
    }
}

/// Lone-pair marker: a clone of the marker asset, facing its owning atom.
#[derive(Debug, Clone, PartialEq)]
pub struct LonePairPrimitive {
    /// Index of the owning atom.
    pub owner: usize,
    /// Model-local marker position.
    pub position: DVec3,
    /// Marker rotation.
    pub orientation: DQuat,
    /// Uniform marker scale.
    pub scale: f64,
    /// The marker asset to clone.
    pub marker: MarkerHandle,
}

/// Text label anchored on an atom.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    /// Label text (the atom's display name).
    pub text: String,
    /// 0-based registry index of the model the label belongs to.
    pub model: usize,
    /// Model-local anchor position.
    pub anchor: DVec3,
}
