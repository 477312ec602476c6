//! Geometry building: spheres, bond rods and lone-pair markers in
//! model-local coordinates, plus impostor instance packing.

mod builder;
pub mod instances;
mod orient;
mod primitives;

pub use builder::GeometryBuilder;
pub use orient::{look_rotation, quarter_turn_x};
pub use primitives::{
    BondPrimitive, Label, LonePairPrimitive, Rod, RodSegment, SpherePrimitive,
};
