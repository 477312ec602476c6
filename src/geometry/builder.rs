//! Maps atoms, resolved bonds and lone pairs to primitives under a model's
//! local root.
//!
//! The builder never looks at global scene state: it only receives the
//! root (and the label registry) it should add to.

use glam::DVec3;

use super::orient::{look_rotation, quarter_turn_x};
use super::primitives::{
    BondPrimitive, Label, LonePairPrimitive, Rod, SpherePrimitive,
};
use crate::bonds::ResolvedBond;
use crate::model::{Atom, BondType};
use crate::options::{GeometryOptions, TripleBondLayout};
use crate::scene::{LabelRegistry, MarkerHandle, ModelRoot};

/// Builds primitives using one set of geometry options.
#[derive(Debug, Clone, Copy)]
pub struct GeometryBuilder<'a> {
    options: &'a GeometryOptions,
}

impl<'a> GeometryBuilder<'a> {
    /// Builder using `options` for every primitive it produces.
    #[must_use]
    pub fn new(options: &'a GeometryOptions) -> Self {
        Self { options }
    }

    /// Sphere for the atom at `index`.
    #[must_use]
    pub fn sphere(&self, index: usize, atom: &Atom) -> SpherePrimitive {
        SpherePrimitive {
            atom: index,
            center: atom.position,
            radius: atom.radius,
            color: atom.color,
            segments: self.options.sphere_segments,
        }
    }

    /// Rod layout for a bond of the given multiplicity.
    #[must_use]
    pub fn rods(&self, kind: BondType) -> Vec<Rod> {
        let o = self.options;
        match kind {
            BondType::Single => vec![Rod {
                lateral_offset: 0.0,
                radius: o.single_bond_radius,
            }],
            BondType::Double => [o.double_bond_offset, -o.double_bond_offset]
                .into_iter()
                .map(|lateral_offset| Rod {
                    lateral_offset,
                    radius: o.double_bond_radius,
                })
                .collect(),
            BondType::Triple => {
                let far = match o.triple_bond_layout {
                    TripleBondLayout::Symmetric => -o.triple_bond_offset,
                    TripleBondLayout::OneSided => o.triple_bond_offset,
                };
                [o.triple_bond_offset, 0.0, far]
                    .into_iter()
                    .map(|lateral_offset| Rod {
                        lateral_offset,
                        radius: o.triple_bond_radius,
                    })
                    .collect()
            }
        }
    }

    /// Bond group from `atoms[bond.a]` toward `atoms[bond.b]`.
    #[must_use]
    pub fn bond(&self, bond: &ResolvedBond, atoms: &[Atom]) -> BondPrimitive {
        let from = atoms[bond.a].position;
        let to = atoms[bond.b].position;
        let midpoint = (from + to) / 2.0;

        BondPrimitive {
            a: bond.a,
            b: bond.b,
            kind: bond.kind,
            midpoint,
            length: from.distance(to),
            orientation: look_rotation(to - midpoint, DVec3::Y),
            rods: self.rods(bond.kind),
        }
    }

    /// Lone-pair marker at `position`, facing the owning atom.
    #[must_use]
    pub fn lone_pair(
        &self,
        owner: usize,
        owner_position: DVec3,
        position: DVec3,
        marker: &MarkerHandle,
    ) -> LonePairPrimitive {
        let facing = look_rotation(owner_position - position, DVec3::Y);
        LonePairPrimitive {
            owner,
            position,
            orientation: facing * quarter_turn_x(),
            scale: self.options.lone_pair_scale,
            marker: marker.clone(),
        }
    }

    /// Add the atom's sphere to `root` and register its label.
    pub fn add_atom(
        &self,
        root: &mut ModelRoot,
        labels: &mut LabelRegistry,
        index: usize,
        atom: &Atom,
    ) {
        root.spheres.push(self.sphere(index, atom));
        let id = labels.register(Label {
            text: atom.display_name().to_owned(),
            model: root.index,
            anchor: atom.position,
        });
        root.labels.push(id);
    }

    /// Add a bond group to `root`.
    pub fn add_bond(
        &self,
        root: &mut ModelRoot,
        bond: &ResolvedBond,
        atoms: &[Atom],
    ) {
        root.bonds.push(self.bond(bond, atoms));
    }

    /// Add every lone pair of `atoms[owner]` to `root`.
    pub fn add_lone_pairs(
        &self,
        root: &mut ModelRoot,
        owner: usize,
        atom: &Atom,
        marker: &MarkerHandle,
    ) {
        for &position in &atom.lone_pairs {
            root.lone_pairs
                .push(self.lone_pair(owner, atom.position, position, marker));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: DVec3, b: DVec3) {
        assert!((a - b).length() < 1e-9, "{a} != {b}");
    }

    fn pair() -> Vec<Atom> {
        vec![
            Atom::new("c1", "C", DVec3::new(0.0, 0.0, 0.0)),
            Atom::new("c2", "C", DVec3::new(0.0, 0.0, 1.2)),
        ]
    }

    fn bond(kind: BondType) -> ResolvedBond {
        ResolvedBond { a: 0, b: 1, kind }
    }

    #[test]
    fn single_bond_spans_its_atoms() {
        let options = GeometryOptions::default();
        let builder = GeometryBuilder::new(&options);
        let atoms = pair();
        let primitive = builder.bond(&bond(BondType::Single), &atoms);

        assert_close(primitive.midpoint, DVec3::new(0.0, 0.0, 0.6));
        assert!((primitive.length - 1.2).abs() < 1e-12);
        assert_close(primitive.axis(), DVec3::Z);

        let segments = primitive.rod_segments();
        assert_eq!(segments.len(), 1);
        assert_close(segments[0].start, atoms[0].position);
        assert_close(segments[0].end, atoms[1].position);
        assert_eq!(segments[0].radius, 0.05);
        // The rod mesh's own Y axis ends up along the bond.
        assert_close(primitive.rod_orientation() * DVec3::Y, DVec3::Z);
    }

    #[test]
    fn double_bond_rods_straddle_the_axis() {
        let options = GeometryOptions::default();
        let builder = GeometryBuilder::new(&options);
        let atoms = vec![
            Atom::new("a", "A", DVec3::ZERO),
            Atom::new("b", "B", DVec3::new(2.0, 0.0, 0.0)),
        ];
        let primitive = builder.bond(&bond(BondType::Double), &atoms);
        let segments = primitive.rod_segments();

        assert_eq!(segments.len(), 2);
        assert!(segments.iter().all(|s| s.radius == 0.042));
        let centers: Vec<DVec3> =
            segments.iter().map(|s| (s.start + s.end) / 2.0).collect();
        assert!((centers[0].distance(centers[1]) - 0.1).abs() < 1e-9);
        assert_close((centers[0] + centers[1]) / 2.0, primitive.midpoint);
        for s in &segments {
            assert_close((s.end - s.start).normalize(), DVec3::X);
        }
    }

    #[test]
    fn triple_bond_layouts() {
        let mut options = GeometryOptions::default();
        let offsets = |options: &GeometryOptions| -> Vec<f64> {
            GeometryBuilder::new(options)
                .rods(BondType::Triple)
                .iter()
                .map(|r| r.lateral_offset)
                .collect()
        };
        assert_eq!(offsets(&options), vec![0.08, 0.0, -0.08]);

        options.triple_bond_layout = TripleBondLayout::OneSided;
        assert_eq!(offsets(&options), vec![0.08, 0.0, 0.08]);
        assert!(GeometryBuilder::new(&options)
            .rods(BondType::Triple)
            .iter()
            .all(|r| r.radius == 0.039));
    }

    #[test]
    fn coincident_atoms_do_not_produce_nan() {
        let options = GeometryOptions::default();
        let builder = GeometryBuilder::new(&options);
        let atoms = vec![
            Atom::new("a", "A", DVec3::ONE),
            Atom::new("b", "B", DVec3::ONE),
        ];
        let primitive = builder.bond(&bond(BondType::Single), &atoms);
        assert_eq!(primitive.length, 0.0);
        assert!(primitive.orientation.is_finite());
        assert!(primitive.rod_segments()[0].start.is_finite());
    }

    #[test]
    fn lone_pair_faces_its_owner() {
        let options = GeometryOptions::default();
        let builder = GeometryBuilder::new(&options);
        let marker = MarkerHandle::new(7, "lone-pair");
        let owner = DVec3::new(1.0, 1.0, 1.0);
        let position = DVec3::new(1.0, 1.0, 2.0);
        let lone = builder.lone_pair(0, owner, position, &marker);

        assert_eq!(lone.position, position);
        assert_eq!(lone.scale, 0.3);
        // After the corrective quarter turn, the marker's Y axis faces the
        // owning atom.
        assert_close(lone.orientation * DVec3::Y, -DVec3::Z);
        assert_eq!(lone.marker, marker);
    }

    #[test]
    fn atoms_register_labels_with_their_root() {
        let options = GeometryOptions::default();
        let builder = GeometryBuilder::new(&options);
        let mut labels = LabelRegistry::default();
        let mut root = ModelRoot::new(2, DVec3::new(30.0, 30.0, 0.0));
        let atom = Atom::new("o1", "O", DVec3::new(0.5, 0.0, 0.0));

        builder.add_atom(&mut root, &mut labels, 0, &atom);

        assert_eq!(root.spheres.len(), 1);
        assert_eq!(root.labels.len(), 1);
        let label = labels.get(root.labels[0]).unwrap();
        assert_eq!(label.text, "O");
        assert_eq!(label.model, 2);
        assert_eq!(label.anchor, atom.position);
    }
}
