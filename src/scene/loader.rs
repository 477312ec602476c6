//! Builds and places every model of a structure document.

use crate::bonds::resolve_bonds;
use crate::error::MolviewError;
use crate::geometry::GeometryBuilder;
use crate::model::StructureDocument;
use crate::options::Options;

use super::{MarkerHandle, PendingLonePair, SceneContext};

/// Counts from one load, logged at `info`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Models placed.
    pub models: usize,
    /// Atom spheres built.
    pub atoms: usize,
    /// Bond groups built.
    pub bonds: usize,
    /// Lone-pair markers attached immediately.
    pub lone_pairs: usize,
    /// Lone pairs queued until the marker asset arrives.
    pub pending_lone_pairs: usize,
    /// Bond intents without a matching counterpart.
    pub dangling: usize,
}

/// Resolve, build and place every model of `document`, appending them to
/// the scene's registry in document order.
///
/// Lone pairs are attached directly when `marker` is available and queued
/// on the scene otherwise.
///
/// # Errors
///
/// [`MolviewError::DataMissing`] when any model is absent. The whole
/// document is checked before anything is placed.
pub fn load_models(
    scene: &mut SceneContext,
    document: &StructureDocument,
    options: &Options,
    marker: Option<&MarkerHandle>,
) -> Result<LoadReport, MolviewError> {
    document.validate()?;

    let builder = GeometryBuilder::new(&options.geometry);
    let mut report = LoadReport::default();

    for (_, atoms) in document.present_models() {
        let index = scene.model_count();
        let mut root = scene.next_root(options.placement.offset(index));
        let resolution = resolve_bonds(atoms);

        for (i, atom) in atoms.iter().enumerate() {
            builder.add_atom(&mut root, scene.labels_mut(), i, atom);
            match marker {
                Some(marker) => builder.add_lone_pairs(&mut root, i, atom, marker),
                None => {
                    for &position in &atom.lone_pairs {
                        scene.pending_lone_pairs_mut().push(PendingLonePair {
                            model: index,
                            owner: i,
                            owner_position: atom.position,
                            position,
                        });
                        report.pending_lone_pairs += 1;
                    }
                }
            }
        }
        for bond in &resolution.bonds {
            builder.add_bond(&mut root, bond, atoms);
        }

        report.models += 1;
        report.atoms += root.spheres.len();
        report.bonds += root.bonds.len();
        report.lone_pairs += root.lone_pairs.len();
        report.dangling += resolution.dangling.len();
        root.dangling = resolution.dangling;
        scene.push_model(root);
    }

    log::info!(
        "loaded {} models: {} atoms, {} bonds, {} lone pairs ({} pending), {} dangling intents",
        report.models,
        report.atoms,
        report.bonds,
        report.lone_pairs,
        report.pending_lone_pairs,
        report.dangling
    );
    Ok(report)
}

/// Attach every queued lone pair using `marker`. Returns how many were
/// attached. Pairs whose model no longer exists are skipped.
pub fn attach_pending_lone_pairs(
    scene: &mut SceneContext,
    marker: &MarkerHandle,
    options: &Options,
) -> usize {
    let pending = scene.pending_lone_pairs_mut().take_all();
    if pending.is_empty() {
        return 0;
    }
    let builder = GeometryBuilder::new(&options.geometry);
    let mut attached = 0;
    let models = scene.models_mut();
    for pair in pending {
        let Some(root) = models.get_mut(pair.model) else {
            continue;
        };
        root.lone_pairs.push(builder.lone_pair(
            pair.owner,
            pair.owner_position,
            pair.position,
            marker,
        ));
        attached += 1;
    }
    scene.invalidate();
    log::debug!("attached {attached} lone pairs");
    attached
}
