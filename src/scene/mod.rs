//! Scene context: placed models, the label registry, lone pairs waiting for
//! their marker asset, and a generation counter the host uses to detect
//! changes.
//!
//! Everything the loader and geometry builder produce lives here. There is
//! no global state: the engine owns one [`SceneContext`] and hands out
//! shared references to the host.

pub mod loader;
mod markers;

use glam::DVec3;
pub use markers::{
    marker_channel, LonePairQueue, MarkerHandle, MarkerReceiver, MarkerSender,
    PendingLonePair,
};

use crate::bonds::DanglingIntent;
use crate::geometry::{BondPrimitive, Label, LonePairPrimitive, SpherePrimitive};

/// Local root node of one placed model. All primitives are model-local;
/// `offset` places the root in the world.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRoot {
    /// 0-based registry index.
    pub index: usize,
    /// World position of the root.
    pub offset: DVec3,
    /// Atom spheres, in atom order.
    pub spheres: Vec<SpherePrimitive>,
    /// Bond groups.
    pub bonds: Vec<BondPrimitive>,
    /// Lone-pair markers.
    pub lone_pairs: Vec<LonePairPrimitive>,
    /// Labels registered for this model's atoms.
    pub labels: Vec<LabelId>,
    /// Bond intents the resolver could not match.
    pub dangling: Vec<DanglingIntent>,
}

impl ModelRoot {
    /// Empty root at `offset`.
    #[must_use]
    pub fn new(index: usize, offset: DVec3) -> Self {
        Self {
            index,
            offset,
            spheres: Vec::new(),
            bonds: Vec::new(),
            lone_pairs: Vec::new(),
            labels: Vec::new(),
            dangling: Vec::new(),
        }
    }

    /// 1-based navigation ordinal.
    #[must_use]
    pub fn ordinal(&self) -> usize {
        self.index + 1
    }

    /// World position of the root (the focus destination for this model).
    #[must_use]
    pub fn position(&self) -> DVec3 {
        self.offset
    }

    /// World position of a model-local point.
    #[must_use]
    pub fn to_world(&self, local: DVec3) -> DVec3 {
        self.offset + local
    }
}

/// Identifier of a registered label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LabelId(usize);

/// Every label in the scene, so they can be drawn and removed together.
#[derive(Debug, Clone, Default)]
pub struct LabelRegistry {
    labels: Vec<Label>,
}

impl LabelRegistry {
    /// Register a label.
    pub fn register(&mut self, label: Label) -> LabelId {
        self.labels.push(label);
        LabelId(self.labels.len() - 1)
    }

    /// Look up a label.
    #[must_use]
    pub fn get(&self, id: LabelId) -> Option<&Label> {
        self.labels.get(id.0)
    }

    /// Iterate all labels.
    pub fn iter(&self) -> impl Iterator<Item = (LabelId, &Label)> {
        self.labels
            .iter()
            .enumerate()
            .map(|(i, label)| (LabelId(i), label))
    }

    /// Number of registered labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether no labels are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Remove every label. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.labels.len();
        self.labels.clear();
        removed
    }
}

/// The scene.
#[derive(Debug, Default)]
pub struct SceneContext {
    models: Vec<ModelRoot>,
    labels: LabelRegistry,
    pending_lone_pairs: LonePairQueue,
    /// Monotonically increasing generation; bumped on any mutation.
    generation: u64,
    /// Generation that was last consumed by the renderer.
    rendered_generation: u64,
}

impl SceneContext {
    /// Empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn invalidate(&mut self) {
        self.generation += 1;
    }

    /// Whether scene data changed since last `mark_rendered()`.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.generation != self.rendered_generation
    }

    /// Mark current generation as rendered.
    pub fn mark_rendered(&mut self) {
        self.rendered_generation = self.generation;
    }

    /// Current generation.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Placed models in registry order.
    #[must_use]
    pub fn models(&self) -> &[ModelRoot] {
        &self.models
    }

    /// Number of placed models.
    #[must_use]
    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    /// Model by 1-based ordinal.
    #[must_use]
    pub fn model(&self, ordinal: usize) -> Option<&ModelRoot> {
        ordinal.checked_sub(1).and_then(|i| self.models.get(i))
    }

    /// Label registry.
    #[must_use]
    pub fn labels(&self) -> &LabelRegistry {
        &self.labels
    }

    /// Lone pairs waiting for the marker asset.
    #[must_use]
    pub fn pending_lone_pairs(&self) -> &LonePairQueue {
        &self.pending_lone_pairs
    }

    pub(crate) fn pending_lone_pairs_mut(&mut self) -> &mut LonePairQueue {
        &mut self.pending_lone_pairs
    }

    pub(crate) fn models_mut(&mut self) -> &mut [ModelRoot] {
        &mut self.models
    }

    /// Start a new model root at the end of the registry.
    pub(crate) fn next_root(&self, offset: DVec3) -> ModelRoot {
        ModelRoot::new(self.models.len(), offset)
    }

    /// Append a built model root.
    pub(crate) fn push_model(&mut self, root: ModelRoot) {
        self.models.push(root);
        self.invalidate();
    }

    /// Split borrow for building a root while registering labels.
    pub(crate) fn labels_mut(&mut self) -> &mut LabelRegistry {
        &mut self.labels
    }

    /// Sum of primitives across all models (spheres, bond groups, lone
    /// pairs).
    #[must_use]
    pub fn primitive_count(&self) -> usize {
        self.models
            .iter()
            .map(|m| m.spheres.len() + m.bonds.len() + m.lone_pairs.len())
            .sum()
    }

    /// Remove every model, label and pending lone pair.
    pub fn clear(&mut self) {
        let models = self.models.len();
        self.models.clear();
        let labels = self.labels.clear();
        self.pending_lone_pairs.clear();
        self.invalidate();
        log::debug!("scene cleared ({models} models, {labels} labels)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(model: usize) -> Label {
        Label {
            text: "C".into(),
            model,
            anchor: DVec3::ZERO,
        }
    }

    #[test]
    fn ordinals_are_one_based() {
        let mut scene = SceneContext::new();
        let root = scene.next_root(DVec3::ZERO);
        scene.push_model(root);
        let root = scene.next_root(DVec3::splat(15.0));
        scene.push_model(root);

        assert!(scene.model(0).is_none());
        assert_eq!(scene.model(2).map(ModelRoot::position), Some(DVec3::splat(15.0)));
        assert_eq!(scene.model(2).map(ModelRoot::ordinal), Some(2));
        assert!(scene.model(3).is_none());
    }

    #[test]
    fn clear_removes_everything_and_dirties() {
        let mut scene = SceneContext::new();
        let mut root = scene.next_root(DVec3::ZERO);
        let id = scene.labels_mut().register(label(0));
        root.labels.push(id);
        scene.push_model(root);
        scene.pending_lone_pairs_mut().push(PendingLonePair {
            model: 0,
            owner: 0,
            owner_position: DVec3::ZERO,
            position: DVec3::Y,
        });
        scene.mark_rendered();
        assert!(!scene.is_dirty());

        scene.clear();

        assert_eq!(scene.model_count(), 0);
        assert!(scene.labels().is_empty());
        assert!(scene.pending_lone_pairs().is_empty());
        assert!(scene.is_dirty());
    }

    #[test]
    fn label_ids_resolve() {
        let mut labels = LabelRegistry::default();
        let a = labels.register(label(0));
        let b = labels.register(label(1));
        assert_ne!(a, b);
        assert_eq!(labels.get(b).map(|l| l.model), Some(1));
        assert_eq!(labels.iter().count(), 2);
        assert_eq!(labels.clear(), 2);
        assert!(labels.get(a).is_none());
    }
}
