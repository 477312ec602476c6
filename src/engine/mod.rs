//! The frame-driven engine tying scene, camera, input and reloads
//! together.
//!
//! The host calls [`MolviewEngine::update`] once per rendered frame and
//! then reads [`MolviewEngine::scene`] and [`MolviewEngine::rig`] to draw.
//! User actions arrive as [`MolviewCommand`]s through
//! [`MolviewEngine::execute`].

mod command;
mod navigation;

use std::collections::VecDeque;
use std::sync::Arc;

pub use command::MolviewCommand;
pub use navigation::Navigator;
use serde::Serialize;
use web_time::Instant;

use crate::camera::{CameraRig, FocusController, FocusParams, FocusStatus, FocusToken};
use crate::error::MolviewError;
use crate::input::{InputEvent, InputProcessor};
use crate::model::StructureDocument;
use crate::options::Options;
use crate::scene::loader::{attach_pending_lone_pairs, load_models, LoadReport};
use crate::scene::{marker_channel, MarkerReceiver, MarkerSender, SceneContext};
use crate::source::{ReloadWorker, StructureSource};
use crate::util::frame_loop::{FrameGate, FrameLoop};

/// What one call to [`MolviewEngine::update`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStatus {
    /// Whether the frame ran, resumed from a pause, or was skipped.
    pub gate: FrameGate,
    /// Focus controller outcome for this frame.
    pub focus: FocusStatus,
    /// Report of a reload applied this frame.
    pub reloaded: Option<LoadReport>,
    /// Lone pairs attached this frame after the marker arrived.
    pub attached_lone_pairs: usize,
}

impl FrameStatus {
    fn skipped(gate: FrameGate) -> Self {
        Self {
            gate,
            focus: FocusStatus::Idle,
            reloaded: None,
            attached_lone_pairs: 0,
        }
    }
}

/// Snapshot for the host's control panel, serialized to JSON for webview
/// panels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PanelState {
    /// Auto-rotate switch state.
    pub auto_rotate: bool,
    /// Number of placed models (the selector's range).
    pub model_count: usize,
    /// Focused 1-based ordinal.
    pub focused: usize,
    /// Whether a focus is in flight.
    pub focusing: bool,
    /// Smoothed frames per second.
    pub fps: f32,
}

/// Molecular structure viewer core.
#[derive(Debug)]
pub struct MolviewEngine {
    options: Options,
    scene: SceneContext,
    rig: CameraRig,
    focus: FocusController,
    navigator: Navigator,
    input: InputProcessor,
    frame_loop: FrameLoop,
    pause_requested: bool,
    worker: ReloadWorker,
    source: Option<Arc<dyn StructureSource>>,
    marker_tx: MarkerSender,
    marker_rx: MarkerReceiver,
    /// Failures not yet returned from `update`, oldest first.
    failures: VecDeque<MolviewError>,
}

impl MolviewEngine {
    /// Engine with an empty scene and the rig at its home pose.
    #[must_use]
    pub fn new(options: Options) -> Self {
        let (marker_tx, marker_rx) = marker_channel();
        Self {
            rig: CameraRig::from_options(&options.camera),
            focus: FocusController::new(FocusParams::from(&options.focus)),
            input: InputProcessor::with_key_bindings(options.keybindings.clone()),
            options,
            scene: SceneContext::new(),
            navigator: Navigator::new(),
            frame_loop: FrameLoop::new(),
            pause_requested: false,
            worker: ReloadWorker::new(),
            source: None,
            marker_tx,
            marker_rx,
            failures: VecDeque::new(),
        }
    }

    // -- Accessors --

    /// The scene the host draws.
    #[must_use]
    pub fn scene(&self) -> &SceneContext {
        &self.scene
    }

    /// Mark the scene as drawn.
    pub fn mark_rendered(&mut self) {
        self.scene.mark_rendered();
    }

    /// Camera position and orbit target the host mirrors.
    #[must_use]
    pub fn rig(&self) -> &CameraRig {
        &self.rig
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace the options. Focus easing, key bindings and rotation speed
    /// apply immediately; placement and geometry apply on the next load.
    ///
    /// # Errors
    ///
    /// [`MolviewError::OptionsParse`] when [`Options::validate`] rejects
    /// them; the current options are kept.
    pub fn set_options(&mut self, options: Options) -> Result<(), MolviewError> {
        options.validate()?;
        self.focus.set_params(FocusParams::from(&options.focus));
        *self.input.key_bindings_mut() = options.keybindings.clone();
        self.rig.auto_rotate_speed = options.camera.auto_rotate_speed;
        self.options = options;
        Ok(())
    }

    /// Focused model ordinal.
    #[must_use]
    pub fn focused_ordinal(&self) -> usize {
        self.navigator.current()
    }

    /// Whether a focus is in flight.
    #[must_use]
    pub fn is_focusing(&self) -> bool {
        self.focus.is_active()
    }

    /// Control-panel snapshot.
    #[must_use]
    pub fn panel_state(&self) -> PanelState {
        PanelState {
            auto_rotate: self.rig.auto_rotate,
            model_count: self.scene.model_count(),
            focused: self.navigator.current(),
            focusing: self.focus.is_active(),
            fps: self.frame_loop.fps(),
        }
    }

    /// Sender the host's asset loader uses to deliver the lone-pair marker.
    #[must_use]
    pub fn marker_sender(&self) -> MarkerSender {
        self.marker_tx.clone()
    }

    // -- Loading --

    /// Source used by [`MolviewCommand::Reload`].
    pub fn set_source(&mut self, source: Arc<dyn StructureSource>) {
        self.source = Some(source);
    }

    /// Replace the scene with `document` right away. Any in-flight reload
    /// becomes stale.
    ///
    /// # Errors
    ///
    /// [`MolviewError::DataMissing`] when a model is absent; the current
    /// scene is kept.
    pub fn load_document(
        &mut self,
        document: &StructureDocument,
    ) -> Result<LoadReport, MolviewError> {
        let _ = self.worker.supersede();
        self.apply_document(document)
    }

    /// Parse and load a JSON document right away.
    ///
    /// # Errors
    ///
    /// Parse failures and those of [`Self::load_document`].
    pub fn load_json(&mut self, text: &str) -> Result<LoadReport, MolviewError> {
        let document = StructureDocument::from_json(text)?;
        self.load_document(&document)
    }

    /// Fetch the source in the background; the result is applied by a
    /// later [`Self::update`]. No-op without a source.
    ///
    /// # Errors
    ///
    /// [`MolviewError::ThreadSpawn`] if the fetch thread cannot start.
    pub fn request_reload(&mut self) -> Result<(), MolviewError> {
        let Some(source) = self.source.clone() else {
            log::warn!("reload requested without a structure source");
            return Ok(());
        };
        let _ = self.worker.request(source)?;
        Ok(())
    }

    /// Validate, clear, load, then focus model 1.
    fn apply_document(
        &mut self,
        document: &StructureDocument,
    ) -> Result<LoadReport, MolviewError> {
        document.validate()?;
        self.scene.clear();
        let report = load_models(
            &mut self.scene,
            document,
            &self.options,
            self.marker_rx.marker(),
        )?;
        self.navigator.reset();
        let _ = self.focus_model(1);
        Ok(report)
    }

    // -- Commands --

    /// Start easing toward the model with 1-based `ordinal`. Returns the
    /// focus token, or `None` if no such model exists.
    pub fn focus_model(&mut self, ordinal: usize) -> Option<FocusToken> {
        let destination = self.scene.model(ordinal)?.position();
        log::debug!("focusing model {ordinal} at {destination}");
        Some(self.focus.request(destination))
    }

    /// Execute a command.
    ///
    /// # Errors
    ///
    /// Only [`MolviewCommand::Reload`] can fail, when its fetch thread
    /// cannot start.
    pub fn execute(&mut self, command: MolviewCommand) -> Result<(), MolviewError> {
        let count = self.scene.model_count();
        match command {
            MolviewCommand::NextModel => match self.navigator.next(count) {
                Some(ordinal) => {
                    let _ = self.focus_model(ordinal);
                }
                None => log::debug!("already at the last model"),
            },
            MolviewCommand::PreviousModel => match self.navigator.previous(count) {
                Some(ordinal) => {
                    let _ = self.focus_model(ordinal);
                }
                None => log::debug!("already at the first model"),
            },
            MolviewCommand::SelectModel { ordinal } => {
                match self.navigator.select(ordinal, count) {
                    Some(ordinal) => {
                        let _ = self.focus_model(ordinal);
                    }
                    None => log::debug!("model {ordinal} out of range 1..={count}"),
                }
            }
            MolviewCommand::ToggleAutoRotate => {
                let _ = self.rig.toggle_auto_rotate();
            }
            MolviewCommand::SetAutoRotate { enabled } => {
                self.rig.set_auto_rotate(enabled);
            }
            MolviewCommand::Reload => self.request_reload()?,
            MolviewCommand::Clear => {
                let _ = self.worker.supersede();
                self.scene.clear();
                self.focus.cancel();
                self.navigator.reset();
            }
            MolviewCommand::PauseAndReset => self.pause_requested = true,
            MolviewCommand::End => self.frame_loop.end(),
        }
        Ok(())
    }

    /// Translate a raw input event through the key bindings and execute
    /// the resulting command. Returns whether a command ran.
    ///
    /// # Errors
    ///
    /// Those of [`Self::execute`].
    pub fn handle_input(&mut self, event: &InputEvent) -> Result<bool, MolviewError> {
        match self.input.handle_event(event) {
            Some(command) => {
                self.execute(command)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // -- Frame --

    /// Advance one frame at `now`.
    ///
    /// Honors pause/end, applies the latest completed reload, attaches or
    /// times out pending lone pairs, steps the focus and auto-rotates.
    ///
    /// # Errors
    ///
    /// A failed reload (the previous scene is kept) or
    /// [`MolviewError::AssetTimeout`]. The rest of the frame still runs.
    /// One error is returned per frame; when both happen together the
    /// timeout is returned by the next frame that runs.
    pub fn update(&mut self, now: Instant) -> Result<FrameStatus, MolviewError> {
        if std::mem::take(&mut self.pause_requested) {
            self.frame_loop.pause(now, self.options.assets.pause_delay());
        }
        let gate = self.frame_loop.gate(now);
        match gate {
            FrameGate::Paused | FrameGate::Ended => {
                return Ok(FrameStatus::skipped(gate));
            }
            FrameGate::Resumed => {
                log::debug!("resuming with camera reset");
                self.focus.cancel();
                self.rig.reset();
            }
            FrameGate::Run => {}
        }

        let reloaded = match self.apply_reload() {
            Ok(report) => report,
            Err(e) => {
                log::error!("reload failed, keeping previous scene: {e}");
                self.failures.push_back(e);
                None
            }
        };

        let attached_lone_pairs = match self.poll_marker(now) {
            Ok(attached) => attached,
            Err(e) => {
                self.failures.push_back(e);
                0
            }
        };

        let focus = self.focus.tick(&mut self.rig);
        self.rig.update();
        self.frame_loop.end_frame(now);

        match self.failures.pop_front() {
            Some(e) => Err(e),
            None => Ok(FrameStatus {
                gate,
                focus,
                reloaded,
                attached_lone_pairs,
            }),
        }
    }

    fn apply_reload(&mut self) -> Result<Option<LoadReport>, MolviewError> {
        let Some(reload) = self.worker.poll() else {
            return Ok(None);
        };
        let text = reload.result?;
        let document = StructureDocument::from_json(&text)?;
        let report = self.apply_document(&document)?;
        log::debug!("reload {} applied", reload.generation);
        Ok(Some(report))
    }

    fn poll_marker(&mut self, now: Instant) -> Result<usize, MolviewError> {
        if let Some(marker) = self.marker_rx.poll().cloned() {
            return Ok(attach_pending_lone_pairs(
                &mut self.scene,
                &marker,
                &self.options,
            ));
        }
        self.scene
            .pending_lone_pairs_mut()
            .check_deadline(now, self.options.assets.marker_timeout())?;
        Ok(0)
    }
}

impl Default for MolviewEngine {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec3;
    use web_time::Duration;

    use super::*;
    use crate::input::PanelEvent;
    use crate::model::{Atom, BondType};
    use crate::scene::MarkerHandle;
    use crate::source::InlineSource;

    fn molecule() -> Vec<Atom> {
        vec![
            Atom::new("n", "N", DVec3::ZERO)
                .with_target("n2", BondType::Triple)
                .with_lone_pair(DVec3::new(-0.6, 0.0, 0.0)),
            Atom::new("n2", "N", DVec3::new(1.1, 0.0, 0.0))
                .with_target("n", BondType::Triple),
        ]
    }

    fn three_models() -> StructureDocument {
        StructureDocument::from_models(vec![molecule(), molecule(), molecule()])
    }

    /// Engine with the marker already delivered and auto-rotate off, so
    /// long simulated runs never hit the marker deadline.
    fn ready_engine() -> MolviewEngine {
        let mut engine = MolviewEngine::default();
        assert!(engine.marker_sender().send(MarkerHandle::new(1, "lone-pair")));
        engine.execute(MolviewCommand::SetAutoRotate { enabled: false }).unwrap();
        engine
    }

    fn settle(engine: &mut MolviewEngine, start: Instant) -> Instant {
        let mut now = start;
        for _ in 0..1000 {
            now += Duration::from_millis(16);
            let status = engine.update(now).unwrap();
            if status.focus == FocusStatus::Arrived {
                return now;
            }
        }
        panic!("focus never arrived");
    }

    fn wait_for_reload(engine: &mut MolviewEngine) -> Result<FrameStatus, MolviewError> {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            let result = engine.update(Instant::now());
            if !matches!(result, Ok(FrameStatus { reloaded: None, .. })) {
                return result;
            }
            assert!(Instant::now() < deadline, "reload never applied");
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn load_focuses_first_model() {
        let mut engine = ready_engine();
        let report = engine.load_document(&three_models()).unwrap();
        assert_eq!(report.models, 3);
        assert!(engine.is_focusing());

        let _ = settle(&mut engine, Instant::now());
        assert!(engine.rig().target.length() < 1e-3);
        assert_eq!(engine.focused_ordinal(), 1);
    }

    #[test]
    fn navigation_walks_and_clamps() {
        let mut engine = ready_engine();
        let _ = engine.load_document(&three_models()).unwrap();
        let mut now = settle(&mut engine, Instant::now());

        engine.execute(MolviewCommand::PreviousModel).unwrap();
        assert!(!engine.is_focusing());

        engine.execute(MolviewCommand::NextModel).unwrap();
        engine.execute(MolviewCommand::NextModel).unwrap();
        engine.execute(MolviewCommand::NextModel).unwrap();
        assert_eq!(engine.focused_ordinal(), 3);
        now = settle(&mut engine, now);
        assert!((engine.rig().target - DVec3::new(30.0, 30.0, 0.0)).length() < 1e-3);

        engine.execute(MolviewCommand::SelectModel { ordinal: 9 }).unwrap();
        assert_eq!(engine.focused_ordinal(), 3);
        assert!(!engine.is_focusing());

        engine.execute(MolviewCommand::SelectModel { ordinal: 2 }).unwrap();
        let _ = settle(&mut engine, now);
        assert!((engine.rig().target - DVec3::new(15.0, 15.0, 0.0)).length() < 1e-3);
    }

    #[test]
    fn key_and_panel_input_drive_commands() {
        let mut engine = MolviewEngine::default();
        let _ = engine.load_document(&three_models()).unwrap();
        assert!(engine.rig().auto_rotate);

        let escape = InputEvent::KeyPressed {
            code: "Escape".into(),
        };
        assert!(engine.handle_input(&escape).unwrap());
        assert!(!engine.panel_state().auto_rotate);

        let select = InputEvent::Panel(PanelEvent::ModelSelected { ordinal: 2 });
        assert!(engine.handle_input(&select).unwrap());
        assert_eq!(engine.panel_state().focused, 2);

        let unbound = InputEvent::KeyPressed { code: "KeyZ".into() };
        assert!(!engine.handle_input(&unbound).unwrap());
    }

    #[test]
    fn clear_empties_the_scene() {
        let mut engine = MolviewEngine::default();
        let _ = engine.load_document(&three_models()).unwrap();
        engine.execute(MolviewCommand::Clear).unwrap();
        assert_eq!(engine.scene().model_count(), 0);
        assert!(engine.scene().labels().is_empty());
        assert!(engine.scene().pending_lone_pairs().is_empty());
        assert!(!engine.is_focusing());
    }

    #[test]
    fn reload_rebuilds_without_accumulating() {
        let doc = serde_json::json!({
            "data": [
                [{"uid": "a", "position": [0, 0, 0], "targets": [{"ref": "b"}]},
                 {"uid": "b", "position": [1, 0, 0], "targets": [{"ref": "a"}]}],
                [{"uid": "c", "position": [0, 0, 0]}]
            ]
        });
        let mut engine = MolviewEngine::default();
        engine.set_source(Arc::new(InlineSource::new(doc.to_string())));

        engine.execute(MolviewCommand::Reload).unwrap();
        let first = wait_for_reload(&mut engine).unwrap();
        assert_eq!(first.reloaded.map(|r| r.models), Some(2));
        let labels = engine.scene().labels().len();

        engine.execute(MolviewCommand::Reload).unwrap();
        let second = wait_for_reload(&mut engine).unwrap();
        assert_eq!(second.reloaded, first.reloaded);
        assert_eq!(engine.scene().model_count(), 2);
        assert_eq!(engine.scene().labels().len(), labels);
    }

    #[test]
    fn failed_reload_keeps_previous_scene() {
        let mut engine = MolviewEngine::default();
        let _ = engine.load_document(&three_models()).unwrap();
        engine.set_source(Arc::new(InlineSource::new(r#"{"data": [null]}"#)));

        engine.execute(MolviewCommand::Reload).unwrap();
        let err = wait_for_reload(&mut engine).unwrap_err();
        assert!(matches!(err, MolviewError::DataMissing { model: Some(0) }));
        assert_eq!(engine.scene().model_count(), 3);
    }

    #[test]
    fn stale_reload_is_ignored_after_direct_load() {
        let mut engine = MolviewEngine::default();
        engine.set_source(Arc::new(InlineSource::new(r#"[{"uid": "x", "position": [0, 0, 0]}]"#)));
        engine.execute(MolviewCommand::Reload).unwrap();
        let _ = engine.load_document(&three_models()).unwrap();

        std::thread::sleep(Duration::from_millis(50));
        let status = engine.update(Instant::now()).unwrap();
        assert_eq!(status.reloaded, None);
        assert_eq!(engine.scene().model_count(), 3);
    }

    #[test]
    fn marker_arrival_attaches_pending_lone_pairs() {
        let mut engine = MolviewEngine::default();
        let _ = engine.load_document(&three_models()).unwrap();
        assert_eq!(engine.scene().pending_lone_pairs().len(), 3);

        assert!(engine.marker_sender().send(MarkerHandle::new(1, "lone-pair")));
        let status = engine.update(Instant::now()).unwrap();
        assert_eq!(status.attached_lone_pairs, 3);
        assert!(engine.scene().models().iter().all(|m| m.lone_pairs.len() == 1));

        // Later loads attach immediately.
        let report = engine.load_document(&three_models()).unwrap();
        assert_eq!(report.lone_pairs, 3);
        assert_eq!(report.pending_lone_pairs, 0);
    }

    #[test]
    fn missing_marker_times_out_once() {
        let mut engine = MolviewEngine::default();
        let _ = engine.load_document(&three_models()).unwrap();
        let t0 = Instant::now();
        assert!(engine.update(t0).is_ok());

        let err = engine.update(t0 + Duration::from_secs(6)).unwrap_err();
        assert!(matches!(err, MolviewError::AssetTimeout { .. }));
        assert!(engine.scene().pending_lone_pairs().is_empty());
        assert!(engine.update(t0 + Duration::from_secs(7)).is_ok());
    }

    #[test]
    fn timeout_during_failed_reload_is_returned_next_frame() {
        let mut engine = MolviewEngine::default();
        let _ = engine.load_document(&three_models()).unwrap();
        let t0 = Instant::now();
        assert!(engine.update(t0).is_ok());

        engine.set_source(Arc::new(InlineSource::new(r#"{"data": [null]}"#)));
        engine.execute(MolviewCommand::Reload).unwrap();
        std::thread::sleep(Duration::from_millis(200));

        let first = engine.update(t0 + Duration::from_secs(6)).unwrap_err();
        assert!(matches!(first, MolviewError::DataMissing { model: Some(0) }));
        assert!(engine.scene().pending_lone_pairs().is_empty());

        let second = engine.update(t0 + Duration::from_secs(7)).unwrap_err();
        assert!(matches!(second, MolviewError::AssetTimeout { .. }));
        assert!(engine.update(t0 + Duration::from_secs(8)).is_ok());
        assert_eq!(engine.scene().model_count(), 3);
    }

    #[test]
    fn invalid_options_are_refused() {
        let mut engine = MolviewEngine::default();
        let mut options = Options::default();
        options.focus.divisor = 0.0;
        assert!(matches!(
            engine.set_options(options),
            Err(MolviewError::OptionsParse(_))
        ));
        assert_eq!(engine.options().focus.divisor, 10.0);

        let mut options = Options::default();
        options.focus.camera_tolerance = f64::NAN;
        assert!(engine.set_options(options).is_err());

        let mut options = Options::default();
        options.focus.divisor = 4.0;
        engine.set_options(options).unwrap();
        assert_eq!(engine.options().focus.divisor, 4.0);
    }

    #[test]
    fn pause_and_reset_restores_home_pose() {
        let mut engine = MolviewEngine::default();
        let _ = engine.load_document(&three_models()).unwrap();
        engine.execute(MolviewCommand::SelectModel { ordinal: 3 }).unwrap();
        let t0 = Instant::now();
        let _ = engine.update(t0).unwrap();

        engine.execute(MolviewCommand::PauseAndReset).unwrap();
        let paused = engine.update(t0 + Duration::from_millis(10)).unwrap();
        assert_eq!(paused.gate, FrameGate::Paused);
        let frozen = engine.rig().clone();
        let still = engine.update(t0 + Duration::from_millis(500)).unwrap();
        assert_eq!(still.gate, FrameGate::Paused);
        assert_eq!(engine.rig(), &frozen);

        let resumed = engine.update(t0 + Duration::from_millis(1100)).unwrap();
        assert_eq!(resumed.gate, FrameGate::Resumed);
        assert!(!engine.is_focusing());
        assert_eq!(engine.rig().target, DVec3::ZERO);
    }

    #[test]
    fn end_stops_updates() {
        let mut engine = MolviewEngine::default();
        engine.execute(MolviewCommand::End).unwrap();
        let status = engine.update(Instant::now()).unwrap();
        assert_eq!(status.gate, FrameGate::Ended);
    }
}
