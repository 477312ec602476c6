//! Headless driver: loads a structure document, focuses one model and runs
//! simulated frames until the camera settles.
//!
//! Usage: `molview <path-or-url> [ordinal]`

use std::process::ExitCode;

use molview::camera::FocusStatus;
use molview::engine::{MolviewCommand, MolviewEngine};
use molview::error::MolviewError;
use molview::options::Options;
use molview::scene::MarkerHandle;
use molview::source::source_for;
use web_time::{Duration, Instant};

/// Simulated frame spacing (60 fps).
const FRAME: Duration = Duration::from_micros(16_667);
/// Give up on the focus after this many frames.
const MAX_FRAMES: usize = 10_000;

fn run(input: &str, ordinal: usize) -> Result<(), MolviewError> {
    let options = match std::env::var("MOLVIEW_OPTIONS") {
        Ok(path) => Options::load(std::path::Path::new(&path))?,
        Err(_) => Options::default(),
    };
    let mut engine = MolviewEngine::new(options);

    let text = source_for(input)?.fetch()?;
    let report = engine.load_json(&text)?;
    let _ = engine.marker_sender().send(MarkerHandle::new(0, "lone-pair"));
    engine.execute(MolviewCommand::SetAutoRotate { enabled: false })?;
    if ordinal != 1 {
        engine.execute(MolviewCommand::SelectModel { ordinal })?;
    }

    let mut now = Instant::now();
    let mut frames = 0;
    while frames < MAX_FRAMES && engine.is_focusing() {
        now += FRAME;
        frames += 1;
        if engine.update(now)?.focus == FocusStatus::Arrived {
            break;
        }
    }
    if engine.is_focusing() {
        log::warn!("focus did not settle after {frames} frames");
    }

    let scene = engine.scene();
    let rig = engine.rig();
    log::info!(
        "{} models, {} labels, {} primitives; {} bond intents unmatched",
        scene.model_count(),
        scene.labels().len(),
        scene.primitive_count(),
        report.dangling
    );
    log::info!(
        "model {} reached in {frames} frames: camera {}, target {}",
        engine.focused_ordinal(),
        rig.camera,
        rig.target
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    )
    .init();

    let mut args = std::env::args().skip(1);
    let Some(input) = args.next() else {
        log::error!("Usage: molview <path-or-url> [ordinal]");
        return ExitCode::FAILURE;
    };
    let ordinal = match args.next().map(|arg| arg.parse::<usize>()) {
        None => 1,
        Some(Ok(ordinal)) => ordinal,
        Some(Err(e)) => {
            log::error!("invalid model ordinal: {e}");
            return ExitCode::FAILURE;
        }
    };

    match run(&input, ordinal) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
