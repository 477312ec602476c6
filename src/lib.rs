// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Molecular structure viewer core: bond inference, primitive geometry and
//! eased camera focus for labeled 3D molecule scenes.
//!
//! Rendering is left to the host. The crate turns a structure document
//! (atoms with pairwise bond references and lone pairs) into placeable
//! primitives per model, and drives the camera position and orbit target
//! the host mirrors every frame.
//!
//! # Key entry points
//!
//! - [`engine::MolviewEngine`] - per-frame `update`, command execution,
//!   loading and reloading
//! - [`bonds::resolve_bonds`] - turns bond intents into a deduplicated bond
//!   list
//! - [`geometry::GeometryBuilder`] - spheres, bond rods and lone-pair
//!   markers in model-local space
//! - [`camera::focus`] - the easing focus state machine
//! - [`options::Options`] - TOML-backed configuration
//!
//! # Architecture
//!
//! Structure documents are fetched on a background
//! [`source::ReloadWorker`] thread and handed back through a channel
//! tagged with a reload generation; only the latest generation is applied.
//! Everything else runs on the host's frame: the engine drains reloads,
//! attaches lone pairs once the marker asset arrives, steps the focus and
//! auto-rotates the camera rig.

pub mod bonds;
pub mod camera;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod input;
pub mod model;
pub mod options;
pub mod scene;
pub mod source;
pub mod util;
