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

//! Camera orchestration and geodetic framing for a globe view of aircraft
//! and airports.
//!
//! globecam turns geographic coordinates into world-space positions on a
//! unit sphere, decides where the camera should go when the user selects an
//! aircraft or airport, searches for a place, or asks to go back, and
//! animates the camera there with an eased transition.
//!
//! # Key entry points
//!
//! - [`engine::GlobeCameraEngine`] - owns the camera and runs the per-frame
//!   step
//! - [`framing::FrameSnapshot`] - the external state sampled every frame
//! - [`framing::EntityRegistry`] - lookup seam for live aircraft and airports
//! - [`geo::Globe`] - geodetic to world-space mapping
//! - [`options::Options`] - runtime configuration (camera, framing, globe,
//!   startup)
//!
//! # Architecture
//!
//! Each frame the engine polls the startup location lookup (a
//! [`bootstrap::LocationProvider`] running once on a background thread),
//! compares the frame's snapshot against the previous one in
//! [`framing::FramingPolicy`], applies at most one resulting action to the
//! [`camera::CameraSession`], and ticks the session's transition. Nothing
//! in the frame step blocks.

pub mod bootstrap;
pub mod camera;
pub mod engine;
pub mod error;
pub mod framing;
pub mod geo;
pub mod options;
pub mod util;
