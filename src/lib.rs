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
// Complexity limits (clippy's default thresholds)
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
// Unpublished crate: no repository or authors metadata
#![allow(clippy::cargo_common_metadata)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Orbit-camera motion controller for interactive 3D viewers.
//!
//! The camera orbits a look-at point at some distance, oriented by a unit
//! quaternion. Mouse drags and wheel ticks become impulses on damped axes
//! that coast to rest; programmatic moves either apply at once or run as
//! timed transitions, one per pose component. After every change the
//! controller publishes a [`camera::CameraView`] (eye, center, up) for the
//! host's renderer.
//!
//! # Key entry points
//!
//! - [`camera::OrbitCamera`] - the controller; call
//!   [`tick`](camera::OrbitCamera::tick) once per frame
//! - [`options::Options`] - starting pose, limits, and input tuning, with
//!   TOML load/save
//! - [`animation`] - damped actions and single-slot transitions
//! - [`math`] - quaternion slerp and Euler decomposition with fallback
//!
//! The controller is single-threaded: drive it from one thread, or wrap it
//! in a mutex if input and rendering live on different threads.

pub mod animation;
pub mod camera;
pub mod error;
pub mod math;
pub mod options;
pub mod util;

pub use camera::{CameraState, CameraView, OrbitCamera};
pub use error::OrbitError;
pub use options::Options;
