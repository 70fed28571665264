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
// Complexity limits (clippy default thresholds)
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

//! Tick-driven animated binary-search-tree operation engine.
//!
//! Bstviz interleaves discrete tree edits (insert, delete, search) with
//! continuous-time animation for teaching tools. Every structural edit
//! completes inside a single tick, so the tree observed between ticks is
//! always a valid, fully linked BST.
//!
//! # Key entry points
//!
//! - [`engine::Visualizer`] - submit operations, tick, and read snapshots
//! - [`tree::Tree`] - arena-backed BST with explicit node handles
//! - [`layout::Layout`] - target placement and per-tick settling
//! - [`machines`] - the insert, delete and search state machines
//! - [`options::Options`] - layout, timing and status configuration
//!
//! # Frame loop
//!
//! A rendering collaborator calls [`engine::Visualizer::submit`] when the
//! user asks for an operation, [`engine::Visualizer::tick`] once per frame,
//! and [`engine::Visualizer::snapshot`] to draw. Rejected submissions and
//! missing values surface as status text, never as panics.

pub mod animation;
pub mod engine;
pub mod error;
pub mod layout;
pub mod machines;
pub mod options;
pub mod script;
pub mod tree;
pub mod util;
