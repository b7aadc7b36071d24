//! Binding synthesis for the framework class model.
//!
//! Given a populated [`ClassModel`](shimgen_model::ClassModel) this crate
//! decides, per class and per function, what C++ glue is needed to reach the
//! framework from the host language, and emits it:
//!
//! ```text
//! module selection → classes_for_module → Eligibility → shim classes
//!                                                      → flat C wrappers
//!                                                      → preamble + includes
//! ```
//!
//! All entry points take a [`GenerationState`], an explicitly constructed,
//! read-only context. Nothing here performs I/O, so independent modules can be
//! generated concurrently from the same state.

mod callback;
mod dump;
mod eligibility;
mod generic;
mod order;
mod preamble;
mod shim;
mod state;
mod template;

pub use callback::{callback_header, cpp_function_callback};
pub use dump::render_dump;
pub use eligibility::{all_bases, has_unimplemented_pure_virtuals, is_representable, Eligibility};
pub use order::{classes_for_module, sort_topologically};
pub use preamble::preamble_cpp;
pub use shim::emit_shim;
pub use state::{GenerationOptions, GenerationState};
pub use template::{cpp_template, output_stem, Generated};
