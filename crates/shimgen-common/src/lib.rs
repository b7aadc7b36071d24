mod diagnostic;
mod error;

pub use diagnostic::{Diagnostic, DiagnosticLevel};
pub use error::{GenError, Result};
