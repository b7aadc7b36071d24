//! Plain-text listing of a class, for debugging the model.

use shimgen_model::Class;
use std::fmt::Write;

/// A `funcs` section with one line per function followed by an `enums`
/// section with one line per enum.
pub fn render_dump(class: &Class) -> String {
    let mut out = String::from("funcs\n\n");
    for function in &class.functions {
        let _ = writeln!(out, "{function}");
    }

    out.push_str("\n\nenums\n\n");
    for e in &class.enums {
        let _ = writeln!(out, "{e}");
    }

    out
}
