//! Whole-module C++ generation.

use crate::generic::emit_class_wrappers;
use crate::order::classes_for_module;
use crate::preamble::preamble_cpp;
use crate::shim::emit_shim;
use crate::state::GenerationState;
use shimgen_common::{Diagnostic, GenError, Result};
use shimgen_model::{is_known_module, MOC};
use smol_str::SmolStr;
use std::fmt::Write;
use tracing::{debug, warn};

/// Modules whose classes live in a C++ namespace of the module's name.
const NAMESPACED_MODULES: &[&str] = &["QtCharts", "QtDataVisualization"];

/// The generated source of one module.
#[derive(Debug, Clone)]
pub struct Generated {
    /// Framework-qualified module name, or `moc`.
    pub module: SmolStr,
    pub source: String,
    /// Model entries flagged for review while generating.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of shim classes emitted.
    pub shims: usize,
}

/// Generate the C++ glue for `module` (short name such as `Core`, ignored in
/// moc mode).
pub fn cpp_template(state: &GenerationState<'_>, module: &str) -> Result<Generated> {
    if !state.is_moc() && !is_known_module(module.strip_prefix("Qt").unwrap_or(module)) {
        return Err(GenError::UnknownModule(module.into()));
    }

    let key = state.module_key(module);
    let classes = classes_for_module(state, &key, true)?;
    let mut body = String::new();
    let mut diagnostics = Vec::new();
    let mut shims = 0;

    if NAMESPACED_MODULES.contains(&key.as_str()) {
        for class in &classes {
            let _ = writeln!(body, "typedef {key}::{name} {name};", name = class.name);
        }
        body.push('\n');
    }

    for class in &classes {
        if class.has_multiple_bases() {
            let diagnostic = Diagnostic::warning(format!(
                "class `{}` has {} direct bases; only `{}` is followed",
                class.name,
                class.bases.len(),
                class.bases[0]
            ))
            .with_class(class.name.clone())
            .with_help("check that the primary base is listed first");
            warn!(class = %class.name, bases = ?class.bases, "multiple direct bases");
            diagnostics.push(diagnostic);
        }

        if let Some(missing) = class.bases.iter().find(|base| !state.model().contains(base)) {
            if !state.is_class_supported(class) {
                diagnostics.push(
                    Diagnostic::info(format!(
                        "class `{}` skipped: base `{missing}` is not in the class model",
                        class.name
                    ))
                    .with_class(class.name.clone()),
                );
            }
        }

        let has_shim = emit_shim(state, class, &mut body)?;
        if has_shim {
            shims += 1;
        }
        emit_class_wrappers(state, class, has_shim, &mut body);
    }

    debug!(module = %key, classes = classes.len(), shims, "generated module body");

    let source = preamble_cpp(state, &key, &body);
    Ok(Generated {
        module: key,
        source,
        diagnostics,
        shims,
    })
}

/// The file stem generated sources are written under.
pub fn output_stem(module: &SmolStr) -> String {
    if module == MOC {
        MOC.to_string()
    } else {
        shimgen_model::short_module(module)
    }
}
