//! Shim classes: generated subclasses that relay virtual dispatch, signals and
//! slots into host-language callbacks.

use crate::callback::{callback_header, cpp_function_callback};
use crate::state::GenerationState;
use rustc_hash::FxHashSet;
use shimgen_common::{GenError, Result};
use shimgen_model::{Class, Function, Meta, RelayMode};
use smol_str::SmolStr;
use std::fmt::Write;
use tracing::debug;

/// Emit the shim for `class` into `out`.
///
/// Returns whether a shim class body was written. Unsupported classes, and
/// classes without callback surface outside moc mode, produce nothing.
pub fn emit_shim(state: &GenerationState<'_>, class: &Class, out: &mut String) -> Result<bool> {
    if !state.is_class_supported(class) {
        return Ok(false);
    }

    let emitted = state.needs_shim(class);
    if emitted {
        write_class(state, class, out)?;
    }

    if state.is_moc() {
        let _ = write!(out, "Q_DECLARE_METATYPE({}*)\n\n", class.name);
    }

    Ok(emitted)
}

fn write_class(state: &GenerationState<'_>, class: &Class, out: &mut String) -> Result<()> {
    let shim = state.shim_name(&class.name);
    let base = base_class(state, class)?;

    let _ = write!(out, "class {shim}: public {base}\n{{\n");
    if state.is_moc() {
        out.push_str("Q_OBJECT\n");
    }
    out.push_str("public:\n");

    if !state.has_unimplemented_pure_virtuals(&class.name) {
        write_constructors(state, class, &shim, base, out);
    }

    let mut covered: FxHashSet<(SmolStr, u32)> = FxHashSet::default();
    let mut trampolines = 0usize;

    for function in &class.functions {
        covered.insert(function.override_key());

        if !state.is_function_supported(function) || !function.has_callback_surface() {
            continue;
        }
        if state.is_moc() && function.meta == Meta::Slot {
            continue;
        }
        write_trampoline(state, function, out);
        trampolines += 1;
    }

    // Flatten virtuals of every ancestor into this class: the host side cannot
    // dispatch through intermediate classes that only exist natively.
    for ancestor in state.all_bases(class) {
        let Some(parent) = state.model().get(&ancestor) else {
            continue;
        };
        if !state.is_class_supported(parent) {
            continue;
        }

        for function in &parent.functions {
            if function.meta == Meta::Destructor {
                continue;
            }
            let inherited = function.requalified(&class.name);
            if covered.contains(&inherited.override_key()) {
                continue;
            }
            if !state.is_function_supported(function) {
                continue;
            }
            if function.is_virtual() || function.meta == Meta::Slot {
                covered.insert(inherited.override_key());
                write_trampoline(state, &inherited, out);
                trampolines += 1;
            }
        }
    }

    if state.is_moc() {
        out.push_str("signals:\n");
        for function in class.functions.iter().filter(|f| f.meta == Meta::Signal) {
            let as_slot = function.clone().with_meta(Meta::Slot);
            let _ = writeln!(out, "\t{};", callback_header(state, &as_slot));
        }

        out.push_str("public slots:\n");
        for function in class.functions.iter().filter(|f| f.meta == Meta::Slot) {
            write_trampoline(state, function, out);
        }
    }

    out.push_str("};\n\n");

    debug!(class = %class.name, shim = %shim, trampolines, "emitted shim class");
    Ok(())
}

/// The class the shim derives from.
fn base_class<'c>(state: &GenerationState<'_>, class: &'c Class) -> Result<&'c str> {
    if state.is_moc() {
        class
            .primary_base()
            .ok_or_else(|| GenError::MissingToolingBase(class.name.clone()))
    } else {
        Ok(class.name.as_str())
    }
}

fn write_constructors(
    state: &GenerationState<'_>,
    class: &Class,
    shim: &str,
    base: &str,
    out: &mut String,
) {
    for function in &class.functions {
        if function.meta != Meta::Constructor || !state.is_function_supported(function) {
            continue;
        }
        let _ = writeln!(
            out,
            "\t{shim}({}) : {base}({}) {{}};",
            function.declared_parameters(),
            function.forwarded_arguments()
        );
    }
}

fn write_trampoline(state: &GenerationState<'_>, function: &Function, out: &mut String) {
    let relay = function.with_relay_mode(RelayMode::Callback);
    let _ = writeln!(out, "\t{}", cpp_function_callback(state, &relay));
}
