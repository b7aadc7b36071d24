//! File prefix: build tags, visibility overrides and includes.

use crate::state::GenerationState;
use shimgen_model::{short_module, ClassModel, MOC};
use std::fmt::Write;

/// Class names that have no header of their own.
const HEADERLESS: &[&str] = &[
    "QBluetooth",
    "QDBus",
    "QCss",
    "QPdf",
    "QSsl",
    "QPrint",
    "QScript",
    "QSql",
    "QTest",
    "QWebSocketProtocol",
];

/// Wrap `body` with everything it needs to compile for `module`
/// (framework-qualified, e.g. `QtCore`, or `moc`).
pub fn preamble_cpp(state: &GenerationState<'_>, module: &str, body: &str) -> String {
    let mut out = String::with_capacity(body.len() + 1024);

    let _ = write!(
        out,
        "{}\n\n#define protected public\n#define private public\n\n#include \"{}.h\"\n#include \"_cgo_export.h\"\n\n",
        build_tags(state, module),
        umbrella_header(state, module),
    );

    for class in referenced_classes(state.model(), body) {
        if class == "SailfishApp" {
            out.push_str("#include <sailfishapp.h>\n");
        } else if class.starts_with('Q') && !HEADERLESS.contains(&class) {
            let _ = writeln!(out, "#include <{class}>");
        }
    }
    out.push('\n');

    out.push_str(body);

    if state.is_moc() {
        out.push_str("#include \"moc_moc.h\"\n");
    }

    out
}

fn build_tags(state: &GenerationState<'_>, module: &str) -> &'static str {
    match module {
        "QtAndroidExtras" => "// +build android",
        "QtSailfish" => "// +build sailfish",
        _ if state.is_minimal() => "// +build minimal",
        _ if state.is_moc() => "",
        _ => "// +build !minimal",
    }
}

fn umbrella_header(state: &GenerationState<'_>, module: &str) -> String {
    let short = short_module(module);
    match module {
        "QtAndroidExtras" => format!("{short}_android"),
        "QtSailfish" => format!("{short}_sailfish"),
        _ if state.is_minimal() => format!("{short}-minimal"),
        _ if state.is_moc() => MOC.to_string(),
        _ => short,
    }
}

/// Names of model classes mentioned anywhere in `body`, sorted.
///
/// Framework namespaces are covered by the umbrella header and moc classes
/// are defined in the body itself.
fn referenced_classes<'m>(model: &'m ClassModel, body: &str) -> Vec<&'m str> {
    let mut classes: Vec<&str> = model
        .classes()
        .filter(|class| !ClassModel::is_framework_namespace(&class.name) && class.module != MOC)
        .filter(|class| body.contains(class.name.as_str()))
        .map(|class| class.name.as_str())
        .collect();
    classes.sort();
    classes
}
