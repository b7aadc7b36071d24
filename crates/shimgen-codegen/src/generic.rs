//! Flat C wrappers for every supported class member.
//!
//! The host language calls into the framework exclusively through these
//! functions. Instances are passed around as `void*`.

use crate::state::GenerationState;
use shimgen_model::{is_void, title, Class, Enum, Function, Meta, Virtual};
use std::fmt::Write;

/// Emit enum accessors and member wrappers for `class`.
///
/// `has_shim` tells whether a shim class was generated, in which case
/// constructors allocate the shim so callbacks reach the host.
pub fn emit_class_wrappers(
    state: &GenerationState<'_>,
    class: &Class,
    has_shim: bool,
    out: &mut String,
) {
    if !state.is_class_supported(class) {
        return;
    }

    for e in &class.enums {
        write_enum(class, e, out);
    }

    let abstract_class = state.has_unimplemented_pure_virtuals(&class.name);
    for function in &class.functions {
        if !state.is_function_supported(function) {
            continue;
        }

        match function.meta {
            Meta::Constructor if !abstract_class => {
                write_constructor(state, class, function, has_shim, out)
            }
            Meta::Constructor | Meta::CopyConstructor | Meta::MoveConstructor => {}
            Meta::Destructor => write_destructor(class, out),
            Meta::Signal => {
                write_call(class, function, "", false, out);
                if has_shim {
                    write_connection(state, class, function, "connect", "Connect", out);
                    write_connection(state, class, function, "disconnect", "Disconnect", out);
                }
            }
            _ => {
                write_call(class, function, "", false, out);
                if function.virtuality == Virtual::Impure && !function.is_static {
                    write_call(class, function, "Default", true, out);
                }
            }
        }
    }
}

/// Values that are plain integer literals need no runtime accessor.
fn write_enum(class: &Class, e: &Enum, out: &mut String) {
    for value in &e.values {
        if is_integer_literal(&value.value) {
            continue;
        }
        let _ = write!(
            out,
            "long long {class}_{name}_Type()\n{{\n\treturn {class}::{name};\n}}\n\n",
            class = class.name,
            name = value.name,
        );
    }
}

fn is_integer_literal(value: &str) -> bool {
    let value = value.trim();
    let value = value.strip_prefix('-').unwrap_or(value);
    if let Some(hex) = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        return !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit());
    }
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}

fn write_constructor(
    state: &GenerationState<'_>,
    class: &Class,
    function: &Function,
    has_shim: bool,
    out: &mut String,
) {
    let allocated = if has_shim {
        state.shim_name(&class.name)
    } else {
        class.name.to_string()
    };
    let _ = write!(
        out,
        "void* {class}_New{class}{suffix}({params})\n{{\n\treturn new {allocated}({args});\n}}\n\n",
        class = class.name,
        suffix = function.overload_suffix(),
        params = function.declared_parameters(),
        args = function.forwarded_arguments(),
    );
}

fn write_destructor(class: &Class, out: &mut String) {
    let _ = write!(
        out,
        "void {class}_Destroy{class}(void* ptr)\n{{\n\tstatic_cast<{class}*>(ptr)->~{class}();\n}}\n\n",
        class = class.name,
    );
}

/// A wrapper forwarding to the member; `qualified` calls the class's own
/// implementation, bypassing virtual dispatch.
fn write_call(class: &Class, function: &Function, suffix: &str, qualified: bool, out: &mut String) {
    let output = if is_void(&function.output) {
        "void"
    } else {
        function.output.as_str()
    };

    let mut params = Vec::with_capacity(function.parameters.len() + 1);
    if !function.is_static {
        params.push("void* ptr".to_string());
    }
    if !function.parameters.is_empty() {
        params.push(function.declared_parameters());
    }

    let target = if function.is_static {
        format!("{}::{}", class.name, function.name)
    } else if qualified {
        format!(
            "static_cast<{class}*>(ptr)->{class}::{name}",
            class = class.name,
            name = function.name
        )
    } else {
        format!("static_cast<{}*>(ptr)->{}", class.name, function.name)
    };

    let call = format!("{target}({})", function.forwarded_arguments());
    let body = if output == "void" {
        format!("{call};")
    } else {
        format!("return {call};")
    };

    let _ = write!(
        out,
        "{output} {class}_{name}{overload}{suffix}({params})\n{{\n\t{body}\n}}\n\n",
        class = class.name,
        name = title(&function.name),
        overload = function.overload_suffix(),
        params = params.join(", "),
    );
}

/// Hook the signal up to the shim's `Signal_` relay, or undo that.
fn write_connection(
    state: &GenerationState<'_>,
    class: &Class,
    function: &Function,
    method: &str,
    prefix: &str,
    out: &mut String,
) {
    let shim = state.shim_name(&class.name);
    let types = function.parameter_types();
    let relay = format!("Signal_{}{}", title(&function.name), function.overload_suffix());

    let _ = write!(
        out,
        "void {class}_{prefix}{name}{overload}(void* ptr)\n{{\n\tQObject::{method}(static_cast<{class}*>(ptr), static_cast<void ({class}::*)({types})>(&{class}::{member}), static_cast<{shim}*>(ptr), static_cast<void ({shim}::*)({types})>(&{shim}::{relay}));\n}}\n\n",
        class = class.name,
        name = title(&function.name),
        overload = function.overload_suffix(),
        member = function.name,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::GenerationOptions;
    use shimgen_model::ClassModel;

    fn wrappers(model: &ClassModel, class: &str, has_shim: bool) -> String {
        let state = GenerationState::new(model, GenerationOptions::default());
        let mut out = String::new();
        emit_class_wrappers(&state, model.get(class).unwrap(), has_shim, &mut out);
        out
    }

    #[test]
    fn test_plain_and_static_members() {
        let model: ClassModel = [Class::new("QPoint", "QtCore")
            .with_function(Function::new("QPoint", "x").with_output("int").with_const())
            .with_function(
                Function::new("QPoint", "setX")
                    .with_output("void")
                    .with_param("x", "int"),
            )
            .with_function(
                Function::new("QPoint", "dotProduct")
                    .with_static()
                    .with_output("int")
                    .with_param("p1", "const QPoint &")
                    .with_param("p2", "const QPoint &"),
            )]
        .into_iter()
        .collect();

        let out = wrappers(&model, "QPoint", false);
        assert!(out.contains("int QPoint_X(void* ptr)\n{\n\treturn static_cast<QPoint*>(ptr)->x();\n}\n\n"));
        assert!(out.contains("void QPoint_SetX(void* ptr, int x)\n{\n\tstatic_cast<QPoint*>(ptr)->setX(x);\n}\n\n"));
        assert!(out.contains(
            "int QPoint_DotProduct(const QPoint & p1, const QPoint & p2)\n{\n\treturn QPoint::dotProduct(p1, p2);\n}\n\n"
        ));
    }

    #[test]
    fn test_constructor_allocates_shim() {
        let model: ClassModel = [Class::new("QTimer", "QtCore")
            .with_function(Function::constructor("QTimer"))
            .with_function(Function::destructor("QTimer"))]
        .into_iter()
        .collect();

        let out = wrappers(&model, "QTimer", true);
        assert!(out.contains("void* QTimer_NewQTimer()\n{\n\treturn new MyQTimer();\n}\n\n"));
        assert!(out.contains("void QTimer_DestroyQTimer(void* ptr)\n{\n\tstatic_cast<QTimer*>(ptr)->~QTimer();\n}\n\n"));

        let out = wrappers(&model, "QTimer", false);
        assert!(out.contains("return new QTimer();"));
    }

    #[test]
    fn test_virtual_default_and_signal_connections() {
        let model: ClassModel = [Class::new("QObject", "QtCore")
            .with_function(
                Function::new("QObject", "event")
                    .with_virtual(Virtual::Impure)
                    .with_output("bool")
                    .with_param("e", "QObject *"),
            )
            .with_function(
                Function::new("QObject", "objectNameChanged")
                    .with_meta(Meta::Signal)
                    .with_param("objectName", "const QString &"),
            )]
        .into_iter()
        .collect();

        let out = wrappers(&model, "QObject", true);
        assert!(out.contains("bool QObject_EventDefault(void* ptr, QObject * e)\n{\n\treturn static_cast<QObject*>(ptr)->QObject::event(e);\n}\n\n"));
        assert!(out.contains(
            "QObject::connect(static_cast<QObject*>(ptr), static_cast<void (QObject::*)(const QString &)>(&QObject::objectNameChanged), static_cast<MyQObject*>(ptr), static_cast<void (MyQObject::*)(const QString &)>(&MyQObject::Signal_ObjectNameChanged));"
        ));
        assert!(out.contains("void QObject_DisconnectObjectNameChanged(void* ptr)"));
    }

    #[test]
    fn test_enum_accessors() {
        let model: ClassModel = [Class::new("QEvent", "QtCore").with_enum(
            Enum::new("QEvent", "Type")
                .with_value("None", "0")
                .with_value("Timer", "0x01")
                .with_value("MaxUser", "QEvent::User + 1"),
        )]
        .into_iter()
        .collect();

        let out = wrappers(&model, "QEvent", false);
        assert_eq!(
            out,
            "long long QEvent_MaxUser_Type()\n{\n\treturn QEvent::MaxUser;\n}\n\n"
        );
    }

    #[test]
    fn test_abstract_class_has_no_constructor() {
        let model: ClassModel = [Class::new("QRunnable", "QtCore")
            .with_function(Function::constructor("QRunnable"))
            .with_function(
                Function::new("QRunnable", "run")
                    .with_virtual(Virtual::Pure)
                    .with_output("void"),
            )]
        .into_iter()
        .collect();

        let out = wrappers(&model, "QRunnable", true);
        assert!(!out.contains("QRunnable_NewQRunnable"));
        assert!(out.contains("void QRunnable_Run(void* ptr)"));
        assert!(!out.contains("RunDefault"));
    }

    #[test]
    fn test_integer_literals() {
        assert!(is_integer_literal("42"));
        assert!(is_integer_literal("-1"));
        assert!(is_integer_literal("0xFF"));
        assert!(!is_integer_literal("0x"));
        assert!(!is_integer_literal("Qt::UserRole"));
        assert!(!is_integer_literal(""));
    }
}
