//! Callback trampolines: shim overrides that forward into the host language.

use crate::state::GenerationState;
use shimgen_model::{is_void, title, Function, Meta, RelayMode};

/// Declaration of the override, without body or trailing `;`.
///
/// Signals are relayed through a `Signal_` member that the generated
/// `Connect` wrappers hook up; everything else overrides under its own name.
pub fn callback_header(state: &GenerationState<'_>, function: &Function) -> String {
    match function.meta {
        Meta::Destructor => format!("~{}()", state.shim_name(function.class_name())),
        Meta::Signal => format!(
            "void Signal_{}{}({})",
            title(&function.name),
            function.overload_suffix(),
            function.declared_parameters()
        ),
        _ => {
            let output = if is_void(&function.output) {
                "void"
            } else {
                function.output.as_str()
            };
            format!(
                "{} {}({}){}",
                output,
                function.name,
                function.declared_parameters(),
                if function.is_const { " const" } else { "" }
            )
        }
    }
}

/// Name of the host callback a trampoline forwards to.
fn callback_name(function: &Function) -> String {
    let class = function.class_name();
    match function.meta {
        Meta::Destructor => format!("callback{class}_Destroy{class}"),
        _ => format!(
            "callback{class}_{}{}",
            title(&function.name),
            function.overload_suffix()
        ),
    }
}

/// A complete trampoline definition for a function in callback relay mode.
///
/// Functions in normal relay mode are returned as a bare declaration; the
/// emitter always passes callback copies.
pub fn cpp_function_callback(state: &GenerationState<'_>, function: &Function) -> String {
    let header = callback_header(state, function);
    if function.relay != RelayMode::Callback {
        return format!("{header};");
    }

    let mut arguments = String::from("this");
    for name in function.parameter_names() {
        arguments.push_str(", ");
        arguments.push_str(&name);
    }

    let call = format!("{}({arguments})", callback_name(function));
    let returns = !matches!(function.meta, Meta::Destructor | Meta::Signal)
        && !function.is_constructor()
        && !is_void(&function.output);

    if returns {
        format!("{header} {{ return {call}; }};")
    } else {
        format!("{header} {{ {call}; }};")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::GenerationOptions;
    use shimgen_model::{ClassModel, Virtual};

    #[test]
    fn test_virtual_with_result() {
        let model = ClassModel::new();
        let state = GenerationState::new(&model, GenerationOptions::default());
        let f = Function::new("QObject", "event")
            .with_virtual(Virtual::Impure)
            .with_output("bool")
            .with_param("e", "QEvent *")
            .with_relay_mode(RelayMode::Callback);

        assert_eq!(
            cpp_function_callback(&state, &f),
            "bool event(QEvent * e) { return callbackQObject_Event(this, e); };"
        );
    }

    #[test]
    fn test_const_void_overload() {
        let model = ClassModel::new();
        let state = GenerationState::new(&model, GenerationOptions::default());
        let f = Function::new("QWidget", "render")
            .with_virtual(Virtual::Pure)
            .with_output("void")
            .with_param("", "QPainter *")
            .with_overload(2)
            .with_const()
            .with_relay_mode(RelayMode::Callback);

        assert_eq!(
            cpp_function_callback(&state, &f),
            "void render(QPainter * v0) const { callbackQWidget_Render2(this, v0); };"
        );
    }

    #[test]
    fn test_signal_and_destructor() {
        let model = ClassModel::new();
        let state = GenerationState::new(&model, GenerationOptions::default());

        let signal = Function::new("QTimer", "timeout")
            .with_meta(Meta::Signal)
            .with_output("void")
            .with_relay_mode(RelayMode::Callback);
        assert_eq!(
            cpp_function_callback(&state, &signal),
            "void Signal_Timeout() { callbackQTimer_Timeout(this); };"
        );

        let destructor = Function::destructor("QTimer")
            .with_virtual(Virtual::Impure)
            .with_relay_mode(RelayMode::Callback);
        assert_eq!(
            cpp_function_callback(&state, &destructor),
            "~MyQTimer() { callbackQTimer_DestroyQTimer(this); };"
        );
    }

    #[test]
    fn test_signal_as_slot_header() {
        let model = ClassModel::new();
        let state = GenerationState::new(&model, GenerationOptions::moc());
        let f = Function::new("Counter", "valueChanged")
            .with_meta(Meta::Slot)
            .with_output("void")
            .with_param("value", "int");

        assert_eq!(callback_header(&state, &f), "void valueChanged(int value)");
    }
}
