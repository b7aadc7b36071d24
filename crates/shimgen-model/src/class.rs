use crate::function::Function;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt;

/// A value of an enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    pub name: SmolStr,
    /// Value text as written in the header, e.g. `0x0001` or `Qt::UserRole`.
    #[serde(default)]
    pub value: String,
}

/// An enum declared inside a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enum {
    pub name: SmolStr,
    /// Class-qualified name, e.g. `QTimer::TimerType`.
    pub fullname: SmolStr,
    #[serde(default)]
    pub values: Vec<EnumValue>,
}

impl Enum {
    pub fn new(class: &str, name: &str) -> Self {
        Self {
            name: SmolStr::new(name),
            fullname: SmolStr::new(format!("{class}::{name}")),
            values: Vec::new(),
        }
    }

    pub fn with_value(mut self, name: &str, value: &str) -> Self {
        self.values.push(EnumValue {
            name: SmolStr::new(name),
            value: value.to_string(),
        });
        self
    }
}

impl fmt::Display for Enum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "enum {} {{", self.fullname)?;
        let values = self
            .values
            .iter()
            .map(|v| format!("{} = {}", v.name, v.value))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, " {values} }}")
    }
}

/// A class of the framework, as populated by the header parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Class {
    pub name: SmolStr,
    /// Owning module, e.g. `QtCore`, or `moc` for user classes.
    pub module: SmolStr,
    /// Direct bases, primary base first.
    #[serde(default)]
    pub bases: Vec<SmolStr>,
    #[serde(default)]
    pub functions: Vec<Function>,
    #[serde(default)]
    pub enums: Vec<Enum>,
    /// Part of the minimal build.
    #[serde(default)]
    pub export: bool,
    /// Support decision made when the model was populated.
    #[serde(default)]
    pub supported: Option<bool>,
}

impl Class {
    pub fn new(name: &str, module: &str) -> Self {
        Self {
            name: SmolStr::new(name),
            module: SmolStr::new(module),
            bases: Vec::new(),
            functions: Vec::new(),
            enums: Vec::new(),
            export: false,
            supported: None,
        }
    }

    pub fn with_base(mut self, base: &str) -> Self {
        self.bases.push(SmolStr::new(base));
        self
    }

    pub fn with_function(mut self, function: Function) -> Self {
        self.functions.push(function);
        self
    }

    pub fn with_enum(mut self, e: Enum) -> Self {
        self.enums.push(e);
        self
    }

    pub fn with_supported(mut self, supported: bool) -> Self {
        self.supported = Some(supported);
        self
    }

    pub fn with_export(mut self) -> Self {
        self.export = true;
        self
    }

    /// The base followed when flattening the hierarchy.
    pub fn primary_base(&self) -> Option<&str> {
        self.bases.first().map(SmolStr::as_str)
    }

    pub fn has_multiple_bases(&self) -> bool {
        self.bases.len() > 1
    }

    /// Any function that a shim would relay through a callback.
    pub fn has_callback_functions(&self) -> bool {
        self.functions.iter().any(Function::has_callback_surface)
    }

    /// Look up an enum declared by this class by its simple name.
    pub fn find_enum(&self, name: &str) -> Option<&Enum> {
        self.enums.iter().find(|e| e.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::{Meta, Virtual};

    #[test]
    fn test_callback_functions() {
        let plain = Class::new("QPoint", "QtCore").with_function(Function::new("QPoint", "x"));
        assert!(!plain.has_callback_functions());

        let signal = Class::new("QTimer", "QtCore")
            .with_function(Function::new("QTimer", "timeout").with_meta(Meta::Signal));
        assert!(signal.has_callback_functions());

        let virt = Class::new("QObject", "QtCore").with_function(
            Function::new("QObject", "event").with_virtual(Virtual::Pure),
        );
        assert!(virt.has_callback_functions());
    }

    #[test]
    fn test_bases() {
        let class = Class::new("QWidget", "QtWidgets")
            .with_base("QObject")
            .with_base("QPaintDevice");
        assert_eq!(class.primary_base(), Some("QObject"));
        assert!(class.has_multiple_bases());
        assert_eq!(Class::new("QObject", "QtCore").primary_base(), None);
    }

    #[test]
    fn test_enum_display() {
        let e = Enum::new("QTimer", "Kind").with_value("A", "0").with_value("B", "1");
        assert_eq!(e.to_string(), "enum QTimer::Kind { A = 0, B = 1 }");
    }
}
