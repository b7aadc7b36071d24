use crate::types::{clean_name, normalized_type};
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt;

/// What kind of member a function is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Meta {
    #[default]
    Plain,
    Constructor,
    CopyConstructor,
    MoveConstructor,
    Destructor,
    Signal,
    Slot,
}

impl Meta {
    pub fn as_str(self) -> &'static str {
        match self {
            Meta::Plain => "plain",
            Meta::Constructor => "constructor",
            Meta::CopyConstructor => "copy-constructor",
            Meta::MoveConstructor => "move-constructor",
            Meta::Destructor => "destructor",
            Meta::Signal => "signal",
            Meta::Slot => "slot",
        }
    }
}

/// Virtuality of a member function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Virtual {
    #[default]
    None,
    Impure,
    Pure,
}

/// How a function is relayed across the language boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelayMode {
    /// Called from the host language into the framework.
    #[default]
    Normal,
    /// Overridden in the shim and forwarded to a host callback.
    Callback,
}

/// A function parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name; may be empty in the framework headers.
    #[serde(default)]
    pub name: SmolStr,
    /// C++ type text, e.g. `const QString &`.
    pub value: String,
}

impl Parameter {
    pub fn new(name: impl Into<SmolStr>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A member function of a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Function {
    /// Simple name, e.g. `timerEvent` or `~QObject`.
    pub name: SmolStr,
    /// Class-qualified name, e.g. `QObject::timerEvent`.
    pub fullname: SmolStr,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Return type text; empty for constructors and destructors.
    #[serde(default)]
    pub output: String,
    #[serde(default)]
    pub meta: Meta,
    #[serde(default, rename = "virtual")]
    pub virtuality: Virtual,
    /// Disambiguates overloads; 0 for the first declaration.
    #[serde(default)]
    pub overload: u32,
    #[serde(default)]
    pub relay: RelayMode,
    #[serde(default)]
    pub is_const: bool,
    #[serde(default)]
    pub is_static: bool,
    /// Part of the minimal build.
    #[serde(default)]
    pub export: bool,
    /// Support decision made when the model was populated; computed from the
    /// signature when absent.
    #[serde(default)]
    pub supported: Option<bool>,
}

impl Function {
    pub fn new(class: &str, name: &str) -> Self {
        Self {
            name: SmolStr::new(name),
            fullname: SmolStr::new(format!("{class}::{name}")),
            parameters: Vec::new(),
            output: String::new(),
            meta: Meta::Plain,
            virtuality: Virtual::None,
            overload: 0,
            relay: RelayMode::Normal,
            is_const: false,
            is_static: false,
            export: false,
            supported: None,
        }
    }

    pub fn constructor(class: &str) -> Self {
        Self::new(class, class).with_meta(Meta::Constructor)
    }

    pub fn destructor(class: &str) -> Self {
        Self::new(class, &format!("~{class}")).with_meta(Meta::Destructor)
    }

    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = meta;
        self
    }

    pub fn with_virtual(mut self, virtuality: Virtual) -> Self {
        self.virtuality = virtuality;
        self
    }

    pub fn with_output(mut self, output: impl Into<String>) -> Self {
        self.output = output.into();
        self
    }

    pub fn with_param(mut self, name: &str, value: &str) -> Self {
        self.parameters.push(Parameter::new(name, value));
        self
    }

    pub fn with_overload(mut self, overload: u32) -> Self {
        self.overload = overload;
        self
    }

    pub fn with_supported(mut self, supported: bool) -> Self {
        self.supported = Some(supported);
        self
    }

    pub fn with_const(mut self) -> Self {
        self.is_const = true;
        self
    }

    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn with_export(mut self) -> Self {
        self.export = true;
        self
    }

    /// A copy of this function relayed in `relay` mode.
    ///
    /// The shared model entry is left untouched.
    pub fn with_relay_mode(&self, relay: RelayMode) -> Self {
        Self {
            relay,
            ..self.clone()
        }
    }

    /// A copy of this function qualified by another class.
    pub fn requalified(&self, class: &str) -> Self {
        Self {
            fullname: SmolStr::new(format!("{class}::{}", self.name)),
            ..self.clone()
        }
    }

    /// The class part of the fully qualified name.
    pub fn class_name(&self) -> &str {
        self.fullname
            .rsplit_once("::")
            .map_or(self.fullname.as_str(), |(class, _)| class)
    }

    /// Key used to track which overrides a shim already covers.
    pub fn override_key(&self) -> (SmolStr, u32) {
        (self.fullname.clone(), self.overload)
    }

    /// Suffix that tells overloads apart in generated names.
    pub fn overload_suffix(&self) -> String {
        if self.overload == 0 {
            String::new()
        } else {
            self.overload.to_string()
        }
    }

    pub fn is_virtual(&self) -> bool {
        self.virtuality != Virtual::None
    }

    pub fn is_constructor(&self) -> bool {
        matches!(
            self.meta,
            Meta::Constructor | Meta::CopyConstructor | Meta::MoveConstructor
        )
    }

    /// Whether the shim overrides this function with a callback trampoline.
    pub fn has_callback_surface(&self) -> bool {
        self.is_virtual() || matches!(self.meta, Meta::Signal | Meta::Slot)
    }

    /// The parameter list as declared, e.g. `int a, QObject * parent`.
    pub fn declared_parameters(&self) -> String {
        self.parameters
            .iter()
            .zip(self.parameter_names())
            .map(|(p, name)| format!("{} {name}", p.value))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Only the parameter types, e.g. `int, QObject *`.
    pub fn parameter_types(&self) -> String {
        self.parameters
            .iter()
            .map(|p| p.value.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// What an override must match: name, normalised parameter types and
    /// constness.
    pub fn signature_key(&self) -> (SmolStr, Vec<String>, bool) {
        let types = self
            .parameters
            .iter()
            .map(|p| normalized_type(&p.value))
            .collect();
        (self.name.clone(), types, self.is_const)
    }

    /// The argument list forwarding every parameter, e.g. `a, parent`.
    pub fn forwarded_arguments(&self) -> String {
        self.parameter_names().join(", ")
    }

    /// Names the generated code uses for each parameter, in order.
    ///
    /// Declared names go through [`clean_name`]. Unnamed parameters become
    /// `v<index>`. A synthesised or renamed parameter moves on to the next
    /// free suffix when its name is taken by another parameter, so the result
    /// never contains duplicates.
    pub fn parameter_names(&self) -> Vec<String> {
        let literal: Vec<&str> = self
            .parameters
            .iter()
            .filter(|p| !p.name.is_empty() && clean_name(&p.name, &p.value) == p.name.as_str())
            .map(|p| p.name.as_str())
            .collect();

        let mut names: Vec<String> = Vec::with_capacity(self.parameters.len());
        for (index, p) in self.parameters.iter().enumerate() {
            let (base, mut candidate) = if p.name.is_empty() {
                ("v".to_string(), format!("v{index}"))
            } else {
                let cleaned = clean_name(&p.name, &p.value);
                (cleaned.clone(), cleaned)
            };
            let kept = candidate == p.name.as_str();

            let mut n = index;
            while names.contains(&candidate) || (!kept && literal.contains(&candidate.as_str())) {
                n += 1;
                candidate = format!("{base}{n}");
            }
            names.push(candidate);
        }
        names
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.meta.as_str())?;
        match self.virtuality {
            Virtual::None => {}
            Virtual::Impure => write!(f, " virtual")?,
            Virtual::Pure => write!(f, " pure-virtual")?,
        }
        if self.is_static {
            write!(f, " static")?;
        }
        if !self.output.is_empty() {
            write!(f, " {}", self.output)?;
        }
        write!(f, " {}({})", self.fullname, self.parameter_types())?;
        if self.is_const {
            write!(f, " const")?;
        }
        if self.overload > 0 {
            write!(f, " #{}", self.overload)?;
        }
        Ok(())
    }
}
