//! The read-only context shared by every generation step.

use crate::eligibility::{self, Eligibility};
use shimgen_model::{qualified_module, Class, ClassModel, Function, Platform, MOC};
use smol_str::SmolStr;

/// Flags of a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOptions {
    /// Generate for the meta-object compiler instead of the bindings.
    pub moc: bool,
    /// Only emit what is exported to the minimal build.
    pub minimal: bool,
    pub platform: Platform,
    /// Framework version, e.g. `5.8.0`.
    pub qt_version: String,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            moc: false,
            minimal: false,
            platform: Platform::current(),
            qt_version: "5.8.0".to_string(),
        }
    }
}

impl GenerationOptions {
    pub fn moc() -> Self {
        Self {
            moc: true,
            ..Self::default()
        }
    }

    pub fn minimal() -> Self {
        Self {
            minimal: true,
            ..Self::default()
        }
    }
}

/// Everything a generation run reads: the class model, the run's flags, and
/// the support decisions derived from both.
///
/// Built once per run and never mutated afterwards.
#[derive(Debug)]
pub struct GenerationState<'m> {
    model: &'m ClassModel,
    options: GenerationOptions,
    eligibility: Eligibility,
}

impl<'m> GenerationState<'m> {
    pub fn new(model: &'m ClassModel, options: GenerationOptions) -> Self {
        let eligibility = Eligibility::compute(model, options.minimal);
        Self {
            model,
            options,
            eligibility,
        }
    }

    pub fn model(&self) -> &'m ClassModel {
        self.model
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    pub fn eligibility(&self) -> &Eligibility {
        &self.eligibility
    }

    pub fn is_moc(&self) -> bool {
        self.options.moc
    }

    pub fn is_minimal(&self) -> bool {
        self.options.minimal
    }

    pub fn is_class_supported(&self, class: &Class) -> bool {
        self.eligibility.is_class_supported(class)
    }

    pub fn is_function_supported(&self, function: &Function) -> bool {
        self.eligibility.is_function_supported(function)
    }

    /// Whether a shim class body is generated for `class`.
    pub fn needs_shim(&self, class: &Class) -> bool {
        self.is_class_supported(class) && (class.has_callback_functions() || self.is_moc())
    }

    pub fn all_bases(&self, class: &Class) -> Vec<SmolStr> {
        eligibility::all_bases(self.model, class)
    }

    pub fn has_unimplemented_pure_virtuals(&self, class_name: &str) -> bool {
        eligibility::has_unimplemented_pure_virtuals(self.model, class_name)
    }

    /// Name of the generated subclass of `class_name`.
    ///
    /// In moc mode the user's class is generated under its own name.
    pub fn shim_name(&self, class_name: &str) -> String {
        if self.is_moc() {
            class_name.to_string()
        } else {
            format!("My{class_name}")
        }
    }

    /// The module name classes are filed under for a module selection.
    pub fn module_key(&self, module: &str) -> SmolStr {
        if self.is_moc() {
            SmolStr::new(MOC)
        } else {
            qualified_module(module)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_follow_mode() {
        let model = ClassModel::new();

        let normal = GenerationState::new(&model, GenerationOptions::default());
        assert_eq!(normal.shim_name("QTimer"), "MyQTimer");
        assert_eq!(normal.module_key("Core"), "QtCore");

        let moc = GenerationState::new(&model, GenerationOptions::moc());
        assert_eq!(moc.shim_name("Counter"), "Counter");
        assert_eq!(moc.module_key("Core"), "moc");
    }
}
