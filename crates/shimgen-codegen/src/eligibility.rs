//! Which classes and functions can be represented in the bindings.
//!
//! Support is decided once per run from the structural attributes of each
//! entity and cached in [`Eligibility`]. An explicit decision recorded on the
//! entity by the model populator always wins over the computed one.

use rustc_hash::{FxHashMap, FxHashSet};
use shimgen_model::{
    clean_value, is_packed_list, is_template, is_unrepresentable_syntax, is_void, unpacked_list,
    Class, ClassModel, Function, Meta, Virtual, SCALARS, STRINGS,
};
use smol_str::SmolStr;

/// Cached support decisions for every class and function of a model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Eligibility {
    classes: FxHashMap<SmolStr, bool>,
    functions: FxHashMap<(SmolStr, u32), bool>,
}

impl Eligibility {
    pub fn compute(model: &ClassModel, minimal: bool) -> Self {
        let mut eligibility = Eligibility::default();

        for class in model.classes() {
            let class_supported = class_supported(model, class, minimal);
            eligibility
                .classes
                .insert(class.name.clone(), class_supported);

            for function in &class.functions {
                let supported = function_supported(model, class, function, class_supported, minimal);
                eligibility.functions.insert(function.override_key(), supported);
            }
        }

        eligibility
    }

    pub fn is_class_supported(&self, class: &Class) -> bool {
        self.classes.get(&class.name).copied().unwrap_or(false)
    }

    /// Functions that were not part of the model when the cache was built
    /// (such as re-qualified copies) are unsupported.
    pub fn is_function_supported(&self, function: &Function) -> bool {
        self.functions
            .get(&function.override_key())
            .copied()
            .unwrap_or(false)
    }
}

fn class_supported(model: &ClassModel, class: &Class, minimal: bool) -> bool {
    if let Some(supported) = class.supported {
        return supported;
    }

    if is_template(&class.name) {
        return false;
    }

    if minimal && !class.export {
        return false;
    }

    class.bases.iter().all(|base| model.contains(base))
}

fn function_supported(
    model: &ClassModel,
    class: &Class,
    function: &Function,
    class_supported: bool,
    minimal: bool,
) -> bool {
    if let Some(supported) = function.supported {
        return supported;
    }

    if !class_supported || !is_identifier(&function.name) {
        return false;
    }

    if minimal && !function.export && function.meta != Meta::Destructor {
        return false;
    }

    let returns_value = !function.is_constructor() && function.meta != Meta::Destructor;
    if returns_value && !is_representable(model, &function.output, Some(&class.name)) {
        return false;
    }

    function
        .parameters
        .iter()
        .all(|p| !is_void(&p.value) && is_representable(model, &p.value, Some(&class.name)))
}

/// Member names that map onto generated C identifiers. Operators do not.
fn is_identifier(name: &str) -> bool {
    let name = name.strip_prefix('~').unwrap_or(name);
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Whether a parameter or return type can cross the language boundary.
///
/// `scope` is the class whose member uses the type; unqualified enum names
/// are resolved in it.
pub fn is_representable(model: &ClassModel, value: &str, scope: Option<&str>) -> bool {
    if is_unrepresentable_syntax(value) {
        return false;
    }

    let clean = clean_value(value);
    if is_void(&clean) || SCALARS.contains(&clean.as_str()) || STRINGS.contains(&clean.as_str()) {
        return true;
    }

    if is_packed_list(&clean) {
        return unpacked_list(&clean).is_some_and(|inner| model.contains(&inner));
    }

    if is_template(&clean) {
        return false;
    }

    model.contains(&clean) || model.is_enum(&clean, scope)
}

/// Ancestors of `class`, nearest first.
///
/// Follows the primary base of each class. A base missing from the model is
/// still listed but ends the walk.
pub fn all_bases(model: &ClassModel, class: &Class) -> Vec<SmolStr> {
    let mut bases = Vec::new();
    let mut seen = FxHashSet::default();
    seen.insert(class.name.clone());

    let mut current = class.primary_base();
    while let Some(base) = current {
        if !seen.insert(SmolStr::new(base)) {
            break;
        }
        bases.push(SmolStr::new(base));
        current = model.get(base).and_then(Class::primary_base);
    }

    bases
}

/// Whether instantiating `class_name` would hit a pure virtual function that
/// neither it nor a nearer ancestor implements.
///
/// Overrides are matched on name, normalised parameter types and constness. A
/// pure destructor only makes its own class abstract, since subclasses always
/// provide one implicitly.
pub fn has_unimplemented_pure_virtuals(model: &ClassModel, class_name: &str) -> bool {
    let Some(class) = model.get(class_name) else {
        return false;
    };

    if class
        .functions
        .iter()
        .any(|f| f.meta == Meta::Destructor && f.virtuality == Virtual::Pure)
    {
        return true;
    }

    let bases = all_bases(model, class);
    let chain = std::iter::once(class).chain(bases.iter().filter_map(|base| model.get(base)));

    let mut implemented = FxHashSet::default();
    for level in chain {
        for function in &level.functions {
            if function.is_constructor() || function.meta == Meta::Destructor {
                continue;
            }

            let key = function.signature_key();
            match function.virtuality {
                Virtual::Pure if !implemented.contains(&key) => return true,
                Virtual::Pure => {}
                _ => {
                    implemented.insert(key);
                }
            }
        }
    }

    false
}
