//! Structural errors raised while synthesising bindings.
//!
//! Per-entity problems (an unrepresentable parameter, an unsupported class)
//! never show up here: those entities are silently left out of the output.
//! Everything in [`GenError`] means the input model itself is malformed.

use miette::Diagnostic as MietteDiagnostic;
use smol_str::SmolStr;
use thiserror::Error;

/// Result type for generation operations.
pub type Result<T> = std::result::Result<T, GenError>;

#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
pub enum GenError {
    /// A module name that is not part of the dependency table.
    #[error("unknown module `{0}`")]
    #[diagnostic(code(shimgen::unknown_module), help("run `shimgen modules` to list known modules"))]
    UnknownModule(SmolStr),

    /// The dependency table itself references a module it does not define.
    #[error("module `{module}` depends on unknown module `{dependency}`")]
    #[diagnostic(code(shimgen::dangling_dependency))]
    DanglingDependency { module: SmolStr, dependency: SmolStr },

    /// A module reaches itself through its dependencies.
    #[error("module dependency cycle through `{0}`")]
    #[diagnostic(code(shimgen::module_cycle))]
    ModuleCycle(SmolStr),

    /// The base-class graph among the classes being ordered is not acyclic.
    #[error("cyclic base classes: {}", classes.join(", "))]
    #[diagnostic(
        code(shimgen::cyclic_bases),
        help("every class must eventually derive from a class outside the cycle")
    )]
    CyclicBases { classes: Vec<SmolStr> },

    /// A class generated in moc mode needs a base to derive from.
    #[error("class `{0}` has no base class to derive the moc shim from")]
    #[diagnostic(code(shimgen::missing_moc_base))]
    MissingToolingBase(SmolStr),
}
