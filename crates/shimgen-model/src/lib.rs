mod class;
mod function;
mod model;
mod module;
mod types;

pub use class::*;
pub use function::*;
pub use model::*;
pub use module::*;
pub use types::*;
