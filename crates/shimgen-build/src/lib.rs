//! Project inputs for the shimgen generator.
//!
//! This crate provides:
//! - Generator configuration format (`shimgen.toml`)
//! - Loading the class model from its JSON description
//!
//! # Example
//!
//! ```toml
//! # shimgen.toml
//! [generator]
//! platform = "linux"
//! qt_version = "5.8.0"
//! modules = ["Core", "Widgets"]
//!
//! [output]
//! dir = "generated"
//! dump_dir = "dump"
//! ```

mod config;
mod error;
mod input;

pub use config::{GeneratorConfig, OutputConfig, ShimgenConfig};
pub use error::{BuildError, Result};
pub use input::{load_model, parse_model};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_config() {
        let toml = r#"
[generator]
modules = ["Core"]
        "#;

        let config: ShimgenConfig = toml::from_str(toml).expect("Failed to parse config");
        assert_eq!(config.generator.modules, vec!["Core"]);
        assert_eq!(config.output.dir.to_str(), Some("generated"));
        config.validate().unwrap();
    }
}
