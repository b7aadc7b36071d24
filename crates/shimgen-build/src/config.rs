//! Generator configuration types (shimgen.toml format).

use serde::{Deserialize, Serialize};
use shimgen_model::{is_known_module, Platform, MOC};
use std::path::{Path, PathBuf};

/// Root generator configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShimgenConfig {
    /// What to generate.
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Where generated files go.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Generation flags.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Target platform (default: the host platform).
    #[serde(default)]
    pub platform: Option<Platform>,

    /// Framework version, e.g. "5.8.0".
    #[serde(default = "default_qt_version")]
    pub qt_version: String,

    /// Generate for the meta-object compiler.
    #[serde(default)]
    pub moc: bool,

    /// Restrict output to the minimal build.
    #[serde(default)]
    pub minimal: bool,

    /// Modules to generate, by short name. Empty means every available module.
    #[serde(default)]
    pub modules: Vec<String>,
}

/// Output locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving one `.cpp` file per module.
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,

    /// Directory receiving per-class dumps (disabled when unset).
    #[serde(default)]
    pub dump_dir: Option<PathBuf>,
}

fn default_qt_version() -> String {
    "5.8.0".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("generated")
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            platform: None,
            qt_version: default_qt_version(),
            moc: false,
            minimal: false,
            modules: Vec::new(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            dump_dir: None,
        }
    }
}

impl ShimgenConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ShimgenConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject module names the dependency table does not know.
    pub fn validate(&self) -> crate::Result<()> {
        for module in &self.generator.modules {
            if module == MOC || !is_known_module(module) {
                return Err(crate::BuildError::Validation(format!(
                    "unknown module `{module}`"
                )));
            }
        }
        if self.generator.qt_version.trim().is_empty() {
            return Err(crate::BuildError::Validation(
                "qt_version must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// The configured platform, falling back to the host.
    pub fn platform(&self) -> Platform {
        self.generator.platform.unwrap_or_else(Platform::current)
    }
}
