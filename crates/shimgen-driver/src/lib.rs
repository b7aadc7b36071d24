use miette::Result;
use shimgen_build::ShimgenConfig;
use shimgen_common::DiagnosticLevel;
use shimgen_codegen::{
    cpp_template, output_stem, render_dump, GenerationOptions, GenerationState, Generated,
};
use shimgen_model::{available_modules, qualified_module, short_module, ClassModel, MOC};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Generator driver that orchestrates a generation run.
pub struct Driver {
    config: ShimgenConfig,
}

/// What a run wrote to disk.
#[derive(Debug, Default)]
pub struct Summary {
    pub sources: Vec<PathBuf>,
    pub dumps: Vec<PathBuf>,
    /// Number of review diagnostics reported across all modules.
    pub diagnostics: usize,
}

impl Driver {
    pub fn new() -> Self {
        Self::with_config(ShimgenConfig::default())
    }

    pub fn with_config(config: ShimgenConfig) -> Self {
        Self { config }
    }

    /// Load the configuration from a `shimgen.toml` file.
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::with_config(ShimgenConfig::from_file(path.as_ref())?))
    }

    pub fn config(&self) -> &ShimgenConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ShimgenConfig {
        &mut self.config
    }

    /// Read the class model description.
    pub fn load_model(&self, path: impl AsRef<Path>) -> Result<ClassModel> {
        let path = path.as_ref();
        let model = shimgen_build::load_model(path)
            .map_err(|e| miette::miette!("Failed to load {}: {}", path.display(), e))?;
        info!(path = %path.display(), classes = model.len(), "loaded class model");
        Ok(model)
    }

    pub fn options(&self) -> GenerationOptions {
        let generator = &self.config.generator;
        GenerationOptions {
            moc: generator.moc,
            minimal: generator.minimal,
            platform: self.config.platform(),
            qt_version: generator.qt_version.clone(),
        }
    }

    /// The modules a run generates, as short names.
    ///
    /// Moc runs produce a single `moc` module. Otherwise the configured list
    /// is intersected with what the platform supports; an empty list selects
    /// every available module.
    pub fn selected_modules(&self) -> Vec<String> {
        if self.config.generator.moc {
            return vec![MOC.to_string()];
        }

        let available =
            available_modules(self.config.platform(), &self.config.generator.qt_version);
        if self.config.generator.modules.is_empty() {
            return available.into_iter().map(str::to_string).collect();
        }

        self.config
            .generator
            .modules
            .iter()
            .filter(|module| {
                let ok = available.contains(&module.as_str());
                if !ok {
                    warn!(module = %module, "module not available for this platform, skipping");
                }
                ok
            })
            .cloned()
            .collect()
    }

    /// Generate every selected module from `model`.
    pub fn generate(&self, model: &ClassModel) -> Result<Vec<Generated>> {
        let state = GenerationState::new(model, self.options());
        let mut generated = Vec::new();

        for module in self.selected_modules() {
            debug!(module = %module, "generating");
            let output = cpp_template(&state, &module)?;
            for diagnostic in &output.diagnostics {
                match diagnostic.level {
                    DiagnosticLevel::Warning => {
                        warn!(module = %output.module, "{}", diagnostic.message)
                    }
                    DiagnosticLevel::Info => {
                        info!(module = %output.module, "{}", diagnostic.message)
                    }
                }
            }
            generated.push(output);
        }

        Ok(generated)
    }

    /// Write each generated module to `<output.dir>/<module>.cpp`.
    pub fn write_sources(&self, generated: &[Generated]) -> Result<Vec<PathBuf>> {
        let dir = &self.config.output.dir;
        std::fs::create_dir_all(dir)
            .map_err(|e| miette::miette!("Failed to create {}: {}", dir.display(), e))?;

        let mut written = Vec::with_capacity(generated.len());
        for output in generated {
            let path = dir.join(format!("{}.cpp", output_stem(&output.module)));
            std::fs::write(&path, &output.source)
                .map_err(|e| miette::miette!("Failed to write {}: {}", path.display(), e))?;
            debug!(path = %path.display(), bytes = output.source.len(), "wrote source");
            written.push(path);
        }
        Ok(written)
    }

    /// Write `<dump_dir>/<module>/<class>.txt` for every class of the
    /// selected modules. Does nothing without a dump directory.
    pub fn write_dumps(&self, model: &ClassModel) -> Result<Vec<PathBuf>> {
        let Some(root) = &self.config.output.dump_dir else {
            return Ok(Vec::new());
        };

        let modules: Vec<_> = self
            .selected_modules()
            .iter()
            .map(|module| qualified_module(module))
            .collect();

        let mut written = Vec::new();
        for class in model.classes().filter(|c| modules.contains(&c.module)) {
            let dir = root.join(short_module(&class.module));
            std::fs::create_dir_all(&dir)
                .map_err(|e| miette::miette!("Failed to create {}: {}", dir.display(), e))?;

            let path = dir.join(format!("{}.txt", class.name));
            std::fs::write(&path, render_dump(class))
                .map_err(|e| miette::miette!("Failed to write {}: {}", path.display(), e))?;
            written.push(path);
        }
        written.sort();
        Ok(written)
    }

    /// Load the model, generate, and write everything.
    pub fn run(&self, model_path: impl AsRef<Path>) -> Result<Summary> {
        let model = self.load_model(model_path)?;
        let generated = self.generate(&model)?;

        let summary = Summary {
            diagnostics: generated.iter().map(|g| g.diagnostics.len()).sum(),
            sources: self.write_sources(&generated)?,
            dumps: self.write_dumps(&model)?,
        };

        info!(
            modules = summary.sources.len(),
            dumps = summary.dumps.len(),
            diagnostics = summary.diagnostics,
            "generation finished"
        );
        Ok(summary)
    }
}

impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shimgen_model::Platform;
    use tempfile::tempdir;

    const MODEL: &str = r#"[
        { "name": "QObject", "module": "QtCore",
          "functions": [
            { "name": "QObject", "fullname": "QObject::QObject", "meta": "constructor" },
            { "name": "destroyed", "fullname": "QObject::destroyed", "meta": "signal" }
          ] },
        { "name": "QWidget", "module": "QtWidgets", "bases": ["QObject"] },
        { "name": "Counter", "module": "moc", "bases": ["QObject"],
          "functions": [
            { "name": "changed", "fullname": "Counter::changed", "meta": "signal" }
          ] }
    ]"#;

    fn driver(dir: &Path, modules: &[&str]) -> Driver {
        let mut driver = Driver::new();
        let config = driver.config_mut();
        config.generator.platform = Some(Platform::Linux);
        config.generator.modules = modules.iter().map(|m| m.to_string()).collect();
        config.output.dir = dir.join("out");
        driver
    }

    #[test]
    fn test_selected_modules() {
        let dir = tempdir().unwrap();
        let mut driver = driver(dir.path(), &["Core", "WinExtras", "Widgets"]);
        assert_eq!(driver.selected_modules(), vec!["Core", "Widgets"]);

        driver.config_mut().generator.modules.clear();
        let all = driver.selected_modules();
        assert_eq!(all.first().map(String::as_str), Some("Core"));
        assert!(all.iter().any(|m| m == "X11Extras"));
        assert!(!all.iter().any(|m| m == "WinExtras"));

        driver.config_mut().generator.moc = true;
        assert_eq!(driver.selected_modules(), vec!["moc"]);
    }

    #[test]
    fn test_run_writes_sources_and_dumps() {
        let dir = tempdir().unwrap();
        let model_path = dir.path().join("model.json");
        std::fs::write(&model_path, MODEL).unwrap();

        let mut driver = driver(dir.path(), &["Core", "Widgets"]);
        driver.config_mut().output.dump_dir = Some(dir.path().join("dump"));

        let summary = driver.run(&model_path).unwrap();
        assert_eq!(
            summary.sources,
            vec![dir.path().join("out/core.cpp"), dir.path().join("out/widgets.cpp")]
        );
        assert_eq!(
            summary.dumps,
            vec![
                dir.path().join("dump/core/QObject.txt"),
                dir.path().join("dump/widgets/QWidget.txt"),
            ]
        );

        let core = std::fs::read_to_string(dir.path().join("out/core.cpp")).unwrap();
        assert!(core.starts_with("// +build !minimal\n"));
        assert!(core.contains("class MyQObject: public QObject"));
        assert!(core.contains("void* QObject_NewQObject()"));
        assert!(!core.contains("Counter"));
    }

    #[test]
    fn test_moc_run() {
        let dir = tempdir().unwrap();
        let model_path = dir.path().join("model.json");
        std::fs::write(&model_path, MODEL).unwrap();

        let mut driver = driver(dir.path(), &[]);
        driver.config_mut().generator.moc = true;

        let summary = driver.run(&model_path).unwrap();
        assert_eq!(summary.sources, vec![dir.path().join("out/moc.cpp")]);

        let moc = std::fs::read_to_string(&summary.sources[0]).unwrap();
        assert!(moc.contains("class Counter: public QObject\n{\nQ_OBJECT\n"));
        assert!(moc.contains("Q_DECLARE_METATYPE(Counter*)"));
    }

    #[test]
    fn test_from_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("shimgen.toml");
        std::fs::write(
            &path,
            "[generator]\nplatform = \"windows\"\nmodules = [\"Core\", \"WinExtras\"]\n",
        )
        .unwrap();

        let driver = Driver::from_config_file(&path).unwrap();
        assert_eq!(driver.options().platform, Platform::Windows);
        assert_eq!(driver.selected_modules(), vec!["Core", "WinExtras"]);

        std::fs::write(&path, "[generator]\nmodules = [\"Nope\"]\n").unwrap();
        assert!(Driver::from_config_file(&path).is_err());
    }

    #[test]
    fn test_missing_model() {
        let dir = tempdir().unwrap();
        let driver = driver(dir.path(), &["Core"]);
        let err = driver.run(dir.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to load"));
    }
}
