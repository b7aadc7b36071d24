//! Framework module table and dependency resolution.
//!
//! Every framework module the generator knows about is listed here together
//! with the modules it links against. The table is static and must stay a
//! DAG; [`validate`] checks that and is exercised by the tests.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use shimgen_common::{GenError, Result};
use smol_str::SmolStr;

/// Pseudo-module holding classes processed in moc (meta-object tooling) mode.
pub const MOC: &str = "moc";

/// Pseudo-module bundling everything linked statically on iOS.
pub const BUILD_IOS: &str = "build_ios";

/// Prefix of the framework's own module and namespace names.
pub const FRAMEWORK_PREFIX: &str = "Qt";

/// Direct module dependencies, in link order.
const MODULE_DEPS: &[(&str, &[&str])] = &[
    ("Core", &[]),
    ("AndroidExtras", &["Core"]),
    ("Gui", &["Core"]),
    ("Network", &["Core"]),
    ("Xml", &["XmlPatterns", "Core"]),
    ("DBus", &["Core"]),
    ("Nfc", &["Core"]),
    ("Script", &["Core"]),
    ("Sensors", &["Core"]),
    ("Positioning", &["Core"]),
    ("Widgets", &["Gui", "Core"]),
    ("Sql", &["Widgets", "Gui", "Core"]),
    ("MacExtras", &["Gui", "Core"]),
    ("Qml", &["Network", "Core"]),
    ("WebSockets", &["Network", "Core"]),
    ("XmlPatterns", &["Network", "Core"]),
    ("Bluetooth", &["Core"]),
    // Network is needed for static linking on iOS.
    ("WebChannel", &["Network", "Qml", "Core"]),
    ("Svg", &["Widgets", "Gui", "Core"]),
    ("Multimedia", &["Widgets", "Network", "Gui", "Core"]),
    ("Quick", &["Widgets", "Network", "Qml", "Gui", "Core"]),
    ("Help", &["Sql", "Network", "Widgets", "Gui", "Core"]),
    ("Location", &["Positioning", "Quick", "Gui", "Core"]),
    ("ScriptTools", &["Script", "Widgets", "Core"]),
    ("UiTools", &["Widgets", "Gui", "Core"]),
    ("X11Extras", &["Gui", "Core"]),
    ("WinExtras", &["Gui", "Core"]),
    (
        "WebEngine",
        &["Widgets", "WebChannel", "Network", "Quick", "Gui", "Qml", "Core"],
    ),
    ("TestLib", &["Widgets", "Gui", "Core"]),
    ("SerialPort", &["Core"]),
    ("SerialBus", &["Core"]),
    ("PrintSupport", &["Widgets", "Gui", "Core"]),
    ("Designer", &["Widgets", "Gui", "Xml", "Core"]),
    ("Scxml", &["Network", "Qml", "Core"]),
    ("Gamepad", &["Gui", "Core"]),
    ("Purchasing", &["Core"]),
    ("DataVisualization", &["Gui", "Core"]),
    ("Charts", &["Widgets", "Gui", "Core"]),
    ("Speech", &["Core"]),
    ("QuickControls2", &["Core"]),
    ("Sailfish", &["Core"]),
    (MOC, &[]),
    (
        BUILD_IOS,
        &[
            "Core", "Gui", "Network", "Sql", "Xml", "DBus", "Nfc", "Script", "Sensors",
            "Positioning", "Widgets", "Qml", "WebSockets", "XmlPatterns", "Bluetooth",
            "WebChannel", "Svg", "Multimedia", "Quick", "Help", "Location", "ScriptTools",
            "UiTools", "PrintSupport",
        ],
    ),
];

/// Master list of generatable modules, in declaration order.
const MODULES: &[&str] = &[
    "Core",
    "AndroidExtras",
    "Gui",
    "Network",
    "Xml",
    "DBus",
    "Nfc",
    "Script",
    "Sensors",
    "Positioning",
    "Widgets",
    "Sql",
    "MacExtras",
    "Qml",
    "WebSockets",
    "XmlPatterns",
    "Bluetooth",
    "WebChannel",
    "Svg",
    "Multimedia",
    "Quick",
    "Help",
    "Location",
    "ScriptTools",
    "UiTools",
    "X11Extras",
    "WinExtras",
    "WebEngine",
    "TestLib",
    "SerialPort",
    "SerialBus",
    "PrintSupport",
    "Designer",
    "Scxml",
    "Gamepad",
    "Purchasing",
    "DataVisualization",
    "Charts",
    "Speech",
    "QuickControls2",
    "Sailfish",
];

/// Framework version the `Speech` module is gated to.
const SPEECH_VERSION: &str = "5.8.0";

/// Target platform of a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Linux,
    #[serde(alias = "darwin")]
    Macos,
    Windows,
    Android,
    Ios,
    Sailfish,
}

impl Platform {
    /// The platform this binary was built for.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::Macos
        } else if cfg!(target_os = "android") {
            Platform::Android
        } else if cfg!(target_os = "ios") {
            Platform::Ios
        } else {
            Platform::Linux
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "linux" => Some(Platform::Linux),
            "macos" | "darwin" => Some(Platform::Macos),
            "windows" => Some(Platform::Windows),
            "android" => Some(Platform::Android),
            "ios" => Some(Platform::Ios),
            "sailfish" => Some(Platform::Sailfish),
            _ => None,
        }
    }
}

pub fn is_known_module(module: &str) -> bool {
    direct_dependencies(module).is_ok()
}

/// The dependencies listed for `module`, without following them.
pub fn direct_dependencies(module: &str) -> Result<&'static [&'static str]> {
    MODULE_DEPS
        .iter()
        .find(|(name, _)| *name == module)
        .map(|(_, deps)| *deps)
        .ok_or_else(|| GenError::UnknownModule(module.into()))
}

/// Every module `module` requires, directly or transitively.
///
/// Direct dependencies come first in their declared order, followed by what
/// they pull in (depth-first, first occurrence wins). The module itself is
/// never part of the result.
pub fn dependencies(module: &str) -> Result<IndexSet<&'static str>> {
    let mut out = IndexSet::new();
    let direct = direct_dependencies(module)?;
    out.extend(direct.iter().copied());

    for &dep in direct {
        collect_dependencies(dep, &mut out)?;
    }

    out.shift_remove(module);
    Ok(out)
}

fn collect_dependencies(module: &'static str, out: &mut IndexSet<&'static str>) -> Result<()> {
    for &dep in direct_dependencies(module)? {
        if out.insert(dep) {
            collect_dependencies(dep, out)?;
        }
    }
    Ok(())
}

/// Whether `module` requires `other`, directly or transitively.
pub fn requires(module: &str, other: &str) -> Result<bool> {
    Ok(dependencies(module)?.contains(other))
}

/// Modules that can be generated for `platform` and framework `version`.
///
/// This is a stable filter over the master list: surviving modules keep their
/// declaration order.
pub fn available_modules(platform: Platform, version: &str) -> Vec<&'static str> {
    MODULES
        .iter()
        .copied()
        .filter(|module| is_available(module, platform, version))
        .collect()
}

fn is_available(module: &str, platform: Platform, version: &str) -> bool {
    match module {
        "WebEngine" => matches!(platform, Platform::Linux | Platform::Macos),
        "WinExtras" => platform == Platform::Windows,
        "MacExtras" => platform == Platform::Macos,
        "X11Extras" => platform == Platform::Linux,
        "Speech" => version == SPEECH_VERSION,
        _ => true,
    }
}

/// Check that every listed dependency is known and the table is acyclic.
pub fn validate() -> Result<()> {
    for (module, deps) in MODULE_DEPS {
        for dep in *deps {
            if !is_known_module(dep) {
                return Err(GenError::DanglingDependency {
                    module: SmolStr::new(module),
                    dependency: SmolStr::new(dep),
                });
            }
        }
    }

    // Colour-marking DFS: 1 = on the stack, 2 = done.
    let mut marks = vec![0u8; MODULE_DEPS.len()];
    for index in 0..MODULE_DEPS.len() {
        visit(index, &mut marks)?;
    }
    Ok(())
}

fn visit(index: usize, marks: &mut [u8]) -> Result<()> {
    match marks[index] {
        2 => return Ok(()),
        1 => return Err(GenError::ModuleCycle(MODULE_DEPS[index].0.into())),
        _ => {}
    }

    marks[index] = 1;
    for dep in MODULE_DEPS[index].1 {
        if let Some(next) = MODULE_DEPS.iter().position(|(name, _)| name == dep) {
            visit(next, marks)?;
        }
    }
    marks[index] = 2;
    Ok(())
}

/// The framework-qualified module name (`Core` -> `QtCore`).
///
/// Pseudo-modules and already-qualified names are returned unchanged.
pub fn qualified_module(module: &str) -> SmolStr {
    if module == MOC || module.starts_with(FRAMEWORK_PREFIX) {
        SmolStr::new(module)
    } else {
        SmolStr::new(format!("{FRAMEWORK_PREFIX}{module}"))
    }
}

/// The lower-cased short module name used for file names (`QtCore` -> `core`).
pub fn short_module(module: &str) -> String {
    module
        .strip_prefix(FRAMEWORK_PREFIX)
        .unwrap_or(module)
        .to_lowercase()
}
