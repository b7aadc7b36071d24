//! Class model input (JSON array of classes).

use crate::{BuildError, Result};
use shimgen_model::{Class, ClassModel};
use std::path::Path;

/// Parse a class model from its JSON text.
pub fn parse_model(json: &str) -> Result<ClassModel> {
    let classes: Vec<Class> = serde_json::from_str(json)?;
    let mut model = ClassModel::new();
    for class in classes {
        let name = class.name.to_string();
        if model.insert(class).is_some() {
            return Err(BuildError::DuplicateClass(name));
        }
    }
    Ok(model)
}

/// Read and parse a class model file.
pub fn load_model(path: &Path) -> Result<ClassModel> {
    let content = std::fs::read_to_string(path)?;
    parse_model(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shimgen_model::{Meta, Virtual};

    const MODEL: &str = r#"[
        {
            "name": "QObject",
            "module": "QtCore",
            "functions": [
                { "name": "QObject", "fullname": "QObject::QObject", "meta": "constructor",
                  "parameters": [{ "name": "parent", "value": "QObject *" }] },
                { "name": "event", "fullname": "QObject::event", "output": "bool",
                  "virtual": "impure", "parameters": [{ "name": "e", "value": "QEvent *" }] }
            ]
        },
        { "name": "QTimer", "module": "QtCore", "bases": ["QObject"], "export": true }
    ]"#;

    #[test]
    fn test_parse_model() {
        let model = parse_model(MODEL).unwrap();
        assert_eq!(model.len(), 2);

        let object = model.get("QObject").unwrap();
        assert_eq!(object.functions[0].meta, Meta::Constructor);
        assert_eq!(object.functions[1].virtuality, Virtual::Impure);
        assert_eq!(object.functions[1].parameters[0].value, "QEvent *");

        let timer = model.get("QTimer").unwrap();
        assert_eq!(timer.primary_base(), Some("QObject"));
        assert!(timer.export);
        assert_eq!(timer.supported, None);
    }

    #[test]
    fn test_duplicate_class() {
        let json = r#"[{ "name": "QPoint", "module": "QtCore" },
                       { "name": "QPoint", "module": "QtGui" }]"#;
        assert!(matches!(
            parse_model(json),
            Err(BuildError::DuplicateClass(name)) if name == "QPoint"
        ));
    }

    #[test]
    fn test_load_model_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, MODEL).unwrap();

        assert_eq!(load_model(&path).unwrap().len(), 2);
        assert!(matches!(
            load_model(&dir.path().join("missing.json")),
            Err(BuildError::Read(_))
        ));
    }
}
