use crate::class::Class;
use crate::module::FRAMEWORK_PREFIX;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

/// Every class known to a generation run, indexed by name.
///
/// The model is populated once, before generation starts, and only read
/// afterwards.
#[derive(Debug, Clone, Default)]
pub struct ClassModel {
    classes: FxHashMap<SmolStr, Class>,
}

impl ClassModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a class, replacing any previous class of the same name.
    pub fn insert(&mut self, class: Class) -> Option<Class> {
        self.classes.insert(class.name.clone(), class)
    }

    pub fn get(&self, name: &str) -> Option<&Class> {
        self.classes.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// All classes, in no particular order.
    pub fn classes(&self) -> impl Iterator<Item = &Class> {
        self.classes.values()
    }

    /// Whether `value` (already cleaned of qualifiers) names an enum.
    ///
    /// Qualified names (`QTimer::TimerType`) are looked up in their class;
    /// unqualified names are looked up in `scope`, the class using them.
    /// Framework namespace enums (`Qt::AlignmentFlag`) resolve through the
    /// namespace pseudo-class when the model has one.
    pub fn is_enum(&self, value: &str, scope: Option<&str>) -> bool {
        match value.rsplit_once("::") {
            Some((owner, name)) => self
                .get(owner)
                .is_some_and(|class| class.find_enum(name).is_some()),
            None => scope
                .and_then(|scope| self.get(scope))
                .is_some_and(|class| class.find_enum(value).is_some()),
        }
    }

    /// Whether the class name is re-exported by the module umbrella headers
    /// (`Qt` namespace and friends) rather than having its own header.
    pub fn is_framework_namespace(name: &str) -> bool {
        name.starts_with(FRAMEWORK_PREFIX)
    }
}

impl FromIterator<Class> for ClassModel {
    fn from_iter<I: IntoIterator<Item = Class>>(iter: I) -> Self {
        let mut model = ClassModel::new();
        for class in iter {
            model.insert(class);
        }
        model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::class::Enum;

    fn model() -> ClassModel {
        [
            Class::new("Qt", "QtCore").with_enum(Enum::new("Qt", "AlignmentFlag")),
            Class::new("QTimer", "QtCore").with_enum(Enum::new("QTimer", "TimerType")),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_lookup() {
        let model = model();
        assert_eq!(model.len(), 2);
        assert!(model.contains("QTimer"));
        assert!(model.get("QObject").is_none());
    }

    #[test]
    fn test_enum_resolution() {
        let model = model();
        assert!(model.is_enum("Qt::AlignmentFlag", None));
        assert!(model.is_enum("QTimer::TimerType", None));
        assert!(model.is_enum("TimerType", Some("QTimer")));
        assert!(!model.is_enum("TimerType", None));
        assert!(!model.is_enum("QTimer::Nope", None));
    }

    #[test]
    fn test_framework_namespace() {
        assert!(ClassModel::is_framework_namespace("Qt"));
        assert!(ClassModel::is_framework_namespace("QtCharts"));
        assert!(!ClassModel::is_framework_namespace("QTimer"));
    }
}
