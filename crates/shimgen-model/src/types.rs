//! Helpers over the textual C++ types carried by the class model.

/// Qualifiers and punctuation stripped by [`clean_value`].
const QUALIFIERS: &[&str] = &["*", "const", "&amp", "&", ";"];

/// Container templates that flatten to a list of class pointers.
const PACKED_LISTS: &[&str] = &["QList<", "QVector<", "QStack<", "QQueue<"];

/// Parameter names that collide with host-language keywords or with names
/// used by the generated glue.
const RESERVED_NAMES: &[&str] = &[
    "type",
    "func",
    "range",
    "string",
    "int",
    "map",
    "const",
    "interface",
    "select",
    "strings",
    "new",
    "signal",
    "ptr",
    "register",
];

/// Built-in scalar types that cross the boundary by value.
pub const SCALARS: &[&str] = &[
    "bool",
    "char",
    "uchar",
    "short",
    "ushort",
    "int",
    "uint",
    "long",
    "ulong",
    "qint8",
    "qint16",
    "qint32",
    "qint64",
    "quint8",
    "quint16",
    "quint32",
    "quint64",
    "qlonglong",
    "qulonglong",
    "qreal",
    "float",
    "double",
    "qintptr",
    "quintptr",
    "WId",
    "unsigned int",
    "unsigned char",
    "unsigned short",
    "unsigned long",
    "long long",
    "unsigned long long",
];

/// Framework string-like types converted to host strings.
pub const STRINGS: &[&str] = &["QString", "QStringList", "QByteArray"];

/// Strip pointer, reference and const qualifiers from a type.
pub fn clean_value(value: &str) -> String {
    let mut value = value.to_string();
    for qualifier in QUALIFIERS {
        value = value.replace(qualifier, "");
    }
    value.trim().to_string()
}

/// A parameter name that is safe to use in generated code.
///
/// Reserved names lose their last two characters; empty names are
/// synthesised from the first two characters of the parameter type.
pub fn clean_name(name: &str, value: &str) -> String {
    if RESERVED_NAMES.contains(&name) {
        return name[..name.len() - 2].to_string();
    }

    if name.is_empty() {
        let prefix: String = clean_value(value)
            .chars()
            .take(2)
            .collect::<String>()
            .to_lowercase()
            .replace('.', "");
        return format!("v{prefix}");
    }

    name.to_string()
}

/// Canonical spelling of a type for signature comparison.
///
/// Whitespace runs collapse to one space and no space is kept next to `*` or
/// `&`, so `const QModelIndex &` and `const QModelIndex&` compare equal.
pub fn normalized_type(value: &str) -> String {
    let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut out = String::with_capacity(collapsed.len());
    let mut chars = collapsed.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ' ' && (out.ends_with(['*', '&']) || matches!(chars.peek(), Some('*' | '&'))) {
            continue;
        }
        out.push(c);
    }
    out
}

/// Whether `value` is a single-level list container (`QList<T>` and friends).
///
/// Whether `T` is a known class is up to the caller.
pub fn is_packed_list(value: &str) -> bool {
    PACKED_LISTS.iter().any(|prefix| value.starts_with(prefix))
        && value.matches('<').count() == 1
        && !value.contains(':')
}

/// The element type of a list container, cleaned of qualifiers.
pub fn unpacked_list(value: &str) -> Option<String> {
    let inner = value.split_once('<')?.1;
    let inner = inner.split_once('>').map_or(inner, |(head, _)| head);
    Some(clean_value(inner))
}

/// Whether the type text is a template instantiation.
pub fn is_template(value: &str) -> bool {
    value.contains('<')
}

/// Whether the type text is a function pointer or rvalue reference, which
/// have no representation in the bindings.
pub fn is_unrepresentable_syntax(value: &str) -> bool {
    value.contains("(*") || value.contains("&&") || value.contains("...")
}

pub fn is_void(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value == "void"
}

/// Uppercase the first character (`timerEvent` -> `TimerEvent`).
pub fn title(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_value() {
        assert_eq!(clean_value("const QString &"), "QString");
        assert_eq!(clean_value("QObject *"), "QObject");
        assert_eq!(clean_value("const QList<QAction *> &amp;"), "QList<QAction >");
    }

    #[test]
    fn test_clean_name() {
        assert_eq!(clean_name("type", "int"), "ty");
        assert_eq!(clean_name("ptr", "void *"), "p");
        assert_eq!(clean_name("parent", "QObject *"), "parent");
        assert_eq!(clean_name("", "QObject *"), "vqo");
        assert_eq!(clean_name("", "Qt::Alignment"), "vqt");
    }

    #[test]
    fn test_packed_lists() {
        assert!(is_packed_list("QList<QAction *>"));
        assert!(is_packed_list("QVector<QWidget *>"));
        assert!(!is_packed_list("QList<QPair<int, int>>"));
        assert!(!is_packed_list("QMap<QString, int>"));
        assert!(!is_packed_list("QList<Qt::Key>"));
        assert_eq!(unpacked_list("QList<QAction *>").as_deref(), Some("QAction"));
        assert_eq!(unpacked_list("QString"), None);
    }

    #[test]
    fn test_syntax_checks() {
        assert!(is_unrepresentable_syntax("void (*)(int)"));
        assert!(is_unrepresentable_syntax("QString &&"));
        assert!(!is_unrepresentable_syntax("const QString &"));
        assert!(is_void("void"));
        assert!(is_void(""));
        assert!(!is_void("void *"));
        assert_eq!(title("timerEvent"), "TimerEvent");
        assert_eq!(title(""), "");
    }

    #[test]
    fn test_normalized_type() {
        assert_eq!(normalized_type("const QModelIndex &"), "const QModelIndex&");
        assert_eq!(normalized_type("const QModelIndex&"), "const QModelIndex&");
        assert_eq!(normalized_type("  QObject   * "), "QObject*");
        assert_eq!(normalized_type("const char * const *"), "const char*const*");
        assert_eq!(normalized_type("unsigned  int"), "unsigned int");
    }
}
