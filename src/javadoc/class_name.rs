use std::fmt;

/// A fully-qualified class name such as `java.lang.String`.
///
/// Nested classes are not distinguished from packages: for
/// `java.util.Map.Entry` the package is reported as `java.util.Map`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassName {
    full: String,
}

impl ClassName {
    pub fn new(full: impl Into<String>) -> Self {
        Self { full: full.into() }
    }

    /// Derive a class name from an archive entry name, stripping `extension`.
    ///
    /// Returns `None` if the name does not carry the extension or nothing
    /// is left once it is removed.
    pub fn from_entry_name(entry_name: &str, extension: &str) -> Option<Self> {
        entry_name
            .strip_suffix(extension)
            .filter(|stem| !stem.is_empty())
            .map(Self::new)
    }

    /// The fully-qualified name (e.g. `java.lang.String`)
    pub fn full(&self) -> &str {
        &self.full
    }

    /// The name without its package (e.g. `String`)
    pub fn simple(&self) -> &str {
        match self.full.rsplit_once('.') {
            Some((_, simple)) => simple,
            None => &self.full,
        }
    }

    /// The package (e.g. `java.lang`), `None` for the default package
    pub fn package(&self) -> Option<&str> {
        self.full.rsplit_once('.').map(|(package, _)| package)
    }

    /// The name as a relative path, `.` replaced with `/`
    pub fn to_path(&self) -> String {
        self.full.replace('.', "/")
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full)
    }
}

impl AsRef<str> for ClassName {
    fn as_ref(&self) -> &str {
        &self.full
    }
}

impl From<&str> for ClassName {
    fn from(full: &str) -> Self {
        Self::new(full)
    }
}

impl From<String> for ClassName {
    fn from(full: String) -> Self {
        Self::new(full)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parts() {
        let name = ClassName::new("java.lang.String");
        assert_eq!(name.full(), "java.lang.String");
        assert_eq!(name.simple(), "String");
        assert_eq!(name.package(), Some("java.lang"));
        assert_eq!(name.to_path(), "java/lang/String");
        assert_eq!(name.to_string(), "java.lang.String");
    }

    #[test]
    fn test_default_package() {
        let name = ClassName::new("Main");
        assert_eq!(name.simple(), "Main");
        assert_eq!(name.package(), None);
        assert_eq!(name.to_path(), "Main");
    }

    #[test]
    fn test_from_entry_name() {
        assert_eq!(
            ClassName::from_entry_name("a.b.C.xml", ".xml"),
            Some(ClassName::new("a.b.C"))
        );
        assert_eq!(ClassName::from_entry_name("a.b.C.html", ".xml"), None);
        assert_eq!(ClassName::from_entry_name(".xml", ".xml"), None);
    }
}
