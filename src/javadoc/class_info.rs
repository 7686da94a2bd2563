use std::fmt;

use super::ClassName;

/// What sort of type a class document describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassKind {
    #[default]
    Class,
    Interface,
    Enum,
    Annotation,
}

impl ClassKind {
    /// Parse the doclet's `kind` attribute value
    pub fn from_attribute(value: &str) -> Option<Self> {
        match value {
            "class" => Some(ClassKind::Class),
            "interface" => Some(ClassKind::Interface),
            "enum" => Some(ClassKind::Enum),
            "annotation" | "@interface" => Some(ClassKind::Annotation),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ClassKind::Class => "class",
            ClassKind::Interface => "interface",
            ClassKind::Enum => "enum",
            ClassKind::Annotation => "@interface",
        }
    }
}

impl fmt::Display for ClassKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A constructor or method parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterInfo {
    pub type_name: String,
    pub name: Option<String>,
}

/// Documentation for a constructor or method
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MethodInfo {
    pub name: String,
    pub modifiers: Vec<String>,
    pub parameters: Vec<ParameterInfo>,
    /// `None` for constructors
    pub return_type: Option<String>,
    pub description: Option<String>,
    pub since: Option<String>,
    pub deprecated: bool,
}

impl MethodInfo {
    /// The name followed by the parameter types, e.g. `substring(int, int)`
    pub fn signature(&self) -> String {
        let types: Vec<&str> = self
            .parameters
            .iter()
            .map(|p| p.type_name.as_str())
            .collect();
        format!("{}({})", self.name, types.join(", "))
    }
}

/// Parsed documentation for one class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassInfo {
    pub name: ClassName,
    pub kind: ClassKind,
    pub modifiers: Vec<String>,
    pub super_class: Option<ClassName>,
    pub interfaces: Vec<ClassName>,
    pub description: Option<String>,
    pub since: Option<String>,
    pub deprecated: bool,
    pub constructors: Vec<MethodInfo>,
    pub methods: Vec<MethodInfo>,
    /// Javadoc page with frames, if the library has a base URL
    pub frame_url: Option<String>,
    /// Javadoc page without frames, if the library has a base URL
    pub url: Option<String>,
}

impl ClassInfo {
    /// Methods with the given name, in document order
    pub fn methods_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a MethodInfo> {
        self.methods.iter().filter(move |m| m.name == name)
    }
}
