//! Turning class documents into [`ClassInfo`] values.
//!
//! [`ClassInfoParser`] is the seam between the archive and the document
//! schema. [`DocletXmlParser`] reads the schema written by the doclet:
//!
//! ```xml
//! <class name="java.lang.String" kind="class" modifiers="public final"
//!        extends="java.lang.Object" implements="java.io.Serializable"
//!        since="1.0" deprecated="false">
//!   <description>The String class represents character strings.</description>
//!   <constructor modifiers="public">
//!     <parameter type="char[]" name="value"/>
//!   </constructor>
//!   <method name="length" modifiers="public" returns="int"/>
//! </class>
//! ```

use crate::xml::{XmlDocument, XmlElement};

use super::error::InvalidClassInfo;
use super::{ClassInfo, ClassKind, ClassName, LibraryArchive, MethodInfo, ParameterInfo};

/// Builds a [`ClassInfo`] from a parsed class document
pub trait ClassInfoParser {
    /// Parse `document`, which was read from `library`
    fn parse(
        &self,
        document: &XmlDocument,
        library: &LibraryArchive,
    ) -> Result<ClassInfo, InvalidClassInfo>;
}

/// Parser for documents produced by the doclet
#[derive(Debug, Clone, Copy, Default)]
pub struct DocletXmlParser;

impl ClassInfoParser for DocletXmlParser {
    fn parse(
        &self,
        document: &XmlDocument,
        library: &LibraryArchive,
    ) -> Result<ClassInfo, InvalidClassInfo> {
        let root = document
            .element("/class")
            .ok_or_else(|| invalid("root element is not <class>"))?;

        let name = ClassName::new(
            non_empty(root.attribute("name")).ok_or_else(|| invalid("<class> has no name"))?,
        );

        let kind = match non_empty(root.attribute("kind")) {
            Some(value) => ClassKind::from_attribute(value)
                .ok_or_else(|| invalid(format!("unknown class kind '{value}'")))?,
            None => ClassKind::default(),
        };

        let constructors = root
            .children_named("constructor")
            .map(|e| parse_method(e, Some(name.simple())))
            .collect::<Result<Vec<_>, _>>()?;
        let methods = root
            .children_named("method")
            .map(|e| parse_method(e, None))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ClassInfo {
            kind,
            modifiers: word_list(root.attribute("modifiers")),
            super_class: non_empty(root.attribute("extends")).map(ClassName::from),
            interfaces: word_list(root.attribute("implements"))
                .into_iter()
                .map(ClassName::from)
                .collect(),
            description: description(root),
            since: non_empty(root.attribute("since")).map(str::to_string),
            deprecated: is_true(root.attribute("deprecated")),
            constructors,
            methods,
            frame_url: library.frame_url(&name),
            url: library.url(&name),
            name,
        })
    }
}

/// Parse a `<method>` or `<constructor>` element. Constructors are named
/// after their class.
fn parse_method(
    element: &XmlElement,
    constructor_of: Option<&str>,
) -> Result<MethodInfo, InvalidClassInfo> {
    let name = match constructor_of {
        Some(class) => class.to_string(),
        None => non_empty(element.attribute("name"))
            .ok_or_else(|| invalid("<method> has no name"))?
            .to_string(),
    };

    let parameters = element
        .children_named("parameter")
        .map(|p| {
            let type_name = non_empty(p.attribute("type"))
                .ok_or_else(|| invalid(format!("parameter of '{name}' has no type")))?;
            Ok(ParameterInfo {
                type_name: type_name.to_string(),
                name: non_empty(p.attribute("name")).map(str::to_string),
            })
        })
        .collect::<Result<Vec<_>, InvalidClassInfo>>()?;

    Ok(MethodInfo {
        modifiers: word_list(element.attribute("modifiers")),
        parameters,
        return_type: match constructor_of {
            Some(_) => None,
            None => non_empty(element.attribute("returns")).map(str::to_string),
        },
        description: description(element),
        since: non_empty(element.attribute("since")).map(str::to_string),
        deprecated: is_true(element.attribute("deprecated")),
        name,
    })
}

fn description(element: &XmlElement) -> Option<String> {
    let text = element.child("description")?.text_content().trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn word_list(value: Option<&str>) -> Vec<String> {
    value
        .map(|v| v.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default()
}

fn is_true(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.trim().eq_ignore_ascii_case("true"))
}

fn invalid(message: impl Into<String>) -> InvalidClassInfo {
    InvalidClassInfo(message.into())
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
