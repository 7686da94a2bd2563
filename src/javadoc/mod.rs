//! Access to ZIP-packaged Javadoc archives.
//!
//! A [`LibraryArchive`] exposes the library metadata stored in `info.xml`,
//! lists the documented classes and parses a single class's documentation
//! on demand.

mod class_info;
mod class_name;
mod error;
mod library;
mod parser;

pub use class_info::{ClassInfo, ClassKind, MethodInfo, ParameterInfo};
pub use class_name::ClassName;
pub use error::{InvalidClassInfo, LibraryError, LibraryResult};
pub use library::{Classes, EXTENSION, INFO_FILE_NAME, LibraryArchive};
pub use parser::{ClassInfoParser, DocletXmlParser};
