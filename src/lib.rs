//! # doczip
//!
//! Reader for ZIP-packaged Javadoc archives.
//!
//! An archive holds an optional `info.xml` describing the library (name,
//! version, Javadoc base URL, project URL) and one XML document per class,
//! named after the class (`java.lang.String.xml`). This crate reads the
//! metadata, lists the documented classes and parses a single class's
//! documentation on demand.
//!
//! ## Features
//!
//! - Self-contained ZIP reader (STORED and DEFLATE, ZIP64, CRC-32 checks)
//! - Lazy class listing that releases the archive as soon as it is done
//! - Javadoc page URLs built from the library's base URL
//! - Pluggable class document parsing through [`ClassInfoParser`]
//!
//! ## Example
//!
//! ```no_run
//! use doczip::LibraryArchive;
//!
//! fn main() -> anyhow::Result<()> {
//!     let library = LibraryArchive::open("jsoup-1.8.1.zip")?;
//!     println!("{:?} {:?}", library.name(), library.version());
//!
//!     for class in library.classes()? {
//!         println!("{}", class?);
//!     }
//!
//!     if let Some(info) = library.class_info("org.jsoup.Jsoup")? {
//!         println!("{} methods, docs at {:?}", info.methods.len(), info.url);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod io;
pub mod javadoc;
pub mod xml;
pub mod zip;

#[cfg(test)]
mod test_utils;

pub use cli::Cli;
pub use io::{LocalFileReader, MemoryReader, ReadAt};
pub use javadoc::{
    ClassInfo, ClassInfoParser, ClassKind, ClassName, Classes, DocletXmlParser, LibraryArchive,
    LibraryError, LibraryResult, MethodInfo, ParameterInfo,
};
pub use xml::{XmlDocument, XmlElement, XmlError};
pub use zip::{ZipArchive, ZipError, ZipFileEntry};
