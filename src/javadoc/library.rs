use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::io::LocalFileReader;
use crate::xml::XmlDocument;
use crate::zip::{CentralDirectory, ZipArchive};

use super::error::{LibraryError, LibraryResult, XmlContext, ZipContext};
use super::parser::{ClassInfoParser, DocletXmlParser};
use super::{ClassInfo, ClassName};

/// Extension carried by every document in the archive
pub const EXTENSION: &str = ".xml";

/// Name of the optional library metadata entry
pub const INFO_FILE_NAME: &str = "info.xml";

/// Library metadata read from `info.xml`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct LibraryMetadata {
    base_url: Option<String>,
    name: Option<String>,
    version: Option<String>,
    project_url: Option<String>,
}

impl LibraryMetadata {
    fn from_document(document: &XmlDocument) -> Self {
        let Some(info) = document.element("/info") else {
            warn!(
                "{INFO_FILE_NAME} has root <{}> instead of <info>, ignoring it",
                document.root().name()
            );
            return Self::default();
        };

        let attribute = |name: &str| {
            info.attribute(name)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        Self {
            base_url: attribute("baseUrl").map(|mut url| {
                if !url.ends_with('/') {
                    url.push('/');
                }
                url
            }),
            name: attribute("name"),
            version: attribute("version"),
            project_url: attribute("projectUrl"),
        }
    }
}

/// A ZIP file of Javadoc information generated by the doclet.
///
/// The archive holds an optional `info.xml` describing the library and one
/// `<fully.qualified.ClassName>.xml` document per class. Metadata is read
/// once when the archive is opened; every other operation re-opens the file
/// and closes it again when done.
///
/// Two archives are equal when they point at the same canonical path.
#[derive(Debug, Clone)]
pub struct LibraryArchive {
    path: PathBuf,
    metadata: LibraryMetadata,
}

impl LibraryArchive {
    /// Open an archive and read its metadata.
    ///
    /// A missing `info.xml`, or one whose root element is not `<info>`,
    /// leaves all metadata absent.
    ///
    /// # Errors
    ///
    /// Fails if the path cannot be canonicalized, the archive cannot be
    /// read, or `info.xml` is present but is not well-formed XML.
    pub fn open(path: impl AsRef<Path>) -> LibraryResult<Self> {
        let path = path.as_ref();
        let path = path.canonicalize().map_err(|source| LibraryError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Opening library archive {}", path.display());
        let archive = ZipArchive::open(&path).with_archive(&path)?;

        let metadata = match archive.read_by_name(INFO_FILE_NAME).with_archive(&path)? {
            Some(bytes) => {
                let document = XmlDocument::parse(&bytes).with_entry(INFO_FILE_NAME)?;
                LibraryMetadata::from_document(&document)
            }
            None => {
                debug!("{} has no {INFO_FILE_NAME}", path.display());
                LibraryMetadata::default()
            }
        };

        Ok(Self { path, metadata })
    }

    /// Gets the URL to a class's Javadoc page (with frames).
    ///
    /// Returns `None` if the library has no base URL.
    pub fn frame_url(&self, class: &ClassName) -> Option<String> {
        let base_url = self.metadata.base_url.as_deref()?;
        Some(format!("{base_url}index.html?{}.html", class.to_path()))
    }

    /// Gets the URL to a class's Javadoc page (without frames).
    ///
    /// Returns `None` if the library has no base URL.
    pub fn url(&self, class: &ClassName) -> Option<String> {
        let base_url = self.metadata.base_url.as_deref()?;
        Some(format!("{base_url}{}.html", class.to_path()))
    }

    /// Lists the classes in the library.
    ///
    /// The returned iterator holds the archive open until it is exhausted,
    /// closed with [`Classes::close`], or dropped. Order follows the archive's
    /// central directory.
    pub fn classes(&self) -> LibraryResult<Classes> {
        let archive = ZipArchive::open(&self.path).with_archive(&self.path)?;
        let entries = archive.entries().with_archive(&self.path)?;
        Ok(Classes {
            path: self.path.clone(),
            archive: Some(archive),
            entries,
        })
    }

    /// Gets the documentation of a class.
    ///
    /// `full_name` is the fully-qualified class name (e.g.
    /// `java.lang.String`). Returns `None` if the class is not in the archive.
    pub fn class_info(&self, full_name: &str) -> LibraryResult<Option<ClassInfo>> {
        self.class_info_with(full_name, &DocletXmlParser)
    }

    /// Same as [`class_info`](Self::class_info) with a custom document parser.
    pub fn class_info_with<P>(&self, full_name: &str, parser: &P) -> LibraryResult<Option<ClassInfo>>
    where
        P: ClassInfoParser + ?Sized,
    {
        let entry_name = format!("{full_name}{EXTENSION}");

        let archive = ZipArchive::open(&self.path).with_archive(&self.path)?;
        let Some(bytes) = archive.read_by_name(&entry_name).with_archive(&self.path)? else {
            debug!("{entry_name} not found in {}", self.path.display());
            return Ok(None);
        };
        drop(archive);

        let document = XmlDocument::parse(&bytes).with_entry(&entry_name)?;
        let info = parser
            .parse(&document, self)
            .map_err(|source| LibraryError::InvalidClassInfo {
                entry: entry_name,
                source,
            })?;
        Ok(Some(info))
    }

    /// Gets the base URL of this library's Javadocs, always ending in `/`
    pub fn base_url(&self) -> Option<&str> {
        self.metadata.base_url.as_deref()
    }

    /// Gets the name of this library (e.g. "jsoup")
    pub fn name(&self) -> Option<&str> {
        self.metadata.name.as_deref()
    }

    /// Gets the version number of this library (e.g. "1.8.1")
    pub fn version(&self) -> Option<&str> {
        self.metadata.version.as_deref()
    }

    /// Gets the URL to the library's webpage
    pub fn project_url(&self) -> Option<&str> {
        self.metadata.project_url.as_deref()
    }

    /// The canonical path of the archive
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PartialEq for LibraryArchive {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for LibraryArchive {}

impl Hash for LibraryArchive {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

/// Lazy, single-pass listing of the classes in a [`LibraryArchive`].
///
/// Yields one name per top-level `.xml` entry other than `info.xml`. The
/// archive file stays open until the listing ends (including after an
/// error), [`close`](Self::close) is called, or the iterator is dropped.
#[derive(Debug)]
pub struct Classes {
    path: PathBuf,
    archive: Option<ZipArchive<LocalFileReader>>,
    entries: CentralDirectory,
}

impl Classes {
    /// Release the archive without reading the remaining entries
    pub fn close(&mut self) {
        if self.archive.take().is_some() {
            debug!("Closed class listing of {}", self.path.display());
        }
    }

    /// True while the underlying archive is still held open
    pub fn is_open(&self) -> bool {
        self.archive.is_some()
    }
}

impl Iterator for Classes {
    type Item = LibraryResult<ClassName>;

    fn next(&mut self) -> Option<Self::Item> {
        self.archive.as_ref()?;

        loop {
            let entry = match self.entries.next() {
                Some(Ok(entry)) => entry,
                Some(Err(source)) => {
                    self.close();
                    return Some(Err(LibraryError::Zip {
                        path: self.path.clone(),
                        source,
                    }));
                }
                None => {
                    self.close();
                    return None;
                }
            };

            if !entry.is_top_level() || entry.file_name == INFO_FILE_NAME {
                continue;
            }
            if let Some(name) = ClassName::from_entry_name(&entry.file_name, EXTENSION) {
                return Some(Ok(name));
            }
        }
    }
}

#[cfg(test)]
#[path = "library_tests.rs"]
mod tests;
