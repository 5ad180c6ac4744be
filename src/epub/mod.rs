//! EPUB package assembly.
//!
//! Turns a [`ConversionResult`] into an EPUB 2 or EPUB 3 archive. The
//! pipeline is a chain of pure builders: metadata mapping, outline tree
//! construction, navigation serialization, manifest/spine assembly, and
//! finally the ZIP container. [`render_documents`] exposes the serialized
//! sub-documents individually; [`write_epub`] and [`write_epub_to_writer`]
//! produce the archive.

use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;

use crate::error::Result;
use crate::model::{ConversionResult, FileId, OutlineEntry, TocTree};
use crate::util::encode_href;

pub mod metadata;
mod nav;
mod ncx;
mod opf;
mod writer;

pub use metadata::{PackageMetadata, map_metadata};
pub use opf::{GuideRef, Manifest, ManifestItem, SpineRef, build_manifest};
pub use writer::{CONTAINER_XML, MIMETYPE, MIMETYPE_CRC32};

/// Directory inside the archive holding the package contents.
pub(crate) const CONTENT_DIR: &str = "OEBPS";
pub(crate) const OPF_NAME: &str = "content.opf";
pub(crate) const NCX_NAME: &str = "toc.ncx";
pub(crate) const NAV_NAME: &str = "nav.xhtml";

/// Target package version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EpubVersion {
    /// EPUB 2: NCX navigation, `opf:` attribute metadata qualifiers.
    V2,
    /// EPUB 3: XHTML navigation document, `meta refines` qualifiers.
    #[default]
    V3,
}

/// Configuration for package assembly.
#[derive(Debug, Clone, Default)]
pub struct EpubConfig {
    pub version: EpubVersion,
    /// Also emit the legacy NCX when targeting EPUB 3. EPUB 2 always
    /// carries one.
    pub include_ncx: bool,
    /// Emit a page-list navigation block when page markers are present.
    pub include_page_list: bool,
    /// Compression level for deflate (0-9, default 6).
    pub compression_level: Option<u32>,
}

impl EpubConfig {
    pub fn epub2() -> Self {
        Self {
            version: EpubVersion::V2,
            ..Default::default()
        }
    }

    pub fn epub3() -> Self {
        Self {
            version: EpubVersion::V3,
            ..Default::default()
        }
    }

    /// Whether the package carries a legacy NCX document.
    pub(crate) fn includes_ncx(&self) -> bool {
        self.version == EpubVersion::V2 || self.include_ncx
    }
}

/// The serialized sub-documents of a package, independently addressable.
#[derive(Debug, Clone)]
pub struct PackageDocuments {
    /// `META-INF/container.xml`, pointing at the package document.
    pub container: &'static str,
    /// The OPF package document.
    pub opf: String,
    /// The EPUB 3 navigation document; `None` when targeting EPUB 2.
    pub nav: Option<String>,
    /// The legacy NCX; `None` for EPUB 3 without NCX inclusion.
    pub ncx: Option<String>,
}

/// Render every sub-document of the package without writing an archive.
pub fn render_documents(result: &ConversionResult, config: &EpubConfig) -> PackageDocuments {
    let meta = map_metadata(&result.metadata, &result.target_name);
    let tree = TocTree::build(&result.outline);
    let manifest = build_manifest(result, config);

    let opf = opf::package_document(&meta, &manifest, config);
    let nav = (config.version == EpubVersion::V3)
        .then(|| nav::navigation_document(result, &meta, &tree, config));
    let ncx = config
        .includes_ncx()
        .then(|| ncx::navigation_document(result, &meta, &tree));

    PackageDocuments {
        container: writer::CONTAINER_XML,
        opf,
        nav,
        ncx,
    }
}

/// Write a packaged archive to a file on disk.
///
/// The write is all-or-nothing: on failure the partial file is removed and
/// the error is returned.
pub fn write_epub<P: AsRef<Path>>(
    result: &ConversionResult,
    config: &EpubConfig,
    path: P,
) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    match writer::write_package(result, config, file) {
        Ok(()) => Ok(()),
        Err(e) => {
            let _ = std::fs::remove_file(path);
            Err(e)
        }
    }
}

/// Write a packaged archive to any [`Write`] + [`Seek`] destination.
///
/// Useful for writing to memory buffers or network streams.
pub fn write_epub_to_writer<W: Write + Seek>(
    result: &ConversionResult,
    config: &EpubConfig,
    writer: W,
) -> Result<()> {
    writer::write_package(result, config, writer)
}

/// Link target of an outline entry or page marker: the file name plus the
/// optional fragment anchor.
pub(crate) fn entry_href(result: &ConversionResult, entry: &OutlineEntry) -> String {
    target_href(result, entry.file, entry.anchor.as_deref())
}

pub(crate) fn target_href(result: &ConversionResult, file: FileId, anchor: Option<&str>) -> String {
    let mut href = encode_href(&result.file(file).name);
    if let Some(anchor) = anchor {
        href.push('#');
        href.push_str(anchor);
    }
    href
}
