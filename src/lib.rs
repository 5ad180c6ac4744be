//! # quire
//!
//! A library for packaging pre-rendered XHTML content into EPUB 2 and
//! EPUB 3 archives.
//!
//! quire is the packaging half of a document conversion pipeline: an
//! upstream converter produces XHTML files, a flat outline, and metadata;
//! quire turns that [`ConversionResult`] into a conformant archive. It does
//! not convert content itself.
//!
//! ## Features
//!
//! - EPUB 2 (NCX navigation) and EPUB 3 (navigation document) targets
//! - Nested table-of-contents construction from a flat, leveled outline
//! - Dublin Core metadata mapping with `name[id][.attribute]` user keys
//! - Manifest, spine, and guide assembly with cover and math handling
//! - Byte-exact container layout (uncompressed `mimetype` entry first)
//!
//! ## Quick Start
//!
//! ```
//! use quire::{ConversionResult, DocumentMetadata, EpubConfig, OutlineEntry, OutputFile};
//!
//! let mut result = ConversionResult::new();
//! result.metadata = DocumentMetadata::new("My Book", "en");
//! let chapter = result.add_file(OutputFile::master(
//!     "chapter1.xhtml",
//!     b"<html><body><h1>One</h1></body></html>".to_vec(),
//! ));
//! result.outline.push(OutlineEntry::new("Chapter 1", 1, chapter));
//!
//! let mut buffer = std::io::Cursor::new(Vec::new());
//! quire::write_epub_to_writer(&result, &EpubConfig::epub3(), &mut buffer).unwrap();
//! assert!(!buffer.get_ref().is_empty());
//! ```
//!
//! The serialized sub-documents are also available individually via
//! [`render_documents`] for callers that assemble their own container.

pub mod epub;
pub mod error;
pub mod model;
pub(crate) mod util;

pub use epub::{
    EpubConfig, EpubVersion, PackageDocuments, render_documents, write_epub, write_epub_to_writer,
};
pub use error::{Error, Result};
pub use model::{
    ConversionResult, DocumentMetadata, FileId, OutlineEntry, OutputFile, PageMarker, TocTree,
};
