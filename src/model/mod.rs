//! Core data model for package assembly.
//!
//! This module contains:
//! - The conversion result consumed by the packaging pipeline
//! - Output file descriptors and their stable handles
//! - The flat outline and page-marker lists
//! - Document metadata, including user-defined key/value pairs
//! - The nested outline tree shared by both navigation serializers

pub mod outline;

pub use outline::{NodeId, TocNode, TocTree};

/// Handle to a file in a [`ConversionResult`].
///
/// Special-role comparisons (cover, title page, ...) use handle equality,
/// never name equality: two distinct files may share a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId(pub(crate) usize);

/// A single file produced by the upstream conversion.
#[derive(Debug, Clone)]
pub struct OutputFile {
    /// Archive-relative path, e.g. `chapter1.xhtml` or `images/fig1.png`.
    pub name: String,
    pub media_type: String,
    pub data: Vec<u8>,
    /// Independently navigable content document, part of the reading order.
    pub is_master: bool,
    /// The document embeds MathML content.
    pub contains_math: bool,
}

impl OutputFile {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            data,
            is_master: false,
            contains_math: false,
        }
    }

    /// An XHTML master document (spine member).
    pub fn master(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: "application/xhtml+xml".to_string(),
            data,
            is_master: true,
            contains_math: false,
        }
    }

    pub fn with_math(mut self) -> Self {
        self.contains_math = true;
        self
    }
}

/// One entry of the flat document outline.
#[derive(Debug, Clone)]
pub struct OutlineEntry {
    pub title: String,
    /// Outline level. Not validated: descents of any size are honored while
    /// ascents are clamped to one nesting step (see [`TocTree`]).
    pub level: u32,
    pub file: FileId,
    /// Optional fragment anchor within the target document.
    pub anchor: Option<String>,
}

impl OutlineEntry {
    pub fn new(title: impl Into<String>, level: u32, file: FileId) -> Self {
        Self {
            title: title.into(),
            level,
            file,
            anchor: None,
        }
    }

    pub fn with_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchor = Some(anchor.into());
        self
    }
}

/// A page boundary marker. Page markers are rendered as a flat list,
/// never as a hierarchy, regardless of any nesting in the source.
#[derive(Debug, Clone)]
pub struct PageMarker {
    /// Page label, e.g. `1` or `xii`.
    pub label: String,
    pub file: FileId,
    pub anchor: Option<String>,
}

impl PageMarker {
    pub fn new(label: impl Into<String>, file: FileId) -> Self {
        Self {
            label: label.into(),
            file,
            anchor: None,
        }
    }

    pub fn with_anchor(mut self, anchor: impl Into<String>) -> Self {
        self.anchor = Some(anchor.into());
        self
    }
}

/// Document metadata as delivered by the upstream conversion.
///
/// User-defined keys follow the `name[id][.attribute]` convention, where
/// `identifier`, `creator`, `contributor`, and `date` are repeatable and the
/// optional attribute carries a scheme, role, or event qualifier, e.g.
/// `creator2.aut` or `identifier1.isbn`.
#[derive(Debug, Clone, Default)]
pub struct DocumentMetadata {
    pub title: String,
    /// Required; the mapper applies no fallback.
    pub language: String,
    pub subject: String,
    /// Comma-separated keyword list.
    pub keywords: String,
    pub description: String,
    pub creator: String,
    pub date: String,
    pub user_defined: Vec<(String, String)>,
}

impl DocumentMetadata {
    pub fn new(title: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            language: language.into(),
            ..Default::default()
        }
    }

    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = creator.into();
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = date.into();
        self
    }

    pub fn with_user_defined(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.user_defined.push((key.into(), value.into()));
        self
    }
}

/// Immutable result of the upstream conversion, ready for packaging.
///
/// Files are held in output order; the designated special-role fields
/// reference them by [`FileId`]. All packaging artifacts are derived from
/// this structure without mutating it.
#[derive(Debug, Clone, Default)]
pub struct ConversionResult {
    files: Vec<OutputFile>,
    pub metadata: DocumentMetadata,
    pub outline: Vec<OutlineEntry>,
    pub page_markers: Vec<PageMarker>,
    /// Base name of the package target; used as the title fallback.
    pub target_name: String,
    pub cover: Option<FileId>,
    pub cover_image: Option<FileId>,
    pub title_page: Option<FileId>,
    /// First document of the text body.
    pub text: Option<FileId>,
    pub table_of_contents: Option<FileId>,
    pub index: Option<FileId>,
    pub list_of_figures: Option<FileId>,
    pub list_of_tables: Option<FileId>,
    pub bibliography: Option<FileId>,
}

impl ConversionResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an output file, returning its stable handle.
    pub fn add_file(&mut self, file: OutputFile) -> FileId {
        self.files.push(file);
        FileId(self.files.len() - 1)
    }

    pub fn file(&self, id: FileId) -> &OutputFile {
        &self.files[id.0]
    }

    /// Iterate all files in output order.
    pub fn files(&self) -> impl Iterator<Item = (FileId, &OutputFile)> {
        self.files.iter().enumerate().map(|(i, f)| (FileId(i), f))
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}
