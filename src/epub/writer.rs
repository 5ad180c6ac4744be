//! EPUB container assembly.
//!
//! Writes the archive with the entry order mandated by the container
//! specification: the uncompressed `mimetype` entry first, then the
//! container descriptor, the package document, the navigation documents,
//! and finally the content files.

use std::io::{Seek, Write};

use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::Result;
use crate::model::ConversionResult;

use super::{CONTENT_DIR, EpubConfig, NAV_NAME, NCX_NAME, OPF_NAME, render_documents};

/// Content of the identification entry. Readers detect the format by
/// reading it first, uncompressed, at a known offset.
pub const MIMETYPE: &[u8] = b"application/epub+zip";

/// CRC-32 of [`MIMETYPE`]; invariant across runs on the fixed content.
pub const MIMETYPE_CRC32: u32 = 0x2CAB_616F;

/// Container descriptor, pointing unconditionally at the package document.
pub const CONTAINER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>
"#;

/// Assemble the archive. Any failure aborts the write and propagates; the
/// destination is left to the caller to discard.
pub(crate) fn write_package<W: Write + Seek>(
    result: &ConversionResult,
    config: &EpubConfig,
    writer: W,
) -> Result<()> {
    let docs = render_documents(result, config);

    log::debug!(
        "packaging {} files as EPUB {}",
        result.file_count(),
        match config.version {
            super::EpubVersion::V2 => "2",
            super::EpubVersion::V3 => "3",
        }
    );

    let mut zip = ZipWriter::new(writer);

    let compression_level = config.compression_level.unwrap_or(6);
    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let deflated = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(compression_level as i64));

    // 1. Identification entry: must be first and uncompressed, never padded
    //    or reordered.
    zip.start_file("mimetype", stored)?;
    zip.write_all(MIMETYPE)?;

    // 2. Container descriptor.
    zip.start_file("META-INF/container.xml", deflated)?;
    zip.write_all(CONTAINER_XML.as_bytes())?;

    // 3. Package document.
    zip.start_file(format!("{CONTENT_DIR}/{OPF_NAME}"), deflated)?;
    zip.write_all(docs.opf.as_bytes())?;

    // 4. Navigation document (EPUB 3 only).
    if let Some(nav) = &docs.nav {
        zip.start_file(format!("{CONTENT_DIR}/{NAV_NAME}"), deflated)?;
        zip.write_all(nav.as_bytes())?;
    }

    // 5. Legacy NCX.
    if let Some(ncx) = &docs.ncx {
        zip.start_file(format!("{CONTENT_DIR}/{NCX_NAME}"), deflated)?;
        zip.write_all(ncx.as_bytes())?;
    }

    // 6. Content files, in original order.
    for (_, file) in result.files() {
        zip.start_file(format!("{CONTENT_DIR}/{}", file.name), deflated)?;
        zip.write_all(&file.data)?;
    }

    zip.finish()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mimetype_crc_matches_content() {
        let mut hasher = flate2::Crc::new();
        hasher.update(MIMETYPE);
        assert_eq!(hasher.sum(), MIMETYPE_CRC32);
    }

    #[test]
    fn mimetype_is_ascii() {
        assert!(MIMETYPE.is_ascii());
        assert_eq!(MIMETYPE.len(), 20);
    }
}
