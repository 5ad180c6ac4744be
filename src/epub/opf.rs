//! Package document (OPF) generation.
//!
//! Classifies every output file into the manifest, derives the spine and
//! guide, and serializes the package document for either target version.

use crate::model::ConversionResult;
use crate::util::{encode_href, escape_xml};

use super::metadata::{PackageMetadata, Person};
use super::{EpubConfig, EpubVersion, NAV_NAME, NCX_NAME};

#[derive(Debug, Clone)]
pub struct ManifestItem {
    pub id: String,
    /// Href relative to the package document.
    pub href: String,
    pub media_type: String,
    pub properties: Option<&'static str>,
}

/// An entry of the linear reading order.
#[derive(Debug, Clone)]
pub struct SpineRef {
    pub idref: String,
    /// Non-linear entries (the cover) are excluded from normal reading.
    pub linear: bool,
}

/// A guide reference to a structurally significant document.
#[derive(Debug, Clone)]
pub struct GuideRef {
    pub ref_type: &'static str,
    pub title: &'static str,
    pub href: String,
}

/// Manifest, spine, and guide derived from a conversion result.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    pub items: Vec<ManifestItem>,
    pub spine: Vec<SpineRef>,
    pub guide: Vec<GuideRef>,
    /// A cover image exists; emit the legacy cover metadata pointer.
    pub has_cover_image: bool,
}

/// Classify every output file, in input order, into the manifest.
///
/// Special-role files are matched by handle, not by name. Master documents
/// get sequential `text<N>` ids and spine entries in encounter order; a
/// result without any master document still produces a valid manifest with
/// an empty spine.
pub fn build_manifest(result: &ConversionResult, config: &EpubConfig) -> Manifest {
    let mut manifest = Manifest::default();
    let mut text_count = 0usize;
    let mut resource_count = 0usize;

    for (id, file) in result.files() {
        let href = encode_href(&file.name);
        if result.cover == Some(id) {
            manifest.items.push(ManifestItem {
                id: "cover".to_string(),
                href,
                media_type: file.media_type.clone(),
                properties: None,
            });
            manifest.spine.push(SpineRef {
                idref: "cover".to_string(),
                linear: false,
            });
        } else if result.cover_image == Some(id) {
            manifest.items.push(ManifestItem {
                id: "cover-image".to_string(),
                href,
                media_type: file.media_type.clone(),
                properties: None,
            });
            manifest.has_cover_image = true;
        } else if file.is_master {
            text_count += 1;
            let item_id = format!("text{text_count}");
            let properties = (config.version == EpubVersion::V3 && file.contains_math)
                .then_some("mathml");
            manifest.items.push(ManifestItem {
                id: item_id.clone(),
                href,
                media_type: file.media_type.clone(),
                properties,
            });
            manifest.spine.push(SpineRef {
                idref: item_id,
                linear: true,
            });
        } else {
            resource_count += 1;
            manifest.items.push(ManifestItem {
                id: format!("resource{resource_count}"),
                href,
                media_type: file.media_type.clone(),
                properties: None,
            });
        }
    }

    if text_count == 0 {
        log::debug!("no master documents; spine is empty");
    }

    if config.version == EpubVersion::V3 {
        manifest.items.push(ManifestItem {
            id: "nav".to_string(),
            href: NAV_NAME.to_string(),
            media_type: "application/xhtml+xml".to_string(),
            properties: Some("nav"),
        });
    }
    if config.includes_ncx() {
        manifest.items.push(ManifestItem {
            id: "ncx".to_string(),
            href: NCX_NAME.to_string(),
            media_type: "application/x-dtbncx+xml".to_string(),
            properties: None,
        });
    }

    manifest.guide = build_guide(result);
    manifest
}

/// One guide reference per recognized role whose designated file exists.
fn build_guide(result: &ConversionResult) -> Vec<GuideRef> {
    let roles = [
        ("cover", "Cover", result.cover),
        ("title-page", "Title Page", result.title_page),
        ("text", "Text", result.text),
        ("toc", "Table of Contents", result.table_of_contents),
        ("index", "Alphabetical Index", result.index),
        ("loi", "List of Figures", result.list_of_figures),
        ("lot", "List of Tables", result.list_of_tables),
        ("bibliography", "Bibliography", result.bibliography),
    ];

    roles
        .into_iter()
        .filter_map(|(ref_type, title, file)| {
            file.map(|file| GuideRef {
                ref_type,
                title,
                href: encode_href(&result.file(file).name),
            })
        })
        .collect()
}

/// Serialize the package document.
pub fn package_document(
    meta: &PackageMetadata,
    manifest: &Manifest,
    config: &EpubConfig,
) -> String {
    let epub3 = config.version == EpubVersion::V3;
    let mut opf = String::new();

    opf.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    if epub3 {
        opf.push_str(
            "<package xmlns=\"http://www.idpf.org/2007/opf\" version=\"3.0\" unique-identifier=\"BookId\">\n  <metadata xmlns:dc=\"http://purl.org/dc/elements/1.1/\">\n",
        );
    } else {
        opf.push_str(
            "<package xmlns=\"http://www.idpf.org/2007/opf\" version=\"2.0\" unique-identifier=\"BookId\">\n  <metadata xmlns:dc=\"http://purl.org/dc/elements/1.1/\" xmlns:opf=\"http://www.idpf.org/2007/opf\">\n",
        );
    }

    opf.push_str(&format!(
        "    <dc:title>{}</dc:title>\n",
        escape_xml(&meta.title)
    ));

    for (i, identifier) in meta.identifiers.iter().enumerate() {
        let id = if i == 0 {
            "BookId".to_string()
        } else {
            format!("id{}", i + 1)
        };
        match &identifier.scheme {
            Some(scheme) if !epub3 => {
                opf.push_str(&format!(
                    "    <dc:identifier id=\"{id}\" opf:scheme=\"{}\">{}</dc:identifier>\n",
                    escape_xml(scheme),
                    escape_xml(&identifier.value)
                ));
            }
            _ => {
                opf.push_str(&format!(
                    "    <dc:identifier id=\"{id}\">{}</dc:identifier>\n",
                    escape_xml(&identifier.value)
                ));
            }
        }
        if epub3 && let Some(scheme) = &identifier.scheme {
            opf.push_str(&format!(
                "    <meta refines=\"#{id}\" property=\"identifier-type\">{}</meta>\n",
                escape_xml(scheme)
            ));
        }
    }

    opf.push_str(&format!(
        "    <dc:language>{}</dc:language>\n",
        escape_xml(&meta.language)
    ));

    if epub3 {
        // Required by EPUB 3: last-modification stamp at second precision.
        let modified = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
        opf.push_str(&format!(
            "    <meta property=\"dcterms:modified\">{modified}</meta>\n"
        ));
    }

    let mut next_id = 1;
    for creator in &meta.creators {
        push_person(&mut opf, "creator", creator, epub3, &mut next_id);
    }
    for contributor in &meta.contributors {
        push_person(&mut opf, "contributor", contributor, epub3, &mut next_id);
    }

    for date in &meta.dates {
        match &date.event {
            Some(event) if !epub3 => {
                opf.push_str(&format!(
                    "    <dc:date opf:event=\"{}\">{}</dc:date>\n",
                    escape_xml(event),
                    escape_xml(&date.value)
                ));
            }
            Some(event) => {
                let id = format!("date{next_id}");
                next_id += 1;
                opf.push_str(&format!(
                    "    <dc:date id=\"{id}\">{}</dc:date>\n",
                    escape_xml(&date.value)
                ));
                opf.push_str(&format!(
                    "    <meta refines=\"#{id}\" property=\"event\">{}</meta>\n",
                    escape_xml(event)
                ));
            }
            None => {
                opf.push_str(&format!(
                    "    <dc:date>{}</dc:date>\n",
                    escape_xml(&date.value)
                ));
            }
        }
    }

    for subject in &meta.subjects {
        opf.push_str(&format!(
            "    <dc:subject>{}</dc:subject>\n",
            escape_xml(subject)
        ));
    }
    if let Some(description) = &meta.description {
        opf.push_str(&format!(
            "    <dc:description>{}</dc:description>\n",
            escape_xml(description)
        ));
    }

    let singletons = [
        ("publisher", &meta.publisher),
        ("type", &meta.doc_type),
        ("format", &meta.format),
        ("source", &meta.source),
        ("relation", &meta.relation),
        ("coverage", &meta.coverage),
        ("rights", &meta.rights),
    ];
    for (name, value) in singletons {
        if let Some(value) = value {
            opf.push_str(&format!(
                "    <dc:{name}>{}</dc:{name}>\n",
                escape_xml(value)
            ));
        }
    }

    if manifest.has_cover_image {
        opf.push_str("    <meta name=\"cover\" content=\"cover-image\"/>\n");
    }

    opf.push_str("  </metadata>\n  <manifest>\n");
    for item in &manifest.items {
        let properties = item
            .properties
            .map(|p| format!(" properties=\"{p}\""))
            .unwrap_or_default();
        opf.push_str(&format!(
            "    <item id=\"{}\" href=\"{}\" media-type=\"{}\"{properties}/>\n",
            escape_xml(&item.id),
            escape_xml(&item.href),
            escape_xml(&item.media_type)
        ));
    }
    opf.push_str("  </manifest>\n");

    if config.includes_ncx() {
        opf.push_str("  <spine toc=\"ncx\">\n");
    } else {
        opf.push_str("  <spine>\n");
    }
    for spine_ref in &manifest.spine {
        if spine_ref.linear {
            opf.push_str(&format!(
                "    <itemref idref=\"{}\"/>\n",
                escape_xml(&spine_ref.idref)
            ));
        } else {
            opf.push_str(&format!(
                "    <itemref idref=\"{}\" linear=\"no\"/>\n",
                escape_xml(&spine_ref.idref)
            ));
        }
    }
    opf.push_str("  </spine>\n");

    if !manifest.guide.is_empty() {
        opf.push_str("  <guide>\n");
        for reference in &manifest.guide {
            opf.push_str(&format!(
                "    <reference type=\"{}\" title=\"{}\" href=\"{}\"/>\n",
                reference.ref_type,
                reference.title,
                escape_xml(&reference.href)
            ));
        }
        opf.push_str("  </guide>\n");
    }

    opf.push_str("</package>\n");
    opf
}

fn push_person(opf: &mut String, kind: &str, person: &Person, epub3: bool, next_id: &mut usize) {
    if epub3 {
        let id = format!("{kind}{next_id}");
        *next_id += 1;
        opf.push_str(&format!(
            "    <dc:{kind} id=\"{id}\">{}</dc:{kind}>\n",
            escape_xml(&person.name)
        ));
        opf.push_str(&format!(
            "    <meta refines=\"#{id}\" property=\"file-as\">{}</meta>\n",
            escape_xml(&person.file_as)
        ));
        if let Some(role) = &person.role {
            opf.push_str(&format!(
                "    <meta refines=\"#{id}\" property=\"role\" scheme=\"marc:relators\">{}</meta>\n",
                escape_xml(role)
            ));
        }
    } else {
        let mut attrs = format!(" opf:file-as=\"{}\"", escape_xml(&person.file_as));
        if let Some(role) = &person.role {
            attrs.push_str(&format!(" opf:role=\"{}\"", escape_xml(role)));
        }
        opf.push_str(&format!(
            "    <dc:{kind}{attrs}>{}</dc:{kind}>\n",
            escape_xml(&person.name)
        ));
    }
}
