//! Package metadata mapping.
//!
//! Maps the generic document metadata of a conversion result onto the
//! Dublin Core vocabulary of the package document. User-defined keys follow
//! the `name[id][.attribute]` convention: keys are lower-cased, split on the
//! last `.` into a name and an optional qualifier, and emitted in
//! lexicographic key order so output is deterministic.

use uuid::Uuid;

use crate::model::DocumentMetadata;

/// A `dc:identifier` with an optional scheme qualifier.
#[derive(Debug, Clone)]
pub struct Identifier {
    pub value: String,
    pub scheme: Option<String>,
}

/// A `dc:creator` or `dc:contributor`.
#[derive(Debug, Clone)]
pub struct Person {
    pub name: String,
    /// "Last, First" sort form of the display name.
    pub file_as: String,
    /// MARC relator code, e.g. `aut`.
    pub role: Option<String>,
}

/// A `dc:date` with an optional event qualifier.
#[derive(Debug, Clone)]
pub struct Date {
    pub value: String,
    pub event: Option<String>,
}

/// Dublin Core metadata mapped and ready for serialization.
#[derive(Debug, Clone, Default)]
pub struct PackageMetadata {
    pub title: String,
    pub language: String,
    /// Never empty; the first entry is the package unique identifier.
    pub identifiers: Vec<Identifier>,
    pub creators: Vec<Person>,
    pub contributors: Vec<Person>,
    pub dates: Vec<Date>,
    pub subjects: Vec<String>,
    pub description: Option<String>,
    pub publisher: Option<String>,
    /// `dc:type`
    pub doc_type: Option<String>,
    pub format: Option<String>,
    pub source: Option<String>,
    pub relation: Option<String>,
    pub coverage: Option<String>,
    pub rights: Option<String>,
}

impl PackageMetadata {
    /// The value of the package unique identifier.
    pub fn unique_identifier(&self) -> &str {
        &self.identifiers[0].value
    }
}

/// Map document metadata onto the package vocabulary.
///
/// `target_name` is the package target's name; its base name is the title
/// fallback when the document title is blank after trimming. Language is
/// taken verbatim. When no identifier key exists, a random `urn:uuid:`
/// value is generated so the package always has a unique identifier.
pub fn map_metadata(meta: &DocumentMetadata, target_name: &str) -> PackageMetadata {
    let mut out = PackageMetadata::default();

    let title = meta.title.trim();
    out.title = if title.is_empty() {
        base_name(target_name).to_string()
    } else {
        title.to_string()
    };
    out.language = meta.language.clone();

    let subject = meta.subject.trim();
    if !subject.is_empty() {
        out.subjects.push(subject.to_string());
    }
    for keyword in meta.keywords.split(',') {
        let keyword = keyword.trim();
        if !keyword.is_empty() {
            out.subjects.push(keyword.to_string());
        }
    }

    let description = meta.description.trim();
    if !description.is_empty() {
        out.description = Some(description.to_string());
    }

    // Lower-case the user-defined keys, then sort the full keys so repeated
    // names (creator1, creator2, ...) emit in a stable order.
    let mut user: Vec<(String, &str)> = meta
        .user_defined
        .iter()
        .map(|(key, value)| (key.to_lowercase(), value.as_str()))
        .collect();
    user.sort_by(|a, b| a.0.cmp(&b.0));

    for (key, value) in &user {
        let (name, qualifier) = match key.rsplit_once('.') {
            Some((name, qualifier)) => (name, Some(qualifier.to_string())),
            None => (key.as_str(), None),
        };

        if name.starts_with("identifier") {
            out.identifiers.push(Identifier {
                value: value.trim().to_string(),
                scheme: qualifier,
            });
        } else if name.starts_with("creator") {
            out.creators.push(person(value, qualifier));
        } else if name.starts_with("contributor") {
            out.contributors.push(person(value, qualifier));
        } else if name.starts_with("date") {
            out.dates.push(Date {
                value: value.trim().to_string(),
                event: qualifier,
            });
        } else if name.starts_with("publisher") {
            set_singleton(&mut out.publisher, "publisher", value);
        } else if name.starts_with("type") {
            set_singleton(&mut out.doc_type, "type", value);
        } else if name.starts_with("format") {
            set_singleton(&mut out.format, "format", value);
        } else if name.starts_with("source") {
            set_singleton(&mut out.source, "source", value);
        } else if name.starts_with("relation") {
            set_singleton(&mut out.relation, "relation", value);
        } else if name.starts_with("coverage") {
            set_singleton(&mut out.coverage, "coverage", value);
        } else if name.starts_with("rights") {
            set_singleton(&mut out.rights, "rights", value);
        } else {
            log::debug!("ignoring unrecognized metadata key {key}");
        }
    }

    // The generic creator/date fields yield to user-defined keys.
    if out.creators.is_empty() && !meta.creator.trim().is_empty() {
        out.creators.push(person(&meta.creator, None));
    }
    if out.dates.is_empty() && !meta.date.trim().is_empty() {
        out.dates.push(Date {
            value: meta.date.trim().to_string(),
            event: None,
        });
    }
    if out.identifiers.is_empty() {
        let generated = format!("urn:uuid:{}", Uuid::new_v4());
        log::debug!("no identifier metadata; generated {generated}");
        out.identifiers.push(Identifier {
            value: generated,
            scheme: None,
        });
    }

    out
}

fn person(name: &str, role: Option<String>) -> Person {
    let name = name.trim();
    Person {
        name: name.to_string(),
        file_as: sort_name(name),
        role,
    }
}

/// Derive a "Last, First" sort name by splitting on the last space.
/// Names without a space are used verbatim.
fn sort_name(name: &str) -> String {
    match name.rsplit_once(' ') {
        Some((first, last)) => format!("{last}, {first}"),
        None => name.to_string(),
    }
}

/// Later-sorted keys overwrite earlier values for singleton names.
fn set_singleton(slot: &mut Option<String>, name: &str, value: &str) {
    if slot.is_some() {
        log::warn!("duplicate {name} metadata; keeping the later-sorted key");
    }
    *slot = Some(value.trim().to_string());
}

/// Base name of the package target: final path segment, extension stripped.
fn base_name(name: &str) -> &str {
    let name = name.rsplit(['/', '\\']).next().unwrap_or(name);
    match name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_falls_back_to_target_base_name() {
        let meta = DocumentMetadata::new("   ", "en");
        let mapped = map_metadata(&meta, "out/novel.epub");
        assert_eq!(mapped.title, "novel");

        let meta = DocumentMetadata::new("Real Title", "en");
        assert_eq!(map_metadata(&meta, "out/novel.epub").title, "Real Title");
    }

    #[test]
    fn language_is_verbatim() {
        let meta = DocumentMetadata::new("T", "de-AT");
        assert_eq!(map_metadata(&meta, "x").language, "de-AT");
    }

    #[test]
    fn keywords_split_on_commas() {
        let mut meta = DocumentMetadata::new("T", "en");
        meta.subject = "Philosophy".to_string();
        meta.keywords = "stoicism, ethics ,, antiquity".to_string();
        let mapped = map_metadata(&meta, "x");
        assert_eq!(
            mapped.subjects,
            ["Philosophy", "stoicism", "ethics", "antiquity"]
        );
    }

    #[test]
    fn creators_emit_in_key_order_with_roles() {
        let meta = DocumentMetadata::new("T", "en")
            .with_user_defined("Creator2.aut", "John Doe")
            .with_user_defined("creator1", "Jane Doe");
        let mapped = map_metadata(&meta, "x");
        assert_eq!(mapped.creators.len(), 2);
        assert_eq!(mapped.creators[0].name, "Jane Doe");
        assert_eq!(mapped.creators[0].role, None);
        assert_eq!(mapped.creators[1].name, "John Doe");
        assert_eq!(mapped.creators[1].role.as_deref(), Some("aut"));
    }

    #[test]
    fn sort_names_reorder_on_last_space() {
        assert_eq!(sort_name("Jane Doe"), "Doe, Jane");
        assert_eq!(sort_name("Jane Q. Doe"), "Doe, Jane Q.");
        assert_eq!(sort_name("Aristotle"), "Aristotle");
    }

    #[test]
    fn generic_creator_yields_to_user_defined() {
        let meta = DocumentMetadata::new("T", "en")
            .with_creator("Generic Author")
            .with_user_defined("creator1", "Jane Doe");
        let mapped = map_metadata(&meta, "x");
        assert_eq!(mapped.creators.len(), 1);
        assert_eq!(mapped.creators[0].name, "Jane Doe");

        let meta = DocumentMetadata::new("T", "en").with_creator("Generic Author");
        let mapped = map_metadata(&meta, "x");
        assert_eq!(mapped.creators.len(), 1);
        assert_eq!(mapped.creators[0].name, "Generic Author");
    }

    #[test]
    fn first_sorted_identifier_is_unique_id() {
        let meta = DocumentMetadata::new("T", "en")
            .with_user_defined("identifier2", "urn:isbn:222")
            .with_user_defined("identifier1.isbn", "urn:isbn:111");
        let mapped = map_metadata(&meta, "x");
        assert_eq!(mapped.unique_identifier(), "urn:isbn:111");
        assert_eq!(mapped.identifiers[0].scheme.as_deref(), Some("isbn"));
        assert_eq!(mapped.identifiers[1].value, "urn:isbn:222");
    }

    #[test]
    fn missing_identifier_generates_urn_uuid() {
        let meta = DocumentMetadata::new("T", "en");
        let mapped = map_metadata(&meta, "x");
        assert!(mapped.unique_identifier().starts_with("urn:uuid:"));
        // 36 hyphenated hex digits follow the prefix
        assert_eq!(mapped.unique_identifier().len(), "urn:uuid:".len() + 36);
    }

    #[test]
    fn singleton_keys_keep_later_sorted_value() {
        let meta = DocumentMetadata::new("T", "en")
            .with_user_defined("publisher1", "First House")
            .with_user_defined("publisher2", "Second House");
        let mapped = map_metadata(&meta, "x");
        assert_eq!(mapped.publisher.as_deref(), Some("Second House"));
    }

    #[test]
    fn qualifier_splits_on_last_dot() {
        let meta = DocumentMetadata::new("T", "en")
            .with_user_defined("date1.www.publication", "2024-01-01");
        let mapped = map_metadata(&meta, "x");
        assert_eq!(mapped.dates[0].event.as_deref(), Some("publication"));
    }

    #[test]
    fn unrecognized_keys_are_ignored() {
        let meta = DocumentMetadata::new("T", "en").with_user_defined("flavor", "vanilla");
        let mapped = map_metadata(&meta, "x");
        assert!(mapped.publisher.is_none());
        assert!(mapped.rights.is_none());
    }
}
