//! EPUB 3 navigation document.
//!
//! Renders the outline tree as nested ordered lists inside a
//! `<nav epub:type="toc">` block. When page markers are present and the
//! page list is enabled, a second, strictly flat `<nav
//! epub:type="page-list">` block follows; page markers are never nested.

use crate::model::{ConversionResult, NodeId, TocTree};
use crate::util::escape_xml;

use super::metadata::PackageMetadata;
use super::{EpubConfig, entry_href, target_href};

/// Serialize the navigation document.
pub fn navigation_document(
    result: &ConversionResult,
    meta: &PackageMetadata,
    tree: &TocTree,
    config: &EpubConfig,
) -> String {
    let mut nav = String::new();

    nav.push_str(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml" xmlns:epub="http://www.idpf.org/2007/ops">
  <head>
    <title>"#,
    );
    nav.push_str(&escape_xml(&meta.title));
    nav.push_str(
        r#"</title>
  </head>
  <body>
    <nav epub:type="toc">
      <ol>
"#,
    );

    write_list_items(&mut nav, result, tree, tree.roots(), 4);

    nav.push_str("      </ol>\n    </nav>\n");

    if config.include_page_list && !result.page_markers.is_empty() {
        nav.push_str("    <nav epub:type=\"page-list\">\n      <ol>\n");
        for marker in &result.page_markers {
            let href = target_href(result, marker.file, marker.anchor.as_deref());
            nav.push_str(&format!(
                "        <li><a href=\"{}\">{}</a></li>\n",
                escape_xml(&href),
                escape_xml(&marker.label)
            ));
        }
        nav.push_str("      </ol>\n    </nav>\n");
    }

    nav.push_str("  </body>\n</html>\n");
    nav
}

/// Recursively write list items for a sibling run of tree nodes.
fn write_list_items(
    nav: &mut String,
    result: &ConversionResult,
    tree: &TocTree,
    ids: &[NodeId],
    indent: usize,
) {
    let indent_str = "  ".repeat(indent);

    for &id in ids {
        let node = tree.node(id);
        nav.push_str(&format!(
            "{}<li><a href=\"{}\">{}</a>",
            indent_str,
            escape_xml(&entry_href(result, &node.entry)),
            escape_xml(&node.entry.title)
        ));

        if node.children.is_empty() {
            nav.push_str("</li>\n");
        } else {
            nav.push_str(&format!("\n{}  <ol>\n", indent_str));
            write_list_items(nav, result, tree, &node.children, indent + 2);
            nav.push_str(&format!("{}  </ol>\n{}</li>\n", indent_str, indent_str));
        }
    }
}
