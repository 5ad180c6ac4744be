//! Legacy NCX navigation document.
//!
//! Linearizes the outline tree in document order, assigning a strictly
//! increasing play order starting at 1 to every node regardless of depth.

use crate::model::{ConversionResult, NodeId, TocTree};
use crate::util::escape_xml;

use super::entry_href;
use super::metadata::PackageMetadata;

/// Serialize the NCX document.
///
/// The head carries the package unique identifier, the computed maximum
/// depth, and the fixed zero page-count placeholders; no page-count model
/// is maintained. An empty tree produces depth 0 and an empty nav map.
pub fn navigation_document(
    result: &ConversionResult,
    meta: &PackageMetadata,
    tree: &TocTree,
) -> String {
    let mut ncx = String::new();

    ncx.push_str(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE ncx PUBLIC "-//NISO//DTD ncx 2005-1//EN" "http://www.daisy.org/z3986/2005/ncx-2005-1.dtd">
<ncx xmlns="http://www.daisy.org/z3986/2005/ncx/" version="2005-1">
  <head>
    <meta name="dtb:uid" content=""#,
    );
    ncx.push_str(&escape_xml(meta.unique_identifier()));
    ncx.push_str(&format!(
        r#""/>
    <meta name="dtb:depth" content="{}"/>
    <meta name="dtb:totalPageCount" content="0"/>
    <meta name="dtb:maxPageNumber" content="0"/>
  </head>
  <docTitle>
    <text>"#,
        tree.depth()
    ));
    ncx.push_str(&escape_xml(&meta.title));
    ncx.push_str(
        r#"</text>
  </docTitle>
  <navMap>
"#,
    );

    let mut play_order = 1;
    write_nav_points(&mut ncx, result, tree, tree.roots(), &mut play_order, 2);

    ncx.push_str("  </navMap>\n</ncx>\n");
    ncx
}

/// Recursively write navPoint elements.
fn write_nav_points(
    ncx: &mut String,
    result: &ConversionResult,
    tree: &TocTree,
    ids: &[NodeId],
    play_order: &mut usize,
    indent: usize,
) {
    let indent_str = "  ".repeat(indent);

    for &id in ids {
        let node = tree.node(id);
        ncx.push_str(&format!(
            "{}<navPoint id=\"navPoint-{}\" playOrder=\"{}\">\n",
            indent_str, play_order, play_order
        ));
        ncx.push_str(&format!(
            "{}  <navLabel><text>{}</text></navLabel>\n",
            indent_str,
            escape_xml(&node.entry.title)
        ));
        ncx.push_str(&format!(
            "{}  <content src=\"{}\"/>\n",
            indent_str,
            escape_xml(&entry_href(result, &node.entry))
        ));

        *play_order += 1;

        if !node.children.is_empty() {
            write_nav_points(ncx, result, tree, &node.children, play_order, indent + 1);
        }

        ncx.push_str(&format!("{}</navPoint>\n", indent_str));
    }
}
