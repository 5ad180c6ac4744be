//! Shared XML and URI helpers.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Escape XML special characters.
pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Characters percent-encoded in manifest and navigation hrefs.
const HREF_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'?')
    .add(b'{')
    .add(b'}');

/// Percent-encode a file name for use as a URI reference.
pub(crate) fn encode_href(name: &str) -> String {
    utf8_percent_encode(name, HREF_SET).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("Hello & World"), "Hello &amp; World");
        assert_eq!(escape_xml("<tag>"), "&lt;tag&gt;");
        assert_eq!(escape_xml("\"quoted\""), "&quot;quoted&quot;");
    }

    #[test]
    fn test_encode_href() {
        assert_eq!(encode_href("plain.xhtml"), "plain.xhtml");
        assert_eq!(encode_href("front matter.xhtml"), "front%20matter.xhtml");
        assert_eq!(encode_href("a#b.png"), "a%23b.png");
    }
}
