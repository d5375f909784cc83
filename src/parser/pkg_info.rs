//! PKG-INFO / METADATA parser
//!
//! Core metadata files are a block of mail-style headers followed by an
//! optional body (the long description):
//!
//! ```text
//! Metadata-Version: 1.1
//! Name: nova
//! Version: 2013.1
//! Summary: Cloud computing fabric controller
//! Author: OpenStack
//!
//! Long description...
//! ```
//!
//! Header names are case-insensitive. Lines starting with whitespace
//! continue the previous header. The header block ends at the first blank
//! line or the first line that is not a header.

use regex::Regex;

use crate::parser::traits::{ParseError, Parser};

/// Parsed metadata headers in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PkgInfo {
    headers: Vec<(String, String)>,
}

impl PkgInfo {
    /// First value of the header `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Parser for core metadata files
pub struct PkgInfoParser {
    /// Regex for header line: `Name: value`
    header_re: Regex,
}

impl PkgInfoParser {
    pub fn new() -> Self {
        Self {
            // Field names are printable ASCII except ':'
            header_re: Regex::new(r"^([\x21-\x39\x3b-\x7e]+):[ \t]*(.*)$").unwrap(),
        }
    }
}

impl Default for PkgInfoParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for PkgInfoParser {
    type Output = PkgInfo;

    fn parse(&self, content: &str) -> Result<PkgInfo, ParseError> {
        let mut headers: Vec<(String, String)> = Vec::new();

        for line in content.lines() {
            if line.trim().is_empty() {
                break;
            }

            if line.starts_with([' ', '\t']) {
                if let Some((_, value)) = headers.last_mut() {
                    value.push('\n');
                    value.push_str(line.trim());
                    continue;
                }
                break;
            }

            let Some(caps) = self.header_re.captures(line) else {
                break;
            };
            let name = caps.get(1).unwrap().as_str().to_string();
            let value = caps.get(2).unwrap().as_str().trim_end().to_string();
            headers.push((name, value));
        }

        Ok(PkgInfo { headers })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> PkgInfo {
        PkgInfoParser::new().parse(content).unwrap()
    }

    #[test]
    fn parse_extracts_author_and_summary() {
        let content = r#"Metadata-Version: 1.1
Name: nova
Version: 2013.1.28.gae25b56
Summary: Cloud computing fabric controller
Author: OpenStack
Author-email: openstack@lists.launchpad.net
"#;
        let info = parse(content);
        assert_eq!(info.get("Author"), Some("OpenStack"));
        assert_eq!(info.get("Summary"), Some("Cloud computing fabric controller"));
        assert_eq!(info.get("Version"), Some("2013.1.28.gae25b56"));
    }

    #[test]
    fn get_is_case_insensitive() {
        let info = parse("summary: lower\n");
        assert_eq!(info.get("Summary"), Some("lower"));
        assert_eq!(info.get("SUMMARY"), Some("lower"));
    }

    #[test]
    fn get_returns_first_of_repeated_headers() {
        let info = parse("Classifier: A\nClassifier: B\n");
        assert_eq!(info.get("Classifier"), Some("A"));
    }

    #[test]
    fn parse_stops_at_body() {
        let content = "Name: nova\n\nAuthor: not a header\n";
        let info = parse(content);
        assert_eq!(info.get("Name"), Some("nova"));
        assert_eq!(info.get("Author"), None);
    }

    #[test]
    fn parse_joins_folded_headers() {
        let content = "Description: first\n        second\nAuthor: me\n";
        let info = parse(content);
        assert_eq!(info.get("Description"), Some("first\nsecond"));
        assert_eq!(info.get("Author"), Some("me"));
    }

    #[test]
    fn parse_returns_no_headers_for_non_header_content() {
        let info = parse("not metadata at all\nAuthor: x\n");
        assert_eq!(info.get("Author"), None);
    }

    #[test]
    fn missing_header_is_none() {
        let info = parse("Name: nova\n");
        assert_eq!(info.get("Author"), None);
    }
}
