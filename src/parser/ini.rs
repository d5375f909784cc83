//! INI parser for release override files and setup.cfg
//!
//! Follows the configparser dialect:
//! - Section headers: `[section]` (names are case-sensitive)
//! - Options: `key = value` or `key: value` (keys are case-insensitive)
//! - Comments: lines starting with `#` or `;`
//! - Continuation: indented lines extend the previous option's value
//! - `[DEFAULT]` values are visible from every section
//! - A repeated section is reopened; a repeated option replaces the earlier value
//!
//! Format example:
//! ```text
//! [nova]
//! vendor = OpenStack Foundation
//! product = OpenStack Compute
//! package = 2013.1-0ubuntu1
//! ```

use indexmap::IndexMap;
use regex::Regex;

use crate::parser::traits::{ParseError, Parser};

/// Section whose options act as fallbacks for every other section
pub const DEFAULT_SECTION: &str = "DEFAULT";

type Section = IndexMap<String, String>;

/// Parsed INI content, sections kept in file order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniDocument {
    defaults: Section,
    sections: IndexMap<String, Section>,
}

impl IniDocument {
    /// Look up `key` in `section`, falling back to `[DEFAULT]`.
    ///
    /// Returns `None` when the section does not exist, even if the key
    /// is present in `[DEFAULT]`.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        let key = key.to_lowercase();
        let options = self.sections.get(section)?;
        options
            .get(&key)
            .or_else(|| self.defaults.get(&key))
            .map(String::as_str)
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.sections.contains_key(section)
    }

    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// Layer `other` on top of this document.
    ///
    /// Options from `other` replace options of the same name; sections and
    /// options only present here are kept.
    pub fn merge(&mut self, other: IniDocument) {
        self.defaults.extend(other.defaults);
        for (name, options) in other.sections {
            self.sections.entry(name).or_default().extend(options);
        }
    }
}

/// Parser for INI files
pub struct IniParser {
    /// Regex for section header: `[name]`
    section_re: Regex,
    /// Regex for option: `key = value` or `key: value`
    option_re: Regex,
}

impl IniParser {
    pub fn new() -> Self {
        Self {
            section_re: Regex::new(r"^\[(.+)\]\s*$").unwrap(),
            option_re: Regex::new(r"^(.*?)\s*[=:]\s*(.*)$").unwrap(),
        }
    }
}

impl Default for IniParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for IniParser {
    type Output = IniDocument;

    fn parse(&self, content: &str) -> Result<IniDocument, ParseError> {
        let mut document = IniDocument::default();
        let mut current_section: Option<String> = None;
        let mut current_option: Option<String> = None;

        for (index, line) in content.lines().enumerate() {
            let line_num = index + 1;
            let trimmed = line.trim();

            // Skip comments
            if trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            // Blank lines end a multi-line value
            if trimmed.is_empty() {
                current_option = None;
                continue;
            }

            // Continuation of the previous option
            let indented = line.starts_with(char::is_whitespace);
            if indented
                && let (Some(section), Some(option)) = (&current_section, &current_option)
            {
                let options = section_mut(&mut document, section);
                if let Some(value) = options.get_mut(option) {
                    if !value.is_empty() {
                        value.push('\n');
                    }
                    value.push_str(trimmed);
                }
                continue;
            }

            if let Some(caps) = self.section_re.captures(trimmed) {
                let name = caps.get(1).unwrap().as_str().to_string();
                section_mut(&mut document, &name);
                current_section = Some(name);
                current_option = None;
                continue;
            }

            let Some(section) = &current_section else {
                return Err(ParseError::MissingSectionHeader {
                    line: line_num,
                    content: line.to_string(),
                });
            };

            let Some(caps) = self.option_re.captures(trimmed) else {
                return Err(ParseError::InvalidSyntax {
                    line: line_num,
                    content: line.to_string(),
                });
            };
            let key = caps.get(1).unwrap().as_str().trim().to_lowercase();
            if key.is_empty() {
                return Err(ParseError::InvalidSyntax {
                    line: line_num,
                    content: line.to_string(),
                });
            }
            let value = caps.get(2).unwrap().as_str().to_string();

            section_mut(&mut document, section).insert(key.clone(), value);
            current_option = Some(key);
        }

        Ok(document)
    }
}

fn section_mut<'a>(document: &'a mut IniDocument, name: &str) -> &'a mut Section {
    if name == DEFAULT_SECTION {
        &mut document.defaults
    } else {
        document.sections.entry(name.to_string()).or_default()
    }
}
