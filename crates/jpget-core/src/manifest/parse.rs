//! JAR manifest text format.
//!
//! Only the main section (everything before the first blank line) is kept.
//! A line starting with a single space continues the previous value; that is
//! how long `Plugin-Dependencies` values wrap at 72 bytes.

use crate::coordinate::Coordinate;

/// Main-section attributes of a manifest, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    main: Vec<(String, String)>,
}

impl Manifest {
    pub fn parse(text: &str) -> Self {
        let text = text.replace("\r\n", "\n").replace('\r', "\n");
        let mut main: Vec<(String, String)> = Vec::new();
        for line in text.lines() {
            if line.is_empty() {
                break;
            }
            if let Some(rest) = line.strip_prefix(' ') {
                if let Some((_, value)) = main.last_mut() {
                    value.push_str(rest);
                }
                continue;
            }
            if let Some((name, value)) = line.split_once(':') {
                let value = value.strip_prefix(' ').unwrap_or(value);
                main.push((name.trim().to_string(), value.to_string()));
            }
        }
        Self { main }
    }

    /// Value of the main-section attribute `name`. Names compare case-insensitively.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.main
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Splits a `Plugin-Dependencies` value on `,`; malformed entries are skipped.
pub fn parse_dependency_list(value: &str) -> Vec<Coordinate> {
    value
        .split(',')
        .filter_map(|entry| {
            let parsed = Coordinate::parse_dependency(entry);
            if parsed.is_none() {
                tracing::debug!("skipping malformed dependency entry {:?}", entry);
            }
            parsed
        })
        .collect()
}
