//! Minimal `.properties` reader (`key=value` lines)

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Ordered key/value pairs read from a properties file
#[derive(Debug, Clone, Default)]
pub struct Properties {
    entries: Vec<(String, String)>,
}

impl Properties {
    /// Read and parse a properties file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content, path)
    }

    /// Parse properties text; `origin` is only used in error messages.
    ///
    /// Lines starting with `#` or `!` are comments. The first `=` or `:`
    /// separates key and value. A repeated key keeps its first position and
    /// takes the last value.
    pub fn parse(content: &str, origin: &Path) -> Result<Self> {
        let mut props = Self::default();

        for (index, raw) in content.lines().enumerate() {
            let line = raw.trim_start_matches('\u{feff}').trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }

            let Some(split) = line.find(['=', ':']) else {
                return Err(Error::InvalidProperties {
                    path: PathBuf::from(origin),
                    line: index + 1,
                    message: format!("missing '=' in {:?}", line),
                });
            };

            let key = line[..split].trim();
            let value = line[split + 1..].trim();
            if key.is_empty() {
                return Err(Error::InvalidProperties {
                    path: PathBuf::from(origin),
                    line: index + 1,
                    message: "empty key".to_string(),
                });
            }

            props.insert(key, value);
        }

        Ok(props)
    }

    fn insert(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => {
                tracing::warn!("Duplicate key {} in properties, keeping last value", key);
                entry.1 = value.to_string();
            }
            None => self.entries.push((key.to_string(), value.to_string())),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate entries in file order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Properties> {
        Properties::parse(text, Path::new("test.properties"))
    }

    #[test]
    fn test_parse_basic() {
        let props = parse("# header\nclient_id = 1234\n\nclient_secret=abc:def\n").unwrap();
        assert_eq!(props.len(), 2);
        assert_eq!(props.get("client_id"), Some("1234"));
        assert_eq!(props.get("client_secret"), Some("abc:def"));
    }

    #[test]
    fn test_order_and_duplicates() {
        let props = parse("3=a\n1=b\n! note\n3=c\n").unwrap();
        let keys: Vec<_> = props.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["3", "1"]);
        assert_eq!(props.get("3"), Some("c"));
    }

    #[test]
    fn test_missing_separator() {
        let err = parse("ok=1\nbroken line\n").unwrap_err();
        match err {
            Error::InvalidProperties { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }
}
