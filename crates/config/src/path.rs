//! Dotted field paths (`cameras.back.ffmpeg.inputs[0].roles`).

use crate::value::ConfigValue;
use serde::{Serialize, Serializer};
use std::fmt;

/// One step in a field path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Mapping key.
    Key(String),
    /// List index.
    Index(usize),
}

/// Location of a value inside a configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// The document root.
    #[must_use]
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Parse a dotted path. `[n]` suffixes become list indexes.
    ///
    /// ```
    /// use frigate_config_schema::FieldPath;
    ///
    /// let path = FieldPath::parse("ffmpeg.inputs[0].roles");
    /// assert_eq!(path.to_string(), "ffmpeg.inputs[0].roles");
    /// assert_eq!(path.len(), 4);
    /// ```
    #[must_use]
    pub fn parse(dotted: &str) -> Self {
        let mut path = Self::root();
        for part in dotted.split('.').filter(|part| !part.is_empty()) {
            let (key, mut rest) = part.split_once('[').unwrap_or((part, ""));
            if !key.is_empty() {
                path.segments.push(PathSegment::Key(key.to_owned()));
            }
            while let Some((index, tail)) = rest.split_once(']') {
                if let Ok(index) = index.parse::<usize>() {
                    path.segments.push(PathSegment::Index(index));
                }
                rest = tail.strip_prefix('[').unwrap_or(tail);
            }
        }
        path
    }

    /// Path of a mapping entry below this one.
    #[must_use]
    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Key(key.into()));
        Self { segments }
    }

    /// Path of a list element below this one.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Append another path.
    #[must_use]
    pub fn join(&self, other: &Self) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Self { segments }
    }

    /// The enclosing path, or `None` at the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let (_, init) = self.segments.split_last()?;
        Some(Self {
            segments: init.to_vec(),
        })
    }

    /// Last mapping key in the path, if the path ends in one.
    #[must_use]
    pub fn leaf_key(&self) -> Option<&str> {
        match self.segments.last() {
            Some(PathSegment::Key(key)) => Some(key),
            _ => None,
        }
    }

    /// Returns true when `prefix` is this path or one of its ancestors.
    #[must_use]
    pub fn starts_with(&self, prefix: &Self) -> bool {
        self.segments.starts_with(&prefix.segments)
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true for the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segments from the root down.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Follow this path from `root`. Missing keys and `Absent` values both
    /// resolve to `None`.
    #[must_use]
    pub fn resolve<'a>(&self, root: &'a ConfigValue) -> Option<&'a ConfigValue> {
        let mut current = root;
        for segment in &self.segments {
            current = match (segment, current) {
                (PathSegment::Key(key), ConfigValue::Map(map)) => map.get(key)?,
                (PathSegment::Index(index), ConfigValue::List(items)) => items.get(*index)?,
                _ => return None,
            };
        }
        if current.is_absent() {
            None
        } else {
            Some(current)
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if position == 0 => formatter.write_str(key)?,
                PathSegment::Key(key) => write!(formatter, ".{key}")?,
                PathSegment::Index(index) => write!(formatter, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::parse_yaml;
    use std::error::Error;

    #[test]
    fn renders_keys_and_indexes() {
        let path = FieldPath::root()
            .key("cameras")
            .key("back")
            .key("ffmpeg")
            .key("inputs")
            .index(0)
            .key("roles");
        assert_eq!(path.to_string(), "cameras.back.ffmpeg.inputs[0].roles");
    }

    #[test]
    fn parse_matches_builder() {
        let built = FieldPath::root().key("a").index(2).index(3).key("b");
        assert_eq!(FieldPath::parse("a[2][3].b"), built);
        assert_eq!(FieldPath::parse(""), FieldPath::root());
    }

    #[test]
    fn prefix_relations() {
        let parent = FieldPath::parse("semantic_search.openai");
        let child = FieldPath::parse("semantic_search.openai.api_key");
        let sibling = FieldPath::parse("semantic_search.model");

        assert!(child.starts_with(&parent));
        assert!(!parent.starts_with(&child));
        assert!(!sibling.starts_with(&parent));
        assert_eq!(child.parent(), Some(parent));
        assert_eq!(child.leaf_key(), Some("api_key"));
        assert_eq!(FieldPath::root().parent(), None);
    }

    #[test]
    fn resolve_walks_maps_and_lists() -> Result<(), Box<dyn Error>> {
        let doc = parse_yaml(
            "ffmpeg:\n  inputs:\n    - path: rtsp://a\n      roles: [detect]\nwebui_url: ~\n",
        )?;

        let path = FieldPath::parse("ffmpeg.inputs[0].path");
        assert_eq!(
            path.resolve(&doc).and_then(ConfigValue::as_str),
            Some("rtsp://a")
        );
        assert!(FieldPath::parse("ffmpeg.inputs[1]").resolve(&doc).is_none());
        assert!(FieldPath::parse("webui_url").resolve(&doc).is_none());
        assert!(FieldPath::parse("ffmpeg.inputs.path").resolve(&doc).is_none());
        Ok(())
    }
}
