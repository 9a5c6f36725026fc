use std::{fmt, str::FromStr};

use itertools::Itertools;
use serde::Deserialize;

#[derive(Debug, thiserror::Error, Eq, PartialEq)]
pub enum Error {
    #[error("path must not be empty")]
    EmptyPath,
    #[error("path list '{0}' contains an empty path")]
    EmptyEntry(String),
}

/// A dot-separated route through nested mappings, e.g. `metadata.name`.
/// A single leading `.` is accepted and ignored, so `.metadata.name` is the same path.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    #[cfg(test)]
    pub fn from_unchecked(segments: Vec<&str>) -> Self {
        FieldPath(segments.into_iter().map(String::from).collect())
    }
}

impl FromStr for FieldPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.strip_prefix('.').unwrap_or(s);
        if s.is_empty() {
            return Err(Error::EmptyPath);
        }
        Ok(FieldPath(s.split('.').map(String::from).collect()))
    }
}

impl TryFrom<String> for FieldPath {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

/// Paths in priority order. The order decides how filenames are composed
/// and which field breaks ties when sorting.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize)]
#[serde(try_from = "Vec<String>")]
pub struct PathList(Vec<FieldPath>);

impl PathList {
    /// The preset used to tell Kubernetes resources apart
    pub fn kubernetes() -> Self {
        PathList(
            ["apiVersion", "kind", "metadata.namespace", "metadata.name"]
                .iter()
                .filter_map(|p| p.parse().ok())
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldPath> {
        self.0.iter()
    }
}

impl FromStr for PathList {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(|entry| match entry.parse::<FieldPath>() {
                Err(Error::EmptyPath) => Err(Error::EmptyEntry(s.to_string())),
                other => other,
            })
            .collect::<Result<Vec<_>, _>>()
            .map(PathList)
    }
}

impl TryFrom<Vec<String>> for PathList {
    type Error = Error;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        value
            .into_iter()
            .map(FieldPath::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map(PathList)
    }
}

impl fmt::Display for PathList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join(","))
    }
}

#[cfg(test)]
mod path_parsing {
    use pretty_assertions::assert_eq;

    use super::{Error, FieldPath, PathList};

    #[test]
    pub fn can_be_read_from_string() {
        struct Case {
            input: &'static str,
            expected: FieldPath,
        }
        let cases = vec![
            Case {
                input: "kind",
                expected: FieldPath::from_unchecked(vec!["kind"]),
            },
            Case {
                input: ".kind",
                expected: FieldPath::from_unchecked(vec!["kind"]),
            },
            Case {
                input: "metadata.name",
                expected: FieldPath::from_unchecked(vec!["metadata", "name"]),
            },
            Case {
                input: ".metadata.labels.app",
                expected: FieldPath::from_unchecked(vec!["metadata", "labels", "app"]),
            },
        ];

        for case in &cases {
            let path: FieldPath = case.input.parse().unwrap();
            assert_eq!(path, case.expected, "parsing {}", case.input)
        }
    }

    #[test]
    fn only_one_leading_dot_is_stripped() {
        let path: FieldPath = "..kind".parse().unwrap();
        assert_eq!(path, FieldPath::from_unchecked(vec!["", "kind"]));
    }

    #[test]
    fn empty_paths_are_rejected() {
        assert_eq!("".parse::<FieldPath>(), Err(Error::EmptyPath));
        assert_eq!(".".parse::<FieldPath>(), Err(Error::EmptyPath));
    }

    #[test]
    fn list_keeps_its_order() {
        let list: PathList = "kind,apiVersion,.metadata.name".parse().unwrap();
        let rendered: Vec<String> = list.iter().map(|p| p.to_string()).collect();

        assert_eq!(rendered, vec!["kind", "apiVersion", "metadata.name"]);
        assert_eq!(list.to_string(), "kind,apiVersion,metadata.name");
    }

    #[test]
    fn list_with_a_hole_is_rejected() {
        assert_eq!(
            "kind,,metadata.name".parse::<PathList>(),
            Err(Error::EmptyEntry("kind,,metadata.name".to_string()))
        );
    }

    #[test]
    fn kubernetes_preset() {
        assert_eq!(
            PathList::kubernetes().to_string(),
            "apiVersion,kind,metadata.namespace,metadata.name"
        );
    }

    #[test]
    fn list_from_yaml_sequence() {
        let list: PathList = serde_yaml::from_str("[kind, metadata.name]").unwrap();
        assert_eq!(list.to_string(), "kind,metadata.name");
    }
}
