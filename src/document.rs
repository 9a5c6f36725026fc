use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("file '{0}' does not exist")]
    NotFound(camino::Utf8PathBuf),
    #[error("failed to read file '{path}'")]
    Read {
        path: camino::Utf8PathBuf,
        #[source]
        cause: std::io::Error,
    },
    #[error("error decoding document {index} of {file}")]
    Parse {
        file: String,
        index: usize,
        #[source]
        cause: serde_yaml::Error,
    },
    #[error("document {index} of {file} is not a mapping")]
    NotAMapping { file: String, index: usize },
    #[error("error encoding document")]
    Encode(#[source] serde_yaml::Error),
}

/// One YAML document out of a multi-document stream.
/// The root is always a mapping.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Document(Mapping);

impl Document {
    pub fn as_mapping(&self) -> &Mapping {
        &self.0
    }

    pub fn to_yaml(&self) -> Result<String, Error> {
        serde_yaml::to_string(&self.0).map_err(Error::Encode)
    }
}

/// Decode every document in `raw`, in the order they appear.
/// `file` is only used to label errors.
///
/// Any document that fails to decode fails the whole stream.
/// Documents that are explicitly empty (`---` followed by nothing) carry no fields and are skipped,
/// unlike a plain per-document decode, which would keep them as empty mappings.
pub fn split(raw: &str, file: &str) -> Result<Vec<Document>, Error> {
    let mut docs = Vec::new();
    for (index, document) in serde_yaml::Deserializer::from_str(raw).enumerate() {
        let value = Value::deserialize(document).map_err(|cause| Error::Parse {
            file: file.to_string(),
            index,
            cause,
        })?;

        match value {
            Value::Mapping(mapping) => docs.push(Document(mapping)),
            Value::Null => log::debug!("skipping empty document {index} of {file}"),
            _ => {
                return Err(Error::NotAMapping {
                    file: file.to_string(),
                    index,
                });
            }
        }
    }
    log::debug!("read {} documents from {file}", docs.len());
    Ok(docs)
}

pub fn read_documents(path: &Utf8Path) -> Result<Vec<Document>, Error> {
    let content = std::fs::read_to_string(path).map_err(|cause| match cause.kind() {
        std::io::ErrorKind::NotFound => Error::NotFound(path.to_path_buf()),
        _ => Error::Read {
            path: path.to_path_buf(),
            cause,
        },
    })?;
    split(&content, path.as_str())
}

/// Serialize `docs` back into a single stream, separated by `---` lines
pub fn render(docs: &[Document]) -> Result<String, Error> {
    let mut buf = String::new();
    for (idx, doc) in docs.iter().enumerate() {
        if idx > 0 {
            buf.push_str("---\n");
        }
        buf.push_str(&doc.to_yaml()?);
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use expect_test::expect;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use super::{Error, read_documents, render, split};

    #[test]
    fn splits_documents_in_order() {
        let docs = split(
            indoc! {r#"
            ---
            kind: Service
            metadata:
              name: web
            ---
            kind: Deployment
            metadata:
              name: api
            "#},
            "input.yaml",
        )
        .unwrap();

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].as_mapping().get("kind").unwrap(), "Service");
        assert_eq!(docs[1].as_mapping().get("kind").unwrap(), "Deployment");
    }

    #[test]
    fn empty_stream_has_no_documents() {
        assert!(split("", "empty.yaml").unwrap().is_empty());
        assert!(split("# only a comment\n", "empty.yaml").unwrap().is_empty());
    }

    #[test]
    fn explicitly_empty_documents_are_skipped() {
        let docs = split("---\n---\nname: one\n---\n", "input.yaml").unwrap();
        assert_eq!(docs.len(), 1);
    }

    #[test]
    fn malformed_document_fails_the_whole_stream() {
        let err = split("name: one\n---\nname: [unclosed\n", "broken.yaml").unwrap_err();

        assert!(matches!(err, Error::Parse { .. }), "{err:?}");
        assert!(err.to_string().ends_with("of broken.yaml"));
    }

    #[test]
    fn scalar_documents_are_rejected() {
        let err = split("name: one\n---\njust a string\n", "odd.yaml").unwrap_err();
        assert_eq!(err.to_string(), "document 1 of odd.yaml is not a mapping");
    }

    #[test]
    fn missing_file_is_reported_as_such() {
        let err = read_documents(camino::Utf8Path::new("does/not/exist.yaml")).unwrap_err();
        assert_eq!(err.to_string(), "file 'does/not/exist.yaml' does not exist");
    }

    #[test]
    fn rendering_separates_documents() {
        let docs = split(
            indoc! {r#"
            kind: Service
            spec:
              ports:
                - port: 80
            ---
            kind: ConfigMap
            data:
              enabled: "true"
            "#},
            "input.yaml",
        )
        .unwrap();

        expect![[r#"
            kind: Service
            spec:
              ports:
              - port: 80
            ---
            kind: ConfigMap
            data:
              enabled: 'true'
        "#]]
        .assert_eq(&render(&docs).unwrap());
    }

    #[test]
    fn rendered_output_splits_back_into_the_same_documents() {
        let before = split(
            indoc! {r#"
            name: one
            count: 3
            ratio: 0.5
            flag: false
            quoted: "42"
            ---
            name: two
            nested:
              deeper:
                value: x
            ---
            {}
            "#},
            "input.yaml",
        )
        .unwrap();

        let rendered = render(&before).unwrap();
        let reparsed = split(&rendered, "rendered").unwrap();

        assert_eq!(reparsed, before);
    }
}
