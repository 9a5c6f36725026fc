use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};

use crate::{
    document::Document,
    path::PathList,
    resolve::resolve,
    warning::{Warning, Warnings},
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no values found from yaml paths '{paths}' in file '{file}'")]
    NoValues { paths: PathList, file: String },
    #[error(
        "file '{name}' already exists: yaml paths '{paths}' are not unique for docs in file '{file}'"
    )]
    NotUnique {
        name: String,
        paths: PathList,
        file: String,
    },
    #[error("failed to create file '{path}'")]
    Create {
        path: Utf8PathBuf,
        #[source]
        cause: std::io::Error,
    },
    #[error("error encoding document")]
    Encode(#[source] serde_yaml::Error),
}

/// Compose a filename from the values `paths` resolve to in `doc`.
///
/// Paths that don't resolve are reported to `warnings` and left out.
/// Slashes in values become underscores so every value stays a single path segment.
pub fn derive_filename(
    doc: &Document,
    paths: &PathList,
    file: &str,
    warnings: &mut dyn Warnings,
) -> Result<String, Error> {
    let mut parts = Vec::new();
    for path in paths.iter() {
        // an empty string counts as "not found", same as `value_at`
        match resolve(doc, path).map(|scalar| scalar.to_string()) {
            Some(value) if !value.is_empty() => parts.push(value.replace('/', "_")),
            _ => warnings.warn(Warning::Unresolved {
                path: path.clone(),
                file: file.to_string(),
            }),
        }
    }

    if parts.is_empty() {
        return Err(Error::NoValues {
            paths: paths.clone(),
            file: file.to_string(),
        });
    }

    Ok(format!("{}.yaml", parts.join("_")))
}

/// Write `doc` into `dir` under its derived name.
/// Refuses to overwrite: two documents with the same name means `paths` don't tell them apart.
pub fn write_document(
    dir: &Utf8Path,
    doc: &Document,
    paths: &PathList,
    file: &str,
    warnings: &mut dyn Warnings,
) -> Result<Utf8PathBuf, Error> {
    let name = derive_filename(doc, paths, file, warnings)?;
    let target = dir.join(&name);
    log::debug!("prepare file {target} to write yaml doc");

    let mut out = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&target)
        .map_err(|cause| match cause.kind() {
            std::io::ErrorKind::AlreadyExists => Error::NotUnique {
                name: name.clone(),
                paths: paths.clone(),
                file: file.to_string(),
            },
            _ => Error::Create {
                path: target.clone(),
                cause,
            },
        })?;

    serde_yaml::to_writer(&mut out, doc).map_err(Error::Encode)?;
    out.flush().map_err(|cause| Error::Create {
        path: target.clone(),
        cause,
    })?;

    Ok(target)
}

/// Write all of `docs` into `dir`, one file each.
/// Stops at the first failure; files written up to that point stay.
pub fn write_documents(
    dir: &Utf8Path,
    docs: &[Document],
    paths: &PathList,
    file: &str,
    warnings: &mut dyn Warnings,
) -> Result<Vec<Utf8PathBuf>, Error> {
    let mut written = Vec::with_capacity(docs.len());
    for doc in docs {
        written.push(write_document(dir, doc, paths, file, warnings)?);
    }
    Ok(written)
}
