use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};

use crate::{
    difftastic::{Difftastic, Outcome},
    document::read_documents,
    naming::write_documents,
    path::PathList,
    warning::Warnings,
};

/// Split `input` into one file per document inside `dir/subdir`
pub fn prepare(
    dir: &Utf8Path,
    subdir: &str,
    input: &Utf8Path,
    paths: &PathList,
    warnings: &mut dyn Warnings,
) -> anyhow::Result<Vec<Utf8PathBuf>> {
    log::debug!("processing yaml docs for {input}");
    let docs = read_documents(input)?;

    let write_dir = dir.join(subdir);
    std::fs::create_dir_all(&write_dir)
        .with_context(|| format!("failed to create directory to write yamls '{write_dir}'"))?;

    let written = write_documents(&write_dir, &docs, paths, input.as_str(), warnings)
        .context("failed to write yamls")?;
    Ok(written)
}

/// Lay out `left` and `right` as numbered subdirectories of `dir`, in that order.
/// Returns the subdirectory names relative to `dir`.
pub fn prepare_all(
    dir: &Utf8Path,
    inputs: [&Utf8Path; 2],
    paths: &PathList,
    warnings: &mut dyn Warnings,
) -> anyhow::Result<Vec<String>> {
    let mut subdirs = Vec::new();
    for (n, input) in inputs.into_iter().enumerate() {
        let subdir = n.to_string();
        prepare(dir, &subdir, input, paths, warnings)
            .with_context(|| format!("failed to process yaml docs of '{input}'"))?;
        subdirs.push(subdir);
    }
    Ok(subdirs)
}

/// Split both inputs into a throwaway directory and let difftastic compare them.
/// The directory is removed again however this returns.
pub fn diff(
    left: &Utf8Path,
    right: &Utf8Path,
    paths: &PathList,
    difftastic: &Difftastic,
    warnings: &mut dyn Warnings,
) -> anyhow::Result<Outcome> {
    log::debug!("diffing {left} and {right} by paths {paths}");

    difftastic.check().context("failed to run difftastic")?;

    let tmp = tempfile::Builder::new()
        .prefix("diffyaml-")
        .tempdir()
        .context("failed to create temporary directory")?;
    let dir = Utf8Path::from_path(tmp.path())
        .with_context(|| format!("temporary directory {} is not UTF-8", tmp.path().display()))?;
    log::debug!("temporary directory: {dir}");

    let subdirs = prepare_all(dir, [left, right], paths, warnings)
        .context("failed to prepare difftastic input")?;
    let subdirs: Vec<&str> = subdirs.iter().map(String::as_str).collect();

    let outcome = difftastic
        .run(dir, &subdirs)
        .context("failed to run difftastic")?;
    Ok(outcome)
}
