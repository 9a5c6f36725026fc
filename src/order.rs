use std::{cmp::Ordering, io::Write};

use anyhow::Context;
use camino::Utf8Path;

use crate::{
    document::{Document, read_documents, render},
    path::PathList,
    resolve::value_at,
};

/// Compare two documents field by field, in the priority given by `order`.
///
/// The first path whose values differ decides, comparing the rendered values as strings.
/// A path that doesn't resolve renders as an empty string and therefore sorts first.
/// With no differing path (or no paths at all) the documents are equal.
pub fn compare(a: &Document, b: &Document, order: &PathList) -> Ordering {
    for path in order.iter() {
        let left = value_at(a, path);
        let right = value_at(b, path);
        if left != right {
            return left.cmp(&right);
        }
    }
    Ordering::Equal
}

/// Stable sort: documents that compare equal keep their relative order
pub fn sort(docs: &mut [Document], order: &PathList) {
    docs.sort_by(|a, b| compare(a, b, order));
}

/// Read the documents in `path`, sort them if there is an `order`, and write them to `out`
pub fn sort_file(
    path: &Utf8Path,
    order: Option<&PathList>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut docs =
        read_documents(path).with_context(|| format!("error reading YAML document {path}"))?;

    if let Some(order) = order {
        log::debug!("sorting {} documents by {order}", docs.len());
        sort(&mut docs, order);
    }

    let rendered = render(&docs).with_context(|| format!("error printing YAML document {path}"))?;
    out.write_all(rendered.as_bytes())
        .with_context(|| format!("error printing YAML document {path}"))?;
    Ok(())
}
