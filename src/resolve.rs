use std::fmt;

use serde_yaml::{Mapping, Value};

use crate::{document::Document, path::FieldPath};

/// A leaf value a path can resolve to
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scalar<'d> {
    String(&'d str),
    Integer(i64),
    /// Only for integers that don't fit into an `i64`
    Unsigned(u64),
    Float(f64),
    Boolean(bool),
}

impl<'d> Scalar<'d> {
    /// Mappings, sequences, nulls and tagged values are not scalars
    pub fn from_value(value: &'d Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Scalar::String(s)),
            Value::Bool(b) => Some(Scalar::Boolean(*b)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Scalar::Integer(i))
                } else if let Some(u) = n.as_u64() {
                    Some(Scalar::Unsigned(u))
                } else {
                    n.as_f64().map(Scalar::Float)
                }
            }
            _ => None,
        }
    }
}

impl fmt::Display for Scalar<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::String(s) => write!(f, "{s}"),
            Scalar::Integer(i) => write!(f, "{i}"),
            Scalar::Unsigned(u) => write!(f, "{u}"),
            Scalar::Float(x) => write_float(f, *x),
            Scalar::Boolean(b) => write!(f, "{b}"),
        }
    }
}

/// Shortest digits that read back to `x`. Plain decimal while the decimal exponent
/// is in `-4..6`, otherwise exponent form with a signed, two-digit minimum exponent
/// (`1.5e+300`, `1e-05`).
fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_nan() {
        return f.write_str("NaN");
    }
    if x.is_infinite() {
        return f.write_str(if x > 0.0 { "+Inf" } else { "-Inf" });
    }

    // `{:e}` already picks the shortest round-tripping digits
    let scientific = format!("{x:e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return f.write_str(&scientific);
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return f.write_str(&scientific);
    };

    if (-4..6).contains(&exponent) {
        write!(f, "{x}")
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        write!(f, "{mantissa}e{sign}{:02}", exponent.abs())
    }
}

/// Look up `key` in `mapping`. Keys that aren't strings (`80:`, `true:`) match
/// on their rendered form.
fn lookup<'d>(mapping: &'d Mapping, key: &str) -> Option<&'d Value> {
    mapping.get(key).or_else(|| {
        mapping
            .iter()
            .find(|(k, _)| {
                !k.is_string() && Scalar::from_value(k).is_some_and(|s| s.to_string() == key)
            })
            .map(|(_, v)| v)
    })
}

/// Walk `doc` along `path` and return the scalar at its end.
/// Every segment but the last has to land on a nested mapping.
pub fn resolve<'d>(doc: &'d Document, path: &FieldPath) -> Option<Scalar<'d>> {
    let (last, parents) = path.segments().split_last()?;

    let mut current = doc.as_mapping();
    for segment in parents {
        current = lookup(current, segment)?.as_mapping()?;
    }

    Scalar::from_value(lookup(current, last)?)
}

/// Like [`resolve`], but rendered for display.
///
/// An empty string means nothing was found. This is indistinguishable from a
/// field that holds an empty string; use [`resolve`] when that matters.
pub fn value_at(doc: &Document, path: &FieldPath) -> String {
    resolve(doc, path)
        .map(|scalar| scalar.to_string())
        .unwrap_or_default()
}
