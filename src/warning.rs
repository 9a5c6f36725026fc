use std::fmt;

use owo_colors::OwoColorize;

use crate::path::FieldPath;

/// Something the operator should know about that doesn't stop the run
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Warning {
    Unresolved { path: FieldPath, file: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::Unresolved { path, file } => write!(
                f,
                "no value found from path '{path}' in one of the documents in file '{file}'"
            ),
        }
    }
}

/// Where warnings end up. Components take one of these explicitly
/// instead of writing to a global logger.
pub trait Warnings {
    fn warn(&mut self, warning: Warning);
}

/// Drops every warning
#[derive(Debug, Default)]
pub struct Discard;

impl Warnings for Discard {
    fn warn(&mut self, _warning: Warning) {}
}

/// Prints warnings to stderr
#[derive(Debug, Default)]
pub struct Stderr;

impl Warnings for Stderr {
    fn warn(&mut self, warning: Warning) {
        eprintln!("{} {warning}", "# WARNING:".yellow());
    }
}

impl Warnings for Vec<Warning> {
    fn warn(&mut self, warning: Warning) {
        self.push(warning);
    }
}
