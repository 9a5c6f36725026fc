pub mod args;
pub mod config;
pub mod difftastic;
pub mod display;
pub mod document;
pub mod naming;
pub mod order;
pub mod path;
pub mod resolve;
pub mod warning;
pub mod workspace;

pub use display::DisplayMode;
pub use document::{Document, read_documents, render, split};
pub use naming::derive_filename;
pub use order::{compare, sort, sort_file};
pub use path::{FieldPath, PathList};
pub use resolve::{Scalar, resolve, value_at};
