//! Output formatting module

mod formatter;

pub use formatter::{OutputFormat, ResultFormatter};
