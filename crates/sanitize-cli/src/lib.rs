//! Library components of the `sanitize` command-line tool.

pub mod batch;
pub mod logging;
pub mod summary;
