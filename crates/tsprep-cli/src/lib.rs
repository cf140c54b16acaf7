//! Library components of the `tsprep` command-line tool.

pub mod logging;
pub mod pipeline;
