//! Hardware drivers.

pub mod output_line;
