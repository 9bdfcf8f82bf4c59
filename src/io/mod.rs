//! Point-table file I/O

pub mod table;

pub use table::{load_table, parse_table};
