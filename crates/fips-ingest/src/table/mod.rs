//! CSV table reading and writing.

mod reader;
mod writer;

pub use reader::{decode_bytes, read_county_table, read_local_table};
pub use writer::{write_rows_atomic, write_table_atomic};
