//! Local table I/O for county datasets.
//!
//! This crate reads and writes the CSV tables produced by the census fetcher
//! and consumed by the reconciler.
//!
//! # Features
//!
//! - **Tolerant decoding**: UTF-8 when valid, Windows-1252 otherwise, so
//!   place names with extended Latin characters load either way
//! - **Text-forced columns**: code columns keep their leading zeros
//! - **Replace semantics**: writes go to a sibling temp file that is renamed
//!   over the destination, so a table is either fully written or untouched
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use fips_ingest::{read_local_table, write_table_atomic};
//!
//! let path = Path::new("data_uscensus/population.csv");
//! let mut df = read_local_table(path, &["State", "County"])?;
//! write_table_atomic(&mut df, path)?;
//! ```

mod error;
mod fs;
mod table;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading / Writing ===
pub use table::{
    decode_bytes, read_county_table, read_local_table, write_rows_atomic, write_table_atomic,
};

// === File System Helpers ===
pub use fs::{ensure_directory, remove_existing};
