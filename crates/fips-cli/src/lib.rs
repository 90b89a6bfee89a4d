//! CLI library components for the county FIPS toolkit.

#![allow(missing_docs)]

pub mod commands;
pub mod config;
pub mod logging;
