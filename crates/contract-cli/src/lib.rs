//! Terminal front end for contract spreadsheet imports.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
