//! Command-line front end for the body composition calculator
//!
//! Reads an input record from TOML or JSON, runs it through the shared
//! calculation core and prints the result as a table or JSON.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
