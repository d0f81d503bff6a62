//! Error types and error handling for the front end.
//!
//! This module defines the error types used while tokenizing and parsing.
//! It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for lexing and parsing
//! - Error names and suggestions for reporting

pub mod errors;
