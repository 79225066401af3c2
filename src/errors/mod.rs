//! Error types and error handling for the compiler.
//!
//! This module defines the error type shared by every phase:
//!
//! - Error structures with source position information
//! - Specific error variants for tokenizing, parsing, building,
//!   decoding and executing
//! - Error formatting and display functionality
//! - Helpful error messages and suggestions

pub mod errors;

#[cfg(test)]
mod tests;
