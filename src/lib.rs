#![forbid(unsafe_code)]

//! Catify: concatenate and display files
//!
//! Reads files in command line order and writes them to the terminal or to an
//! output file, optionally sprinkling a cat glyph through the text.

pub mod cli;
pub mod config;
pub mod output;
pub mod render;
