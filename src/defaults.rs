//! Default values for ycombo configuration.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

/// Seed tag appended to `.js`/`.css` (`app.js.seed`)
pub const EXTNAME: &str = "seed";

/// Charset used when none is configured
pub const CHARSET: &str = "UTF-8";

/// Configuration file looked up in the working directory
pub const CONFIG_FILE: &str = ".ycombo.yaml";

/// Appended after every script unit.
///
/// The newline ends a trailing line comment and the semicolon ends a trailing
/// statement, so a following `(` cannot turn into a call.
pub const SCRIPT_SEPARATOR: &str = "\n;\n";

/// Appended after every stylesheet unit
pub const STYLESHEET_SEPARATOR: &str = "\n\n";
