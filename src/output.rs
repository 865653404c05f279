//! # Output Configuration
//!
//! Controls how the CLI decorates its per-seed report lines. Colour and emoji
//! are used only when the terminal and the user allow them.
//!
//! ## Respecting User Preferences
//!
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals

use std::env;

use console::style;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and the `--color` flag.
    ///
    /// `always` and `never` are taken literally; anything else detects
    /// support from the environment and the stdout terminal.
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // The presence of the variable (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Returns the emoji when colors are enabled, the plain alternative otherwise.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

/// Report line for a produced artifact
pub fn written_line(config: &OutputConfig, destination: &str, units: usize) -> String {
    let marker = emoji(config, "✅", "[OK]");
    if config.use_color {
        format!(
            "{} {} {}",
            marker,
            style(destination).green(),
            style(format!("({} files)", units)).dim()
        )
    } else {
        format!("{} {} ({} files)", marker, destination, units)
    }
}

/// Report line for a seed that failed
pub fn failed_line(config: &OutputConfig, seed: &str) -> String {
    let marker = emoji(config, "❌", "[FAILED]");
    if config.use_color {
        format!("{} {}", marker, style(seed).red())
    } else {
        format!("{} {}", marker, seed)
    }
}
