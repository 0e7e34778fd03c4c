//! Terminal output for gb
//!
//! Styled status lines via `console`. Per-job tracing goes through `tracing`
//! to stderr instead; this is only what the user is meant to read.

use console::style;

/// Output handler for consistent CLI formatting
#[derive(Debug, Clone, Copy, Default)]
pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    /// Print a bold heading line
    pub fn header(&self, title: &str) {
        println!("{}", style(title).bold());
    }

    /// Print an unstyled line
    pub fn line(&self, message: &str) {
        println!("{message}");
    }

    /// Print pre-rendered text as is
    pub fn block(&self, text: &str) {
        print!("{text}");
    }

    pub fn warning(&self, message: &str) {
        println!("{} {}", style("⚠").yellow(), message);
    }

    /// Print a key-value pair with consistent styling
    pub fn key_value(&self, key: &str, value: &str) {
        println!("  {:<12} {}", style(key).dim(), value);
    }

    pub fn blank_line(&self) {
        println!();
    }
}
