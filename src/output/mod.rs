//
//  campus-client
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! Output formatting for the `campus` CLI:
//!
//! - **Table format**: human-readable output for interactive terminal use
//! - **JSON format**: machine-readable output for scripting
//!
//! ## Core Components
//!
//! - [`OutputFormat`]: the available formats
//! - [`OutputWriter`]: entry point for writing results and status messages
//! - [`TableOutput`]: types that know how to print themselves for humans
//!
//! ## Example
//!
//! ```rust,ignore
//! use campus_client::output::{OutputFormat, OutputWriter};
//!
//! let writer = OutputWriter::new(OutputFormat::Json);
//! writer.write(&challenge_row)?;
//! writer.write_success("Submitted");
//! ```

mod table;

pub use table::*;

use console::style;
use serde::Serialize;

/// Output format selected by the global `--json` flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl OutputFormat {
    /// `Json` when `json` is set, otherwise `Table`.
    pub fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Table
        }
    }
}

/// Writes results in the selected format.
///
/// Results go to stdout; warnings go to stderr. Colors follow
/// `console`'s terminal detection.
#[derive(Debug, Clone, Copy)]
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    /// Writes one value.
    pub fn write<T: Serialize + TableOutput>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", to_json(value)?),
            OutputFormat::Table => value.print_table(self.color),
        }
        Ok(())
    }

    /// Writes any serializable value as JSON, or `fallback` as text.
    /// An empty fallback prints nothing.
    pub fn write_raw<T: Serialize>(&self, value: &T, fallback: &str) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => println!("{}", to_json(value)?),
            OutputFormat::Table if !fallback.is_empty() => println!("{}", fallback),
            OutputFormat::Table => {}
        }
        Ok(())
    }

    pub fn write_warning(&self, msg: &str) {
        if self.color {
            eprintln!("{} {}", style("warning:").yellow().bold(), msg);
        } else {
            eprintln!("warning: {}", msg);
        }
    }

    /// Success line. Suppressed in JSON mode.
    pub fn write_success(&self, msg: &str) {
        if self.format == OutputFormat::Json {
            return;
        }
        if self.color {
            println!("{} {}", style("✓").green().bold(), msg);
        } else {
            println!("✓ {}", msg);
        }
    }
}

/// Pretty-printed JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Human-readable rendering of a display type.
pub trait TableOutput {
    fn print_table(&self, color: bool);
}

/// Prints a bold heading followed by an underline.
pub fn print_header(text: &str) {
    println!("{}", style(text).bold());
    println!("{}", "-".repeat(text.chars().count()));
}

/// Prints a `key: value` line with a dimmed key.
pub fn print_field(key: &str, value: &str, color: bool) {
    if color {
        println!("{}: {}", style(key).dim(), value);
    } else {
        println!("{}: {}", key, value);
    }
}
