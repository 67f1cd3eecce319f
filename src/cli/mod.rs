//! CLI subcommand implementations for the `lsrec` binary.
//!
//! The `lsrec` binary provides four subcommands for recovering and
//! inspecting legacy WebView localStorage files. CLI argument parsing uses
//! clap derive macros, with the top-level [`app::Cli`] struct and
//! [`app::Commands`] enum defined in [`app`] and shared between `main.rs`
//! and `build.rs` (for man page generation) via `include!()`.
//!
//! Each subcommand module follows the same pattern: an `Options` struct
//! holding the parsed arguments and a `pub fn execute(opts, writer) ->
//! Result<(), LsrError>` entry point. The `writer: &mut dyn Write`
//! parameter allows output to be captured in tests or redirected to a file
//! via the global `--output` flag.
//!
//! # Subcommands
//!
//! | Command | Module | Purpose |
//! |---------|--------|---------|
//! | `lsrec recover` | [`recover`] | Recover a store directory, auto-detecting its format |
//! | `lsrec log` | [`log`] | Scan one LevelDB log/table file for an origin's keys |
//! | `lsrec sqlite` | [`sqlite`] | Extract rows from a Crosswalk `ItemTable` store |
//! | `lsrec dump` | [`dump`] | Hex dump raw bytes by offset or around prefix matches |
//!
//! # Common patterns
//!
//! - **`--json`** — structured output via `#[derive(Serialize)]` report
//!   structs and `serde_json`.
//! - **`--origin`** — which origin's keys to recover; defaults to
//!   `file://`, the origin legacy Cordova WebViews stored under.
//! - **`--color`** / **`--output`** / **`--threads`** (global) — terminal
//!   color control, output redirection, and rayon pool sizing.
//!
//! Progress bars (via [`indicatif`]) are displayed when `recover` scans a
//! multi-file LevelDB store. The `wprintln!` and `wprint!` macros wrap
//! `writeln!`/`write!` to convert `io::Error` into `LsrError`.

pub mod app;
pub mod dump;
pub mod log;
pub mod recover;
pub mod sqlite;

/// Write a line to the given writer, converting io::Error to LsrError.
macro_rules! wprintln {
    ($w:expr) => {
        writeln!($w).map_err(|e| $crate::LsrError::Io(e.to_string()))
    };
    ($w:expr, $($arg:tt)*) => {
        writeln!($w, $($arg)*).map_err(|e| $crate::LsrError::Io(e.to_string()))
    };
}

/// Write (without newline) to the given writer, converting io::Error to LsrError.
macro_rules! wprint {
    ($w:expr, $($arg:tt)*) => {
        write!($w, $($arg)*).map_err(|e| $crate::LsrError::Io(e.to_string()))
    };
}

pub(crate) use wprint;
pub(crate) use wprintln;

use indicatif::{ProgressBar, ProgressStyle};

/// Create a styled progress bar for iterating over log files.
pub(crate) fn create_progress_bar(count: u64, unit: &str) -> ProgressBar {
    let pb = ProgressBar::new(count);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                "{{spinner:.green}} [{{bar:40.cyan/blue}}] {{pos}}/{{len}} {} ({{eta}})",
                unit
            ))
            .unwrap()
            .progress_chars("#>-"),
    );
    pb
}
