use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "lsrec")]
#[command(about = "Legacy WebView localStorage recovery toolkit")]
#[command(version)]
pub struct Cli {
    /// Control colored output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Write output to a file instead of stdout
    #[arg(short, long, global = true)]
    pub output: Option<String>,

    /// Number of threads for parallel file scanning (0 = auto-detect)
    #[arg(long, default_value = "0", global = true)]
    pub threads: usize,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EncodingArg {
    /// UTF-16 little-endian (WebKit/Crosswalk default)
    Utf16le,
    /// Plain UTF-8
    Utf8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Recover a legacy store directory (auto-detects SQLite vs LevelDB)
    Recover {
        /// Path to the legacy store directory
        #[arg(short, long)]
        store: String,

        /// Origin whose keys to recover
        #[arg(long, default_value = "file://")]
        origin: String,

        /// Restrict recovery to these keys (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        keys: Option<Vec<String>>,

        /// Show layout detection and per-file detail
        #[arg(short, long)]
        verbose: bool,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Scan a single LevelDB log or table file
    Log {
        /// Path to the log file (e.g. 000003.log)
        #[arg(short, long)]
        file: String,

        /// Origin whose keys to recover
        #[arg(long, default_value = "file://")]
        origin: String,

        /// Restrict recovery to these keys (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        keys: Option<Vec<String>>,

        /// Show value offsets and detected encodings
        #[arg(short, long)]
        verbose: bool,

        /// Output in JSON format
        #[arg(long)]
        json: bool,

        /// Use memory-mapped I/O
        #[arg(long)]
        mmap: bool,
    },

    /// Extract rows from a Crosswalk SQLite store (ItemTable)
    Sqlite {
        /// Path to the store file (e.g. file__0.localstorage)
        #[arg(short, long)]
        file: String,

        /// Blob decoding policy
        #[arg(long, default_value = "utf16le")]
        encoding: EncodingArg,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Hex dump of raw log bytes
    Dump {
        /// Path to the log file
        #[arg(short, long)]
        file: String,

        /// Absolute byte offset to start dumping (default: 0)
        #[arg(long)]
        offset: Option<u64>,

        /// Number of bytes to dump (default: 256)
        #[arg(short, long)]
        length: Option<usize>,

        /// Dump a window around each origin-prefix match instead
        #[arg(short, long)]
        matches: bool,

        /// Origin prefix to search for in --matches mode
        #[arg(long, default_value = "file://")]
        origin: String,
    },

    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(long, value_enum)]
        shell: clap_complete::Shell,
    },
}
