#[cfg(not(feature = "cli"))]
compile_error!("The `lsrec` binary requires the `cli` feature. Build with `--features cli`.");

use clap::Parser;
use std::fs::File;
use std::io::Write;
use std::process;

use lsr::cli;
use lsr::cli::app::{Cli, ColorMode, Commands, EncodingArg};
use lsr::storage::sqlite::BlobEncoding;
use lsr::LsrError;

fn main() {
    let cli = Cli::parse();

    // Configure rayon thread pool if --threads was specified
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .ok(); // Ignore if already initialized
    }

    match cli.color {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {} // colored auto-detects tty
    }

    let writer_result: Result<Box<dyn Write>, LsrError> = match &cli.output {
        Some(path) => File::create(path)
            .map(|f| Box::new(f) as Box<dyn Write>)
            .map_err(|e| LsrError::Io(format!("Cannot create {}: {}", path, e))),
        None => Ok(Box::new(std::io::stdout()) as Box<dyn Write>),
    };

    let mut writer = match writer_result {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Recover {
            store,
            origin,
            keys,
            verbose,
            json,
        } => cli::recover::execute(
            &cli::recover::RecoverOptions {
                store,
                origin,
                keys,
                verbose,
                json,
            },
            &mut writer,
        ),

        Commands::Log {
            file,
            origin,
            keys,
            verbose,
            json,
            mmap,
        } => cli::log::execute(
            &cli::log::LogOptions {
                file,
                origin,
                keys,
                verbose,
                json,
                mmap,
            },
            &mut writer,
        ),

        Commands::Sqlite {
            file,
            encoding,
            json,
        } => cli::sqlite::execute(
            &cli::sqlite::SqliteOptions {
                file,
                encoding: match encoding {
                    EncodingArg::Utf16le => BlobEncoding::Utf16Le,
                    EncodingArg::Utf8 => BlobEncoding::Utf8,
                },
                json,
            },
            &mut writer,
        ),

        Commands::Dump {
            file,
            offset,
            length,
            matches,
            origin,
        } => cli::dump::execute(
            &cli::dump::DumpOptions {
                file,
                offset,
                length,
                matches,
                origin,
            },
            &mut writer,
        ),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "lsrec", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
