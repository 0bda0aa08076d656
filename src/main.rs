use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Parser};
use dirindex::index::{display, layout};
use dirindex::{build_index, IndexFile};
use tracing_subscriber::EnvFilter;

const OUTPUT_IGNORED: &str = "Output argument ignored, this command requires no output.";

/// Build a flat ~INDEX file for a directory, or dump an existing one.
#[derive(Parser)]
#[command(name = "dirindex", version, about)]
struct Cli {
    /// Directory to index, or index file to dump
    input: PathBuf,

    /// Output path for the index (build mode only)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite an existing output file without asking
    #[arg(short = 'f', long)]
    overwrite: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let code = if cli.input.is_dir() {
        run_build(&cli)
    } else {
        if let Some(notice) = dump_notice(&cli) {
            println!("{}", notice);
        }
        run_dump(&cli.input)
    };
    process::exit(code);
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Notice printed in dump mode when an output path was given anyway.
fn dump_notice(cli: &Cli) -> Option<&'static str> {
    cli.output.as_ref().map(|_| OUTPUT_IGNORED)
}

fn run_build(cli: &Cli) -> i32 {
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(layout::DEFAULT_INDEX_FILE_NAME));

    if !cli.overwrite && output.exists() {
        print!("Output file already exists, overwrite? (Y/n): ");
        let confirmed = io::stdout()
            .flush()
            .and_then(|_| confirm(&mut io::stdin().lock(), &mut io::stdout()));
        match confirmed {
            Ok(true) => {}
            Ok(false) => {
                println!("Index file creation cancelled by user.");
                return 0;
            }
            Err(e) => {
                eprintln!("ERROR: Failed to read confirmation: {}", e);
                return 1;
            }
        }
    }

    match build_index(&cli.input, &output) {
        Ok(count) => {
            println!("{}", display::summary_line(count));
            0
        }
        Err(e) => {
            eprintln!("ERROR: Failed to build index {}", output.display());
            eprintln!("  {}", e);
            1
        }
    }
}

fn run_dump(path: &Path) -> i32 {
    let index = match IndexFile::open(path) {
        Ok(index) => index,
        Err(e) => {
            eprintln!("ERROR: Failed to open index file {}", path.display());
            eprintln!("  {}", e);
            return 1;
        }
    };

    // Resolve everything first so a corrupt entry prints nothing.
    let entries = match index.entries() {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("ERROR: Failed to read index file {}", path.display());
            eprintln!("  {}", e);
            return 1;
        }
    };

    let stdout = io::stdout();
    if let Err(e) = display::write_listing(&mut stdout.lock(), &entries) {
        eprintln!("ERROR: Failed to write listing: {}", e);
        return 1;
    }
    0
}

/// Reads `y`/`n` answers until one is valid. EOF counts as `n`.
fn confirm<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<bool> {
    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(false);
        }
        match line.trim().to_ascii_lowercase().as_str() {
            "y" => return Ok(true),
            "n" => return Ok(false),
            _ => {
                writeln!(out, "Invalid option.")?;
                write!(out, "Try again: ")?;
                out.flush()?;
            }
        }
    }
}
