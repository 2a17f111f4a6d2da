//! tradedocs CLI - reference workbook inspection and the document form server

mod preview;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use tradedocs::prelude::*;
use tradedocs::{discover, extract};
use tradedocs_web::ServeOptions;

use crate::preview::{write_preview, PreviewOptions};

#[derive(Parser)]
#[command(name = "tradedocs")]
#[command(
    author,
    version,
    about = "Build CMR, specification and invoice tables from a reference workbook"
)]
struct Cli {
    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List spreadsheet files (xlsx, xlsm, xlsb) in a directory
    Files {
        /// Directory to scan (default: current directory)
        #[arg(default_value = ".")]
        dir: PathBuf,
    },

    /// List all sheets in a workbook
    Sheets {
        /// Input spreadsheet file
        input: PathBuf,
    },

    /// Print the first rows of a sheet as delimited text
    Preview {
        /// Input spreadsheet file
        input: PathBuf,

        /// Sheet name (default: first sheet)
        #[arg(short, long)]
        sheet: Option<String>,

        /// Number of data rows
        #[arg(short, long, default_value = "50")]
        rows: usize,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Field delimiter (default: comma)
        #[arg(short, long, default_value = ",")]
        delimiter: char,
    },

    /// Show the senders, receivers and delivery terms found in a workbook
    Refs {
        /// Input spreadsheet file
        input: PathBuf,

        /// JSON file describing the reference sheets
        #[arg(long)]
        schema: Option<PathBuf>,
    },

    /// Serve the document forms over HTTP
    Serve {
        /// Interface to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "8501")]
        port: u16,

        /// Directory offered for workbook selection
        #[arg(long, default_value = ".")]
        data_dir: PathBuf,

        /// JSON file describing the reference sheets
        #[arg(long)]
        schema: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Files { dir } => list_files(&dir),
        Commands::Sheets { input } => list_sheets(&input),
        Commands::Preview {
            input,
            sheet,
            rows,
            output,
            delimiter,
        } => preview(&input, sheet.as_deref(), rows, output.as_deref(), delimiter),
        Commands::Refs { input, schema } => show_refs(&input, schema.as_deref()),
        Commands::Serve {
            host,
            port,
            data_dir,
            schema,
        } => serve(host, port, data_dir, schema.as_deref()),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(io::stderr)
        .init();
}

fn open(input: &Path) -> Result<Workbook> {
    tracing::debug!("Opening '{}'", input.display());
    WorkbookReader::read_file(input)
        .with_context(|| format!("Failed to open '{}'", input.display()))
}

fn load_schema(path: Option<&Path>) -> Result<ReferenceSchema> {
    match path {
        Some(path) => ReferenceSchema::from_file(path)
            .with_context(|| format!("Failed to read schema '{}'", path.display())),
        None => Ok(ReferenceSchema::default()),
    }
}

fn list_files(dir: &Path) -> Result<()> {
    let files = discover(dir).with_context(|| format!("Failed to list '{}'", dir.display()))?;

    if files.is_empty() {
        eprintln!("No spreadsheet files in '{}'", dir.display());
    }
    for file in files {
        println!("{}", file.display());
    }
    Ok(())
}

fn list_sheets(input: &Path) -> Result<()> {
    let workbook = open(input)?;

    for (i, table) in workbook.tables().enumerate() {
        println!(
            "{}\t{}\t{} rows x {} columns",
            i,
            table.name(),
            table.row_count(),
            table.column_count()
        );
    }
    Ok(())
}

fn preview(
    input: &Path,
    sheet: Option<&str>,
    rows: usize,
    output: Option<&Path>,
    delimiter: char,
) -> Result<()> {
    if !delimiter.is_ascii() {
        bail!("Delimiter must be a single ASCII character");
    }
    let workbook = open(input)?;

    let table = match sheet {
        Some(name) => workbook
            .table(name)
            .with_context(|| format!("Sheet '{name}' not found"))?,
        None => workbook.table_at(0).context("Workbook has no sheets")?,
    };

    let options = PreviewOptions {
        max_rows: rows,
        delimiter: delimiter as u8,
    };

    let written = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create '{}'", path.display()))?;
            let written = write_preview(table, file, &options)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            eprintln!("Wrote {} rows to '{}'", written, path.display());
            written
        }
        None => write_preview(table, io::stdout().lock(), &options)
            .context("Failed to write to stdout")?,
    };

    if written < table.row_count() {
        eprintln!("({} of {} rows shown)", written, table.row_count());
    }
    Ok(())
}

fn show_refs(input: &Path, schema: Option<&Path>) -> Result<()> {
    let schema = load_schema(schema)?;
    let workbook = open(input)?;
    let refs = extract(&workbook, &schema);

    println!("Senders ({}):", refs.senders.len());
    for name in &refs.senders {
        let address = refs.sender_address.get(name).map(String::as_str);
        println!("  {}\t{}", name, address.unwrap_or("-"));
    }

    println!("Receivers ({}):", refs.receivers.len());
    for name in &refs.receivers {
        let address = refs.receiver_address.get(name).map(String::as_str);
        let reg_id = refs.receiver_registration_id.get(name).map(String::as_str);
        println!(
            "  {}\t{}\t{}",
            name,
            address.unwrap_or("-"),
            reg_id.unwrap_or("-")
        );
    }

    println!("Delivery terms ({}):", refs.incoterms.len());
    for term in &refs.incoterms {
        println!("  {}", term);
    }

    for warning in &refs.warnings {
        eprintln!("Warning: {}", warning);
    }
    Ok(())
}

fn serve(host: String, port: u16, data_dir: PathBuf, schema: Option<&Path>) -> Result<()> {
    let options = ServeOptions {
        host,
        port,
        data_dir,
        schema: load_schema(schema)?,
        ..Default::default()
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;
    runtime
        .block_on(tradedocs_web::serve(options))
        .context("Server failed")
}
