use chrono::Local;
use clap::{Args, Parser, Subcommand};
use openleg::config::AppConfig;
use openleg::daybreak::{read_manifest, write_manifest, DaybreakFile, DaybreakStaging};
use openleg::error::AppError;
use openleg::telemetry;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "daybreak",
    about = "Classify, stage and archive LBDC daybreak files",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the metadata derived from a daybreak file name
    Inspect(InspectArgs),
    /// List the daybreak files waiting in the staging directory
    Scan(ScanArgs),
    /// Move an incoming daybreak file into the staging directory
    Stage {
        /// Path of the incoming file
        path: PathBuf,
    },
    /// Move a staged daybreak file into the archive
    Archive {
        /// Path of the staged file
        path: PathBuf,
    },
    /// Rebuild records from a manifest written by `scan --manifest`
    Resume {
        /// Manifest CSV to read
        manifest: PathBuf,
    },
}

#[derive(Args, Debug)]
struct InspectArgs {
    /// Daybreak file to inspect
    path: PathBuf,
    /// Also print the file contents
    #[arg(long)]
    text: bool,
}

#[derive(Args, Debug)]
struct ScanArgs {
    /// Override the configured staging directory
    #[arg(long)]
    staging_dir: Option<PathBuf>,
    /// Write the scanned records to a manifest CSV
    #[arg(long)]
    manifest: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct RecordView<'a> {
    file_name: String,
    #[serde(flatten)]
    record: &'a DaybreakFile,
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let staging = DaybreakStaging::new(&config.directories.staging, &config.directories.archive);

    match cli.command {
        Command::Inspect(args) => inspect(args),
        Command::Scan(args) => {
            let staging = match args.staging_dir {
                Some(dir) => DaybreakStaging::new(dir, staging.archive_dir()),
                None => staging,
            };
            scan(&staging, args.manifest)
        }
        Command::Stage { path } => {
            let record = staging.stage(path, Local::now().naive_local())?;
            print_record(&record)
        }
        Command::Archive { path } => {
            let mut record = DaybreakFile::open(path)?;
            staging.archive(&mut record)?;
            print_record(&record)
        }
        Command::Resume { manifest } => resume(manifest),
    }
}

fn inspect(args: InspectArgs) -> Result<(), AppError> {
    let record = DaybreakFile::open(&args.path)?;
    print_record(&record)?;
    if args.text {
        println!("{}", record.text()?);
    }
    Ok(())
}

fn scan(staging: &DaybreakStaging, manifest: Option<PathBuf>) -> Result<(), AppError> {
    let records = staging.collect()?;
    info!(
        count = records.len(),
        dir = %staging.staging_dir().display(),
        "scanned staging directory"
    );

    for record in &records {
        let date = record
            .report_date()
            .map(|date| date.to_string())
            .unwrap_or_else(|| "undated".to_string());
        println!("{date}\t{}\t{}", record.doc_type(), record.file().display());
    }

    if let Some(path) = manifest {
        let writer = BufWriter::new(File::create(&path)?);
        write_manifest(writer, &records)?;
        info!(manifest = %path.display(), "wrote manifest");
    }
    Ok(())
}

fn resume(manifest: PathBuf) -> Result<(), AppError> {
    let reader = BufReader::new(File::open(&manifest)?);
    let entries = read_manifest(reader)?;

    for entry in entries {
        match entry.rehydrate() {
            Ok(record) => print_record(&record)?,
            Err(err) => warn!(error = %err, "skipping manifest entry"),
        }
    }
    Ok(())
}

fn print_record(record: &DaybreakFile) -> Result<(), AppError> {
    let view = RecordView {
        file_name: record.file_name(),
        record,
    };
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
