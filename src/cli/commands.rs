use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::aggregate::GrabRequest;
use crate::analysis::{KeywordMatrix, Period, co_occurrence, histogram};
use crate::archive::Archive;
use crate::config::ArchiveConfig;
use crate::export::{ClipboardExporter, Exporter, StdoutExporter, select_exporter};
use crate::logging::init_tracing;
use crate::query::CombineMode;
use crate::search::SourceQuery;
use crate::sets::{difference, intersect_all};
use crate::utils::{format_path_with_tilde, get_config_path};

#[derive(Parser)]
#[command(name = "metadata-explorer")]
#[command(version)]
#[command(about = "Query extracted metadata tables of a media archive", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to $METADATA_EXPLORER_CONFIG, then the
    /// platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log progress at info level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List known folders and whether their table has been extracted
    Folders {
        #[arg(long)]
        json: bool,
    },
    /// Find files whose metadata mentions the given terms
    Find {
        #[arg(required = true)]
        terms: Vec<String>,
        /// Shorthand field to search (repeatable); configured fields by default
        #[arg(long = "field", value_name = "FIELD")]
        fields: Vec<String>,
        /// Folder to search (repeatable); every known folder by default
        #[arg(long = "folder", value_name = "FOLDER")]
        folders: Vec<String>,
        /// Require every term within the same value
        #[arg(long)]
        all: bool,
        /// Also require a separate match for this term (repeatable)
        #[arg(long = "and", value_name = "TERM")]
        and: Vec<String>,
        /// Drop files matching this term (repeatable)
        #[arg(long = "not", value_name = "TERM")]
        not: Vec<String>,
        /// Print full identifiers instead of file names
        #[arg(long)]
        path: bool,
        /// Copy the result to the clipboard
        #[arg(long)]
        copy: bool,
        #[arg(long)]
        json: bool,
    },
    /// Print merged rows for the selected files and dates as CSV
    Grab {
        /// Keep files whose identifier contains this (repeatable)
        #[arg(long = "source", value_name = "FILE")]
        sources: Vec<String>,
        #[arg(long = "field", value_name = "FIELD")]
        fields: Vec<String>,
        /// Inclusive lower bound, YYYYMMDD_HHMMSS
        #[arg(long)]
        start: Option<String>,
        /// Inclusive upper bound, YYYYMMDD_HHMMSS
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        path: bool,
        #[arg(long)]
        json: bool,
    },
    /// Count the tags of a delimiter-packed field
    Count {
        field: String,
        #[arg(long)]
        top: Option<usize>,
        /// Drop tags containing this text (repeatable)
        #[arg(long, value_name = "TEXT")]
        exclude: Vec<String>,
        /// Keep only this tag (repeatable)
        #[arg(long, value_name = "TAG")]
        include: Vec<String>,
        #[arg(long)]
        json: bool,
    },
    /// Histogram of the primary date
    Stats {
        #[arg(long, value_enum, default_value_t = Period::Year)]
        period: Period,
        #[arg(long)]
        json: bool,
    },
    /// Number of files shared by each pair of keywords
    Connections {
        #[arg(required = true)]
        keywords: Vec<String>,
        #[arg(long = "field", value_name = "FIELD")]
        fields: Vec<String>,
        #[arg(long)]
        json: bool,
    },
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use --help for usage information");
        return Ok(());
    };

    let config = load_config(cli.config.as_deref(), cli.verbose)?;
    let mut archive = Archive::new(config);

    match command {
        Commands::Folders { json } => show_folders(&archive, json),
        Commands::Find { terms, fields, folders, all, and, not, path, copy, json } => {
            let mut query = SourceQuery::new(terms)
                .mode(if all { CombineMode::All } else { CombineMode::Any })
                .include_path(path);
            if !fields.is_empty() {
                query = query.fields(fields);
            }
            if !folders.is_empty() {
                query = query.folders(folders);
            }
            let found = find_combined(&mut archive, &query, &and, &not)?;
            emit_identifiers(&found, copy, json)
        }
        Commands::Grab { sources, fields, start, end, path, json } => {
            let mut request = GrabRequest::new().include_path(path);
            if !sources.is_empty() {
                request = request.source_files(sources);
            }
            if !fields.is_empty() {
                request = request.fields(fields);
            }
            request.start_date = start;
            request.end_date = end;

            let table = archive.grab_data(&request)?;
            if json {
                print_json(&table)
            } else {
                table.write_csv(io::stdout().lock()).context("Failed to write CSV")
            }
        }
        Commands::Count { field, top, exclude, include, json } => {
            let mut table = archive.count_field(&field)?.exclude(exclude.as_slice());
            if !include.is_empty() {
                table = table.include(include.as_slice());
            }
            if let Some(top) = top {
                table = table.top(top);
            }
            if json {
                return print_json(&table);
            }
            for entry in table.entries() {
                println!("{}\t{}", entry.count, entry.token);
            }
            Ok(())
        }
        Commands::Stats { period, json } => {
            let date_field = archive.config().date_shorthand().to_string();
            let table = archive.grab_data(&GrabRequest::new().fields([date_field.as_str()]))?;
            let bins = histogram(&table.dates(&date_field), period);
            if json {
                return print_json(&bins);
            }
            for (bin, count) in &bins {
                println!("{bin}\t{count}");
            }
            Ok(())
        }
        Commands::Connections { keywords, fields, json } => {
            let fields = (!fields.is_empty()).then_some(fields);
            let matrix = co_occurrence(&mut archive, keywords.as_slice(), fields.as_deref())?;
            if json { print_json(&matrix) } else { print_matrix(&matrix) }
        }
    }
}

/// Resolve, read and complete the configuration, then start logging
fn load_config(explicit: Option<&Path>, verbose: bool) -> Result<ArchiveConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => get_config_path()?,
    };
    if !path.is_file() {
        anyhow::bail!(
            "Config file not found: {} (pass --config or set METADATA_EXPLORER_CONFIG)",
            format_path_with_tilde(&path)
        );
    }

    let config = ArchiveConfig::read_from_file(&path)?;

    // Logging starts before folder discovery so its warnings are visible
    init_tracing(verbose || config.verbose);
    tracing::info!(path = %path.display(), "loaded configuration");

    Ok(config.with_discovered_folders())
}

/// Run the base query, then narrow it with `--and` / `--not` searches
fn find_combined(
    archive: &mut Archive,
    query: &SourceQuery,
    and: &[String],
    not: &[String],
) -> Result<Vec<String>> {
    let single = |term: &String| SourceQuery { terms: vec![term.clone()], mode: CombineMode::Any, ..query.clone() };

    let mut lists = vec![archive.find_source(query)?];
    for term in and {
        lists.push(archive.find_source(&single(term))?);
    }
    let mut found = intersect_all(&lists);

    for term in not {
        let excluded = archive.find_source(&single(term))?;
        found = difference(&found, &excluded);
    }
    Ok(found)
}

fn show_folders(archive: &Archive, json: bool) -> Result<()> {
    let status = archive.folder_status();
    if json {
        return print_json(&status);
    }

    println!("Tables: {}", format_path_with_tilde(archive.store().table_path()));
    for entry in &status {
        let marker = if entry.has_table { "ok" } else { "missing" };
        println!("{marker}\t{}", entry.folder);
    }
    Ok(())
}

fn emit_identifiers(identifiers: &[String], copy: bool, json: bool) -> Result<()> {
    if copy && !identifiers.is_empty() {
        let mut exporter = select_exporter(Box::new(ClipboardExporter));
        exporter.export(identifiers)?;
        if exporter.name() != "stdout" {
            eprintln!("Copied {} identifiers to the {}", identifiers.len(), exporter.name());
        }
        return Ok(());
    }

    if json {
        return print_json(&identifiers);
    }
    StdoutExporter.export(identifiers)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{text}");
    Ok(())
}

fn print_matrix(matrix: &KeywordMatrix<usize>) -> Result<()> {
    println!("\t{}", matrix.columns.join("\t"));
    for (label, row) in matrix.rows.iter().zip(&matrix.values) {
        let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        println!("{label}\t{}", cells.join("\t"));
    }
    Ok(())
}
