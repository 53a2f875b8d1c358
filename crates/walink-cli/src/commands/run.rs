use crate::commands::{print_json, Context};
use crate::error::{invalid_input, CliError};
use crate::observer::TracingObserver;
use crate::util::{display_path, now_utc};
use anyhow::{Context as _, Result};
use clap::Args;
use serde::Serialize;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use walink_config::validate_extension;
use walink_core::rules::{process_table, TableSummary, WEBSITE_COLUMN};
use walink_store::{CsvDirectory, TableStore};

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Files to process; defaults to every matching file in the input directory
    pub files: Vec<PathBuf>,
    /// Directory searched for input files
    #[arg(long)]
    pub dir: Option<PathBuf>,
    /// File extension of input files, without the dot
    #[arg(long)]
    pub extension: Option<String>,
    /// Process files and report, but never write them
    #[arg(long)]
    pub dry_run: bool,
    /// Copy each file aside before rewriting it
    #[arg(long)]
    pub backup: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    pub dry_run: bool,
    pub backup: bool,
    pub now_utc: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FileStatus {
    Updated,
    DryRun,
    Skipped,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: String,
    pub status: FileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<TableSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileReport {
    fn done(path: &Path, status: FileStatus, summary: TableSummary) -> Self {
        Self {
            path: display_path(path),
            status,
            summary: Some(summary),
            backup: None,
            error: None,
        }
    }

    fn problem(path: &Path, status: FileStatus, err: impl Display) -> Self {
        Self {
            path: display_path(path),
            status,
            summary: None,
            backup: None,
            error: Some(err.to_string()),
        }
    }

    fn is_problem(&self) -> bool {
        matches!(self.status, FileStatus::Skipped | FileStatus::Failed)
    }
}

#[derive(Debug, Serialize)]
struct RunReport {
    dry_run: bool,
    files: Vec<FileReport>,
}

pub fn run(ctx: &Context<'_>, args: RunArgs) -> Result<()> {
    let extension = match args.extension.as_deref() {
        Some(raw) => validate_extension(raw)
            .map_err(|_| invalid_input(format!("invalid --extension value: {raw:?}")))?,
        None => ctx.config.extension.clone(),
    };
    let dir = args
        .dir
        .clone()
        .unwrap_or_else(|| ctx.config.input_dir_or_current());
    let store = CsvDirectory::new(dir, extension);

    let inputs = if args.files.is_empty() {
        store
            .list_inputs()
            .with_context(|| format!("list input files in {}", store.dir().display()))?
    } else {
        args.files
    };

    let options = RunOptions {
        dry_run: args.dry_run,
        backup: args.backup || ctx.config.backup,
        now_utc: now_utc(),
    };

    if inputs.is_empty() {
        info!(dir = %store.dir().display(), "no input files found");
        if ctx.json {
            return print_json(&RunReport {
                dry_run: options.dry_run,
                files: Vec::new(),
            });
        }
        println!(
            "No input files found in {} (*.{})",
            store.dir().display(),
            store.extension()
        );
        return Ok(());
    }

    info!(count = inputs.len(), "found input files");
    let files: Vec<FileReport> = inputs
        .iter()
        .map(|path| process_file(&store, path, options))
        .collect();
    let failed = files.iter().filter(|report| report.is_problem()).count();
    let total = files.len();

    if ctx.json {
        print_json(&RunReport {
            dry_run: options.dry_run,
            files,
        })?;
    } else {
        for report in &files {
            println!("{}", format_file_report(report));
        }
    }

    if failed > 0 {
        return Err(CliError::Incomplete { failed, total }.into());
    }
    Ok(())
}

/// Reads, processes and commits one table. Never fails the batch: every
/// problem ends up in the returned report.
pub fn process_file<S: TableStore>(store: &S, path: &Path, options: RunOptions) -> FileReport {
    info!(path = %path.display(), "processing file");

    let table = match store.read_table(path) {
        Ok(table) => table,
        Err(err) => {
            error!(path = %path.display(), error = %err, "read failed, skipping file");
            return FileReport::problem(path, FileStatus::Failed, err);
        }
    };

    let mut observer = TracingObserver::new(path);
    let processed = match process_table(table, &mut observer) {
        Ok(processed) => processed,
        Err(err) => {
            error!(path = %path.display(), error = %err, "skipping file");
            return FileReport::problem(path, FileStatus::Skipped, err);
        }
    };

    if options.dry_run {
        return FileReport::done(path, FileStatus::DryRun, processed.summary);
    }

    let backup = if options.backup {
        match store.backup_table(path, options.now_utc) {
            Ok(target) => Some(display_path(&target)),
            Err(err) => {
                error!(path = %path.display(), error = %err, "backup failed, file left as is");
                return FileReport::problem(path, FileStatus::Failed, err);
            }
        }
    } else {
        None
    };

    if let Err(err) = store.write_table(path, &processed.table) {
        error!(path = %path.display(), error = %err, "write failed");
        return FileReport::problem(path, FileStatus::Failed, err);
    }

    info!(
        path = %path.display(),
        column = WEBSITE_COLUMN,
        linked = processed.summary.linked,
        "file updated"
    );
    let mut report = FileReport::done(path, FileStatus::Updated, processed.summary);
    report.backup = backup;
    report
}

fn format_file_report(report: &FileReport) -> String {
    match (report.status, report.summary, report.error.as_deref()) {
        (FileStatus::Updated | FileStatus::DryRun, Some(summary), _) => {
            let verb = if report.status == FileStatus::Updated {
                "Updated"
            } else {
                "Checked (dry run)"
            };
            let mut line = format!(
                "{verb} {}: {} rows, {} links, {} empty, {} unexpected lengths",
                report.path,
                summary.rows,
                summary.linked,
                summary.empty,
                summary.unexpected_length
            );
            if let Some(backup) = &report.backup {
                line.push_str(&format!(" (backup: {backup})"));
            }
            line
        }
        (FileStatus::Skipped, _, error) => {
            format!("Skipped {}: {}", report.path, error.unwrap_or("unknown error"))
        }
        (_, _, error) => format!("Failed {}: {}", report.path, error.unwrap_or("unknown error")),
    }
}
