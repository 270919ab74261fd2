mod reader;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use serde::Serialize;

use formdown_core::FormDefinition;
use reader::read_form_files;

#[derive(Parser)]
#[command(
    name = "formdown",
    version,
    about = "Markdown form preprocessor — extract field declarations into a form definition"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse form documents and output the field definitions as JSON
    Parse {
        /// Input path (markdown file, or directory scanned for *.md)
        path: PathBuf,

        /// Write output to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Rewrite a form document, replacing declarations with placeholders
    Rewrite {
        /// Input markdown file
        path: PathBuf,

        /// Write output to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// One parsed document in directory mode.
#[derive(Serialize)]
struct DocumentReport {
    path: String,
    fields: FormDefinition,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse { path, output } => run_parse(&path, output.as_deref()),
        Commands::Rewrite { path, output } => run_rewrite(&path, output.as_deref()),
    };

    match result {
        Ok(Some(text)) => println!("{text}"),
        Ok(None) => {}
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn run_parse(input_path: &Path, output_file: Option<&Path>) -> Result<Option<String>, String> {
    let files = read_form_files(input_path)?;
    if files.is_empty() {
        return Err(format!(
            "No markdown files (*.md) found at: {}",
            input_path.display()
        ));
    }

    let json = if input_path.is_file() {
        let (_, definition) = formdown_core::parse(&files[0].content)
            .map_err(|e| format!("{}: {e}", files[0].path))?;
        serde_json::to_string_pretty(&definition)
    } else {
        let mut reports = Vec::new();
        for file in &files {
            let (_, definition) =
                formdown_core::parse(&file.content).map_err(|e| format!("{}: {e}", file.path))?;
            reports.push(DocumentReport {
                path: file.path.clone(),
                fields: definition,
            });
        }
        serde_json::to_string_pretty(&reports)
    }
    .map_err(|e| format!("JSON serialization error: {e}"))?;

    write_or_return(json, output_file)
}

fn run_rewrite(input_path: &Path, output_file: Option<&Path>) -> Result<Option<String>, String> {
    if !input_path.is_file() {
        return Err(format!(
            "rewrite expects a single markdown file: {}",
            input_path.display()
        ));
    }

    let files = read_form_files(input_path)?;
    let (rewritten, _) = formdown_core::parse(&files[0].content)
        .map_err(|e| format!("{}: {e}", files[0].path))?;

    write_or_return(rewritten, output_file)
}

fn write_or_return(text: String, output_file: Option<&Path>) -> Result<Option<String>, String> {
    if let Some(out_path) = output_file {
        std::fs::write(out_path, &text)
            .map_err(|e| format!("Failed to write {}: {e}", out_path.display()))?;
        return Ok(None);
    }
    Ok(Some(text))
}
