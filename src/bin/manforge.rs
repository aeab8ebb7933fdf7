//! Manforge CLI - render a JSON document tree to a man(7) page

use clap::Parser;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use manforge::{alias_directives, render_document, Block, Document, RenderError, RenderOptions};

use serde::Deserialize;

#[derive(Parser)]
#[command(name = "manforge")]
#[command(version)]
#[command(about = "Manforge - document-tree to man(7) roff renderer", long_about = None)]
struct Cli {
    /// Input file path with the JSON document tree (reads from stdin if
    /// not provided)
    input_file: Option<PathBuf>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write one redirect file per registered alias name, next to the
    /// output file
    #[arg(long)]
    aliases: bool,

    /// Strict mode: exit with an error if any rendering warnings occur
    #[arg(long)]
    strict: bool,

    /// Quiet mode: suppress warning output to stderr
    #[arg(short, long)]
    quiet: bool,
}

/// On-disk input shape: resolved document attributes plus the block tree.
#[derive(Debug, Deserialize)]
struct Manuscript {
    #[serde(default)]
    options: RenderOptions,
    #[serde(default)]
    blocks: Vec<Block>,
}

fn main() {
    let cli = Cli::parse();
    if let Err(message) = run(&cli) {
        eprintln!("manforge: {}", message);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let input = read_input(cli.input_file.as_deref()).map_err(|e| e.to_string())?;
    let manuscript: Manuscript = serde_json::from_str(&input)
        .map_err(|e| RenderError::invalid(e.to_string()).to_string())?;

    let doc = Document {
        blocks: manuscript.blocks,
    };
    let output = render_document(&doc, &manuscript.options).map_err(|e| e.to_string())?;

    if !cli.quiet {
        for warning in &output.warnings {
            eprintln!("manforge: warning: {}", warning);
        }
    }
    if cli.strict && output.has_warnings() {
        return Err(format!(
            "{} warning(s) in strict mode",
            output.warnings.len()
        ));
    }

    match &cli.output {
        Some(path) => {
            fs::write(path, &output.content).map_err(|e| e.to_string())?;
            if cli.aliases {
                write_alias_files(path, &manuscript.options)?;
            }
        }
        None => {
            if cli.aliases {
                return Err("--aliases requires --output".to_string());
            }
            io::stdout()
                .write_all(output.content.as_bytes())
                .map_err(|e| e.to_string())?;
        }
    }

    Ok(())
}

fn read_input(path: Option<&Path>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// One redirect file per alias, pointing at the primary page.
fn write_alias_files(primary: &Path, options: &RenderOptions) -> Result<(), String> {
    let dir = primary.parent().unwrap_or_else(|| Path::new("."));
    let primary_name = primary
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| "output path has no file name".to_string())?;

    for (file_name, directive) in alias_directives(options, primary_name) {
        fs::write(dir.join(&file_name), directive).map_err(|e| e.to_string())?;
    }
    Ok(())
}
