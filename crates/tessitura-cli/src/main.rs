//! Batch audio feature extraction CLI: analyze a file or directory and
//! write the aggregated descriptors to a JSON document.

mod confirm;
mod writer;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::warn;

use tessitura_core::{AnalysisConfig, CancelToken, PipelineError, discover_files, run};

use crate::confirm::{AlwaysNo, AlwaysYes, Confirm, Interactive};
use crate::writer::{BatchDocument, WriteStatus, write_output};

#[derive(Parser)]
#[command(name = "tessitura")]
#[command(about = "Extract spectral, cepstral, and onset descriptors from audio files")]
struct Args {
    /// Audio file, or directory with audio files to be analyzed (read is recursive)
    input: PathBuf,

    /// Optional path to json output (defaults to current directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite an existing output file without asking
    #[arg(long, conflicts_with = "no_overwrite")]
    force: bool,

    /// Never overwrite an existing output file
    #[arg(long)]
    no_overwrite: bool,
}

fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    path.to_path_buf()
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_target(false).init();

    let args = Args::parse();

    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    if let Err(err) = ctrlc::set_handler(move || handler_token.cancel()) {
        warn!("Could not install interrupt handler: {}", err);
    }

    match run_cli(args, cancel) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run_cli(args: Args, cancel: CancelToken) -> anyhow::Result<ExitCode> {
    let input = expand_tilde(&args.input);
    let output = expand_tilde(&args.output.unwrap_or_else(|| PathBuf::from("./output.json")));

    let files = discover_files(&input)?;
    let config = AnalysisConfig::default();

    let outcome = match run(&files, &config, &cancel) {
        Ok(outcome) => outcome,
        Err(PipelineError::Interrupted) => {
            println!("Interrupted");
            return Ok(ExitCode::SUCCESS);
        }
        Err(err) => return Err(err.into()),
    };

    // An interrupt that lands during the final file still suppresses the
    // write; the output path must never hold a partial result.
    if cancel.is_cancelled() {
        println!("Interrupted");
        return Ok(ExitCode::SUCCESS);
    }

    if !outcome.skipped.is_empty() {
        warn!(
            "{} file(s) could not be decoded and were skipped",
            outcome.skipped.len()
        );
    }

    let document = BatchDocument::new(outcome.records);

    let confirm: Box<dyn Confirm> = if args.force {
        Box::new(AlwaysYes)
    } else if args.no_overwrite {
        Box::new(AlwaysNo)
    } else {
        Box::new(Interactive)
    };

    match write_output(&output, &document, &*confirm)? {
        WriteStatus::Written(path) => println!("Wrote output to {}", path.display()),
        WriteStatus::Declined(_) => println!("File was not overwritten"),
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_expands_to_home() {
        let home = dirs::home_dir().unwrap();
        assert_eq!(expand_tilde(Path::new("~/music")), home.join("music"));
        assert_eq!(
            expand_tilde(Path::new("/absolute/path.json")),
            PathBuf::from("/absolute/path.json")
        );
    }
}
