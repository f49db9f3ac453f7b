use std::{path::PathBuf, process::ExitCode};

use acr_qa::{
    logging,
    pipeline::{PipelineOptions, run_pipeline},
};
use clap::Parser;
use tracing::error;

/// ACR QA Pipeline
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to dataset folder (example: data/ballinasloe)
    #[arg(long)]
    data: PathBuf,

    /// Path to tolerances JSON
    #[arg(long)]
    tolerances: Option<PathBuf>,

    /// Output report path [default: reports/report_<dataset>.json]
    #[arg(long)]
    out: Option<PathBuf>,

    /// Pipeline log file
    #[arg(long, default_value = "logs/pipeline.log")]
    log_file: PathBuf,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(&args.log_file, &args.log_level);

    let mut options = PipelineOptions::new(&args.data);
    options.tolerances = args.tolerances;
    if let Some(out) = args.out {
        options.report_path = out;
    }

    match run_pipeline(&options) {
        Ok(_) => {
            println!("\nReport created: {}\n", options.report_path.display());
            println!("Pipeline finished successfully.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
