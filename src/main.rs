use clap::Parser;
use log::{error, info};
use std::error::Error;
use std::process::ExitCode;

use motor2yolo::{process_dataset, Args};

fn main() -> ExitCode {
    // Initialize the logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    if !args.data_root.exists() {
        error!(
            "The specified data_root does not exist: {}",
            args.data_root.display()
        );
        return ExitCode::FAILURE;
    }

    info!("Starting the conversion process...");

    match process_dataset(&args) {
        Ok(stats) => {
            stats.print_summary();
            info!(
                "Dataset created with {} training and {} validation images, including negative samples.",
                stats.train.images, stats.val.images
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to convert dataset: {}", e);
            let mut source = e.source();
            while let Some(cause) = source {
                error!("  caused by: {}", cause);
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
