//! Monster Invasion Scores
//!
//! Reads player names and scores from Monster Invasion leaderboard
//! screenshots and writes them to one sorted CSV file.

mod config;
mod ocr;
mod paths;
mod pipeline;
mod scores;
mod vision;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use ocr::TesseractEngine;
use pipeline::Pipeline;
use scores::csv_writer::{self, DEFAULT_FILE_NAME};
use scores::{Leaderboard, NameCorrection};

/// Logs a message to both console and log file with timestamp.
pub fn log(msg: &str) {
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    let line = format!("[{}] {}\n", timestamp, msg);
    print!("{}", line);
    let log_path = paths::get_logs_dir().join("monster_invasion.log");
    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        let _ = file.write_all(line.as_bytes());
    }
}

/// Extracts Monster Invasion scores from Archero 2 screenshots using OCR.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Folder containing the leaderboard screenshots
    #[arg(long)]
    path: PathBuf,

    /// Output CSV file name, written under ./output/
    #[arg(long = "fileName", default_value = DEFAULT_FILE_NAME)]
    file_name: String,

    /// Print per-image scores and save mask/overlay images to ./output/debug/
    #[arg(long)]
    debug: bool,

    /// JSON object mapping misread names to real ones
    #[arg(long, default_value = "nameCorrection.json")]
    names: PathBuf,

    /// Pipeline configuration (defaults to config.json next to the executable)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Set up panic hook to log panics
    std::panic::set_hook(Box::new(|panic_info| {
        let msg = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        let location = if let Some(loc) = panic_info.location() {
            format!(" at {}:{}:{}", loc.file(), loc.line(), loc.column())
        } else {
            String::new()
        };
        let log_msg = format!("[PANIC]{} {}\n", location, msg);
        eprintln!("{}", log_msg);
        let log_path = paths::get_logs_dir().join("monster_invasion.log");
        if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&log_path) {
            let _ = file.write_all(log_msg.as_bytes());
        }
    }));

    let args = Args::parse();

    paths::ensure_directories(args.debug).context("Failed to create output directories")?;

    let config = config::load_config(args.config.as_deref())?;
    let names = NameCorrection::load(&args.names)?;
    if !names.is_empty() {
        log(&format!("Correcting {} known names", names.len()));
    }
    let recognizer = TesseractEngine::new(
        &config.ocr_language,
        config.tesseract_path.as_deref().map(std::path::Path::new),
    )?;

    let mut pipeline = Pipeline::new(&config, &recognizer, &names);
    if args.debug {
        pipeline = pipeline.with_debug_dir(paths::get_debug_dir());
    }

    let mut board = Leaderboard::new();
    let summary = pipeline.run(&args.path, &mut board)?;
    log(&format!(
        "Processed {} of {} images ({} skipped, {} regions read)",
        summary.images_processed,
        summary.images_found,
        summary.images_skipped,
        summary.regions_read
    ));

    if board.is_empty() {
        log("No scores were recognized; the CSV will only contain the header");
    }

    let entries = board.export();
    for entry in &entries {
        log(&format!("{} — {}", entry.name, entry.score));
    }
    log(&format!("Total hits recorded: {}", board.len()));

    let csv_path = csv_writer::output_path(&paths::get_output_dir(), &args.file_name);
    csv_writer::write_scores(&csv_path, &entries)?;
    log(&format!("Scores written to {}", csv_path.display()));

    Ok(())
}
