//! # sauvesms CLI
//!
//! Command-line interface for the sauvesms library.

use std::process;
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use clap::Parser as ClapParser;
use indicatif::{ProgressBar, ProgressStyle};

use sauvesms::SmsBackupError;
use sauvesms::backup::{BackupReport, open_folder, run_backup};
use sauvesms::cli::Args;
use sauvesms::config::BackupConfig;
use sauvesms::device::{AdbSource, DumpSource, FileSource};
use sauvesms::logging::init_logging;
use sauvesms::progress::channel_progress;

const PROGRESS_TEMPLATE: &str = "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}% {msg}";

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), SmsBackupError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();
    let _log_guard = init_logging(&args.log_level, args.log_dir.as_deref())?;

    let config = args.backup_config();
    let source = build_source(&args)?;

    println!("📱 sauvesms v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📖 Source:  {}", source.describe());
    println!("📂 Output:  {}", config.output_dir.display());
    if config.sms.skip_invalid_timestamps {
        println!("⏭️  Skipping messages with unreadable dates");
    }
    println!();
    println!("⏳ Backing up messages...");

    let report = if args.quiet {
        run_backup(source.as_ref(), &config, |_| {})?
    } else {
        run_with_progress_bar(source, config)?
    };

    println!();
    println!("✅ Done! Backup saved to {}", report.path.display());

    println!();
    println!("📊 Summary:");
    println!("   Rows:      {}", report.stats.rows);
    println!("   Messages:  {}", report.records);
    if report.stats.dropped() > 0 {
        println!("   Dropped:   {}", report.stats.dropped());
    }
    println!("   Contacts:  {}", report.contacts);
    println!("   Time:      {:.2}s", total_start.elapsed().as_secs_f64());

    if args.open {
        if let Some(folder) = report.path.parent() {
            match open_folder(folder) {
                Ok(()) => println!("📂 Opened {}", folder.display()),
                Err(e) => eprintln!("⚠️  Could not open backup folder: {}", e),
            }
        }
    }

    Ok(())
}

/// Picks saved dumps or a live device.
fn build_source(args: &Args) -> Result<Box<dyn DumpSource + Send>, SmsBackupError> {
    if let Some(sms) = &args.sms_dump {
        let mut source = FileSource::new(sms);
        if let Some(contacts) = &args.contacts_dump {
            source = source.with_contacts(contacts);
        }
        return Ok(Box::new(source));
    }

    let mut adb = AdbSource::new(&args.adb);
    if let Some(serial) = &args.serial {
        adb = adb.with_serial(serial.clone());
    }
    Ok(Box::new(adb.connect()?))
}

/// Runs the backup on a worker thread and drives a progress bar from its
/// progress channel.
fn run_with_progress_bar(
    source: Box<dyn DumpSource + Send>,
    config: BackupConfig,
) -> Result<BackupReport, SmsBackupError> {
    let (tx, rx) = mpsc::channel();
    let callback = channel_progress(tx);
    let worker = thread::spawn(move || run_backup(source.as_ref(), &config, |pct| callback(pct)));

    let bar = ProgressBar::new(100);
    if let Ok(style) = ProgressStyle::default_bar().template(PROGRESS_TEMPLATE) {
        bar.set_style(style.progress_chars("#>-"));
    }
    for pct in rx {
        bar.set_position(u64::from(pct));
    }
    bar.finish_and_clear();

    worker
        .join()
        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
}
