//! Command-line interface definition using clap.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{BackupConfig, DEFAULT_FILE_PREFIX, SmsConfig};

/// Back up the SMS of a connected Android device to a readable text file,
/// with sender names taken from the device contacts.
#[derive(Parser, Debug, Clone)]
#[command(name = "sauvesms")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    sauvesms
    sauvesms -s R58M123ABC -o ~/backups
    sauvesms --open
    sauvesms --adb /opt/platform-tools/adb
    sauvesms --sms-dump sms.txt --contacts-dump contacts.txt -o out/")]
pub struct Args {
    /// Read the SMS dump from this file instead of querying a device
    #[arg(long, value_name = "FILE")]
    pub sms_dump: Option<PathBuf>,

    /// Read the contacts dump from this file (only with --sms-dump)
    #[arg(long, value_name = "FILE", requires = "sms_dump")]
    pub contacts_dump: Option<PathBuf>,

    /// Path to the adb executable
    #[arg(long, value_name = "PATH", default_value = "adb")]
    pub adb: PathBuf,

    /// Serial of the device to back up (default: first ready device)
    #[arg(short, long, value_name = "SERIAL", conflicts_with = "sms_dump")]
    pub serial: Option<String>,

    /// Directory for the transcript (default: ~/Mes_SMS)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Transcript file name prefix
    #[arg(long, default_value = DEFAULT_FILE_PREFIX)]
    pub prefix: String,

    /// Drop messages with an unreadable date instead of aborting
    #[arg(long)]
    pub skip_invalid: bool,

    /// Hide the progress bar
    #[arg(short, long)]
    pub quiet: bool,

    /// Open the backup folder in the file manager when done
    #[arg(long)]
    pub open: bool,

    /// Log level filter (overridden by RUST_LOG)
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Also write logs to daily files in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

impl Args {
    /// Builds the backup configuration these arguments describe.
    pub fn backup_config(&self) -> BackupConfig {
        let mut config = BackupConfig::new()
            .with_file_prefix(self.prefix.clone())
            .with_sms(SmsConfig::new().with_skip_invalid_timestamps(self.skip_invalid));
        if let Some(dir) = &self.output_dir {
            config = config.with_output_dir(dir.clone());
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["sauvesms"]).unwrap();
        assert_eq!(args.adb, PathBuf::from("adb"));
        assert_eq!(args.prefix, "sms_backup");
        assert_eq!(args.log_level, "warn");
        assert!(!args.skip_invalid);
        assert!(!args.quiet);
        assert!(!args.open);
        assert!(args.sms_dump.is_none());

        let config = args.backup_config();
        assert!(config.output_dir.ends_with("Mes_SMS"));
        assert!(!config.sms.skip_invalid_timestamps);
    }

    #[test]
    fn test_saved_dump_flags() {
        let args = Args::try_parse_from([
            "sauvesms",
            "--sms-dump",
            "sms.txt",
            "--contacts-dump",
            "contacts.txt",
            "-o",
            "out",
            "--skip-invalid",
            "--prefix",
            "pixel",
        ])
        .unwrap();
        assert_eq!(args.sms_dump, Some(PathBuf::from("sms.txt")));
        assert_eq!(args.contacts_dump, Some(PathBuf::from("contacts.txt")));

        let config = args.backup_config();
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.file_prefix, "pixel");
        assert!(config.sms.skip_invalid_timestamps);
    }

    #[test]
    fn test_contacts_dump_requires_sms_dump() {
        assert!(Args::try_parse_from(["sauvesms", "--contacts-dump", "c.txt"]).is_err());
    }

    #[test]
    fn test_serial_conflicts_with_sms_dump() {
        assert!(Args::try_parse_from(["sauvesms", "-s", "ABC", "--sms-dump", "s.txt"]).is_err());
    }

    #[test]
    fn test_short_flags() {
        let args = Args::try_parse_from(["sauvesms", "-s", "ABC", "-q", "-o", "/tmp/x", "--open"])
            .unwrap();
        assert_eq!(args.serial.as_deref(), Some("ABC"));
        assert!(args.open);
        assert!(args.quiet);
        assert_eq!(args.output_dir, Some(PathBuf::from("/tmp/x")));
    }
}
