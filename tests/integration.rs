//! Integration tests for the full dump-to-transcript pipeline.

use chrono::{FixedOffset, Utc};
use sauvesms::dump::{extract_body, record_blocks, split_rows};
use sauvesms::prelude::*;
use std::fs;
use std::sync::mpsc;
use tempfile::tempdir;

const CONTACTS: &str =
    "Row: display_name=Alice, number=555-1234\nRow: display_name=Bob, number=555-1234";
const ONE_SMS: &str =
    "Row: 0 date=1700000000000, address=5551234, type=1, body=Hello, world, sub_id=1";

/// A dump shaped like real `content query --uri content://sms` output.
const DEVICE_SMS: &str = "\
Row: 0 _id=812, thread_id=3, address=+33 6 12 34 56 78, person=NULL, date=1700000000000, date_sent=1699999998000, protocol=0, read=1, status=-1, type=1, reply_path_present=0, subject=NULL, body=Coucou, tu rentres quand ?
Bisous, service_center=+33609001390, locked=0, sub_id=1, error_code=0, creator=com.google.android.apps.messaging, seen=1
Row: 1 _id=813, thread_id=3, address=+33612345678, person=NULL, date=1700000060000, date_sent=0, protocol=NULL, read=1, status=-1, type=2, reply_path_present=NULL, subject=NULL, body=Vers 19h, sub_id=1, error_code=0
Row: 2 _id=814, thread_id=9, address=36173, person=NULL, date=1700000120000, date_sent=0, protocol=0, read=1, status=-1, type=1, body=Votre code : 123456, sub_id=1, error_code=0
";

const DEVICE_CONTACTS: &str = "\
Row: 0 display_name=Maman, number=+33 6 12 34 56 78
Row: 1 display_name=Bureau, number=01 40 00 00 00
Row: 2 display_name=Sans numéro, number=
";

fn parse(dump: &str) -> ParsedSms {
    SmsParser::new().parse(dump).unwrap()
}

// =========================================================================
// Reference examples
// =========================================================================

#[test]
fn test_normalize_example() {
    assert_eq!(normalize("+1 (555) 123-4567"), "15551234567");
    assert_eq!(normalize(&normalize("+1 (555) 123-4567")), "15551234567");
}

#[test]
fn test_empty_directory_lookup() {
    let directory = ContactDirectory::new();
    assert_eq!(directory.lookup("555"), "555");
}

#[test]
fn test_duplicate_numbers_last_wins() {
    let directory = ContactDirectory::from_dump(CONTACTS);
    assert_eq!(directory.get("5551234"), Some("Bob"));
    assert_eq!(directory.len(), 1);
}

#[test]
fn test_no_row_markers_means_no_records() {
    let dump = "No result found.";
    assert_eq!(split_rows(dump).len(), 1);
    assert!(record_blocks(dump).is_empty());
    assert!(parse(dump).records.is_empty());
}

#[test]
fn test_body_keeps_commas() {
    let blocks = record_blocks(ONE_SMS);
    assert_eq!(blocks.len(), 1);
    assert_eq!(extract_body(blocks[0]), "Hello, world");
}

#[test]
fn test_direction_labels() {
    let dump = "Row: 0 date=1700000000000, address=1, type=1, body=a, sub_id=1\n\
                Row: 1 date=1700000000000, address=1, type=2, body=b, sub_id=1\n\
                Row: 2 date=1700000000000, address=1, type=5, body=c, sub_id=1\n\
                Row: 3 date=1700000000000, address=1, body=d, sub_id=1";
    let labels: Vec<&str> = parse(dump)
        .records
        .iter()
        .map(|r| r.direction.label())
        .collect();
    assert_eq!(labels, vec!["De", "À", "À", "À"]);
}

#[test]
fn test_missing_address_does_not_shift_records() {
    let dump = "Row: 0 date=1700000000000, address=111, type=1, body=first, sub_id=1\n\
                Row: 1 date=1700000000000, type=3, body=draft, sub_id=1\n\
                Row: 2 date=1700000000000, address=222, type=2, body=second, sub_id=1";
    let parsed = parse(dump);
    let bodies: Vec<&str> = parsed.records.iter().map(|r| r.body.as_str()).collect();
    assert_eq!(bodies, vec!["first", "second"]);
    assert_eq!(parsed.stats.rows, 3);
    assert_eq!(parsed.stats.missing_fields, 1);
}

#[test]
fn test_progress_reaches_100() {
    let parsed = parse(DEVICE_SMS);
    let mut calls = Vec::new();
    render_with_timezone(&parsed.records, &ContactDirectory::new(), &Utc, |p| {
        calls.push(p)
    });
    assert_eq!(calls, vec![33, 66, 100]);
}

#[test]
fn test_empty_render() {
    let mut calls = 0;
    let transcript = render_with_timezone(&[], &ContactDirectory::new(), &Utc, |_| calls += 1);
    assert!(transcript.is_empty());
    assert_eq!(calls, 0);
}

#[test]
fn test_end_to_end_bob() {
    let directory = ContactDirectory::from_dump(CONTACTS);
    let parsed = parse(ONE_SMS);
    let transcript = render_with_timezone(&parsed.records, &directory, &Utc, |_| {});

    let lines: Vec<&str> = transcript.lines().collect();
    assert_eq!(lines[2], "De: Bob (5551234)");
    assert_eq!(
        transcript,
        "Date: 2023-11-14\nHeure: 22:13:20\nDe: Bob (5551234)\nMessage: Hello, world\n\n"
    );
}

// =========================================================================
// Device-shaped dumps
// =========================================================================

#[test]
fn test_device_dump_transcript() {
    let directory = ContactDirectory::from_dump(DEVICE_CONTACTS);
    assert_eq!(directory.len(), 2);

    let parsed = parse(DEVICE_SMS);
    assert_eq!(parsed.records.len(), 3);

    let paris = FixedOffset::east_opt(3600).unwrap();
    let transcript = render_with_timezone(&parsed.records, &directory, &paris, |_| {});

    let expected = "\
Date: 2023-11-14
Heure: 23:13:20
De: Maman (+33 6 12 34 56 78)
Message: Coucou, tu rentres quand ?
Bisous, service_center=+33609001390, locked=0

Date: 2023-11-14
Heure: 23:14:20
À: Maman (+33612345678)
Message: Vers 19h

Date: 2023-11-14
Heure: 23:15:20
De: 36173 (36173)
Message: Votre code : 123456

";
    assert_eq!(transcript, expected);
}

#[test]
fn test_records_keep_dump_order() {
    let dump = "Row: 0 date=1700000300000, address=1, type=1, body=late, sub_id=1\n\
                Row: 1 date=1600000000000, address=1, type=1, body=early, sub_id=1";
    let parsed = parse(dump);
    assert_eq!(parsed.records[0].body, "late");
    assert_eq!(parsed.records[1].body, "early");
}

#[test]
fn test_invalid_timestamp_is_fatal_by_default() {
    let dump = "Row: 0 date=hier, address=1, type=1, body=x, sub_id=1";
    let err = SmsParser::new().parse(dump).unwrap_err();
    assert!(err.is_invalid_timestamp());
}

#[test]
fn test_invalid_timestamp_can_be_skipped() {
    let dump = "Row: 0 date=hier, address=1, type=1, body=x, sub_id=1\n\
                Row: 1 date=1700000000000, address=2, type=1, body=y, sub_id=1";
    let parser = SmsParser::with_config(SmsConfig::new().with_skip_invalid_timestamps(true));
    let parsed = parser.parse(dump).unwrap();
    assert_eq!(parsed.records.len(), 1);
    assert_eq!(parsed.stats.invalid_timestamps, 1);
    assert_eq!(parsed.stats.dropped(), 1);
}

// =========================================================================
// Backup runs
// =========================================================================

#[test]
fn test_backup_from_static_source() {
    let dir = tempdir().unwrap();
    let source = StaticSource::new(CONTACTS, ONE_SMS);
    let config = BackupConfig::new().with_output_dir(dir.path());

    let mut calls = Vec::new();
    let report = run_backup(&source, &config, |p| calls.push(p)).unwrap();

    assert_eq!(report.records, 1);
    assert_eq!(report.contacts, 1);
    assert_eq!(calls, vec![100]);
    assert!(report.path.starts_with(dir.path()));

    let name = report.path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("sms_backup_"));
    assert!(name.ends_with(".txt"));

    let content = fs::read_to_string(&report.path).unwrap();
    assert!(content.contains("De: Bob (5551234)"));
    assert!(content.contains("Message: Hello, world\n"));
}

#[test]
fn test_backup_from_files() {
    let dir = tempdir().unwrap();
    let sms = dir.path().join("sms.txt");
    let contacts = dir.path().join("contacts.txt");
    fs::write(&sms, DEVICE_SMS).unwrap();
    fs::write(&contacts, DEVICE_CONTACTS).unwrap();

    let out = dir.path().join("nested").join("out");
    let source = FileSource::new(&sms).with_contacts(&contacts);
    let config = BackupConfig::new()
        .with_output_dir(&out)
        .with_file_prefix("pixel");

    let report = run_backup(&source, &config, |_| {}).unwrap();
    assert_eq!(report.records, 3);
    assert!(out.is_dir());

    let name = report.path.file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("pixel_"));
    let content = fs::read_to_string(&report.path).unwrap();
    assert_eq!(content.matches("Message: ").count(), 3);
    assert!(content.contains("(+33612345678)"));
}

#[test]
fn test_backup_without_contacts_file() {
    let dir = tempdir().unwrap();
    let sms = dir.path().join("sms.txt");
    fs::write(&sms, ONE_SMS).unwrap();

    let config = BackupConfig::new().with_output_dir(dir.path().join("out"));
    let report = run_backup(&FileSource::new(&sms), &config, |_| {}).unwrap();

    assert_eq!(report.contacts, 0);
    let content = fs::read_to_string(&report.path).unwrap();
    assert!(content.contains("De: 5551234 (5551234)"));
}

#[test]
fn test_backup_missing_sms_file_fails() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("out");
    let source = FileSource::new(dir.path().join("absent.txt"));
    let config = BackupConfig::new().with_output_dir(&out);

    let err = run_backup(&source, &config, |_| {}).unwrap_err();
    assert!(err.is_io());
    assert!(!out.exists());
}

#[test]
fn test_backup_progress_over_channel() {
    let dir = tempdir().unwrap();
    let config = BackupConfig::new().with_output_dir(dir.path());
    let (tx, rx) = mpsc::channel();
    let callback = channel_progress(tx);

    let worker = std::thread::spawn(move || {
        let source = StaticSource::new(DEVICE_CONTACTS, DEVICE_SMS);
        run_backup(&source, &config, |p| callback(p))
    });

    let received: Vec<u8> = rx.iter().collect();
    let report = worker.join().unwrap().unwrap();

    assert_eq!(report.records, 3);
    assert_eq!(received, vec![33, 66, 100]);
}
