//! Synthetic `content query` dump generator for stress testing sauvesms.
//!
//! Writes an SMS dump and a matching contacts dump.
//!
//! Usage: cargo run --bin gen_dump --features gen-test -- [messages] [sms_output] [contacts_output]
//! Example: cargo run --bin gen_dump --features gen-test -- 100000 sms.txt contacts.txt

use rand::Rng;
use rand::seq::SliceRandom;
use std::env;
use std::fs::File;
use std::io::{BufWriter, Write};

const CONTACTS: &[(&str, &str)] = &[
    ("Alice Martin", "+33 6 12 34 56 78"),
    ("Bob", "555-1234"),
    ("Maman", "06 98 76 54 32"),
    ("Иван", "+7 912 345-67-89"),
    ("村上", "090-1234-5678"),
    ("Dr. \"Who\"", "(020) 7946 0000"),
    ("Pizza, Pasta & Co", "0140000000"),
];

const UNKNOWN_NUMBERS: &[&str] = &["36173", "+447700900123", "SFR", "0800 123 456"];

const EMOJIS: &[&str] = &["😀", "😂", "❤️", "👍", "🔥", "🎉", "👨‍👩‍👧‍👦", "🇫🇷"];

fn main() {
    let args: Vec<String> = env::args().collect();

    let count: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(100_000);
    let sms_output = args.get(2).map(|s| s.as_str()).unwrap_or("sms_dump.txt");
    let contacts_output = args
        .get(3)
        .map(|s| s.as_str())
        .unwrap_or("contacts_dump.txt");

    println!("🧪 Dump Generator");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   Messages: {}", count);
    println!("   SMS:      {}", sms_output);
    println!("   Contacts: {}", contacts_output);
    println!();

    generate_contacts(contacts_output);
    generate_sms(count, sms_output);
}

fn generate_contacts(output: &str) {
    let file = File::create(output).expect("Failed to create contacts file");
    let mut writer = BufWriter::new(file);
    for (i, (name, number)) in CONTACTS.iter().enumerate() {
        writeln!(writer, "Row: {} display_name={}, number={}", i, name, number).unwrap();
    }
    writer.flush().unwrap();
}

fn generate_sms(count: usize, output: &str) {
    let file = File::create(output).expect("Failed to create SMS file");
    let mut writer = BufWriter::with_capacity(1024 * 1024, file); // 1MB buffer

    let mut rng = rand::thread_rng();
    let start = std::time::Instant::now();
    let mut bytes_written: usize = 0;

    for i in 0..count {
        let address = if rng.gen_bool(0.8) {
            CONTACTS.choose(&mut rng).unwrap().1
        } else {
            *UNKNOWN_NUMBERS.choose(&mut rng).unwrap()
        };
        let date = 1_600_000_000_000i64 + (i as i64) * 37_000;
        let kind = if rng.gen_bool(0.5) { 1 } else { 2 };
        let body = generate_body(&mut rng, i);

        let line = match i % 500 {
            // Drafts without an address
            250 => format!(
                "Row: {} _id={}, thread_id=0, date={}, type=3, body={}, sub_id=-1\n",
                i, i, date, body
            ),
            _ => format!(
                "Row: {} _id={}, thread_id={}, address={}, person=NULL, date={}, date_sent={}, protocol=0, read=1, status=-1, type={}, body={}, sub_id=1\n",
                i,
                i,
                i % 40,
                address,
                date,
                date - 2_000,
                kind,
                body
            ),
        };

        bytes_written += line.len();
        writer.write_all(line.as_bytes()).unwrap();

        if (i + 1) % 10000 == 0 {
            let elapsed = start.elapsed().as_secs_f64();
            let mps = (i + 1) as f64 / elapsed;
            let mb = bytes_written as f64 / 1_000_000.0;
            eprint!(
                "\r   Generated {}/{} ({:.1} MB, {:.0} msg/s)",
                i + 1,
                count,
                mb,
                mps
            );
        }
    }

    writer.flush().unwrap();

    let elapsed = start.elapsed();
    let mb = bytes_written as f64 / 1_000_000.0;

    println!("\n\n✅ Done!");
    println!("   Size: {:.2} MB", mb);
    println!("   Time: {:.2}s", elapsed.as_secs_f64());
}

fn generate_body(rng: &mut impl Rng, index: usize) -> String {
    match index % 12 {
        0..=4 => format!("Message ordinaire n°{}", index),
        5 => format!("Avec, des, virgules, partout #{}", index),
        6 => format!("Sur plusieurs\nlignes\net encore une #{}", index),
        7 => format!("\"Entre guillemets\" #{}", index),
        8 => {
            let emojis: String = (0..20).map(|_| *EMOJIS.choose(rng).unwrap()).collect();
            format!("Emojis {} #{}", emojis, index)
        }
        9 => format!("Fake marker Row: 3 inside text #{}", index),
        10 => String::new(),
        _ => format!("Кириллица и 日本語 #{}", index),
    }
}
