use std::env;
use std::fs::{create_dir_all, File};
use std::io::{self, Write};
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use rand::seq::SliceRandom;
use rand::Rng;

const USERS: [&str; 8] = ["U123", "U234", "U345", "U456", "U567", "U678", "U789", "U890"];
const WHITELISTED: [&str; 6] = ["Amazon", "Walmart", "BestBuy", "Target", "Netflix", "Uber"];
const UNLISTED: [&str; 4] = ["CornerCafe", "GiftCardHub", "QuickFuel", "PixelGadgets"];
const FRAUDULENT: [&str; 3] = ["ScamStore", "FakeElectronics", "ShadyBank"];

const PROBABILITY_FRAUDULENT_MERCHANT: f64 = 0.03;
const PROBABILITY_HIGH_AMOUNT: f64 = 0.02;
const PROBABILITY_BURST: f64 = 0.01;
const PROBABILITY_MALFORMED: f64 = 0.01;

struct GeneratorConfig {
    num_records: usize,
    output_path: String
}

impl GeneratorConfig {
    fn from_args() -> Self {
        let args: Vec<String> = env::args().collect();
        let num_records = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(1_000);

        Self {
            num_records: num_records.min(1_000),
            output_path: args.get(2).cloned().unwrap_or_else(|| "samples/generated.csv".to_string())
        }
    }
}

fn main() -> io::Result<()> {
    let config = GeneratorConfig::from_args();

    println!("Generating {} transactions in {}...", config.num_records, config.output_path);

    if let Some(parent) = Path::new(&config.output_path).parent() {
        create_dir_all(parent)?;
    }

    let file = File::create(&config.output_path)?;
    let mut writer = io::BufWriter::new(file);

    writeln!(writer, "transaction_id,user_id,merchant_name,amount,timestamp")?;

    let mut rng = rand::thread_rng();
    let start = NaiveDate::from_ymd_opt(2024, 3, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| io::Error::other("invalid start date"))?;

    let mut written = 0;
    let mut clock = start;

    while written < config.num_records {
        clock += TimeDelta::seconds(rng.gen_range(30..=900));
        let id = written + 1;

        if rng.gen_bool(PROBABILITY_BURST) {
            written += generate_burst(&mut writer, &mut rng, id, clock, config.num_records - written)?;
            continue;
        }

        if rng.gen_bool(PROBABILITY_MALFORMED) {
            writeln!(writer, "TX{id:05},{},,-{}.00,{}", pick(&mut rng, &USERS), rng.gen_range(1..100), format_time(clock))?;
            written += 1;
            continue;
        }

        let merchant = if rng.gen_bool(PROBABILITY_FRAUDULENT_MERCHANT) {
            pick(&mut rng, &FRAUDULENT)
        } else if rng.gen_bool(0.7) {
            pick(&mut rng, &WHITELISTED)
        } else {
            pick(&mut rng, &UNLISTED)
        };

        let amount = if rng.gen_bool(PROBABILITY_HIGH_AMOUNT) {
            rng.gen_range(10_000.0..25_000.0)
        } else {
            rng.gen_range(1.0..500.0)
        };

        writeln!(writer, "TX{id:05},{},{merchant},{amount:.2},{}", pick(&mut rng, &USERS), format_time(clock))?;
        written += 1;
    }

    writer.flush()?;
    println!("Done.");

    Ok(())
}

/// Writes a run of one-user, one-merchant transactions a few seconds apart.
fn generate_burst<W: Write>(writer: &mut W, rng: &mut impl Rng, first_id: usize, clock: NaiveDateTime, remaining: usize) -> io::Result<usize> {
    let user = pick(rng, &USERS);
    let merchant = pick(rng, &UNLISTED);
    let size = rng.gen_range(5..=8).min(remaining);

    for offset in 0..size {
        let time = clock + TimeDelta::seconds(offset as i64 * 8);
        writeln!(writer, "TX{:05},{user},{merchant},{:.2},{}", first_id + offset, rng.gen_range(5.0..60.0), format_time(time))?;
    }

    Ok(size)
}

fn pick<'a>(rng: &mut impl Rng, values: &[&'a str]) -> &'a str {
    values.choose(rng).copied().unwrap_or("Unknown")
}

fn format_time(time: NaiveDateTime) -> String {
    time.format("%Y-%m-%d %H:%M:%S").to_string()
}
