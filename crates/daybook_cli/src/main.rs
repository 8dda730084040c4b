//! Interactive daybook session loop.
//!
//! # Responsibility
//! - Wire stdin/stdout to the core command pipeline.
//! - Persist the record store after mutating commands.
//!
//! # Invariants
//! - One input line is fully parsed and executed before the next is read.
//! - Persistence failures are reported and never abort the session; the
//!   in-memory store stays authoritative.

use daybook_core::{parse_command, RecordStore, SqliteStorage};
use log::warn;
use std::io::{self, BufRead, Write};

const DEFAULT_DATA_FILE: &str = "daybook.db";

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let data_path = args
        .first()
        .cloned()
        .unwrap_or_else(|| DEFAULT_DATA_FILE.to_string());
    if let Some(log_dir) = args.get(1) {
        // Logging is optional; the session stays usable without it.
        if let Err(err) = daybook_core::init_logging(daybook_core::default_log_level(), log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let mut storage = match SqliteStorage::open(&data_path) {
        Ok(storage) => Some(storage),
        Err(err) => {
            eprintln!("storage unavailable ({err}); changes will not be persisted");
            None
        }
    };

    let mut store = RecordStore::new();
    if let Some(storage) = &storage {
        match storage.load() {
            Ok(records) => store = RecordStore::from_records(records),
            Err(err) => eprintln!("could not load saved records ({err}); starting empty"),
        }
    }

    println!(
        "daybook v{} | {} record(s) loaded | type `help` to list commands",
        daybook_core::core_version(),
        store.len()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        let _ = stdout.flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            // EOF behaves like an explicit exit.
            Ok(0) => line = "exit".to_string(),
            Ok(_) => {}
            Err(err) => {
                eprintln!("could not read input: {err}");
                break;
            }
        }

        let command = parse_command(&line);
        let exiting = command.is_exit();
        let mutated = command.mutates_store();

        let result = command.execute(&mut store);
        println!("{}", result.feedback);
        if let Some(records) = &result.records {
            for (display_index, record) in records.iter().enumerate() {
                println!("{:>3}. {}", display_index + 1, record.summary());
            }
        }

        if mutated {
            if let Some(storage) = storage.as_mut() {
                if let Err(err) = storage.save(&store) {
                    warn!("event=store_save module=cli status=error error={err}");
                    eprintln!("warning: could not save records: {err}");
                }
            }
        }

        if exiting {
            break;
        }
    }
}
