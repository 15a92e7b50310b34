use std::io::{self, Write};

use anyhow::Result;
use log::{error, info};

mod ledger;

use ledger::{display, export, Ledger};

/// Prints a prompt and reads one line from stdin.
///
/// Returns None when stdin is closed.
fn prompt(label: &str) -> io::Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        return Ok(None);
    }

    Ok(Some(
        line.trim_end_matches('\n').trim_end_matches('\r').to_string(),
    ))
}

/// Prompts for an export filename, falling back to a default on empty input.
fn prompt_filename(label: &str, default: &str) -> io::Result<Option<String>> {
    let answer = match prompt(label)? {
        Some(answer) => answer,
        None => return Ok(None),
    };

    if answer.is_empty() {
        Ok(Some(default.to_string()))
    } else {
        Ok(Some(answer))
    }
}

// Write rendered export text to disk. A failed write is reported, not fatal.
fn write_export(path: &str, contents: &str) {
    match std::fs::write(path, contents) {
        Ok(()) => println!("Exported to {}", path),
        Err(err) => {
            error!("failed to write {}: {}", path, err);
            println!("Failed to write {}", path);
        }
    }
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let ledger = Ledger::new();
    info!("ledger ready, capacity {} blocks", ledger.capacity());

    loop {
        println!();
        println!("Ledger - Menu");
        println!("1. Add Block");
        println!("2. List Blocks");
        println!("3. Export CSV");
        println!("4. Export JSON");
        println!("5. Verify Chain");
        println!("6. Quit");

        let choice = match prompt("Choose: ")? {
            Some(choice) => choice,
            None => break,
        };

        match choice.trim() {
            "1" => {
                let data = match prompt("Enter block data: ")? {
                    Some(data) => data,
                    None => break,
                };
                match ledger.append(&data) {
                    Ok(index) => println!("Block {} added!", index),
                    Err(err) => println!("{}", err),
                }
            }
            "2" => print!("{}", display::render(&ledger)),
            "3" => {
                match prompt_filename("CSV filename (or press Enter for default): ", "blockchain.csv")? {
                    Some(filename) => write_export(&filename, &export::to_csv(&ledger)),
                    None => break,
                }
            }
            "4" => {
                match prompt_filename("JSON filename (or press Enter for default): ", "blockchain.json")? {
                    Some(filename) => write_export(&filename, &export::to_json(&ledger)),
                    None => break,
                }
            }
            "5" => {
                if ledger.verify() {
                    println!("Chain is valid.");
                } else {
                    println!("Chain is INVALID: a stored block fails digest or linkage checks.");
                }
            }
            "6" => {
                println!("Exiting.");
                break;
            }
            _ => println!("Invalid choice."),
        }
    }

    Ok(())
}
