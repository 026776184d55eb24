use anyhow::Result;
use burrowdb::{Database, DatabaseOptions, Error, Row};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

pub fn start(db_path: &str, read_only: bool, cache_size: usize) -> Result<()> {
    let opts = DatabaseOptions {
        cache_size,
        read_only,
        ..Default::default()
    };

    let db = match Database::open_with_options(db_path, opts) {
        Ok(db) => db,
        Err(e) => {
            println!("Failed to open database file: {} ({})", db_path, e);
            std::process::exit(1);
        }
    };

    let mut rl = DefaultEditor::new()?;

    loop {
        match rl.readline("db > ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                if line.starts_with('.') {
                    if !run_meta_command(&db, line) {
                        break;
                    }
                } else {
                    run_statement(&db, line);
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error reading input: {}", err);
                break;
            }
        }
    }

    db.close()?;
    Ok(())
}

/// Returns false when the REPL should exit.
fn run_meta_command(db: &Database, line: &str) -> bool {
    match line {
        ".exit" => return false,
        ".btree" => match db.dump_tree() {
            Ok(dump) => print!("{}", dump),
            Err(e) => print_error(&e.to_string()),
        },
        ".validate" => match db.validate() {
            Ok(summary) => {
                println!("Tree structure is valid!");
                println!("Total rows: {}", summary.total_rows);
            }
            Err(e) => print_error(&e.to_string()),
        },
        ".constants" => {
            println!("Constants:");
            print!("{}", db.constants());
        }
        _ => println!("Unrecognized command '{}'", line),
    }
    true
}

fn run_statement(db: &Database, line: &str) {
    let parts: Vec<&str> = line.split_whitespace().collect();

    let result = match parts[0] {
        "insert" => exec_insert(db, &parts),
        "select" => exec_select(db, &parts),
        "find" => exec_find(db, &parts),
        "delete" => exec_delete(db, &parts),
        "update" => exec_update(db, &parts),
        "range" => exec_range(db, &parts),
        _ => {
            println!("Unrecognized keyword at start of '{}'.", line);
            return;
        }
    };

    match result {
        Ok(Outcome::Executed) => println!("Executed."),
        Ok(Outcome::NotFound) => println!("Key not found."),
        Ok(Outcome::SyntaxError) => println!("Syntax error. Could not parse statement."),
        Err(Error::DuplicateKey { .. }) => print_error("Duplicate key."),
        Err(Error::ValueTooLong { .. }) => print_error("String is too long."),
        Err(e) => print_error(&e.to_string()),
    }
}

enum Outcome {
    Executed,
    NotFound,
    SyntaxError,
}

fn print_error(msg: &str) {
    println!("{} {}", "Error:".red(), msg);
}

fn print_row(row: &Row) {
    println!("({}, {}, {})", row.id, row.username, row.email);
}

fn exec_insert(db: &Database, parts: &[&str]) -> burrowdb::Result<Outcome> {
    if parts.len() != 4 {
        return Ok(Outcome::SyntaxError);
    }
    let id: u32 = match parts[1].parse() {
        Ok(id) => id,
        Err(_) => return Ok(Outcome::SyntaxError),
    };

    db.insert(id, parts[2], parts[3])?;
    Ok(Outcome::Executed)
}

fn exec_select(db: &Database, parts: &[&str]) -> burrowdb::Result<Outcome> {
    if parts.len() != 1 {
        return Ok(Outcome::SyntaxError);
    }

    for row in db.select()? {
        print_row(&row);
    }
    Ok(Outcome::Executed)
}

fn exec_find(db: &Database, parts: &[&str]) -> burrowdb::Result<Outcome> {
    if parts.len() != 2 {
        return Ok(Outcome::SyntaxError);
    }
    let id: u32 = match parts[1].parse() {
        Ok(id) => id,
        Err(_) => return Ok(Outcome::SyntaxError),
    };

    match db.find(id)? {
        Some(row) => {
            print_row(&row);
            Ok(Outcome::Executed)
        }
        None => Ok(Outcome::NotFound),
    }
}

fn exec_delete(db: &Database, parts: &[&str]) -> burrowdb::Result<Outcome> {
    if parts.len() != 2 {
        return Ok(Outcome::SyntaxError);
    }
    let id: u32 = match parts[1].parse() {
        Ok(id) => id,
        Err(_) => return Ok(Outcome::SyntaxError),
    };

    if db.delete(id)? {
        Ok(Outcome::Executed)
    } else {
        Ok(Outcome::NotFound)
    }
}

fn exec_update(db: &Database, parts: &[&str]) -> burrowdb::Result<Outcome> {
    if parts.len() != 4 {
        return Ok(Outcome::SyntaxError);
    }
    let id: u32 = match parts[1].parse() {
        Ok(id) => id,
        Err(_) => return Ok(Outcome::SyntaxError),
    };

    if db.update(id, parts[2], parts[3])? {
        Ok(Outcome::Executed)
    } else {
        Ok(Outcome::NotFound)
    }
}

fn exec_range(db: &Database, parts: &[&str]) -> burrowdb::Result<Outcome> {
    if parts.len() != 3 {
        return Ok(Outcome::SyntaxError);
    }
    let (lo, hi) = match (parts[1].parse::<u32>(), parts[2].parse::<u32>()) {
        (Ok(lo), Ok(hi)) => (lo, hi),
        _ => return Ok(Outcome::SyntaxError),
    };

    let rows = db.range(lo, hi)?;
    for row in &rows {
        print_row(row);
    }
    println!("Total rows in range: {}", rows.len());
    Ok(Outcome::Executed)
}
