//! Interactive console for converting quantities
//! Usage: cargo run --bin unitconv_console

use std::io::{self, BufRead, Write};

use tracing_subscriber::EnvFilter;
use unitconv::conversion::{parse_quantity, UnitConverter};

/// Print a prompt and read one line; `None` on end of input
fn prompt(input: &mut impl BufRead, message: &str) -> io::Result<Option<String>> {
    println!("{}", message);
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Ask whether to run another conversion until the answer is y or n
fn new_conversion(input: &mut impl BufRead) -> io::Result<bool> {
    loop {
        let Some(answer) = prompt(input, "New conversion? (y/n) ")? else {
            return Ok(false);
        };
        match answer.to_lowercase().as_str() {
            "y" => return Ok(true),
            "n" => return Ok(false),
            _ => println!("Sorry, I don't understand"),
        }
    }
}

fn console(converter: &UnitConverter) -> io::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        let Some(quantity) = prompt(&mut input, "Enter input value and unit (ex: 10 ml) ")? else {
            return Ok(());
        };

        if quantity.eq_ignore_ascii_case("units") {
            println!("Available units: {}", converter.get_units().join(", "));
            continue;
        }

        let Some((value, unit)) = parse_quantity(&quantity) else {
            println!("Could not read '{}'. Enter a number and a unit, e.g. 10 ml", quantity);
            continue;
        };

        let Some(output_unit) = prompt(&mut input, "Enter desired conversion unit ")? else {
            return Ok(());
        };

        match converter.convert(value, &unit, &output_unit) {
            Ok(converted) => println!("Converted value: {} {}", converted, output_unit),
            Err(e) => println!("{}", e),
        }

        if !new_conversion(&mut input)? {
            return Ok(());
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("unitconv=warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let db_path = unitconv::db::default_database_path();
    let database = unitconv::db::Database::new(&db_path)?;

    let converter = database.with_conn(|conn| {
        unitconv::db::migrations::run_migrations(conn)?;
        UnitConverter::load(conn)
    })?;

    console(&converter)?;
    Ok(())
}
