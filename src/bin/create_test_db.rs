use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::{Date, Duration, OffsetDateTime};

use budget_tracker::{
    Category, Note, Transaction, TransactionType, create_transaction, initialize_db,
};

/// A utility for creating a test database for the REST API server of budget_tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        Some(extension) if !extension.is_empty() => {}
        _ => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating test transactions...");

    let today = OffsetDateTime::now_utc().date();
    let count = create_sample_transactions(today, &conn)?;

    println!("Created {count} transactions.");
    println!("Success!");

    Ok(())
}

/// Insert a month of income and expenses ending on `today`.
fn create_sample_transactions(today: Date, conn: &Connection) -> Result<usize, Box<dyn Error>> {
    let samples = [
        (30, 2500.00, "Salary", TransactionType::Income, "Monthly pay"),
        (29, 1200.00, "Rent", TransactionType::Expense, ""),
        (27, 84.35, "Groceries", TransactionType::Expense, "Weekly shop"),
        (25, 12.50, "Transport", TransactionType::Expense, "Bus card top up"),
        (22, 4.80, "Coffee", TransactionType::Expense, ""),
        (20, 91.12, "Groceries", TransactionType::Expense, "Weekly shop"),
        (18, 60.00, "Utilities", TransactionType::Expense, "Power bill"),
        (15, 150.00, "Freelance", TransactionType::Income, "Logo design"),
        (13, 78.64, "Groceries", TransactionType::Expense, "Weekly shop"),
        (10, 35.00, "Entertainment", TransactionType::Expense, "Concert ticket"),
        (6, 102.27, "Groceries", TransactionType::Expense, "Weekly shop"),
        (3, 4.80, "Coffee", TransactionType::Expense, ""),
        (1, 45.90, "Groceries", TransactionType::Expense, "Top up shop"),
    ];

    let count = samples.len();

    for (days_ago, amount, category, kind, note) in samples {
        create_transaction(
            Transaction::build(amount, Category::new(category)?, kind)
                .date(today - Duration::days(days_ago))
                .note(Note::new(note)?),
            conn,
        )?;
    }

    Ok(count)
}
