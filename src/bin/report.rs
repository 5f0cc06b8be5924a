use std::{path::PathBuf, process::exit};

use clap::{Parser, Subcommand};
use serde::Serialize;
use time::Date;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use pocketbook::{
    Error, ExpenseCategory, Ledger, RecordId, Summary, YearMonth, format_date, get_budget_status,
    get_spending_trend_on, parse_amount, render_budget_status, render_summary, render_trend,
    today_in,
};

/// Track expenses, income and monthly budgets, and report on them.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the JSON ledger. Created on the first change if missing.
    #[arg(long, env = "POCKETBOOK_LEDGER", default_value = "pocketbook.json")]
    ledger: PathBuf,

    /// The canonical time zone used to decide what "today" is, e.g. "Pacific/Auckland".
    #[arg(long, env = "TIMEZONE", default_value = "Etc/UTC")]
    timezone: String,

    /// Print JSON instead of text.
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Income against expenses, with totals per category and source.
    Summary,

    /// Spending against each budget for one month.
    Budgets {
        /// Defaults to the current year.
        #[arg(long)]
        year: Option<i32>,

        /// Defaults to the current month.
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=12))]
        month: Option<u8>,
    },

    /// Spending per month over recent months.
    Trend {
        /// How many calendar months to look back.
        #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(u32).range(1..))]
        months: u32,
    },

    /// Record money that was spent.
    AddExpense {
        /// The date as YYYY-MM-DD. Defaults to today.
        #[arg(long)]
        date: Option<String>,

        /// One of the expense categories, e.g. "Food & Dining".
        #[arg(long)]
        category: String,

        #[arg(long)]
        amount: String,

        #[arg(long, default_value = "")]
        description: String,
    },

    /// Record money that was received.
    AddIncome {
        /// The date as YYYY-MM-DD. Defaults to today.
        #[arg(long)]
        date: Option<String>,

        /// One of the income sources, e.g. "Salary".
        #[arg(long)]
        source: String,

        #[arg(long)]
        amount: String,

        #[arg(long, default_value = "")]
        description: String,
    },

    /// Set the monthly limit for a category, replacing any existing limit.
    SetBudget {
        #[arg(long)]
        category: String,

        #[arg(long)]
        limit: String,
    },

    DeleteExpense {
        #[arg(long)]
        id: RecordId,
    },

    DeleteIncome {
        #[arg(long)]
        id: RecordId,
    },

    DeleteBudget {
        #[arg(long)]
        category: String,
    },
}

fn main() {
    setup_logging();

    let args = Args::parse();

    let result = today_in(&args.timezone).and_then(|today| run(&args, today));

    match result {
        Ok(output) => print!("{output}"),
        Err(error) => {
            tracing::error!("{error}");
            eprintln!("Error: {error}");
            exit(1);
        }
    }
}

fn setup_logging() {
    let stderr_log = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(stderr_log)
        .init();
}

/// Run `args.command` against the ledger file and return what should be printed.
///
/// The ledger is only written back when the command changes it.
fn run(args: &Args, today: Date) -> Result<String, Error> {
    let mut ledger = Ledger::load(&args.ledger)?;

    let output = match &args.command {
        Command::Summary => {
            let summary = Summary::build(&ledger, today);

            if args.json {
                to_json(&summary)?
            } else {
                render_summary(&summary)
            }
        }
        Command::Budgets { year, month } => {
            let current = YearMonth::of(today);
            let year = year.unwrap_or(current.year());
            let month = month.unwrap_or(current.month());
            let target = YearMonth::new(year, month)
                .ok_or_else(|| Error::InvalidMonth(format!("{year}-{month}")))?;

            let status = get_budget_status(
                ledger.expenses(),
                &ledger.budgets(),
                target.year(),
                target.month(),
            );

            if args.json {
                to_json(&status)?
            } else {
                render_budget_status(target, &status)
            }
        }
        Command::Trend { months } => {
            let trend = get_spending_trend_on(ledger.expenses(), *months, today);

            if args.json {
                to_json(&trend)?
            } else {
                render_trend(&trend)
            }
        }
        Command::AddExpense {
            date,
            category,
            amount,
            description,
        } => {
            let date = date.clone().unwrap_or_else(|| format_date(today));
            let expense =
                ledger.add_expense(&date, category, parse_amount(amount)?, description)?;
            ledger.save(&args.ledger)?;

            if args.json {
                to_json(&expense)?
            } else {
                format!(
                    "Expense added successfully! (ID: {})\n",
                    expense.id.unwrap_or_default()
                )
            }
        }
        Command::AddIncome {
            date,
            source,
            amount,
            description,
        } => {
            let date = date.clone().unwrap_or_else(|| format_date(today));
            let income = ledger.add_income(&date, source, parse_amount(amount)?, description)?;
            ledger.save(&args.ledger)?;

            if args.json {
                to_json(&income)?
            } else {
                format!(
                    "Income added successfully! (ID: {})\n",
                    income.id.unwrap_or_default()
                )
            }
        }
        Command::SetBudget { category, limit } => {
            let category: ExpenseCategory = category.parse()?;
            let budget = ledger.set_budget(category, parse_amount(limit)?)?;
            ledger.save(&args.ledger)?;

            if args.json {
                to_json(&budget)?
            } else {
                format!("Budget for {category} set successfully!\n")
            }
        }
        Command::DeleteExpense { id } => {
            let expense = ledger.delete_expense(*id)?;
            ledger.save(&args.ledger)?;

            if args.json {
                to_json(&expense)?
            } else {
                format!("Expense {id} deleted.\n")
            }
        }
        Command::DeleteIncome { id } => {
            let income = ledger.delete_income(*id)?;
            ledger.save(&args.ledger)?;

            if args.json {
                to_json(&income)?
            } else {
                format!("Income record {id} deleted.\n")
            }
        }
        Command::DeleteBudget { category } => {
            let category: ExpenseCategory = category.parse()?;
            let budget = ledger.delete_budget(category)?;
            ledger.save(&args.ledger)?;

            if args.json {
                to_json(&budget)?
            } else {
                format!("Budget for {category} deleted.\n")
            }
        }
    };

    Ok(output)
}

fn to_json<T: Serialize>(value: &T) -> Result<String, Error> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    Ok(text)
}
