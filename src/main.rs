use clap::{Parser as ClapParser, Subcommand};
use parmap_lang::cli::{self, CheckOptions, CheckResult, CliError};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "parmap")]
#[command(about = "parmap - a configuration-expression language with cartesian join expansion")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an expression and print its canonical form
    Check {
        /// The expression to check (reads from stdin if not provided)
        expr: Option<String>,

        /// Print the parsed map as JSON
        #[arg(long)]
        json: bool,

        /// Pretty-print the JSON output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't print
        #[arg(long)]
        syntax_only: bool,
    },

    /// Expand a join/list form and print one expression per variant
    Expand {
        /// The list expression to expand (reads from stdin if not provided)
        expr: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            expr,
            json,
            pretty,
            syntax_only,
        } => run_check(expr, json, pretty, syntax_only),
        Commands::Expand { expr } => run_expand(expr),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

// The grammar tolerates no whitespace, so the trailing newline a shell pipe
// appends must go before parsing.
fn read_expr(expr: Option<String>) -> Result<String, CliError> {
    match expr {
        Some(s) => Ok(s),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(CliError::Io)?;
            let trimmed = buffer.trim().to_string();
            if trimmed.is_empty() {
                Err(CliError::NoInput)
            } else {
                Ok(trimmed)
            }
        }
        None => Err(CliError::NoInput),
    }
}

fn run_check(
    expr: Option<String>,
    json: bool,
    pretty: bool,
    syntax_only: bool,
) -> Result<(), CliError> {
    let expr = read_expr(expr)?;
    let options = CheckOptions {
        expr,
        json,
        pretty,
        syntax_only,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Rendered(out) => println!("{}", out),
    }
    Ok(())
}

fn run_expand(expr: Option<String>) -> Result<(), CliError> {
    let expr = read_expr(expr)?;
    for line in cli::execute_expand(&expr)? {
        println!("{}", line);
    }
    Ok(())
}
