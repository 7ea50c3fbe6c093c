#![allow(nonstandard_style)]

mod error_handling;
mod evaluating;
mod nesting;
mod parsing;
mod scanning;
mod session;
mod symbols;

use session::*;

use clap::Parser;
use std::io::Write;

/// Evaluates one arithmetic statement per line, keeping variables between lines.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Text printed before each statement is read.
    #[arg(long, default_value = "> ")]
    prompt: String,

    /// Print the token stream, the read/un-read split and the symbol table.
    #[arg(short, long)]
    echo: bool,

    /// Do not print the prompt, for piped input.
    #[arg(short, long)]
    quiet: bool,
}

fn prompt(args: &Args) -> std::io::Result<()> {
    if !args.quiet {
        print!("{}", args.prompt);
        std::io::stdout().flush()?;
    }
    Ok(())
}

fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut session = Session::new();

    prompt(&args)?;
    for line in std::io::stdin().lines() {
        let line = line?;
        if line.trim().is_empty() {
            break;
        }

        let report = session.execute(&line);
        if args.echo {
            println!("Token Stream: {}", report.tokens.join("  "));
            println!("{}", report);
            println!("Symbol table contains {}", session.symbols());
        } else {
            match &report.outcome {
                Ok(Some(value)) => println!("{}", value),
                Ok(None) => (),
                Err(e) => println!("Error, {}", e),
            }
        }

        prompt(&args)?;
    }
    Ok(())
}
