use anyhow::Result;
use clap::{Parser, Subcommand};
use multicalc::calculator::BasicOp;
use multicalc::programmer::Base;
use multicalc::session::{Mode, Session};
use multicalc::ui::{self, Repl};
use multicalc::{Config, EvalResult};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "multicalc", version, about = "A multi-mode terminal calculator")]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log more (-v for info, -vv for debug). RUST_LOG overrides this.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Print one-shot results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Mode to start the interactive session in
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate a scientific expression and exit
    Eval {
        #[arg(
            required = true,
            num_args = 1..,
            allow_hyphen_values = true,
            trailing_var_arg = true
        )]
        expression: Vec<String>,
    },
    /// Apply one basic operation (+ - * /) to two numbers
    #[command(allow_negative_numbers = true)]
    Basic { lhs: f64, op: BasicOp, rhs: f64 },
    /// Convert an integer between binary, decimal and hexadecimal
    Convert {
        #[arg(allow_hyphen_values = true)]
        number: String,

        /// Base the number is written in
        #[arg(short, long, value_enum, default_value_t = Base::Decimal)]
        from: Base,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    tracing::debug!(?config, "configuration loaded");
    let mut session = Session::new(config.display);

    let Some(command) = cli.command else {
        let mode = cli.mode.unwrap_or(config.default_mode);
        let stdin = io::stdin();
        let interactive = stdin.is_terminal();
        let mut repl = Repl::new(session, mode).with_prompt(interactive);
        repl.run(stdin.lock(), io::stdout().lock())?;
        return Ok(ExitCode::SUCCESS);
    };

    let succeeded = match command {
        Command::Eval { expression } => {
            let expression = expression.join(" ");
            let outcome = session.on_evaluate(&expression);
            print_evaluation(&session, &expression, &outcome, cli.json)?
        }
        Command::Basic { lhs, op, rhs } => {
            let outcome = session.on_basic(lhs, op, rhs);
            let expression = format!("{} {} {}", lhs, op, rhs);
            print_evaluation(&session, &expression, &outcome, cli.json)?
        }
        Command::Convert { number, from } => {
            let outcome = session.on_convert(&number, from);
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string(&ui::conversion_json(&number, from, &outcome))?
                );
            } else {
                match &outcome {
                    Ok(_) => println!("{}", ui::render_conversion(&outcome, session.display())),
                    Err(err) => eprintln!("error: {}", err),
                }
            }
            outcome.is_ok()
        }
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_evaluation(
    session: &Session,
    expression: &str,
    outcome: &EvalResult,
    json: bool,
) -> Result<bool> {
    if json {
        println!(
            "{}",
            serde_json::to_string(&ui::evaluation_json(expression, outcome))?
        );
    } else {
        match outcome {
            Ok(value) => println!("{}", session.format_value(*value)),
            Err(err) => eprintln!("error: {}", err),
        }
    }
    Ok(outcome.is_ok())
}
