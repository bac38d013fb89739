mod cli;
mod commands;
mod config;
mod error;
mod input;

use clap::Parser;
use cli::{Cli, Direction};
use error::{exit_with_error, CliError};
use input::InputSource;

fn init_tracing(cli: &Cli) {
    // CLI tracing policy:
    //   --quiet   → "off"
    //   --verbose → RUST_LOG if set, else "debug" (conversion events)
    //   default   → "warn"
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("off")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "debug".into())
    } else {
        tracing_subscriber::EnvFilter::new("warn")
    };

    let ansi = !(cli.no_color || std::env::var_os("NO_COLOR").is_some());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(ansi)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    // Errors go to stderr, so piping stdout must not strip their colour.
    if cli.no_color || std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }

    init_tracing(&cli);

    if let Err(e) = run(cli) {
        exit_with_error(e);
    }
}

fn run(cli: Cli) -> error::CliResult<()> {
    let direction = cli.direction();
    let decode_only = cli.dynamic || cli.allow_variables || !cli.exclude.is_empty();
    if direction == Direction::Encode && decode_only {
        return Err(CliError::Usage(
            "--dynamic, --exclude and --allow-variables only apply to --decode".into(),
        ));
    }

    let file_config = config::load(cli.config.as_deref())?;
    let settings = config::resolve(&cli, file_config)?;
    let source = InputSource::from_arg(&cli.file);

    match direction {
        Direction::Decode => commands::decode::run(&source, &settings.decode),
        Direction::Encode => commands::encode::run(&source, &settings.encode),
    }
}
