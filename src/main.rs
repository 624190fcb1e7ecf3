use clap::Parser;
use std::fs::File;
use std::io;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use trisense::{view, Args, Config, NormalStep, SimError, Simulation};

/// Installs the global subscriber
///
/// Interactive runs only log when a log file is given, since anything written
/// to the terminal would land on top of the frame.
fn init_logging(args: &Args, config: &Config) -> Result<(), SimError> {
    let default_level = if config.diagnostics { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let installed = if let Some(path) = &args.log_file {
        let file = File::create(path).map_err(|source| SimError::LogFile {
            path: path.clone(),
            source,
        })?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init()
    } else if args.headless.is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
    } else {
        Ok(())
    };
    installed.map_err(|err| SimError::Logging(err.to_string()))
}

/// Main function
fn main() -> Result<(), SimError> {
    let args = Args::parse();
    let config = Config::try_from(&args)?;
    init_logging(&args, &config)?;

    let mut simulation = Simulation::new(&config, NormalStep::default())?;

    if let Some(ticks) = args.headless {
        simulation.run_headless(ticks);
        return Ok(());
    }

    println!("{}", view::banner(&config));
    view::wait_for_enter(&mut io::stdin().lock())?;
    view::run(&mut simulation)
}
