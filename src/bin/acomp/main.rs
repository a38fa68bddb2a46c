use std::io;
use std::process::ExitCode;

use anyhow::Result;

mod cli;
mod spec;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: cli::Cli) -> Result<()> {
    let mut comp = spec::load(&cli.alloy)?;

    for a in &cli.set_w {
        comp.set_w(&a.symbol, a.value)?;
    }
    for a in &cli.set_x {
        comp.set_x(&a.symbol, a.value)?;
    }

    if cli.lock {
        comp.lock()?;
    } else {
        comp.update_fractions()?;
    }

    if !cli.then_x.is_empty() {
        for a in &cli.then_x {
            comp.set_x(&a.symbol, a.value)?;
        }
        comp.update_fractions()?;
    }

    alloy_comp::report::write_table(&comp, &mut io::stdout().lock())?;
    Ok(())
}
