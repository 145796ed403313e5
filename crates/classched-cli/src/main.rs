use clap::Parser;
use classched_cli::Cli;
use classched_core::{init_logging, load_config, run};

fn main() {
    let cli = Cli::parse();
    if let Err(err) = dispatch(cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn dispatch(cli: Cli) -> anyhow::Result<()> {
    init_logging()?;

    let load = load_config();
    for warning in &load.warnings {
        eprintln!("Warning: {warning}");
    }

    let request = cli.to_request(&load.config)?;
    if request.sessions.is_empty() {
        eprintln!("Warning: session list is empty; nothing to schedule.");
    }

    let output = run(request, &load.config)?;
    if let Some(text) = output.text {
        println!("{text}");
    }
    if let Some(ical) = output.ical {
        // iCalendar text carries its own CRLF terminators.
        print!("{ical}");
    }
    Ok(())
}
