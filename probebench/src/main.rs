use std::io::{self, Write};
use std::process;

use clap::Parser;
use probebench::{report, run_settings, Args, Prompter};

fn main() {
    env_logger::init();

    if let Err(e) = try_main() {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn try_main() -> probebench::Result<()> {
    let args = Args::parse();

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    let settings = args.resolve(&mut prompter)?;

    let outcome = run_settings(settings)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report::write_text(&mut out, &outcome.summary.engines)?;
    out.flush()?;
    Ok(())
}
