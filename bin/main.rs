use std::{
    fs,
    io::{self, BufRead, Write},
    path::Path,
    process::ExitCode,
};

use bisim::prelude::*;
use tracing::info;

/// Resolves one input path to file contents. A path given on the command line is used if
/// it exists, otherwise the user is prompted on stdin until an existing file is named.
fn resolve_input(arg: Option<String>, letter: char) -> io::Result<String> {
    let mut candidate = arg;
    loop {
        if let Some(path) = candidate.take() {
            if Path::new(&path).exists() {
                return fs::read_to_string(path);
            }
        }
        print!("Enter a file for {letter}: ");
        io::stdout().flush()?;
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stdin closed while waiting for a filename",
            ));
        }
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            candidate = Some(trimmed.to_string());
        }
    }
}

fn resolve_output(arg: Option<String>) -> io::Result<String> {
    let mut candidate = arg;
    loop {
        match candidate.take() {
            Some(path) if !path.is_empty() => return Ok(path),
            _ => {}
        }
        print!("Enter an output filename: ");
        io::stdout().flush()?;
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stdin closed while waiting for a filename",
            ));
        }
        candidate = Some(line.trim().to_string());
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);

    // a description that fails to parse sends us back to the prompt, like a missing file
    let mut p_arg = args.next();
    let p = load_lts(|| resolve_input(p_arg.take(), 'P'), Origin::P)?;
    let mut q_arg = args.next();
    let q = load_lts(|| resolve_input(q_arg.take(), 'Q'), Origin::Q)?;

    let outcome = check_bisimilarity(&p, &q)?;
    info!(
        "partition has {} blocks, processes are {}bisimilar",
        outcome.partition().size(),
        if outcome.is_bisimilar() { "" } else { "not " }
    );

    let out_path = resolve_output(args.next())?;
    fs::write(&out_path, report::render(&p, &q, &outcome))?;
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
