use std::io::Write;
use std::path::PathBuf;

use clap::Parser;

/// Render a genealogy report definition (JSON) to a paginated HTML document.
#[derive(Parser)]
#[command(name = "kinreport", version, about)]
struct Args {
    /// Report definition file.
    input: PathBuf,

    /// Output file; stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), kinreport::Error> {
    let json = std::fs::read_to_string(&args.input)?;
    let html = kinreport::render_json(&json)?;

    match &args.output {
        Some(path) => std::fs::write(path, &html)?,
        None => std::io::stdout().write_all(html.as_bytes())?,
    }

    Ok(())
}
