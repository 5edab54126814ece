use std::{fs, path::PathBuf, process, time::Instant};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use ppl_frontend::{
    ast::{dot::to_dot, printer::pretty_print},
    display_error,
    lexer::lexer::tokenize,
    parser::parser::parse,
};

#[derive(Parser)]
#[command(name = "pplc")]
#[command(about = "PPL front end: lexes and parses a source file", long_about = None)]
struct Cli {
    /// Input source file
    #[arg(short, long)]
    input: PathBuf,
    /// Write the syntax tree to this file as a Graphviz digraph
    #[arg(long)]
    dot: Option<PathBuf>,
    /// Print the syntax tree back as source
    #[arg(long)]
    pp: bool,
    /// Print every token with its position
    #[arg(long)]
    tokens: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let source = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    let file_name = cli
        .input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.input.display().to_string());

    let start = Instant::now();
    let (tokens, mut errors) = tokenize(&source);
    info!("Tokenized in {:?}", start.elapsed());

    if cli.tokens {
        for token in &tokens {
            println!("{}", token.debug());
        }
    }

    let parse_start = Instant::now();
    let (program, parse_errors) = parse(tokens);
    errors.extend(parse_errors);
    info!("Parsed in {:?}", parse_start.elapsed());

    if let Some(path) = &cli.dot {
        fs::write(path, to_dot(&program))
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("Wrote {}", path.display());
    }

    if cli.pp {
        print!("{}", pretty_print(&program));
    }

    for error in &errors {
        display_error(error, &source, &file_name);
    }

    if !errors.is_empty() {
        process::exit(1);
    }

    Ok(())
}
