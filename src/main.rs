//! nova-py: NovaScript → Python transpiler.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use nova_py::{lexer, parser, transpile};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Emit {
    /// Generated Python source
    Python,
    /// One token per line
    Tokens,
    /// The parsed syntax tree
    Ast,
}

#[derive(Parser, Debug)]
#[command(name = "nova-py")]
#[command(about = "NovaScript to Python transpiler", long_about = None)]
struct Cli {
    /// Source file; stdin when omitted or `-`
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Write the result here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    out: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "python")]
    emit: Emit,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let (name, source) = read_source(cli.input.as_ref())?;
    if source.is_empty() {
        bail!("no code found in {}", name);
    }

    let rendered = match render(&source, cli.emit) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Compilation error: {}", e);
            process::exit(1);
        }
    };

    match &cli.out {
        Some(path) => {
            fs::write(path, &rendered).with_context(|| format!("writing {}", path.display()))?;
            info!("wrote {} bytes", rendered.len());
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

fn read_source(input: Option<&PathBuf>) -> Result<(String, String)> {
    match input {
        Some(path) if path != Path::new("-") => {
            let source = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            Ok((path.display().to_string(), source))
        }
        _ => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .context("reading stdin")?;
            Ok(("<stdin>".to_string(), source))
        }
    }
}

fn render(source: &str, emit: Emit) -> nova_py::CompileResult<String> {
    match emit {
        Emit::Python => transpile(source),
        Emit::Tokens => {
            let tokens = lexer::tokenize(source)?;
            Ok(tokens
                .iter()
                .map(|t| t.to_string())
                .collect::<Vec<_>>()
                .join("\n"))
        }
        Emit::Ast => {
            let program = parser::parse(source)?;
            Ok(format!("{:#?}", program))
        }
    }
}
