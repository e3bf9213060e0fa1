use std::{fmt::Display, fs::read_to_string, path::PathBuf, process::ExitCode, time::Instant};

use blparse::{
    errors::errors::{ensure, Error, ErrorImpl},
    lexer::{
        lexer::tokenize,
        tokens::{Token, TokenKind},
    },
    parser::parser::{parse, parse_block},
    render_error,
};
use clap::{Parser as CParser, ValueEnum};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Emit {
    /// Pretty-print the parsed program
    Pretty,
    /// Dump the syntax tree as JSON
    Json,
    /// List the tokens without parsing
    Tokens,
}

#[derive(CParser)]
#[command(name = "blparse")]
#[command(about = "Parser for BL programs")]
struct Args {
    input: PathBuf,

    #[arg(short, long, value_enum, default_value_t = Emit::Pretty)]
    emit: Emit,

    /// Parse the input as a block of statements instead of a program
    #[arg(long)]
    statements: bool,
}

/// Initialize logging, `RUST_LOG` overrides the default filter.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,blparse=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    init_logging();
    let args = Args::parse();

    let source = read_to_string(&args.input)?;
    let file_name = args.input.display().to_string();

    let start = Instant::now();
    let tokens = tokenize(&source, Some(file_name.clone()));
    info!(tokens = tokens.len(), elapsed = ?start.elapsed(), "tokenized");

    if args.emit == Emit::Tokens {
        print_tokens(&tokens);
        return Ok(ExitCode::SUCCESS);
    }

    let parse_start = Instant::now();
    let text = if args.statements {
        let (parser, block) = parse_block(tokens);
        // A stray ELSE or END ends the block before the input does.
        let block = block.and_then(|block| {
            ensure(parser.current_token_kind() == TokenKind::EOF, || {
                parser.error(ErrorImpl::InvalidStatement {
                    token: parser.current_token().value.clone(),
                })
            })?;
            Ok(block)
        });
        match block {
            Ok(block) => render(args.emit, &block)?,
            Err(error) => return Ok(report(&error, &source, &file_name)),
        }
    } else {
        match parse(tokens).1 {
            Ok(program) => render(args.emit, &program)?,
            Err(error) => return Ok(report(&error, &source, &file_name)),
        }
    };
    info!(elapsed = ?parse_start.elapsed(), "parsed");

    print!("{}", text);
    Ok(ExitCode::SUCCESS)
}

fn render<T: Serialize + Display>(emit: Emit, value: &T) -> Result<String, serde_json::Error> {
    match emit {
        Emit::Json => serde_json::to_string_pretty(value).map(|json| json + "\n"),
        Emit::Pretty | Emit::Tokens => Ok(value.to_string()),
    }
}

fn report(error: &Error, source: &str, file_name: &str) -> ExitCode {
    eprint!("{}", render_error(error, source, file_name));
    ExitCode::FAILURE
}

fn print_tokens(tokens: &[Token]) {
    for token in tokens {
        println!(
            "{:>6}  {:<12} {}",
            token.span.start.0,
            token.kind.to_string(),
            token.value
        );
    }
}
