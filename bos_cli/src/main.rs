//! `bos` — COB instruction-set inspection tool.
//!
//! Lists the opcode catalog, resolves BOS reserved words to instruction
//! codes, and decodes raw 32-bit instruction words.

mod args;

use args::Command;
use bos_compiler::Opcode;
use bos_parser::Keyword;
use std::process::ExitCode;

/// Successful execution.
const EXIT_SUCCESS: u8 = 0;
/// Operational error (a word that is not in the catalog).
const EXIT_ERROR: u8 = 1;
/// Command-line usage error (bad command, bad operand).
const EXIT_USAGE_ERROR: u8 = 2;

fn main() -> ExitCode {
    let argv: Vec<String> = std::env::args().skip(1).collect();

    let command = match args::parse_args_vec(&argv) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("bos: {}", err);
            eprintln!("{}", args::help_text());
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    match command {
        Command::ListOpcodes => run_list(),
        Command::Resolve(word) => run_resolve(&word),
        Command::Decode(text) => run_decode(&text),
        Command::PrintVersion => {
            println!("{}", args::version_string());
            ExitCode::from(EXIT_SUCCESS)
        }
        Command::PrintHelp => {
            println!("{}", args::help_text());
            ExitCode::from(EXIT_SUCCESS)
        }
    }
}

/// Print the whole catalog in declaration order.
fn run_list() -> ExitCode {
    for op in Opcode::ALL {
        println!("{:<20} 0x{:08X}  {}", op.mnemonic(), op.code(), op.family());
    }
    ExitCode::from(EXIT_SUCCESS)
}

/// Resolve one reserved word.
fn run_resolve(word: &str) -> ExitCode {
    let Some(keyword) = Keyword::from_str(word) else {
        eprintln!("bos: not a BOS reserved word: {}", word);
        return ExitCode::from(EXIT_USAGE_ERROR);
    };

    match Opcode::from_keyword(keyword) {
        Some(op) => println!("{} -> {}", keyword, op),
        None => println!(
            "{} has no direct instruction; the code generator lowers it to a sequence",
            keyword
        ),
    }
    ExitCode::from(EXIT_SUCCESS)
}

/// Decode one raw instruction word.
fn run_decode(text: &str) -> ExitCode {
    let Some(raw) = parse_hex_word(text) else {
        eprintln!("bos: not a 32-bit hex word: {}", text);
        return ExitCode::from(EXIT_USAGE_ERROR);
    };

    match Opcode::try_from(raw) {
        Ok(op) => {
            println!("{}  [{}]", op, op.family());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(err) => {
            eprintln!("bos: {}", err);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Parse a hex word with or without a `0x` prefix.
fn parse_hex_word(text: &str) -> Option<u32> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    u32::from_str_radix(digits, 16).ok()
}
