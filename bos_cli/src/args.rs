//! Command-line argument parser for the `bos` tool.
//!
//! Hand-rolled for zero-overhead startup. The surface is a small fixed
//! command set, parsed left to right; no option bundling is needed.

// =============================================================================
// Command
// =============================================================================

/// What the tool should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the instruction catalog: `bos opcodes` (also the default).
    ListOpcodes,
    /// Resolve a reserved word: `bos resolve <keyword>`.
    Resolve(String),
    /// Decode a raw 32-bit instruction word: `bos decode <hex>`.
    Decode(String),
    /// Print version and exit: `bos -V` or `bos --version`.
    PrintVersion,
    /// Print help and exit: `bos -h` or `bos --help`.
    PrintHelp,
}

// =============================================================================
// Parse Error
// =============================================================================

/// Error during argument parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgError {
    /// A command that requires an operand was given none.
    MissingValue(&'static str),
    /// First positional argument is not a known command.
    UnknownCommand(String),
    /// Unknown flag.
    UnknownFlag(String),
    /// Trailing argument after a complete command.
    UnexpectedArg(String),
}

impl std::fmt::Display for ArgError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArgError::MissingValue(command) => {
                write!(f, "argument expected for the {} command", command)
            }
            ArgError::UnknownCommand(word) => write!(f, "unknown command: {}", word),
            ArgError::UnknownFlag(flag) => write!(f, "unknown option: {}", flag),
            ArgError::UnexpectedArg(arg) => write!(f, "unexpected argument: {}", arg),
        }
    }
}

impl std::error::Error for ArgError {}

// =============================================================================
// Parser Entry Point
// =============================================================================

/// Parse command-line arguments into a [`Command`].
///
/// The slice should not include the program name. No arguments at all
/// selects the catalog listing.
pub fn parse_args_vec(args: &[String]) -> Result<Command, ArgError> {
    let Some(first) = args.first() else {
        return Ok(Command::ListOpcodes);
    };

    match first.as_str() {
        "-V" | "--version" => Ok(Command::PrintVersion),
        "-h" | "--help" => Ok(Command::PrintHelp),
        "opcodes" => {
            expect_no_more(&args[1..])?;
            Ok(Command::ListOpcodes)
        }
        "resolve" => {
            let word = expect_value("resolve", args.get(1))?;
            expect_no_more(&args[2..])?;
            Ok(Command::Resolve(word))
        }
        "decode" => {
            let word = expect_value("decode", args.get(1))?;
            expect_no_more(&args[2..])?;
            Ok(Command::Decode(word))
        }
        flag if flag.starts_with('-') => Err(ArgError::UnknownFlag(flag.to_string())),
        other => Err(ArgError::UnknownCommand(other.to_string())),
    }
}

fn expect_value(command: &'static str, value: Option<&String>) -> Result<String, ArgError> {
    value.cloned().ok_or(ArgError::MissingValue(command))
}

fn expect_no_more(rest: &[String]) -> Result<(), ArgError> {
    match rest.first() {
        Some(arg) => Err(ArgError::UnexpectedArg(arg.clone())),
        None => Ok(()),
    }
}

// =============================================================================
// Version / Help Text
// =============================================================================

/// Build the version line.
#[inline]
pub fn version_string() -> String {
    format!("bos {} (COB instruction set)", env!("CARGO_PKG_VERSION"))
}

/// Build the help text.
pub fn help_text() -> &'static str {
    r#"usage: bos [command] [arg]

Commands:
opcodes          list the instruction catalog (default)
resolve <word>   resolve a BOS reserved word to its instruction, if any
decode <hex>     decode a raw 32-bit instruction word (0x-prefix optional)

Options:
-h, --help       print this help message and exit
-V, --version    print the version number and exit"#
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to parse from a slice of string slices (skipping program name).
    fn parse(args: &[&str]) -> Result<Command, ArgError> {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        parse_args_vec(&args)
    }

    #[test]
    fn test_no_args_lists_opcodes() {
        assert_eq!(parse(&[]).unwrap(), Command::ListOpcodes);
    }

    #[test]
    fn test_opcodes_command() {
        assert_eq!(parse(&["opcodes"]).unwrap(), Command::ListOpcodes);
    }

    #[test]
    fn test_resolve_command() {
        assert_eq!(
            parse(&["resolve", "move"]).unwrap(),
            Command::Resolve("move".to_string())
        );
    }

    #[test]
    fn test_resolve_missing_value() {
        assert_eq!(
            parse(&["resolve"]).unwrap_err(),
            ArgError::MissingValue("resolve")
        );
    }

    #[test]
    fn test_decode_command() {
        assert_eq!(
            parse(&["decode", "0x10001000"]).unwrap(),
            Command::Decode("0x10001000".to_string())
        );
    }

    #[test]
    fn test_decode_missing_value() {
        assert_eq!(
            parse(&["decode"]).unwrap_err(),
            ArgError::MissingValue("decode")
        );
    }

    #[test]
    fn test_version_flags() {
        assert_eq!(parse(&["-V"]).unwrap(), Command::PrintVersion);
        assert_eq!(parse(&["--version"]).unwrap(), Command::PrintVersion);
    }

    #[test]
    fn test_help_flags() {
        assert_eq!(parse(&["-h"]).unwrap(), Command::PrintHelp);
        assert_eq!(parse(&["--help"]).unwrap(), Command::PrintHelp);
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            parse(&["compile"]).unwrap_err(),
            ArgError::UnknownCommand("compile".to_string())
        );
    }

    #[test]
    fn test_unknown_flag() {
        assert_eq!(
            parse(&["--verbose"]).unwrap_err(),
            ArgError::UnknownFlag("--verbose".to_string())
        );
    }

    #[test]
    fn test_trailing_argument_rejected() {
        assert_eq!(
            parse(&["resolve", "move", "turn"]).unwrap_err(),
            ArgError::UnexpectedArg("turn".to_string())
        );
        assert_eq!(
            parse(&["opcodes", "extra"]).unwrap_err(),
            ArgError::UnexpectedArg("extra".to_string())
        );
    }

    #[test]
    fn test_arg_error_display() {
        assert_eq!(
            ArgError::MissingValue("resolve").to_string(),
            "argument expected for the resolve command"
        );
        assert_eq!(
            ArgError::UnknownFlag("-Z".to_string()).to_string(),
            "unknown option: -Z"
        );
    }

    #[test]
    fn test_version_string_format() {
        let vs = version_string();
        assert!(vs.starts_with("bos "));
        assert!(vs.contains("COB"));
    }

    #[test]
    fn test_help_text_contains_commands() {
        let ht = help_text();
        assert!(ht.contains("opcodes"));
        assert!(ht.contains("resolve <word>"));
        assert!(ht.contains("decode <hex>"));
        assert!(ht.contains("-V"));
    }
}
