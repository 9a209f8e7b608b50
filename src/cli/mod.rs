//! Command-line surface: one verb per invocation, keys piped through stdin.

pub mod generate;
pub mod public;
pub mod transform;

use std::io::{BufRead, Write};

use clap::{ArgAction, Parser, Subcommand};
use rand::RngCore;

use crate::config::{Config, DEFAULT_MR_ROUNDS};
use crate::error::RsaError;
use crate::rsa::Operation;

pub use generate::GenKind;

/// Printed to stdout for any argument the parser rejects
pub const USAGE_ERROR: &str = "error: missing/incorrect argument(s)";

/// rsakit - textbook RSA primitives for shell pipelines
#[derive(Parser, Debug)]
#[command(name = "rsakit", version, about)]
pub struct Cli {
    /// Miller-Rabin rounds used when testing primes
    #[arg(
        long,
        global = true,
        default_value_t = DEFAULT_MR_ROUNDS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub rounds: u32,

    /// Log more to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn config(&self) -> Config {
        Config::default().with_rounds(self.rounds)
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Generate a random number, prime or key
    Gen {
        #[arg(value_enum)]
        kind: GenKind,

        /// Exact bit length of the result (of the modulus for keys)
        bits: u64,
    },
    /// Turn the private key line on stdin into its public key line
    Pub,
    /// Encrypt a base-62 message with the public key on stdin
    Enc { message: String },
    /// Decrypt a base-62 message with the private key on stdin
    Dec { message: String },
    /// Sign a hex digest with the private key on stdin
    Sign { message: String },
    /// Recover the hex digest from a base-62 signature with the public key on stdin
    Verify { message: String },
}

/// Execute one command against the given randomness, input and output
pub fn run<R, I, O>(
    command: Commands,
    config: &Config,
    rng: &mut R,
    input: &mut I,
    output: &mut O,
) -> anyhow::Result<()>
where
    R: RngCore + ?Sized,
    I: BufRead,
    O: Write,
{
    match command {
        Commands::Gen { kind, bits } => generate::execute(kind, bits, config, rng, output),
        Commands::Pub => public::execute(config, input, output),
        Commands::Enc { message } => {
            transform::execute(&message, Operation::Encrypt, config, input, output)
        }
        Commands::Dec { message } => {
            transform::execute(&message, Operation::Decrypt, config, input, output)
        }
        Commands::Sign { message } => {
            transform::execute(&message, Operation::Sign, config, input, output)
        }
        Commands::Verify { message } => {
            transform::execute(&message, Operation::Verify, config, input, output)
        }
    }
}

/// Whether an error from `run` should abort the process rather than be
/// reported as bad input
pub fn is_fatal(err: &anyhow::Error) -> bool {
    err.downcast_ref::<RsaError>()
        .is_some_and(RsaError::is_fatal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_args(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(args)
    }

    #[test]
    fn test_gen_args() {
        let cli = parse_args(&["rsakit", "gen", "pair", "2048"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Gen {
                kind: GenKind::Pair,
                bits: 2048
            }
        );
        assert_eq!(cli.rounds, 40);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_transform_args() {
        let cli = parse_args(&["rsakit", "enc", "H33"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Enc {
                message: "H33".to_string()
            }
        );

        let cli = parse_args(&["rsakit", "verify", "9U"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Verify {
                message: "9U".to_string()
            }
        );
    }

    #[test]
    fn test_global_flags() {
        let cli = parse_args(&["rsakit", "-vv", "gen", "prime", "64", "--rounds", "12"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config().mr_rounds, 12);
    }

    #[test]
    fn test_rounds_must_be_positive() {
        assert!(parse_args(&["rsakit", "--rounds", "0", "gen", "prime", "64"]).is_err());
        let cli = parse_args(&["rsakit", "--rounds", "1", "gen", "prime", "64"]).unwrap();
        assert_eq!(cli.rounds, 1);
    }

    #[test]
    fn test_pub_takes_no_arguments() {
        assert_eq!(parse_args(&["rsakit", "pub"]).unwrap().command, Commands::Pub);
        assert!(parse_args(&["rsakit", "pub", "extra"]).is_err());
    }

    #[test]
    fn test_usage_errors() {
        assert!(parse_args(&["rsakit"]).is_err());
        assert!(parse_args(&["rsakit", "gen", "pair"]).is_err());
        assert!(parse_args(&["rsakit", "gen", "bogus", "64"]).is_err());
        assert!(parse_args(&["rsakit", "gen", "key", "many"]).is_err());
        assert!(parse_args(&["rsakit", "enc"]).is_err());
        assert!(parse_args(&["rsakit", "sign", "ab", "cd"]).is_err());
        assert!(parse_args(&["rsakit", "frobnicate", "x"]).is_err());
    }

    #[test]
    fn test_fatal_classification() {
        let fatal = anyhow::Error::new(RsaError::NoInverse {
            value: "65537".into(),
            modulus: "0".into(),
        })
        .context("generating key pair");
        assert!(is_fatal(&fatal));

        let recoverable = anyhow::Error::new(RsaError::EmptyNumeral).context("reading key");
        assert!(!is_fatal(&recoverable));
    }
}
