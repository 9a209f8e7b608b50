use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::config::Config;
use crate::rsa::{transform, Operation};
use crate::util::{read_key, write_line};

/// Read the key from `input`, transform `message` under it and print the
/// result
pub fn execute<I: BufRead, O: Write>(
    message: &str,
    operation: Operation,
    config: &Config,
    input: &mut I,
    output: &mut O,
) -> Result<()> {
    let key = read_key(input, config.max_token_len).context("reading key from stdin")?;
    let result = transform(message, &key, operation).context("parsing message")?;
    write_line(output, &result)?;
    Ok(())
}
