use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::config::Config;
use crate::rsa::public_key_line;
use crate::util::{read_modulus_token, write_line};

/// Echo the modulus token of the private key line on `input`, followed by
/// the fixed public exponent
pub fn execute<I: BufRead, O: Write>(config: &Config, input: &mut I, output: &mut O) -> Result<()> {
    let modulus = read_modulus_token(input, config.max_token_len)
        .context("reading private key from stdin")?;
    write_line(output, &public_key_line(&modulus))?;
    Ok(())
}
