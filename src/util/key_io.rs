// Key I/O
// Reads key lines from a pipe and writes result lines

use std::io::{BufRead, ErrorKind, Write};

use crate::error::{Result, RsaError};
use crate::rsa::codec::{decode, Radix};
use crate::rsa::keygen::RsaKey;

/// Pull one byte out of the reader's buffer; None at end of input
fn next_byte<R: BufRead>(reader: &mut R) -> Result<Option<u8>> {
    loop {
        let byte = match reader.fill_buf() {
            Ok(buf) => buf.first().copied(),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        if byte.is_some() {
            reader.consume(1);
        }
        return Ok(byte);
    }
}

fn token_text(token: Vec<u8>) -> Result<String> {
    String::from_utf8(token)
        .map_err(|_| RsaError::MalformedKey("key token is not valid UTF-8".to_string()))
}

/// Next whitespace-delimited token, or None once input is exhausted.
/// Never buffers more than `max_len` bytes.
fn next_token<R: BufRead>(reader: &mut R, max_len: usize) -> Result<Option<String>> {
    let mut token = Vec::new();
    while let Some(byte) = next_byte(reader)? {
        if byte.is_ascii_whitespace() {
            if token.is_empty() {
                continue;
            }
            break;
        }
        if token.len() == max_len {
            return Err(RsaError::TokenTooLong { max: max_len });
        }
        token.push(byte);
    }

    if token.is_empty() {
        return Ok(None);
    }
    token_text(token).map(Some)
}

/// Read `<n> <exponent>` from the first two whitespace-separated tokens of
/// `reader`. Tokens longer than `max_token_len` are rejected, not truncated,
/// and nothing after the second token is read.
pub fn read_key<R: BufRead>(reader: &mut R, max_token_len: usize) -> Result<RsaKey> {
    let n = next_token(reader, max_token_len)?;
    let exponent = match n {
        Some(_) => next_token(reader, max_token_len)?,
        None => None,
    };

    let (Some(n), Some(exponent)) = (n, exponent) else {
        return Err(RsaError::MalformedKey(
            "expected \"<modulus> <exponent>\" on stdin".to_string(),
        ));
    };

    RsaKey::from_tokens(&n, &exponent)
}

/// Return the bytes of the first line of `reader` before its first space,
/// i.e. the modulus token of a key line, unchanged.
pub fn read_modulus_token<R: BufRead>(reader: &mut R, max_token_len: usize) -> Result<String> {
    let mut token = Vec::new();
    loop {
        match next_byte(reader)? {
            Some(b' ') => break,
            Some(b'\n') | None => {
                return Err(RsaError::MalformedKey(
                    "expected a private key line \"<modulus> <exponent>\" on stdin".to_string(),
                ))
            }
            Some(_) if token.len() == max_token_len => {
                return Err(RsaError::TokenTooLong { max: max_token_len })
            }
            Some(byte) => token.push(byte),
        }
    }

    let modulus = token_text(token)?;
    // Reject rather than echo garbage
    decode(&modulus, Radix::Base62)?;

    Ok(modulus)
}

/// Write one newline-terminated line
pub fn write_line<W: Write>(writer: &mut W, line: &str) -> Result<()> {
    writeln!(writer, "{}", line)?;
    Ok(())
}
