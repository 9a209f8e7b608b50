// Numeral Codec
// Text encodings for keys and messages: base-62, hexadecimal and decimal

use num_traits::Zero;

use super::bigint::RsaBigInt;
use crate::error::{Result, RsaError};

/// Symbol table for base 62. Keys generated by earlier releases depend on
/// this exact order.
pub const BASE62_ALPHABET: &[u8; 62] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Supported numeral systems
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Radix {
    Decimal,
    Hex,
    Base62,
}

impl Radix {
    pub fn value(&self) -> u32 {
        match self {
            Radix::Decimal => 10,
            Radix::Hex => 16,
            Radix::Base62 => 62,
        }
    }

    /// Digit value of one symbol, or None if it is outside this radix.
    /// Hex accepts both letter cases.
    fn digit(&self, symbol: u8) -> Option<u8> {
        let digit = match self {
            Radix::Base62 => match symbol {
                b'0'..=b'9' => symbol - b'0',
                b'A'..=b'Z' => symbol - b'A' + 10,
                b'a'..=b'z' => symbol - b'a' + 36,
                _ => return None,
            },
            Radix::Hex | Radix::Decimal => match symbol {
                b'0'..=b'9' => symbol - b'0',
                b'a'..=b'z' => symbol - b'a' + 10,
                b'A'..=b'Z' => symbol - b'A' + 10,
                _ => return None,
            },
        };
        (u32::from(digit) < self.value()).then_some(digit)
    }
}

impl TryFrom<u32> for Radix {
    type Error = RsaError;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            10 => Ok(Radix::Decimal),
            16 => Ok(Radix::Hex),
            62 => Ok(Radix::Base62),
            other => Err(RsaError::UnsupportedRadix(other)),
        }
    }
}

/// Encode a non-negative integer. Hex output is lowercase without leading
/// zeros; zero encodes as "0" in every radix.
pub fn encode(value: &RsaBigInt, radix: Radix) -> String {
    match radix {
        Radix::Decimal | Radix::Hex => value.to_str_radix(radix.value()),
        Radix::Base62 => value
            .to_radix_be(62)
            .into_iter()
            .map(|digit| BASE62_ALPHABET[digit as usize] as char)
            .collect(),
    }
}

/// Decode a numeral, rejecting any symbol outside the radix's alphabet
pub fn decode(input: &str, radix: Radix) -> Result<RsaBigInt> {
    if input.is_empty() {
        return Err(RsaError::EmptyNumeral);
    }

    let mut digits = Vec::with_capacity(input.len());
    for symbol in input.chars() {
        let digit = u8::try_from(symbol)
            .ok()
            .and_then(|byte| radix.digit(byte))
            .ok_or_else(|| RsaError::InvalidDigit {
                radix: radix.value(),
                symbol,
                input: input.to_string(),
            })?;
        digits.push(digit);
    }

    // Every digit was range-checked above
    Ok(RsaBigInt::from_radix_be(&digits, radix.value()).unwrap_or_else(RsaBigInt::zero))
}
