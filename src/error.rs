// RSA Toolkit Errors
// Error type shared by the arithmetic, codec and stdin plumbing

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RsaError {
    #[error("entropy source unavailable")]
    Entropy(#[from] rand::Error),

    #[error("invalid base-{radix} symbol '{symbol}' in \"{input}\"")]
    InvalidDigit {
        radix: u32,
        symbol: char,
        input: String,
    },

    #[error("empty numeral")]
    EmptyNumeral,

    #[error("unsupported radix {0}")]
    UnsupportedRadix(u32),

    #[error("{value} has no inverse modulo {modulus}")]
    NoInverse { value: String, modulus: String },

    #[error("modulus must be non-zero")]
    ZeroModulus,

    #[error("bit length {bits} is below the minimum of {min}")]
    BitLengthTooSmall { bits: u64, min: u64 },

    #[error("bit length {bits} exceeds the maximum of {max}")]
    BitLengthTooLarge { bits: u64, max: u64 },

    #[error("malformed key: {0}")]
    MalformedKey(String),

    #[error("token exceeds {max} characters")]
    TokenTooLong { max: usize },

    #[error("IO error")]
    Io(#[from] std::io::Error),
}

impl RsaError {
    /// Internal failures that abort the process instead of being reported
    /// as a bad-input message.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RsaError::Entropy(_) | RsaError::NoInverse { .. } | RsaError::Io(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, RsaError>;
