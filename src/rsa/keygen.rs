// RSA Key Generation
// Implements RSA key pair generation (public and private keys)

use std::fmt;

use rand::RngCore;
use tracing::info;

use super::bigint::{bit_length, from_u64, lcm, mod_inverse, RsaBigInt};
use super::codec::{decode, encode, Radix};
use super::prime::{PrimeGenerator, PrimeWindow};
use crate::config::MAX_BITS;
use crate::error::{Result, RsaError};

/// Fixed public exponent for every generated key
pub const PUBLIC_EXPONENT: u64 = 65537;

/// `PUBLIC_EXPONENT` in base 62, written verbatim into public key lines
pub const PUBLIC_EXPONENT_B62: &str = "H33";

/// Smallest modulus length for which both prime windows are non-empty
pub const MIN_MODULUS_BITS: u64 = 8;

/// One half of a key pair: modulus and exponent.
///
/// Public and private keys share this shape and the same text form; nothing
/// records which exponent is held.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaKey {
    pub n: RsaBigInt,        // Modulus
    pub exponent: RsaBigInt, // e for a public key, d for a private key
}

impl RsaKey {
    pub fn new(n: RsaBigInt, exponent: RsaBigInt) -> Self {
        Self { n, exponent }
    }

    /// Public key for a modulus
    pub fn public(n: RsaBigInt) -> Self {
        Self::new(n, from_u64(PUBLIC_EXPONENT))
    }

    /// Parse `<n> <exponent>` from two base-62 tokens
    pub fn from_tokens(n: &str, exponent: &str) -> Result<Self> {
        Ok(Self::new(
            decode(n, Radix::Base62)?,
            decode(exponent, Radix::Base62)?,
        ))
    }

    /// Get the bit length of the modulus
    pub fn bit_length(&self) -> u64 {
        bit_length(&self.n)
    }
}

/// Key line: `<n> <exponent>` in base 62
impl fmt::Display for RsaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            encode(&self.n, Radix::Base62),
            encode(&self.exponent, Radix::Base62)
        )
    }
}

/// Public key line for an already-encoded modulus token
pub fn public_key_line(modulus_token: &str) -> String {
    format!("{} {}", modulus_token, PUBLIC_EXPONENT_B62)
}

/// RSA Key Pair (both public and private keys)
#[derive(Debug, Clone)]
pub struct RsaKeyPair {
    pub private_key: RsaKey,
    pub p: RsaBigInt, // First prime factor
    pub q: RsaBigInt, // Second prime factor
    pub bit_length: u64,
}

impl RsaKeyPair {
    /// Public half, always (n, 65537)
    pub fn public_key(&self) -> RsaKey {
        RsaKey::public(self.private_key.n.clone())
    }

    /// Carmichael's function of the modulus: lcm(p-1, q-1)
    pub fn lambda(&self) -> RsaBigInt {
        carmichael(&self.p, &self.q)
    }

    /// Private key line followed by the public key line
    pub fn to_lines(&self) -> String {
        let modulus = encode(&self.private_key.n, Radix::Base62);
        format!(
            "{} {}\n{}\n",
            modulus,
            encode(&self.private_key.exponent, Radix::Base62),
            public_key_line(&modulus)
        )
    }
}

fn carmichael(p: &RsaBigInt, q: &RsaBigInt) -> RsaBigInt {
    lcm(&(p - 1u8), &(q - 1u8))
}

/// Generate an RSA key pair whose modulus has exactly `bit_length` bits.
///
/// Both factors come from the prime window matching the parity of
/// `bit_length`; they are sampled independently and not checked for
/// equality.
pub fn generate_keypair<R: RngCore + ?Sized>(
    rng: &mut R,
    bit_length: u64,
    rounds: u32,
) -> Result<RsaKeyPair> {
    if bit_length < MIN_MODULUS_BITS {
        return Err(RsaError::BitLengthTooSmall {
            bits: bit_length,
            min: MIN_MODULUS_BITS,
        });
    }
    if bit_length > MAX_BITS {
        return Err(RsaError::BitLengthTooLarge {
            bits: bit_length,
            max: MAX_BITS,
        });
    }

    // Step 1: Generate two random primes p and q
    let (prime_bits, window) = PrimeWindow::for_modulus(bit_length);
    let mut primes = PrimeGenerator::new(rng, rounds);
    let p = primes.prime_in(prime_bits, window)?;
    let q = primes.prime_in(prime_bits, window)?;

    // Step 2: Compute n = p * q
    let n = &p * &q;

    // Step 3: Compute λ(n) = lcm(p-1, q-1)
    let lambda = carmichael(&p, &q);

    // Step 4: Compute d = e^(-1) mod λ(n)
    let e = from_u64(PUBLIC_EXPONENT);
    let d = mod_inverse(&e, &lambda).ok_or_else(|| RsaError::NoInverse {
        value: e.to_string(),
        modulus: lambda.to_string(),
    })?;

    info!(bits = bit_length, "generated key pair");

    Ok(RsaKeyPair {
        private_key: RsaKey::new(n, d),
        p,
        q,
        bit_length,
    })
}
