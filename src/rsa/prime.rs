// RSA Prime Generation
// Rejection sampling of primes with exact bit lengths
//
// Two primes of k bits multiply to either 2k-1 or 2k bits. To hit a requested
// modulus length exactly, each factor is drawn from a narrowed window:
//
//   even modulus (k = bits/2):      floor(p/3) has k-1 bits  =>  p >= 3*2^(k-2)
//                                   p*q >= (9/16)*2^2k > 2^(bits-1)
//   odd modulus  (k = (bits+1)/2):  3p has k+1 bits          =>  p < (2/3)*2^k
//                                   p*q < (4/9)*2^2k < 2^bits

use rand::RngCore;
use tracing::debug;

use super::bigint::{bit_length, is_probable_prime, random_bits, RsaBigInt};
use crate::config::MAX_BITS;
use crate::error::{Result, RsaError};

/// Smallest bit length `gen prime` accepts (2 and 3 are the 2-bit primes)
pub const MIN_PRIME_BITS: u64 = 2;

/// Acceptance window applied on top of the exact-bit-length check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimeWindow {
    /// Any prime of the requested length
    Full,
    /// Factor of an even-length modulus: floor(p/3) must have one bit fewer than p
    EvenModulus,
    /// Factor of an odd-length modulus: 3p must have exactly one bit more than p
    OddModulus,
}

impl PrimeWindow {
    /// Factor length and window for a modulus of `modulus_bits` bits
    pub fn for_modulus(modulus_bits: u64) -> (u64, PrimeWindow) {
        if modulus_bits % 2 == 0 {
            (modulus_bits / 2, PrimeWindow::EvenModulus)
        } else {
            ((modulus_bits + 1) / 2, PrimeWindow::OddModulus)
        }
    }

    /// Bit-length conditions for a candidate meant to have `bits` bits
    pub fn admits(&self, candidate: &RsaBigInt, bits: u64) -> bool {
        if bit_length(candidate) != bits {
            return false;
        }
        match self {
            PrimeWindow::Full => true,
            PrimeWindow::EvenModulus => bit_length(&(candidate / 3u8)) + 1 == bits,
            PrimeWindow::OddModulus => bit_length(&(candidate * 3u8)) == bits + 1,
        }
    }
}

/// Draws primes from a random bit supplier
pub struct PrimeGenerator<'a, R: RngCore + ?Sized> {
    rng: &'a mut R,
    rounds: u32,
}

impl<'a, R: RngCore + ?Sized> PrimeGenerator<'a, R> {
    pub fn new(rng: &'a mut R, rounds: u32) -> Self {
        Self { rng, rounds }
    }

    /// Generate a random prime of exactly `bits` bits
    pub fn prime(&mut self, bits: u64) -> Result<RsaBigInt> {
        if bits < MIN_PRIME_BITS {
            return Err(RsaError::BitLengthTooSmall {
                bits,
                min: MIN_PRIME_BITS,
            });
        }
        if bits > MAX_BITS {
            return Err(RsaError::BitLengthTooLarge {
                bits,
                max: MAX_BITS,
            });
        }
        self.prime_in(bits, PrimeWindow::Full)
    }

    /// Resample until a candidate satisfies the window and passes
    /// Miller-Rabin. Unbounded; callers must make sure the window holds
    /// at least one prime.
    pub fn prime_in(&mut self, bits: u64, window: PrimeWindow) -> Result<RsaBigInt> {
        let mut candidates = 0u64;
        loop {
            candidates += 1;
            let candidate = random_bits(&mut *self.rng, bits)?;
            if !window.admits(&candidate, bits) {
                continue;
            }
            if is_probable_prime(&candidate, self.rounds, &mut *self.rng)? {
                debug!(bits, ?window, candidates, "prime found");
                return Ok(candidate);
            }
        }
    }
}
