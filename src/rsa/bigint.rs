// RSA Big Integer Operations
// Wrapper around num-bigint for RSA-specific operations

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::RngCore;

use crate::error::{Result, RsaError};

/// RSA Big Integer type alias
pub type RsaBigInt = BigUint;

/// Primes below 100, used to settle small inputs and cheaply reject
/// most composites before Miller-Rabin.
const SMALL_PRIMES: [u32; 25] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97,
];

/// Create a big integer from u64
pub fn from_u64(n: u64) -> RsaBigInt {
    RsaBigInt::from(n)
}

/// Create a big integer from bytes (big-endian)
pub fn from_bytes(bytes: &[u8]) -> RsaBigInt {
    RsaBigInt::from_bytes_be(bytes)
}

/// Number of significant bits; zero has length 0
pub fn bit_length(n: &RsaBigInt) -> u64 {
    n.bits()
}

/// Draw a random integer of at most `bits` bits.
///
/// ceil(bits/8) bytes are imported big-endian and the surplus low-order
/// bits shifted out, so the result is uniform in [0, 2^bits).
pub fn random_bits<R: RngCore + ?Sized>(rng: &mut R, bits: u64) -> Result<RsaBigInt> {
    if bits == 0 {
        return Ok(RsaBigInt::zero());
    }

    let bytes = bits.div_ceil(8) as usize;
    let mut buf = vec![0u8; bytes];
    rng.try_fill_bytes(&mut buf)?;

    let surplus = bytes * 8 - bits as usize;
    Ok(from_bytes(&buf) >> surplus)
}

/// Resample until the value has exactly `bits` bits
pub fn random_exact_bits<R: RngCore + ?Sized>(rng: &mut R, bits: u64) -> Result<RsaBigInt> {
    loop {
        let candidate = random_bits(rng, bits)?;
        if bit_length(&candidate) == bits {
            return Ok(candidate);
        }
    }
}

/// Uniform random integer in [0, bound). `bound` must be non-zero.
pub fn random_below<R: RngCore + ?Sized>(rng: &mut R, bound: &RsaBigInt) -> Result<RsaBigInt> {
    let bits = bit_length(bound);
    loop {
        let candidate = random_bits(rng, bits)?;
        if &candidate < bound {
            return Ok(candidate);
        }
    }
}

/// Modular exponentiation: base^exp mod modulus
///
/// Montgomery ladder over a fixed number of bits (the wider of exponent and
/// modulus). Every bit costs exactly one multiplication and one squaring,
/// whatever its value, so the operation count does not depend on the
/// exponent's bit pattern. The limb arithmetic underneath is num-bigint's
/// and is not itself constant-time.
pub fn mod_pow_sec(
    base: &RsaBigInt,
    exp: &RsaBigInt,
    modulus: &RsaBigInt,
) -> Result<RsaBigInt> {
    if modulus.is_zero() {
        return Err(RsaError::ZeroModulus);
    }
    if modulus.is_one() {
        return Ok(RsaBigInt::zero());
    }

    let width = bit_length(exp).max(bit_length(modulus));

    // Invariant: r1 = r0 * base (mod modulus)
    let mut r0 = RsaBigInt::one();
    let mut r1 = base % modulus;

    for i in (0..width).rev() {
        let (low, high) = if exp.bit(i) {
            (&mut r1, &mut r0)
        } else {
            (&mut r0, &mut r1)
        };
        *high = (&*low * &*high) % modulus;
        *low = (&*low * &*low) % modulus;
    }

    Ok(r0)
}

/// Extended Euclidean Algorithm
/// Returns (gcd, x, y) such that a*x + b*y = gcd = gcd(a, b)
fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_x, mut x) = (BigInt::one(), BigInt::zero());
    let (mut old_y, mut y) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let quotient = &old_r / &r;

        let next_r = &old_r - &quotient * &r;
        old_r = std::mem::replace(&mut r, next_r);

        let next_x = &old_x - &quotient * &x;
        old_x = std::mem::replace(&mut x, next_x);

        let next_y = &old_y - &quotient * &y;
        old_y = std::mem::replace(&mut y, next_y);
    }

    (old_r, old_x, old_y)
}

/// Compute modular inverse: a^(-1) mod m
/// Returns None if inverse doesn't exist
pub fn mod_inverse(a: &RsaBigInt, m: &RsaBigInt) -> Option<RsaBigInt> {
    if m.is_zero() {
        return None;
    }

    let modulus = BigInt::from(m.clone());
    let (gcd, x, _) = extended_gcd(&BigInt::from(a.clone()), &modulus);

    if !gcd.is_one() {
        return None;
    }

    x.mod_floor(&modulus).to_biguint()
}

/// Miller-Rabin primality test
/// Returns true if n is probably prime
///
/// Witnesses come from `rng`, so an entropy failure is reported rather
/// than silently weakening the test.
pub fn is_probable_prime<R: RngCore + ?Sized>(
    n: &RsaBigInt,
    rounds: u32,
    rng: &mut R,
) -> Result<bool> {
    if n < &from_u64(2) {
        return Ok(false);
    }

    for p in SMALL_PRIMES {
        if n == &from_u64(p as u64) {
            return Ok(true);
        }
        if (n % p).is_zero() {
            return Ok(false);
        }
    }

    // Write n-1 as d * 2^s with d odd
    let n_minus_one = n - 1u8;
    let mut d = n_minus_one.clone();
    let mut s = 0u32;
    while d.is_even() {
        d >>= 1;
        s += 1;
    }

    // Witnesses are drawn from [2, n-2]
    let witness_span = n - 3u8;

    for _ in 0..rounds {
        let a = random_below(rng, &witness_span)? + 2u8;
        let mut x = a.modpow(&d, n);

        if x.is_one() || x == n_minus_one {
            continue;
        }

        let mut composite = true;
        for _ in 1..s {
            x = (&x * &x) % n;
            if x == n_minus_one {
                composite = false;
                break;
            }
        }

        if composite {
            return Ok(false);
        }
    }

    // Probably prime
    Ok(true)
}

/// Least common multiple
pub fn lcm(a: &RsaBigInt, b: &RsaBigInt) -> RsaBigInt {
    a.lcm(b)
}
