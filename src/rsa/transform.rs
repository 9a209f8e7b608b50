// RSA Transform
// Textbook RSA: one modular exponentiation behind encrypt, decrypt, sign
// and verify. No padding is applied.

use tracing::{debug, warn};

use super::bigint::{mod_pow_sec, RsaBigInt};
use super::codec::{decode, encode, Radix};
use super::keygen::RsaKey;
use crate::error::Result;

/// The four commands differ only in the numeral systems on either side.
/// Which exponent the caller supplied is not checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Encrypt,
    Decrypt,
    Sign,
    Verify,
}

impl Operation {
    /// Radix of the message argument
    pub fn radix_in(&self) -> Radix {
        match self {
            Operation::Encrypt | Operation::Decrypt | Operation::Verify => Radix::Base62,
            Operation::Sign => Radix::Hex,
        }
    }

    /// Radix of the printed result
    pub fn radix_out(&self) -> Radix {
        match self {
            Operation::Encrypt | Operation::Decrypt | Operation::Sign => Radix::Base62,
            Operation::Verify => Radix::Hex,
        }
    }
}

/// Compute value^exponent mod n under `key`
pub fn apply(value: &RsaBigInt, key: &RsaKey) -> Result<RsaBigInt> {
    if value >= &key.n {
        warn!(
            modulus_bits = key.bit_length(),
            "message is not below the modulus and will not round-trip"
        );
    }
    mod_pow_sec(value, &key.exponent, &key.n)
}

/// Decode `message`, transform it under `key` and encode the result
pub fn transform(message: &str, key: &RsaKey, operation: Operation) -> Result<String> {
    let value = decode(message, operation.radix_in())?;
    let result = apply(&value, key)?;
    debug!(?operation, modulus_bits = key.bit_length(), "transformed message");
    Ok(encode(&result, operation.radix_out()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RsaError;
    use crate::rsa::bigint::{from_u64, random_below};
    use crate::rsa::keygen::generate_keypair;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // n = 61 * 53, e = 17, d = 2753
    fn toy_keys() -> (RsaKey, RsaKey) {
        (
            RsaKey::new(from_u64(3233), from_u64(17)),
            RsaKey::new(from_u64(3233), from_u64(2753)),
        )
    }

    #[test]
    fn test_apply_known_vector() {
        let (public, private) = toy_keys();
        let c = apply(&from_u64(65), &public).unwrap();
        assert_eq!(c, from_u64(2790));
        assert_eq!(apply(&c, &private).unwrap(), from_u64(65));
    }

    #[test]
    fn test_encrypt_decrypt_strings() {
        let (public, private) = toy_keys();
        // 65 = "13", 2790 = "j0" in base 62
        assert_eq!(transform("13", &public, Operation::Encrypt).unwrap(), "j0");
        assert_eq!(transform("j0", &private, Operation::Decrypt).unwrap(), "13");
    }

    #[test]
    fn test_sign_verify_strings() {
        let (public, private) = toy_keys();
        // 0x41 = 65, 65^2753 mod 3233 = 588 = "9U"
        let signature = transform("41", &private, Operation::Sign).unwrap();
        assert_eq!(signature, "9U");
        assert_eq!(transform(&signature, &public, Operation::Verify).unwrap(), "41");
    }

    #[test]
    fn test_radix_table() {
        assert_eq!(Operation::Encrypt.radix_in(), Radix::Base62);
        assert_eq!(Operation::Encrypt.radix_out(), Radix::Base62);
        assert_eq!(Operation::Decrypt.radix_in(), Radix::Base62);
        assert_eq!(Operation::Decrypt.radix_out(), Radix::Base62);
        assert_eq!(Operation::Sign.radix_in(), Radix::Hex);
        assert_eq!(Operation::Sign.radix_out(), Radix::Base62);
        assert_eq!(Operation::Verify.radix_in(), Radix::Base62);
        assert_eq!(Operation::Verify.radix_out(), Radix::Hex);
    }

    #[test]
    fn test_roundtrip_generated_keys() {
        let mut rng = StdRng::seed_from_u64(2024);
        let keypair = generate_keypair(&mut rng, 512, 40).unwrap();
        let public = keypair.public_key();
        let private = &keypair.private_key;

        for _ in 0..10 {
            let m = random_below(&mut rng, &public.n).unwrap();
            let c = apply(&m, &public).unwrap();
            assert_eq!(apply(&c, private).unwrap(), m);

            let s = apply(&m, private).unwrap();
            assert_eq!(apply(&s, &public).unwrap(), m);
        }
    }

    #[test]
    fn test_sign_verify_digest() {
        let mut rng = StdRng::seed_from_u64(77);
        let keypair = generate_keypair(&mut rng, 384, 40).unwrap();
        let digest = "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08";

        let signature = transform(digest, &keypair.private_key, Operation::Sign).unwrap();
        let recovered = transform(&signature, &keypair.public_key(), Operation::Verify).unwrap();
        assert_eq!(recovered, digest);
    }

    #[test]
    fn test_rejects_bad_message() {
        let (public, _) = toy_keys();
        assert!(matches!(
            transform("xyz!", &public, Operation::Encrypt),
            Err(RsaError::InvalidDigit { symbol: '!', .. })
        ));
        assert!(matches!(
            transform("41g", &public, Operation::Sign),
            Err(RsaError::InvalidDigit { symbol: 'g', .. })
        ));
    }

    #[test]
    fn test_zero_modulus_is_error() {
        let key = RsaKey::new(from_u64(0), from_u64(3));
        assert!(matches!(
            transform("1", &key, Operation::Encrypt),
            Err(RsaError::ZeroModulus)
        ));
    }
}
