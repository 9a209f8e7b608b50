use std::io::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;
use rand::RngCore;

use crate::config::{Config, MAX_BITS};
use crate::error::RsaError;
use crate::rsa::bigint::{random_bits, random_exact_bits};
use crate::rsa::keygen::MIN_MODULUS_BITS;
use crate::rsa::prime::MIN_PRIME_BITS;
use crate::rsa::{encode, generate_keypair, PrimeGenerator, Radix};
use crate::util::write_line;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GenKind {
    /// Random number, printed in decimal
    Random,
    /// Random key material, printed in base 62
    Key,
    /// Random prime, printed in decimal
    Prime,
    /// Private key line `<n> <d>`
    Private,
    /// Private key line followed by the public key line
    Pair,
}

const MIN_RANDOM_BITS: u64 = 1;

fn require_bits(bits: u64, min: u64) -> Result<()> {
    if bits < min {
        return Err(RsaError::BitLengthTooSmall { bits, min }.into());
    }
    if bits > MAX_BITS {
        return Err(RsaError::BitLengthTooLarge {
            bits,
            max: MAX_BITS,
        }
        .into());
    }
    Ok(())
}

pub fn execute<R, O>(
    kind: GenKind,
    bits: u64,
    config: &Config,
    rng: &mut R,
    output: &mut O,
) -> Result<()>
where
    R: RngCore + ?Sized,
    O: Write,
{
    match kind {
        GenKind::Random => {
            require_bits(bits, MIN_RANDOM_BITS)?;
            let mut value = random_bits(rng, bits)?;
            // Top bit set: exactly `bits` bits, not "at most"
            value.set_bit(bits - 1, true);
            write_line(output, &encode(&value, Radix::Decimal))?;
        }
        GenKind::Key => {
            require_bits(bits, MIN_RANDOM_BITS)?;
            let value = random_exact_bits(rng, bits)?;
            write_line(output, &encode(&value, Radix::Base62))?;
        }
        GenKind::Prime => {
            require_bits(bits, MIN_PRIME_BITS)?;
            let prime = PrimeGenerator::new(rng, config.mr_rounds).prime(bits)?;
            write_line(output, &encode(&prime, Radix::Decimal))?;
        }
        GenKind::Private => {
            require_bits(bits, MIN_MODULUS_BITS)?;
            let keypair = generate_keypair(rng, bits, config.mr_rounds)
                .context("generating private key")?;
            write_line(output, &keypair.private_key.to_string())?;
        }
        GenKind::Pair => {
            require_bits(bits, MIN_MODULUS_BITS)?;
            let keypair = generate_keypair(rng, bits, config.mr_rounds)
                .context("generating key pair")?;
            output
                .write_all(keypair.to_lines().as_bytes())
                .map_err(RsaError::from)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::bigint::bit_length;
    use crate::rsa::decode;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn generate_output(kind: GenKind, bits: u64, seed: u64) -> Result<String> {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut out = Vec::new();
        execute(kind, bits, &Config::default(), &mut rng, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_random_has_exact_length() {
        for seed in 0..50 {
            let text = generate_output(GenKind::Random, 13, seed).unwrap();
            let value = decode(text.trim_end(), Radix::Decimal).unwrap();
            assert_eq!(bit_length(&value), 13);
        }
        assert_eq!(generate_output(GenKind::Random, 1, 0).unwrap(), "1\n");
    }

    #[test]
    fn test_key_is_base62() {
        let text = generate_output(GenKind::Key, 256, 1).unwrap();
        assert!(text.ends_with('\n'));
        let value = decode(text.trim_end(), Radix::Base62).unwrap();
        assert_eq!(bit_length(&value), 256);
    }

    #[test]
    fn test_private_is_single_line() {
        let text = generate_output(GenKind::Private, 64, 2).unwrap();
        assert_eq!(text.lines().count(), 1);
        let tokens: Vec<&str> = text.trim_end().split(' ').collect();
        assert_eq!(tokens.len(), 2);
        let n = decode(tokens[0], Radix::Base62).unwrap();
        assert_eq!(bit_length(&n), 64);
    }

    #[test]
    fn test_zero_bits_rejected() {
        for kind in [GenKind::Random, GenKind::Key, GenKind::Prime, GenKind::Private] {
            let err = generate_output(kind, 0, 0).unwrap_err();
            assert!(matches!(
                err.downcast_ref::<RsaError>(),
                Some(RsaError::BitLengthTooSmall { bits: 0, .. })
            ));
        }
    }

    #[test]
    fn test_oversized_bits_rejected_before_allocating() {
        let kinds = [
            GenKind::Random,
            GenKind::Key,
            GenKind::Prime,
            GenKind::Private,
            GenKind::Pair,
        ];
        for kind in kinds {
            for bits in [MAX_BITS + 1, u64::MAX] {
                let err = generate_output(kind, bits, 0).unwrap_err();
                assert!(matches!(
                    err.downcast_ref::<RsaError>(),
                    Some(RsaError::BitLengthTooLarge { max: 8192, .. })
                ));
                assert!(!crate::cli::is_fatal(&err));
            }
        }
    }

    #[test]
    fn test_max_bits_accepted() {
        let text = generate_output(GenKind::Random, MAX_BITS, 3).unwrap();
        let value = decode(text.trim_end(), Radix::Decimal).unwrap();
        assert_eq!(bit_length(&value), MAX_BITS);
    }
}
