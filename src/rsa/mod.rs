// RSA Module - Main module file
// Exports all RSA-related functionality

pub mod bigint;
pub mod codec;
pub mod keygen;
pub mod prime;
pub mod transform;

pub use codec::{decode, encode, Radix};
pub use keygen::{
    generate_keypair, public_key_line, RsaKey, RsaKeyPair, PUBLIC_EXPONENT, PUBLIC_EXPONENT_B62,
};
pub use prime::{PrimeGenerator, PrimeWindow};
pub use transform::{transform, Operation};
