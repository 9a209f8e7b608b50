//! Textbook RSA primitives exposed as pipeable shell commands.
//!
//! Keys travel between invocations as single text lines of base-62 tokens:
//! `rsakit gen pair 2048` prints a private and a public key line, and the
//! transform commands read one of them back from stdin.

pub mod cli;
pub mod config;
pub mod error;
pub mod rsa;
pub mod util;
