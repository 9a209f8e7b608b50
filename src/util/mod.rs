// Utility Module
// Stdin/stdout plumbing for key lines

pub mod key_io;

pub use key_io::{read_key, read_modulus_token, write_line};
