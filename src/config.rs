// Runtime Configuration
// Tunables shared by the command router and the key generator

/// Miller-Rabin rounds; a composite survives with probability <= 4^-40.
pub const DEFAULT_MR_ROUNDS: u32 = 40;

/// ceil(8192 / log2(62)): longest base-62 token for an 8192-bit integer.
pub const DEFAULT_MAX_TOKEN_LEN: usize = 1376;

/// Largest bit length any `gen` command accepts; keys beyond it would not
/// fit in `DEFAULT_MAX_TOKEN_LEN` base-62 symbols.
pub const MAX_BITS: u64 = 8192;

/// Configuration for key generation and key parsing
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub mr_rounds: u32,
    pub max_token_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mr_rounds: DEFAULT_MR_ROUNDS,
            max_token_len: DEFAULT_MAX_TOKEN_LEN,
        }
    }
}

impl Config {
    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.mr_rounds = rounds;
        self
    }

    pub fn with_max_token_len(mut self, len: usize) -> Self {
        self.max_token_len = len;
        self
    }
}
