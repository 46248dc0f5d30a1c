//! # Runtime Configuration
//!
//! Environment-driven tuning of the `may` coroutine runtime that serves
//! requests.
//!
//! ## Environment Variables
//!
//! ### `SCOWL_CREATE_STACK_SIZE`
//!
//! Stack size for each request coroutine. Accepts decimal (`65536`) or
//! hexadecimal (`0x10000`). Default: `0x10000` (64 KB).
//!
//! Requests run word list filtering, header rendering and archive
//! compression on the coroutine stack, and wait on builder subprocesses, so
//! the default is larger than a plain routing service would need.
//!
//! ```bash
//! export SCOWL_CREATE_STACK_SIZE=0x20000
//! scowl-create serve --config config/scowl-create.toml
//! ```

use std::env;

/// Environment variable holding the coroutine stack size.
pub const STACK_SIZE_VAR: &str = "SCOWL_CREATE_STACK_SIZE";
/// Stack size used when the variable is absent or unparsable.
pub const DEFAULT_STACK_SIZE: usize = 0x10000;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Stack size for coroutines in bytes.
    pub stack_size: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            stack_size: DEFAULT_STACK_SIZE,
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let stack_size = env::var(STACK_SIZE_VAR)
            .ok()
            .and_then(|val| parse_stack_size(&val))
            .unwrap_or(DEFAULT_STACK_SIZE);
        RuntimeConfig { stack_size }
    }

    /// Apply the stack size to the global `may` configuration.
    pub fn apply(&self) {
        may::config().set_stack_size(self.stack_size);
    }
}

/// Decimal or `0x`-prefixed hexadecimal byte count.
pub fn parse_stack_size(raw: &str) -> Option<usize> {
    let raw = raw.trim();
    match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16).ok(),
        None => raw.parse().ok(),
    }
    .filter(|size| *size > 0)
}
