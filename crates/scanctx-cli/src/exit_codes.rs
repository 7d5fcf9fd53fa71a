//! Exit codes for `scanctx`. Part of the CLI contract.

pub const SUCCESS: i32 = 0;
pub const VERIFY_FAILED: i32 = 1; // Graph failed structural verification, or nothing matched
pub const CONFIG_ERROR: i32 = 2; // Unreadable input, bad JSON, bad arguments
