//! Process exit codes (BSD sysexits.h compatible)

/// Successful termination
pub const OK: i32 = 0;

/// Command line usage error
pub const USAGE: i32 = 64;

/// Unexpected shape of cluster data
pub const DATAERR: i32 = 65;

/// Cannot open input (missing script)
pub const NOINPUT: i32 = 66;

/// External tool unavailable or failed
pub const UNAVAILABLE: i32 = 69;

/// Internal software error
pub const SOFTWARE: i32 = 70;

/// Configuration error
pub const CONFIG: i32 = 78;
