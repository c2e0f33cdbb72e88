// src/consts.rs
//! Shared constants: salt slots, security parameters and defaults

/// Symbolic salt slot names and the numeric slot each one stands for.
/// Any slot id not listed here is used as given.
pub static SALT_SLOTS: [(&str, u32); 4] = [("id", 1), ("demog", 2), ("clinical", 3), ("rawdata", 4)];

/// Slots every configured key must carry: pseudonymisation and demographic encryption
pub const MANDATORY_SALT_SLOTS: [u32; 2] = [1, 2];

/// Slots a key may carry: clinical and rawtext encryption
pub const OPTIONAL_SALT_SLOTS: [u32; 2] = [3, 4];

/// Prefix of every salt entry in the credentials store (`salt1`, `salt2`, ...)
pub const SALT_ENTRY_PREFIX: &str = "salt";

/// Recommended KDF iterations for SQLCipher databases (2025+)
pub const DB_KDF_ITERATIONS: u32 = 256_000;

/// Export manifest format tag
pub const EXPORT_FORMAT: &str = "pseudokey-vault-manifest-v1";
