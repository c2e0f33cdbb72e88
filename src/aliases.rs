// src/aliases.rs
//! Secret types
//!
//! Everything read from the credentials store is wrapped here and zeroed
//! when dropped.

use zeroize::Zeroizing;

/// One salt value (salt1..salt4) of a key
pub type Salt = Zeroizing<String>;

/// SQLCipher key for the key database
pub type DbPassphrase = Zeroizing<String>;
