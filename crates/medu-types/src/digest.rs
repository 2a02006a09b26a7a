use std::fmt;

use serde::{Deserialize, Serialize};

use crate::entry::ContentEntry;
use crate::error::TypeError;

/// Domain tag prepended to every entry digest.
const ENTRY_DOMAIN: &str = "medu-entry-v1";

/// BLAKE3 digest of an entry's canonical JSON form.
///
/// Two entries with the same digest are field-for-field identical after
/// normalization. Used to detect republishes that change content without
/// bumping `version`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContentDigest([u8; 32]);

impl ContentDigest {
    /// Digest an entry.
    pub fn of_entry(entry: &ContentEntry) -> Result<Self, TypeError> {
        let data =
            serde_json::to_vec(entry).map_err(|e| TypeError::Serialization(e.to_string()))?;
        Ok(Self::of_bytes(&data))
    }

    /// Digest raw bytes under the entry domain.
    pub fn of_bytes(data: &[u8]) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(ENTRY_DOMAIN.as_bytes());
        hasher.update(b":");
        hasher.update(data);
        Self(*hasher.finalize().as_bytes())
    }
}

impl fmt::Debug for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentDigest({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}
