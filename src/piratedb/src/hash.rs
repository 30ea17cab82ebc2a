//! FNV-1a hashing for localization key ids

/// FNV-1a 64-bit offset basis
pub const FNV1A_OFFSET_BASIS: u64 = 0xcbf29ce484222325;

/// FNV-1a 64-bit prime
pub const FNV1A_PRIME: u64 = 0x100000001b3;

/// Compute FNV-1a 64-bit hash of a byte slice
pub fn fnv1a_hash(data: &[u8]) -> u64 {
    let mut hash = FNV1A_OFFSET_BASIS;
    for &byte in data {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(FNV1A_PRIME);
    }
    hash
}

/// FNV-1a hash shifted down to 63 bits so it fits a signed SQLite integer
///
/// # Example
///
/// ```
/// use piratedb::hash::lang_id;
///
/// assert!(lang_id("Pets_Snack_Name") >= 0);
/// ```
pub fn lang_id(key: &str) -> i64 {
    (fnv1a_hash(key.as_bytes()) >> 1) as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fnv1a_empty() {
        assert_eq!(fnv1a_hash(b""), FNV1A_OFFSET_BASIS);
    }

    #[test]
    fn test_fnv1a_known_vector() {
        // Published FNV-1a 64 test vector for "a"
        assert_eq!(fnv1a_hash(b"a"), 0xaf63dc4c8601ec8c);
    }

    #[test]
    fn test_lang_id_is_non_negative_and_stable() {
        let a = lang_id("Items_Sword_Name");
        assert_eq!(a, lang_id("Items_Sword_Name"));
        assert!(a >= 0);
        assert_ne!(a, lang_id("Items_Shield_Name"));
        assert_eq!(lang_id("a"), (0xaf63dc4c8601ec8c_u64 >> 1) as i64);
    }
}
