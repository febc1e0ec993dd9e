use xxhash_rust::xxh3::xxh3_64;

/// Stylepack needs to use a hasher for generating content hashes used in output names.
///
/// The hashes don't need to be incredibly fast, but they should be stable across
/// runs, machines, platforms and versions.
pub fn hash_bytes(s: &[u8]) -> String {
  let res = xxh3_64(s);
  format!("{:016x}", res)
}

/// The short form substituted for `[hash]` in output names
pub fn content_hash(s: &[u8]) -> String {
  hash_bytes(s)[..8].to_uppercase()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn hashes_are_stable() {
    assert_eq!(hash_bytes(b"body{}"), hash_bytes(b"body{}"));
    assert_ne!(hash_bytes(b"body{}"), hash_bytes(b"div{}"));
    assert_eq!(hash_bytes(b"").len(), 16);
  }

  #[test]
  fn content_hash_is_a_short_uppercase_prefix() {
    let hash = content_hash(b"logo");

    assert_eq!(hash.len(), 8);
    assert_eq!(hash, hash_bytes(b"logo")[..8].to_uppercase());
  }
}
