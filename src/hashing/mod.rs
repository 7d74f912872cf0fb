use blake3::Hasher;

use crate::labels::IssueCategory;

/// Returns at most `prefix_len` leading bytes of an encoded image.
#[inline]
pub fn image_prefix(image: &str, prefix_len: usize) -> &[u8] {
    let bytes = image.as_bytes();
    &bytes[..bytes.len().min(prefix_len)]
}

/// Cache fingerprint for a verification request.
///
/// Hashes the category, the description, the full encoded length, and a bounded prefix of
/// the encoded image with BLAKE3. Hashing only a prefix keeps the key cheap for multi-megabyte
/// data URLs.
///
/// # Collision Tolerance
///
/// Two distinct images with the same encoded length and an identical leading `prefix_len`
/// bytes share a key. Encoders put headers (and for JPEG, EXIF blocks) first, so callers
/// expecting adversarial input should raise `prefix_len` or pass `usize::MAX` to hash the
/// whole payload.
#[inline]
pub fn fingerprint_request(
    category: IssueCategory,
    description: &str,
    image: &str,
    prefix_len: usize,
) -> [u8; 32] {
    let mut hasher = Hasher::new();
    hasher.update(category.as_str().as_bytes());
    hasher.update(b"|");
    hasher.update(&(description.len() as u64).to_le_bytes());
    hasher.update(description.as_bytes());
    hasher.update(&(image.len() as u64).to_le_bytes());
    hasher.update(image_prefix(image, prefix_len));
    *hasher.finalize().as_bytes()
}
