use reqauth_core::hash::base64_sha256;

use crate::constants::HAWK_PAYLOAD_VERSION;

/// Compute the hawk payload hash of a body and its declared content type.
///
/// ## Format
///
/// ```text
/// base64(sha256(
///     "hawk.1.payload" + "\n" +
///     mime type without parameters + "\n" +
///     body + "\n"
/// ))
/// ```
pub fn payload_hash(content_type: &str, body: &[u8]) -> String {
    let mime_type = content_type
        .split_once(';')
        .map_or(content_type, |(mime, _)| mime)
        .trim();

    let mut buf =
        Vec::with_capacity(HAWK_PAYLOAD_VERSION.len() + mime_type.len() + body.len() + 3);
    buf.extend_from_slice(HAWK_PAYLOAD_VERSION.as_bytes());
    buf.push(b'\n');
    buf.extend_from_slice(mime_type.as_bytes());
    buf.push(b'\n');
    buf.extend_from_slice(body);
    buf.push(b'\n');

    base64_sha256(&buf)
}
