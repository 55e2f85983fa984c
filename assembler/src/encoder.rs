//! Payload encoding for embedding a binary artifact as source text.
//!
//! The compiled wasm artifact cannot be fetched from a `file://` origin, so
//! it is re-expressed as JavaScript source instead: the bytes are base64
//! encoded, the encoding is split into fixed-size chunks, and each chunk is
//! emitted as a quoted string literal inside an array that is joined back
//! into one string at runtime and assigned to a well-known global.
//!
//! Splitting into chunks keeps every generated line short enough for
//! downstream tooling and keeps the generated block diffable. Chunk order is
//! significant and equals the order of bytes in the artifact.

use core::str;

use base64::Engine;

/// Maximum characters per emitted payload chunk unless overridden.
pub const DEFAULT_CHUNK_SIZE: usize = 100;

/// Global identifier the embedded payload is assigned to.
///
/// The patched loader decodes this global back into raw bytes before
/// instantiating the module, see `crate::patcher`.
pub const PAYLOAD_GLOBAL: &str = "window.GLOBAL_WASM";

/// Encodes the artifact bytes using standard base64.
///
/// The output is pure ASCII, stable, and reversible: decoding it reproduces
/// the artifact byte-for-byte.
///
/// # Arguments
/// * `artifact` - The raw bytes of the compiled artifact.
///
/// # Returns
/// The base64 text of the artifact.
pub fn encode_artifact(artifact: &[u8]) -> String {
    base64::prelude::BASE64_STANDARD.encode(artifact)
}

/// Partitions encoded text into consecutive chunks of at most `chunk_size`
/// characters.
///
/// Every chunk except possibly the last has length exactly `chunk_size`, and
/// concatenating the chunks in order yields the input unchanged. The input is
/// base64 text, so splitting on byte boundaries never lands inside a
/// multi-byte character.
///
/// # Arguments
/// * `encoded` - The base64 text to partition.
/// * `chunk_size` - Maximum characters per chunk, must be non-zero.
///
/// # Returns
/// The chunks in artifact byte order.
pub fn chunk_encoded(encoded: &str, chunk_size: usize) -> Vec<&str> {
    encoded
        .as_bytes()
        .chunks(chunk_size)
        .filter_map(|chunk| str::from_utf8(chunk).ok())
        .collect()
}

/// Builds the module-level assignment statement that reconstructs the
/// artifact bytes at runtime without any network access.
///
/// The emitted block has one quoted chunk per line followed by a line that
/// joins the array into one string and assigns it to [`PAYLOAD_GLOBAL`]:
///
/// ```text
/// window.GLOBAL_WASM = [
///     "AGFzbQEAAAA...",
///     "...",
/// ].join('');
/// ```
///
/// Lines inside the block are joined with CRLF to match the assembled
/// document.
///
/// # Arguments
/// * `artifact` - The raw bytes of the compiled artifact.
/// * `chunk_size` - Maximum characters per emitted chunk.
///
/// # Returns
/// The payload assignment block, or a validation error for a zero chunk
/// size.
pub fn payload_script(artifact: &[u8], chunk_size: usize) -> crate::error::Result<String> {
    if chunk_size == 0 {
        return Err(crate::error::AssemblerError::validation_error(
            "payload chunk size must be at least 1",
        ));
    }

    let encoded = encode_artifact(artifact);
    let mut script_lines = vec![format!("{} = [", PAYLOAD_GLOBAL)];

    for chunk in chunk_encoded(&encoded, chunk_size) {
        script_lines.push(format!("    \"{}\",", chunk));
    }
    script_lines.push("].join('');".to_string());

    log::debug!(
        "Encoded {} artifact bytes into {} payload chunks",
        artifact.len(),
        script_lines.len() - 2
    );

    Ok(script_lines.join("\r\n"))
}
