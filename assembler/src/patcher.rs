//! Loader patching for the generated wasm-bindgen glue.
//!
//! The generated loader resolves the wasm module with a streaming `fetch`,
//! which is unavailable from a `file://` origin. This module rewrites the
//! async initialization routine so the module is instantiated from the
//! embedded payload global instead, while every other declaration, export,
//! and helper in the loader passes through untouched.
//!
//! The rewrite is a single forward scan over the loader lines driven by an
//! explicit two-state machine: in [`ScanState::Passthrough`] lines are
//! emitted verbatim, in [`ScanState::Suppressing`] the original initializer
//! body is dropped because the replacement body has already been emitted in
//! its place. State transitions happen on literal marker matches and are
//! logged at debug level.

/// Literal substring that opens the replaced initializer span.
pub const INIT_FN_MARKER: &str = "async function __wbg_init(";

/// Literal substring of the export line that closes the replaced span.
///
/// The matching line itself is preserved in the output.
pub const END_MARKER: &str = "export { initSync }";

/// Replacement initializer emitted in place of the suppressed span.
///
/// Mirrors the original routine step for step, except the module bytes come
/// from the embedded payload global rather than a fetch: return the handle
/// immediately if initialization already happened, build the same import
/// table, decode the payload text back into raw bytes, instantiate from
/// those bytes, and finalize exactly as the original did.
const REPLACEMENT_INIT: [&str; 8] = [
    "async function __wbg_init(input) {",
    "    if (wasm !== undefined) return wasm;",
    "    const imports = __wbg_get_imports();",
    "    __wbg_init_memory(imports);",
    "    var v = base64ToArrayBuffer(window.GLOBAL_WASM);",
    "    const { instance, module } = await WebAssembly.instantiate(v, imports);",
    "    return __wbg_finalize_init(instance, module);",
    "}",
];

/// Scanner states for the forward pass over the loader source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Lines are emitted unchanged, in original order.
    Passthrough,
    /// Lines belong to the replaced initializer body and are dropped.
    Suppressing,
}

/// Rewrites the loader source so module instantiation reads from the
/// embedded payload global.
///
/// If the initializer marker never appears the scan is a pass-through and
/// the input is returned unchanged apart from line-ending normalization and
/// one trailing empty line. Unbalanced or duplicated markers are reported as
/// patch errors instead of silently dropping source lines.
///
/// # Arguments
/// * `loader_source` - The text of the generated loader file.
///
/// # Returns
/// The patched loader text, CRLF line endings, one trailing empty line.
pub fn patch_loader(loader_source: &str) -> crate::error::Result<String> {
    let mut state = ScanState::Passthrough;
    let mut span_replaced = false;
    let mut patched_lines: Vec<&str> = Vec::new();

    for (index, line) in loader_source.lines().enumerate() {
        match state {
            ScanState::Passthrough if line.contains(INIT_FN_MARKER) => {
                if span_replaced {
                    return Err(crate::error::AssemblerError::patch_error(&format!(
                        "second initializer opened on line {}, expected exactly one",
                        index + 1
                    )));
                }

                log::debug!(
                    "Line {}: {:?} -> {:?}, emitting replacement initializer",
                    index + 1,
                    state,
                    ScanState::Suppressing
                );
                patched_lines.extend(REPLACEMENT_INIT);
                state = ScanState::Suppressing;
            }
            ScanState::Suppressing if line.contains(END_MARKER) => {
                log::debug!(
                    "Line {}: {:?} -> {:?}, initializer span closed",
                    index + 1,
                    state,
                    ScanState::Passthrough
                );
                patched_lines.push(line);
                state = ScanState::Passthrough;
                span_replaced = true;
            }
            ScanState::Suppressing if line.contains(INIT_FN_MARKER) => {
                return Err(crate::error::AssemblerError::patch_error(&format!(
                    "nested initializer opened on line {} inside the replaced span",
                    index + 1
                )));
            }
            ScanState::Suppressing => {}
            ScanState::Passthrough => patched_lines.push(line),
        }
    }

    if state == ScanState::Suppressing {
        return Err(crate::error::AssemblerError::patch_error(
            "initializer span was never closed, the export line is missing",
        ));
    }

    patched_lines.push("");

    Ok(patched_lines.join("\r\n"))
}
