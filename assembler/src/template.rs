//! Marker substitution into the skeleton document.
//!
//! The skeleton is scanned line by line. A line whose trimmed text equals a
//! registered marker token is replaced wholesale by that marker's block; the
//! literal mode-flag declaration is rewritten to reflect the selected build
//! mode; every other line passes through verbatim and in original order.
//! Lines that merely contain a marker among other text never match, so a
//! marker quoted inside surrounding code is left alone.
//!
//! The assembled document joins all emitted pieces with CRLF regardless of
//! the host platform convention.

/// Literal flag declaration rewritten according to the build mode.
pub const MODE_FLAG_MARKER: &str = "var is_prod = false;";

/// Replacement flag declaration emitted in production mode.
pub const MODE_FLAG_PRODUCTION: &str = "var is_prod = true;";

/// A marker token paired with the text block substituted in its place.
#[derive(Debug, Clone)]
pub struct Substitution {
    /// The marker token matched against whole (trimmed) skeleton lines.
    pub marker: String,
    /// The block emitted in place of a matching line. May span several
    /// lines of its own, or be empty to blank the insertion point.
    pub block: String,
}

impl Substitution {
    pub fn new(marker: String, block: String) -> Self {
        Self { marker, block }
    }
}

/// Assembles the output document from the skeleton and the substitutions.
///
/// Exactly one substitution occurs per matching line; when several
/// registered markers are equal the first registration wins.
///
/// # Arguments
/// * `skeleton` - The template document containing the marker lines.
/// * `substitutions` - Marker/block pairs to substitute.
/// * `production` - Selected build mode, rewrites the mode-flag line.
///
/// # Returns
/// The assembled document with CRLF line endings.
pub fn assemble(skeleton: &str, substitutions: &[Substitution], production: bool) -> String {
    let mut document_lines: Vec<&str> = Vec::new();

    for line in skeleton.lines() {
        let trimmed = line.trim();

        if let Some(substitution) = substitutions
            .iter()
            .find(|substitution| substitution.marker == trimmed)
        {
            log::debug!("Substituting marker line: {}", substitution.marker);
            document_lines.push(&substitution.block);
        } else if trimmed == MODE_FLAG_MARKER && production {
            document_lines.push(MODE_FLAG_PRODUCTION);
        } else {
            document_lines.push(line);
        }
    }

    document_lines.join("\r\n")
}
