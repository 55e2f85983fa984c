/*!
The assemble subcommand for the assembler CLI.

This is the whole post-build pipeline, executed once per invocation in a
fixed order:

1. Expand the zipped viewer distribution when an archive is given.
2. Read the skeleton document.
3. Read every fixture and bundle file named by a `MARKER=PATH` pair and
   register it as a whole-line substitution.
4. In production mode, read the compiled artifact and its generated loader,
   encode the artifact into the embedded payload block and patch the loader
   to instantiate from it; in default mode the payload insertion point is
   blanked instead.
5. Assemble the skeleton with all substitutions and the selected mode.
6. Write the document to a staging path and rename it over the final output,
   so a failed run never leaves a partially-written document behind.

The build mode is parsed once from the arguments and threaded through as an
explicit boolean, there is no process-wide mode state.
*/

use clap::Args;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::template::Substitution;
use crate::CommandHandler;

/// Marker line replaced by the embedded payload and patched loader pair.
pub const PAYLOAD_MARKER: &str = "// PUT_WASM_JS_HERE";

/// Arguments for the assemble subcommand.
///
/// Path defaults mirror the conventional project layout: the skeleton and
/// output at the repository root, the viewer distribution expanded under
/// `web/`, and the wasm-bindgen output under `pkg/`. The artifact and loader
/// are only read in production mode.
#[derive(Debug, Clone, Args)]
#[command(name = "assemble")]
pub struct AssembleSubCommand {
    /// Skeleton document containing the marker lines
    #[arg(short = 's', long = "skeleton", default_value = "skeleton.html")]
    skeleton: PathBuf,

    /// Path the assembled document is written to
    #[arg(short = 'o', long = "out", default_value = "index.html")]
    out: PathBuf,

    /// Zipped viewer distribution to expand before assembling
    #[arg(long = "archive", required = false)]
    archive: Option<PathBuf>,

    /// Directory the archive is expanded into
    #[arg(long = "extract-dir", required = false, default_value = "web")]
    extract_dir: PathBuf,

    /// Fixture insertion points, as MARKER=PATH pairs
    #[arg(long = "fixture", required = false, value_delimiter = ',', num_args = 1..)]
    fixtures: Vec<String>,

    /// Bundle script insertion points, as MARKER=PATH pairs
    #[arg(long = "bundle", required = false, value_delimiter = ',', num_args = 1..)]
    bundles: Vec<String>,

    /// Build the production document with the wasm artifact embedded inline
    #[arg(long = "production")]
    production: bool,

    /// Compiled wasm artifact embedded in production mode
    #[arg(long = "artifact", default_value = "pkg/viewer_bg.wasm")]
    artifact: PathBuf,

    /// Generated loader source patched in production mode
    #[arg(long = "loader", default_value = "pkg/viewer.js")]
    loader: PathBuf,

    /// Maximum characters per embedded payload chunk
    #[arg(
        long = "chunk-size",
        required = false,
        default_value_t = crate::encoder::DEFAULT_CHUNK_SIZE as u32,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    chunk_size: u32,
}

impl CommandHandler for AssembleSubCommand {
    /// Execute the assembly pipeline.
    ///
    /// Fail-fast: the first error aborts the run, nothing is retried and the
    /// final output path is only touched on success.
    fn handle(self) -> crate::error::Result<()> {
        if let Some(archive_path) = &self.archive {
            crate::archive::expand_archive(archive_path, &self.extract_dir)?;
        }

        log::info!("Reading skeleton {}", self.skeleton.to_string_lossy());
        let skeleton = std::fs::read_to_string(&self.skeleton)?;

        let mut substitutions = Vec::new();
        for pair in self.fixtures.iter().chain(self.bundles.iter()) {
            substitutions.push(read_substitution(pair)?);
        }
        substitutions.push(Substitution::new(
            PAYLOAD_MARKER.to_string(),
            self.embedded_payload_block()?,
        ));

        let document = crate::template::assemble(&skeleton, &substitutions, self.production);
        write_document(&self.out, &document)?;
        log::info!("Wrote {}", self.out.to_string_lossy());

        Ok(())
    }
}

impl AssembleSubCommand {
    /// Builds the block substituted at the payload insertion point.
    ///
    /// In production mode this is the encoded artifact assignment followed by
    /// the patched loader, joined with CRLF. In default mode the block is
    /// empty and the insertion point is blanked.
    fn embedded_payload_block(&self) -> crate::error::Result<String> {
        if !self.production {
            return Ok(String::new());
        }

        log::info!("Embedding artifact {}", self.artifact.to_string_lossy());
        let artifact = std::fs::read(&self.artifact)?;
        let payload = crate::encoder::payload_script(&artifact, self.chunk_size as usize)?;

        log::info!("Patching loader {}", self.loader.to_string_lossy());
        let loader_source = std::fs::read_to_string(&self.loader)?;
        let patched_loader = crate::patcher::patch_loader(&loader_source)?;

        Ok(format!("{}\r\n{}", payload, patched_loader))
    }
}

/// Parses a `MARKER=PATH` pair and reads the named file into a substitution.
fn read_substitution(pair: &str) -> crate::error::Result<Substitution> {
    let (marker, path) = match pair.split_once('=') {
        Some((marker, path)) if !marker.is_empty() && !path.is_empty() => (marker, path),
        _ => {
            return Err(crate::error::AssemblerError::validation_error(&format!(
                "expected MARKER=PATH, got '{}'",
                pair
            )))
        }
    };

    log::info!("Reading {} for marker {}", path, marker);
    let block = std::fs::read_to_string(Path::new(path))?;

    Ok(Substitution::new(marker.to_string(), block))
}

/// Writes the document to a staging path next to the output and renames it
/// over the final path on success.
fn write_document(out_path: &Path, document: &str) -> crate::error::Result<()> {
    let file_name = match out_path.file_name() {
        Some(file_name) => file_name.to_string_lossy(),
        None => {
            return Err(crate::error::AssemblerError::validation_error(
                "output path has no file name",
            ))
        }
    };

    let staging_path = out_path.with_file_name(format!("{}.tmp", file_name));
    let mut staging_file = std::fs::File::create(&staging_path)?;
    staging_file.write_all(document.as_bytes())?;
    std::fs::rename(&staging_path, out_path)?;

    Ok(())
}
