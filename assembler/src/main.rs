//! Assembler binary entrypoint.
//!
//! Parses CLI arguments and dispatches to command handlers in the
//! `assembler` crate. The binary is intentionally a thin wrapper: argument
//! parsing and dispatch happen here, while the real work (archive
//! expansion, payload encoding, loader patching, and template assembly) is
//! performed by the command implementations found in `assembler::commands`.
//!
//! Examples
//!
//! Default (non-embedded) build of the viewer document:
//!
//! $ assembler assemble --archive web/viewer-dist.zip \
//!     --fixture '$$GREETING_XML$$=web/greeting.xml.txt' \
//!     --bundle '// PUT_BUILD_MJS_HERE=web/dist/build/viewer.mjs'
//!
//! The command above will:
//! 1. Expand `web/viewer-dist.zip` into `web/`.
//! 2. Read `skeleton.html` and substitute the fixture and bundle markers.
//! 3. Leave the payload insertion point empty and keep `var is_prod = false;`.
//! 4. Write the assembled `index.html` with CRLF line endings.
//!
//! Production build with the wasm module embedded inline:
//!
//! $ assembler assemble --production --artifact pkg/viewer_bg.wasm \
//!     --loader pkg/viewer.js --chunk-size 100
//!
//! This additionally:
//! 1. Base64-encodes the artifact into a chunked `window.GLOBAL_WASM`
//!    assignment.
//! 2. Patches the generated loader so instantiation decodes that global
//!    instead of fetching the `.wasm` file, which lets the document run from
//!    a `file://` origin.
//!
//! Notes
//! - The CLI is implemented with `clap` and dispatches to types implementing
//!   the `CommandHandler` trait.
//! - Logging goes through `env_logger`; set RUST_LOG=debug to see patcher
//!   state transitions and per-step detail.

use clap::Parser;

fn main() -> assembler::error::Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    // Parse command-line arguments and execute the selected operation.
    assembler::commands::base::Cli::parse().handle()
}
