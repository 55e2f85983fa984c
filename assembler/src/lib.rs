//! Core library for the `assembler` binary.
//!
//! This crate provides the pieces used by the post-build assembly step that
//! turns an HTML skeleton plus a bundled viewer distribution into a single
//! self-contained document:
//! - The `commands` module contains the CLI subcommands and the wiring that
//!   runs the assembly pipeline.
//! - The `archive` module expands the zipped viewer distribution into a
//!   working directory.
//! - The `encoder` module re-expresses the compiled wasm artifact as an
//!   embeddable script payload (base64 text split into fixed-size chunks).
//! - The `patcher` module rewrites the generated loader so the module is
//!   instantiated from the embedded payload instead of a network fetch.
//! - The `template` module performs line-oriented marker substitution into
//!   the skeleton document.
//! - The `error` module defines error types used across the library.
//!
//! Design notes:
//! - Ownership is preferred for command handlers: `handle(self)` consumes the
//!   command struct so implementations can move resources (paths, buffers)
//!   without cloning.
//! - The text transforms are intentionally kept separate from the command
//!   implementations so they can be reused and tested independently.
//! - The pipeline is single-shot and fail-fast: the first error aborts the
//!   whole run and no partially-written final output is left behind.
pub mod archive;
pub mod commands;
pub mod encoder;
pub mod error;
pub mod patcher;
pub mod template;

/// A thin abstraction implemented by CLI command structs to execute work.
///
/// Implementors should perform whatever IO or processing the command
/// represents inside `handle`. The method takes ownership of `self` so
/// implementors can move owned fields (file paths, configuration) without
/// requiring extra cloning.
///
/// Example use:
/// - Constructed by the `clap`-generated CLI parser and then dispatched from
///   `main`.
pub trait CommandHandler {
    /// Execute the command, consuming the implementor.
    fn handle(self) -> crate::error::Result<()>;
}
