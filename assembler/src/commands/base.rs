//! CLI command definitions and dispatch for the assembler.
//!
//! This module contains the top-level CLI wiring used by the `assembler`
//! binary. It defines the `Cli` struct parsed by `clap`, an `Operations`
//! enum for the supported subcommands and implements a small dispatch
//! mechanism that calls into the concrete command implementations located
//! in `commands::assemble`.
//!
//! Design goals:
//! - Keep parsing and dispatch logic minimal; command implementations
//!   perform the actual IO and text-transform work.
//! - Use ownership when invoking handlers so commands can move resources
//!   (paths, buffers) without additional cloning.

use crate::CommandHandler;
use clap::{Parser, Subcommand};

/// Top-level CLI structure parsed from program arguments.
///
/// The `Cli` struct is the entry point for command-line parsing and contains
/// a single `operation_type` field which represents one of the supported
/// subcommands. The struct uses `clap`'s `Parser` derive to provide argument
/// parsing and `--version` handling.
#[derive(Parser)]
#[command(version)]
pub struct Cli {
    /// The operation/subcommand to execute.
    #[command(subcommand)]
    pub operation_type: Operations,
}

impl Cli {
    /// Dispatch and execute the selected subcommand.
    ///
    /// This consumes the `Cli` instance and delegates to the underlying
    /// `Operations::handle` implementation.
    pub fn handle(self) -> crate::error::Result<()> {
        self.operation_type.handle()
    }
}

/// Supported top-level operations/subcommands.
///
/// Each variant wraps the concrete argument struct implemented in the
/// `commands` submodules.
#[derive(Debug, Subcommand)]
pub enum Operations {
    /// Assemble the self-contained viewer document.
    #[command(name = "assemble")]
    Assemble(super::assemble::AssembleSubCommand),
}

impl CommandHandler for Operations {
    /// Execute the selected operation.
    ///
    /// The method consumes the `Operations` enum and passes control to the
    /// concrete command handler for the selected variant.
    fn handle(self) -> crate::error::Result<()> {
        match self {
            Operations::Assemble(assemble_sub_cmd) => assemble_sub_cmd.handle()?,
        };

        Ok(())
    }
}
