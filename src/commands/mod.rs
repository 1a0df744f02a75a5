//! CLI command implementations
//!
//! This module contains implementations of various commands
//! supported by the CLI application using the Command pattern.

pub mod cli;
pub mod command_traits;
pub mod command_args;
pub mod evaluate_command;
pub mod coords_command;
pub mod draw_command;

pub use cli::build_cli;
pub use command_traits::{Command, CommandFactory};
pub use command_args::CommonArgs;
pub use evaluate_command::EvaluateCommand;
pub use coords_command::CoordsCommand;
pub use draw_command::DrawCommand;

use clap::ArgMatches;
use crate::utils::logger::Logger;
use crate::haar::errors::HaarResult;

/// Factory for creating command instances based on CLI arguments
///
/// This factory examines the command-line arguments and creates
/// the appropriate command instance for execution.
#[derive(Default)]
pub struct HaarkitCommandFactory;

impl HaarkitCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        HaarkitCommandFactory
    }
}

impl<'a> CommandFactory<'a> for HaarkitCommandFactory {
    fn create_command(&self, args: &ArgMatches, logger: &'a Logger) -> HaarResult<Box<dyn Command + 'a>> {
        if args.get_one::<String>("draw").is_some() {
            Ok(Box::new(DrawCommand::new(args, logger)?))
        } else if args.get_flag("coords") {
            Ok(Box::new(CoordsCommand::new(args, logger)?))
        } else {
            // Default to computing feature values
            Ok(Box::new(EvaluateCommand::new(args, logger)?))
        }
    }
}
