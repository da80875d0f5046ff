//! Command pattern interfaces
//!
//! This module defines the core Command pattern interfaces
//! for the CLI application.

use crate::geo::errors::GeoResult;

/// Represents an executable command in the application
///
/// Command objects encapsulate the logic for a specific CLI operation,
/// allowing for separation of concerns and better testability.
pub trait Command {
    /// Compute the text the command prints
    fn output(&self) -> GeoResult<String>;

    /// Execute the command, printing its output to stdout
    fn execute(&self) -> GeoResult<()> {
        let output = self.output()?;
        if !output.is_empty() {
            println!("{}", output);
        }
        Ok(())
    }
}

/// Factory for creating commands from CLI arguments
pub trait CommandFactory<'a> {
    /// Create a new Command instance based on CLI arguments
    ///
    /// # Arguments
    /// * `args` - CLI argument matches from clap
    ///
    /// # Returns
    /// A command that implements the Command trait, or an error
    fn create_command(&self, args: &clap::ArgMatches) -> GeoResult<Box<dyn Command + 'a>>;
}
