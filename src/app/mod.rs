// Application layer: wires CLI subcommands to the port engine.

pub mod commands;

pub use commands::{run, CommandOutput};
