//! CLI subcommands

pub mod init;
pub mod new;
pub mod render;
