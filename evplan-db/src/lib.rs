//! evplan-db library - record store setup and maintenance
//!
//! The binary is a thin clap front end over [`commands`]; [`report`] renders
//! table dumps.

pub mod commands;
pub mod report;
