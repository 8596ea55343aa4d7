//! Driving adapters. The command-line interface plays the role of pages.

pub mod cli;
