//! CLI tests for the sdesk binary.

mod cli;
