//! SignalCodec CLI library.
//!
//! This crate provides the core functionality for the `sigcodec` binary:
//! spec loading, and the `transmit`, `validate` and `list` commands.

pub mod commands;
pub mod input;
