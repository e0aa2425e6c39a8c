//! CLI infrastructure for the gridpath simulator
//!
//! This module provides the command-line interface for training an agent on
//! a grid and for inspecting grid layouts.

pub mod commands;
pub mod output;
