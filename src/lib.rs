//! particle-upgrade - Library for converting legacy particle emitter configs
//!
//! This library provides functionality to:
//! - Load legacy (v2) emitter documents from JSON or JSON5
//! - Convert them to the v3 behavior-list format, given the art to draw
//! - Leave documents that are already in the v3 format untouched

pub mod cli;
pub mod config;
pub mod models;
pub mod output;
pub mod parser;
pub mod telemetry;
pub mod upgrade;
