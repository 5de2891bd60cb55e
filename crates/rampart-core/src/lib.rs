//! Core types and definitions for the RAMPART fortress engine.
//!
//! This crate defines the vocabulary shared by the simulation and its host:
//! geometry, components, configuration, commands, snapshots, events and
//! constants. It has no ECS world or RNG of its own.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
