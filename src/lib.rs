//! Pokedex handheld TUI
//!
//! Library half of the binary: state, reducer, API client and components are
//! exposed here so they can be exercised from `tests/`.

pub mod action;
pub mod api;
pub mod cache;
pub mod components;
pub mod config;
pub mod effect;
pub mod error;
pub mod logging;
pub mod navigation;
pub mod reducer;
pub mod sprite;
pub mod state;
