//! A terminal-themed blog: a command interpreter with parlour games, two
//! arcade games on a shared simulation, achievements, and a local
//! post/score store.

pub mod achievements;
pub mod audio;
pub mod clock;
pub mod compute;
pub mod config;
pub mod display;
pub mod driver;
pub mod entities;
pub mod events;
pub mod geometry;
pub mod settings;
pub mod shell;
pub mod store;
