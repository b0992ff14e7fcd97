//! Classic Snake: a fixed-tick grid game with a persisted high score.
//!
//! The engine, food placement, input routing and timer are plain data types
//! with no terminal dependency; `renderer` paints through the [`renderer::Surface`]
//! trait and `terminal_runtime` owns the terminal itself.

pub mod config;
pub mod food;
pub mod game;
pub mod input;
pub mod renderer;
pub mod scheduler;
pub mod score;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
