//! Basketball shot simulation server library.
//!
//! The physics modules (`ball`, `hoop`, `trajectory`, `integrator`,
//! `collision`, `movement`, `score`) are pure and tick-driven; `state` ties them
//! together behind a single `GameState`. The rest hosts that state over
//! WebSocket.

pub mod ball;
pub mod bot;
pub mod collision;
pub mod config;
pub mod game_loop;
pub mod hoop;
pub mod integrator;
pub mod movement;
pub mod score;
pub mod state;
pub mod trajectory;
pub mod ws;
