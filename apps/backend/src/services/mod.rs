//! Application services layered over the domain.

pub mod game_flow;
