pub mod game;
pub mod level;
pub mod types;
