pub mod body;
pub mod obstacle;
pub mod scroll;
pub mod session;
pub mod time;
pub mod world;
