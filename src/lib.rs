pub mod app;
pub mod cat;
pub mod config;
pub mod ecs;
pub mod error;
pub mod iso;
pub mod room;
