pub mod commands;
mod render;
mod setup;
