pub mod client;
pub mod commands;
pub mod common;
pub mod handler;

pub use client::{create_client, Bot};
pub use common::{Context, Data, SongbirdPlatform};
