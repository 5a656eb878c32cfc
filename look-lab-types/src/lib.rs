//! Shared types for the Look Lab virtual try-on client.

mod base64_serde;

pub mod config;
pub mod content;
pub mod converters;
pub mod enums;
pub mod image;
pub mod models;
pub mod outfit;
pub mod response;
