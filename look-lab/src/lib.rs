//! Virtual try-on client: dress a reference photo in uploaded clothing with a Gemini image model.

pub mod client;
pub mod error;
pub mod models;
pub mod progress;
pub mod studio;
pub mod try_on;
pub mod upload;
pub mod wardrobe;

#[cfg(test)]
mod test_support;

pub use look_lab_types as types;

pub use client::{Client, ClientBuilder, HttpOptions};
pub use error::{Error, Result};
pub use studio::{Studio, StudioError};
pub use try_on::{TryOn, TryOnOutcome, TryOnResult};
pub use wardrobe::{OutfitCollection, Wardrobe};
