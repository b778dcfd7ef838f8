//! Request / response types of every exposed API dialect.

pub mod generate;
pub mod health;
pub mod message;
pub mod ollama;
pub mod v1;
