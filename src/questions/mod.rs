//! Question service communication module

pub mod client;
pub mod traits;

pub use client::QuestionClient;
pub use traits::QuestionSource;
