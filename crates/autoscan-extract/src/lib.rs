//! Extraction service: turns acquired page text into [`VehicleRecord`]s with a
//! single call to an OpenRouter-compatible chat completion backend.
//!
//! [`VehicleRecord`]: autoscan_core::VehicleRecord

pub mod client;
pub mod config;
pub mod error;
pub mod parse;
pub mod prompt;
pub mod service;

pub use client::OpenRouterClient;
pub use config::ExtractConfig;
pub use error::ExtractError;
pub use parse::parse_records;
pub use prompt::{build_corpus, extraction_prompt, manual_prompt};
pub use service::{ExtractionService, Extractor};
