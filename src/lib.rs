//! Kilde - learning resource discovery
//!
//! Finds learning resources for a topic and returns only links that actually answer.
//!
//! The name "Kilde" is the Norwegian word for "source."
//!
//! # Overview
//!
//! A discovery request runs through a fixed pipeline:
//!
//! 1. `generation` proposes candidates (static curated mapping, or AI curation with
//!    keyword and static fallbacks).
//! 2. `enhance` probes every link concurrently and swaps broken GeeksforGeeks and
//!    W3Schools links for working pages found by `repair`.
//! 3. `augment` adds educational videos, official documentation and optionally books.
//! 4. `rank` scores and orders everything; `report` truncates to the top entries and
//!    computes study time and a quality score.
//!
//! # Architecture
//!
//! - `config` - Configuration and prompt templates
//! - `resource` - Data model
//! - `probe` - Link reachability checks
//! - `repair` - Platform URL repair
//! - `generation` - Candidate sources
//! - `enhance` - Validation and repair of candidates
//! - `augment` - Videos, documentation and books
//! - `rank` - Scoring
//! - `report` - Aggregate figures
//! - `orchestrator` - Pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use kilde::config::Settings;
//! use kilde::orchestrator::Discovery;
//! use kilde::resource::Difficulty;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let discovery = Discovery::new(settings)?;
//!
//!     let outcome = discovery.discover("machine learning", Difficulty::Beginner).await?;
//!     for resource in &outcome.set.resources {
//!         println!("{} - {}", resource.title, resource.url);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod augment;
pub mod cli;
pub mod config;
pub mod enhance;
pub mod error;
pub mod generation;
pub mod mcp;
pub mod openai;
pub mod orchestrator;
pub mod probe;
pub mod rank;
pub mod repair;
pub mod report;
pub mod resource;

#[cfg(test)]
pub(crate) mod testing;

pub use error::{KildeError, Result};
