//! Configuration module for Kilde.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{CurationPrompts, Prompts};
pub use settings::{
    BooksSettings, DiscoverySettings, GeneralSettings, GenerationSettings, GenerationStrategy,
    ProbeSettings, PromptSettings, Settings, YoutubeSettings,
};
