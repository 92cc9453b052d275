//! SKILL.md loading, skill registry, keyword activation matching, and prompt formatting.

pub mod config;
pub mod error;
pub mod frontmatter;
pub mod loader;
pub mod matcher;
pub mod prompt;
pub mod registry;
pub mod resource;
