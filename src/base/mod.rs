//! Core components, types, and utilities for the review bot.
//!
//! This module contains fundamental building blocks used throughout the application:
//! - Configuration handling and environment variables.
//! - The proofreading prompt and fixed reply strings.
//! - Common types and result handling.

pub mod config;
pub mod prompts;
pub mod types;
