//! Service integrations for external APIs and clients.
//!
//! This module contains implementations for the services the bot depends on:
//! - The dedup cache (in-memory).
//! - The article source (Qiita).
//! - LLM services (OpenAI).
//! - Chat reply services (Slack).
//!
//! Each service module defines both a generic trait and a concrete
//! implementation, allowing for extensibility and easy testing.

pub mod article;
pub mod cache;
pub mod chat;
pub mod llm;
