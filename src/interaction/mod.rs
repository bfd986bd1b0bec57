//! Event handling for the review bot.
//!
//! This module decides what an inbound message asks for and carries the
//! review pipeline out:
//! - Classifying message text (cancel keyword, article link, or neither).
//! - Orchestrating the fetch → review → reply sequence.

pub mod intent;
pub mod review;
