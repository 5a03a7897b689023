//! Parley chat: the user-facing chatbot facade.
//!
//! This crate contains:
//! - **chatbot**: [`Chatbot`], one validated chat turn at a time with lifecycle events
//! - **ai**: [`Ai`], which hands out chatbots bound to registered providers

pub mod ai;
pub mod chatbot;

pub use ai::Ai;
pub use chatbot::Chatbot;
