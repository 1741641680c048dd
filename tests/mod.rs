//! Integration tests for parking guidance
//!
//! Simulator behavior runs on tokio's paused clock so timing assertions are
//! exact. Checks land half a tick after a scheduled timer to avoid ties.

pub mod config;
