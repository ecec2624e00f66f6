//! Admission control for inbound requests.
//!
//! This module provides a per-client sliding-window rate limiter.

pub mod sliding_window;

pub use sliding_window::{RateLimiter, ANONYMOUS_CLIENT};
