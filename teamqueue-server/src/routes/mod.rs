//! HTTP route handlers

pub mod matches;
pub mod queue;
pub mod stats;
pub mod status;
pub mod ws;
