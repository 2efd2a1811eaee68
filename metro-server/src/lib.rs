//! Metro network server.
//!
//! Loads a metro network from its station and edge records and answers:
//! "what is the fastest way from here to there, and which trains do I take?"

pub mod domain;
pub mod network;
pub mod planner;
pub mod web;
