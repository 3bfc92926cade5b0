//! Transit journey planner server.
//!
//! Builds a weighted graph from a transit network's static topology (lines,
//! ordered stop sequences, walking correspondences) and answers "what is
//! the fastest way from stop A to stop B?" over HTTP.

pub mod domain;
pub mod graph;
pub mod planner;
pub mod provider;
pub mod web;
