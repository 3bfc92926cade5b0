//! Journey planning: shortest-path search and itinerary assembly.

mod config;
mod dijkstra;
mod engine;
mod segments;

pub use config::PlannerConfig;
pub use dijkstra::{find_path, ShortestPath};
pub use engine::JourneyPlanner;
