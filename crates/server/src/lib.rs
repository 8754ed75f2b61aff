//! Server crate for the ReelMatch recommender.
//!
//! This crate contains the service that ties the similarity lookup to the
//! metadata fetcher; a presentation layer only needs to talk to it.

pub mod orchestrator;

pub use orchestrator::{MovieRecommendation, RecommendationService};
