//! Client and wire types for the Meetup GraphQL endpoints.

pub mod client;
pub use client::{Endpoint, MeetupClient};

pub mod models;
pub use models::*;

pub mod queries;
