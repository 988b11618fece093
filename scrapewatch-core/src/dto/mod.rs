//! Data Transfer Objects for the scraper server API
//!
//! Request and reply shapes that exist only on the wire. Domain entities
//! that double as wire types live in [`crate::domain`].

pub mod job;
