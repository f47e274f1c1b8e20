//! GitHub Wrapped: a year of GitHub activity distilled into a shareable profile.
//!
//! [wrapped::aggregate] is the pure core. [github] fetches the raw year it
//! reads and [web] serves the result over HTTP.

pub mod config;
pub mod github;
pub mod web;
pub mod wrapped;
