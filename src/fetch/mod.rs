//! HTTP retrieval for shared-sheet exports.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;
