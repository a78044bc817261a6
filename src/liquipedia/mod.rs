pub mod client;

pub use client::LiquipediaClient;
