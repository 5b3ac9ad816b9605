mod client;
mod models;

pub use client::Database;
