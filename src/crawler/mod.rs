pub mod models;
pub mod service;

mod fetcher;
mod parser;
