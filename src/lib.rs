pub mod app;
pub mod engine;
pub mod graphs;
pub mod snapshot;
