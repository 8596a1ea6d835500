pub mod client;
pub mod models;
pub mod naming;
pub mod orchestrator;
pub mod reporter;
pub mod state;
