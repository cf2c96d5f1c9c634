pub mod config;
pub mod engine;
pub mod query;
pub mod roster;
pub mod server;
pub mod stats;

mod handlers;
mod http_types;
mod server_state;
mod validation;

#[cfg(test)]
mod testing;
