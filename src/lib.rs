pub mod commands;
pub mod config;
pub mod database;
pub mod error;
pub mod health;
pub mod metrics;
pub mod routes;
pub mod server;
pub mod shutdown;
pub mod survey;
pub mod test_utils;
pub mod utils;

pub use config::Config;
pub use server::Server;
