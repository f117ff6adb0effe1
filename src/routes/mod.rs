pub mod docs;
pub mod health;
pub mod statistics;
pub mod submissions;

pub use docs::create_docs_routes;
pub use health::create_health_routes;
pub use statistics::create_statistics_routes;
pub use submissions::create_submission_routes;
