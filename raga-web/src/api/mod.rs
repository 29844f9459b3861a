//! HTTP API handlers for raga-web

pub mod description;
pub mod health;
pub mod selection;

pub use description::description_routes;
pub use health::health_routes;
pub use selection::selection_routes;
