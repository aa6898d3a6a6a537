// Trip-planning decision engine for the hiking app: mountain search with
// caching and history, spot selection, route optimization and transport
// mode comparison. Rendering and navigation live in the app shell, not here.

pub mod cache;
pub mod config;
pub mod constants;
pub mod error;
pub mod history;
pub mod models;
pub mod normalize;
pub mod services;
pub mod session;

// Re-export commonly used types
pub use error::{PlanError, Result};
pub use session::{PlanningSession, SessionState};
