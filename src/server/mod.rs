//! HTTP endpoint serving the occupancy report.
//!
//! `GET /api/rsf-occupancy` re-reads the configured CSV on every request and
//! answers with `{"success": true, "data": {heatmap, timeline}}`, or a JSON
//! error body with a 4xx/5xx status.

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::{create_router, serve};
pub use state::AppState;
