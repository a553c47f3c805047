//! Static dashboard content and the navigation state around the live monitor.

pub mod datasets;
mod state;

pub use datasets::DASHBOARD_DATA;
pub use state::{DEFAULT_SCALABILITY_INDEX, DashboardError, DashboardSection, DashboardState};
