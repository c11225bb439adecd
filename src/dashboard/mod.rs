//! Minimal web page mirroring the CLI menu.
//!
//! One page with a button per action. Posting a button runs the matching stub
//! and shows what it printed. The quit button only shows a farewell; the server
//! keeps running.

pub mod routes;
pub mod server;
pub mod state;
pub mod templates;

pub use server::{build_router, serve, start_dashboard};
pub use state::DashboardState;
