//! # donate-api
//!
//! HTTP API layer for donate-checkout.
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | GET | `/api/checkout_session?session_id=` | Retrieve checkout session |
//! | POST | `/api/checkout_session` | Create donation checkout session |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState, LogFormat};
