//! HTTP adapter for email capture endpoints.
//!
//! - `POST /api/email/subscribe` - Newsletter opt-in
//! - `POST /api/email/simple-save` - Results-page email box

pub mod dto;
mod handlers;
mod routes;

pub use dto::*;
pub use handlers::{save_email, subscribe_email};
pub use routes::email_router;
