//! In-memory record stores served over a JSON HTTP API.
//!
//! - **`store`**: the generic `RecordStore<E>` (ids, uniqueness, timestamps,
//!   derived views) and the `Entity` trait that instantiates it.
//! - **`domain`**: rectangles, students and tasks, each with payload
//!   validation, derived values and list filters.
//! - **`handlers`** / **`app`**: the axum surface and its middleware.

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod models;
pub mod state;
pub mod store;
pub mod validation;

pub use app::build_router;
