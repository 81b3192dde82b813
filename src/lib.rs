pub mod api;
pub mod config;
pub mod database;
pub mod error;
pub mod export;
pub mod models;
pub mod service;

pub use database::{MemoryStore, ReviewStore, SqliteStore, StoreError};
pub use error::{ReviewError, ReviewResult};
pub use models::{Clock, Grade, ManualClock, ReviewState, ReviewStats, SystemClock, apply_grade};
pub use service::{ReviewOutcome, ReviewService};
