pub mod db;
pub mod error;
pub mod hebrew;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;

pub use error::{AppError, AppResult};
pub use state::AppState;
