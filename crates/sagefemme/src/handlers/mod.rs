pub mod error;
pub mod health;
pub mod templates;

pub use error::AppError;
