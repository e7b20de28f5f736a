pub mod error;
pub mod health;
pub mod signup;

pub use error::AppError;
