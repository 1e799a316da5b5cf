pub mod error;
pub mod flog;
