pub mod behaviors;
pub mod config;
pub mod dom;
pub mod error;
pub mod faq;
mod page;

pub use config::LandingConfig;
pub use error::LandingError;
pub use page::{start, Page};
