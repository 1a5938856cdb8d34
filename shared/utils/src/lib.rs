pub mod config;
pub mod error;
pub mod logging;
pub mod sales;
pub mod validation;

pub use config::*;
pub use error::*;
pub use logging::*;
pub use sales::*;
pub use validation::*;
