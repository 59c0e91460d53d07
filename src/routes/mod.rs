pub mod health_checks;
pub mod status;

pub use health_checks::*;
pub use status::*;
