pub mod analyze;
pub mod appraise;
pub mod health;

pub use analyze::analyze_handler;
pub use appraise::appraise_handler;
pub use health::health_handler;
