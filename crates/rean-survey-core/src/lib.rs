pub mod answers;
pub mod catalog;
pub mod classify;
pub mod error;
pub mod progress;
pub mod scoring;

pub use answers::*;
pub use catalog::*;
pub use classify::*;
pub use error::SurveyError;
pub use progress::*;
pub use scoring::*;
