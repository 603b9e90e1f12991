pub mod config;
pub mod console;
pub mod framing;
pub mod protocol;
pub mod server;

pub use config::{ServeMode, ServerConfig};
pub use server::SurveyServer;
