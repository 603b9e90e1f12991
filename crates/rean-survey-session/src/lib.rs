pub mod clipboard;
pub mod error;
pub mod factory;
pub mod location;
pub mod session;

pub use clipboard::*;
pub use error::{ClipboardError, SessionError};
pub use factory::*;
pub use location::*;
pub use session::*;
