pub mod codec;
pub mod error;
pub mod types;

pub use codec::*;
pub use error::TokenError;
pub use types::*;
