pub mod client;
pub mod error;
pub mod session;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use client::{CatalogClient, ClientConfig};
pub use error::FetchError;
pub use session::CatalogSession;
pub use trackingtags_core;
