#![deny(missing_docs)]
//! Host provider contract for lantern.
//!
//! Everything a host application and a model-server adapter agree on lives
//! here: the chat records passed in, the [`StreamEvent`] union passed back,
//! the [`ProviderError`] taxonomy, the [`ModelProvider`] trait, and the
//! extension lifecycle hooks a host drives on load and unload.
//!
//! Adapters (such as `lantern-provider-ollama`) depend on this crate and
//! nothing else from the host.

pub mod error;
pub mod lifecycle;
pub mod locale;
pub mod stream;
pub mod traits;
pub mod types;

pub use error::*;
pub use lifecycle::*;
pub use locale::*;
pub use stream::*;
pub use traits::*;
pub use types::*;
