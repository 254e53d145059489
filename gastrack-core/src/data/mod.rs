//! Gas price acquisition: source table, transport, fallback chain

pub mod acquirer;
pub mod http;
pub mod provider;
pub mod source;

pub use acquirer::{Acquirer, Acquisition, Attempt, SourceRole};
pub use http::{HttpTransport, DEFAULT_TIMEOUT};
pub use provider::{SourceError, Transport};
pub use source::{
    RequestShape, ResponseShape, SourceDescriptor, FALLBACK_GWEI, PRIMARY_SOURCES,
    SECONDARY_SOURCE,
};
