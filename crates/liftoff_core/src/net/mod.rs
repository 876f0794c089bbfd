//! Outbound API requests and the tier middleware applied to them.
//!
//! # Responsibility
//! - Model requests before dispatch so middleware can inspect the body.
//! - Annotate every backend-bound request with the current tier at one
//!   place (`TieredTransport`) instead of at each call site.
//!
//! # Invariants
//! - Backend requests always carry `X-User-Tier`.
//! - Multipart bodies never receive a fixed `Content-Type`; the transport
//!   generates it together with the boundary.
//! - Requests to other destinations pass through untouched.

mod middleware;
mod request;
mod transport;

pub use middleware::{RequestMiddleware, TierAnnotator, DEFAULT_API_PATH_MARKER, TIER_HEADER};
pub use request::{MultipartForm, MultipartPart, OutboundRequest, PartContent, RequestBody};
pub use transport::{HttpTransport, TieredTransport, Transport, TransportError, TransportResponse};
