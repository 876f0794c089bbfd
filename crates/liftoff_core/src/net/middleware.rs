use super::request::OutboundRequest;
use crate::service::tier_gate::TierGate;
use crate::store::KeyValueStore;
use log::debug;
use reqwest::header::{HeaderName, HeaderValue, CONTENT_TYPE};

/// Header carrying the locally recorded tier.
pub const TIER_HEADER: &str = "x-user-tier";
/// Path segment identifying the application's own backend.
pub const DEFAULT_API_PATH_MARKER: &str = "/api/";

const JSON_CONTENT_TYPE: &str = "application/json";

/// Mutates a request right before dispatch.
pub trait RequestMiddleware {
    fn prepare(&self, request: &mut OutboundRequest);
}

/// Adds the tier header and JSON content type to backend requests.
pub struct TierAnnotator<S: KeyValueStore> {
    gate: TierGate<S>,
    path_marker: String,
}

impl<S: KeyValueStore> TierAnnotator<S> {
    pub fn new(store: S) -> Self {
        Self::with_path_marker(store, DEFAULT_API_PATH_MARKER)
    }

    pub fn with_path_marker(store: S, path_marker: impl Into<String>) -> Self {
        Self {
            gate: TierGate::new(store),
            path_marker: path_marker.into(),
        }
    }

    /// Whether `request` is bound for the application backend.
    pub fn targets_backend(&self, request: &OutboundRequest) -> bool {
        request.path().contains(self.path_marker.as_str())
    }
}

impl<S: KeyValueStore> RequestMiddleware for TierAnnotator<S> {
    fn prepare(&self, request: &mut OutboundRequest) {
        if !self.targets_backend(request) {
            return;
        }

        // Tier is read per dispatch so `set_tier` applies to the next call.
        let tier = self.gate.current_tier();
        let tier_header = HeaderName::from_static(TIER_HEADER);
        if !request.headers.contains_key(&tier_header) {
            request
                .headers
                .insert(tier_header, HeaderValue::from_static(tier.as_str()));
        }

        if !request.body.is_multipart() && !request.headers.contains_key(CONTENT_TYPE) {
            request
                .headers
                .insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        }

        debug!(
            "event=request_annotate module=net status=ok method={} tier={} multipart={}",
            request.method,
            tier,
            request.body.is_multipart()
        );
    }
}

impl<M: RequestMiddleware + ?Sized> RequestMiddleware for &M {
    fn prepare(&self, request: &mut OutboundRequest) {
        (**self).prepare(request);
    }
}
