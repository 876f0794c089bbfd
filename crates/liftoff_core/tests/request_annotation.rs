use liftoff_core::store::keys;
use liftoff_core::{
    KeyValueStore, MemoryKeyValueStore, MultipartForm, OutboundRequest, RequestMiddleware,
    TierAnnotator, TierGate, TieredTransport, Transport, TransportError, TransportResponse,
    TIER_HEADER,
};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde_json::json;
use std::cell::RefCell;

/// Transport double that records what reaches the wire.
#[derive(Default)]
struct RecordingTransport {
    sent: RefCell<Vec<OutboundRequest>>,
}

impl Transport for RecordingTransport {
    fn send(&self, request: OutboundRequest) -> Result<TransportResponse, TransportError> {
        self.sent.borrow_mut().push(request);
        Ok(TransportResponse {
            status: 200,
            body: "{}".to_string(),
        })
    }
}

fn header<'a>(request: &'a OutboundRequest, name: &str) -> Option<&'a str> {
    request
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
}

#[test]
fn backend_json_request_gets_tier_and_content_type() {
    let store = MemoryKeyValueStore::new();
    store.set(keys::TIER, "pro").unwrap();
    let annotator = TierAnnotator::new(&store);

    let mut request =
        OutboundRequest::post_json("/api/generate-notes", json!({ "text": "cells" }));
    annotator.prepare(&mut request);

    assert_eq!(header(&request, TIER_HEADER), Some("pro"));
    assert_eq!(header(&request, "content-type"), Some("application/json"));
}

#[test]
fn missing_tier_is_sent_as_free() {
    let store = MemoryKeyValueStore::new();
    let annotator = TierAnnotator::new(&store);

    let mut request = OutboundRequest::get("https://liftoff.example.com/api/usage");
    annotator.prepare(&mut request);

    assert_eq!(header(&request, TIER_HEADER), Some("free"));
}

#[test]
fn multipart_request_gets_tier_without_content_type() {
    let store = MemoryKeyValueStore::new();
    store.set(keys::TIER, "ultra").unwrap();
    let annotator = TierAnnotator::new(&store);

    let form = MultipartForm::new()
        .text("mode", "advanced")
        .file("file", "lecture.pdf", Some("application/pdf"), vec![0x25, 0x50]);
    let mut request = OutboundRequest::post_multipart("/api/upload-pdf", form);
    annotator.prepare(&mut request);

    assert_eq!(header(&request, TIER_HEADER), Some("ultra"));
    assert!(request.headers.get(CONTENT_TYPE).is_none());
}

#[test]
fn non_backend_requests_pass_through_untouched() {
    let store = MemoryKeyValueStore::new();
    store.set(keys::TIER, "pro").unwrap();
    let annotator = TierAnnotator::new(&store);

    for url in [
        "https://fonts.example.com/css?family=Inter",
        "https://cdn.example.com/assets/app.js?next=/api/",
        "https://tracker.example.com?next=/api/x",
        "https://tracker.example.com#/api/x",
        "/static/logo.svg",
        "/static/logo.svg?from=/api/",
    ] {
        let mut request = OutboundRequest::get(url);
        annotator.prepare(&mut request);
        assert!(request.headers.is_empty(), "{url} must not be annotated");
    }
}

#[test]
fn caller_supplied_headers_win() {
    let store = MemoryKeyValueStore::new();
    store.set(keys::TIER, "free").unwrap();
    let annotator = TierAnnotator::new(&store);

    let mut request = OutboundRequest::post_json("/api/chat", json!({}))
        .with_header(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
    annotator.prepare(&mut request);

    assert_eq!(header(&request, "content-type"), Some("text/plain"));
    assert_eq!(header(&request, TIER_HEADER), Some("free"));
}

#[test]
fn custom_path_marker_selects_backend() {
    let store = MemoryKeyValueStore::new();
    let annotator = TierAnnotator::with_path_marker(&store, "/v2/");

    assert!(annotator.targets_backend(&OutboundRequest::get("/v2/notes")));
    assert!(!annotator.targets_backend(&OutboundRequest::get("/api/notes")));
}

#[test]
fn tiered_transport_reads_tier_per_dispatch() {
    let store = MemoryKeyValueStore::new();
    let transport = TieredTransport::new(RecordingTransport::default(), TierAnnotator::new(&store));

    transport
        .send(OutboundRequest::post_json("/api/generate-test", json!({ "count": 5 })))
        .unwrap();
    TierGate::new(&store).set_tier("ultra").unwrap();
    transport
        .send(OutboundRequest::post_json("/api/generate-test", json!({ "count": 5 })))
        .unwrap();

    let sent = transport.inner().sent.borrow();
    assert_eq!(sent.len(), 2);
    assert_eq!(header(&sent[0], TIER_HEADER), Some("free"));
    assert_eq!(header(&sent[1], TIER_HEADER), Some("ultra"));
}
