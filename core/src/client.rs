//! Request executor for the accounts resource.
//!
//! # Design
//! `Client` owns a validated `Config`, the Target URI derived from it once at
//! construction, and a `Transport`. Each operation is split into a pure
//! `build_*` method producing an `HttpRequest` and an executing method that
//! sends it and wraps the outcome in an `Envelope`. A `Client` is never
//! mutated after construction; `reconfigure` returns a new one.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::{Config, Parameters};
use crate::envelope::Envelope;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, Transport, UreqTransport};
use crate::uri;

/// Blocking client for create, fetch and delete on one resource collection.
#[derive(Debug, Clone)]
pub struct Client<T = UreqTransport> {
    config: Config,
    target_uri: String,
    transport: T,
}

impl Client<UreqTransport> {
    /// Validate the settings and build a client that talks HTTP through `ureq`.
    pub fn new(host: &str, port: &str, protocol: &str, params: Parameters) -> Result<Self, ApiError> {
        let config = Config::new(host, port, protocol, params)?;
        Ok(Self::from_config(config))
    }

    pub fn from_config(config: Config) -> Self {
        Self::with_transport(config, UreqTransport)
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(config: Config, transport: T) -> Self {
        let target_uri = config.target_uri();
        Self {
            config,
            target_uri,
            transport,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// `{protocol}://{host}:{port}{base_path}{resource}/`, fixed for the
    /// lifetime of this client.
    pub fn target_uri(&self) -> &str {
        &self.target_uri
    }

    /// A new client for different per-resource settings on the same host.
    /// The Target URI is derived again; `self` is left as it was.
    pub fn reconfigure(&self, params: Parameters) -> Result<Client<T>, ApiError>
    where
        T: Clone,
    {
        let config = self.config.with_parameters(params)?;
        Ok(Client::with_transport(config, self.transport.clone()))
    }

    pub fn build_create(&self, payload: &[u8]) -> HttpRequest {
        self.request(HttpMethod::Post, self.target_uri.clone(), Some(payload.to_vec()), true)
    }

    pub fn build_fetch(&self, id: &str) -> HttpRequest {
        self.request(HttpMethod::Get, uri::resource_uri(&self.target_uri, id), None, true)
    }

    pub fn build_delete(&self, id: &str, version: i64) -> HttpRequest {
        self.request(
            HttpMethod::Delete,
            uri::versioned_uri(&self.target_uri, id, version),
            None,
            false,
        )
    }

    /// POST `payload` to the Target URI.
    pub fn create(&self, payload: &[u8], timeout: Option<Duration>) -> Result<Envelope, ApiError> {
        let request = self.build_create(payload);
        info!(uri = %request.uri, "creating resource");
        self.execute(&request, timeout)
    }

    /// GET the resource with `id`.
    pub fn fetch(&self, id: &str, timeout: Option<Duration>) -> Result<Envelope, ApiError> {
        let request = self.build_fetch(id);
        info!(uri = %request.uri, "fetching resource");
        self.execute(&request, timeout)
    }

    /// DELETE the resource with `id` at `version`. Only the status is kept.
    pub fn delete(&self, id: &str, version: i64, timeout: Option<Duration>) -> Result<Envelope, ApiError> {
        let request = self.build_delete(id, version);
        info!(uri = %request.uri, "deleting resource");
        self.execute(&request, timeout)
    }

    /// A non-zero per-call timeout wins over the configured one.
    pub fn effective_timeout(&self, timeout: Option<Duration>) -> Duration {
        match timeout {
            Some(t) if !t.is_zero() => t,
            _ => self.config.timeout(),
        }
    }

    // Every request carries the content type, bodyless ones included; the
    // accounts server keys off it.
    fn request(&self, method: HttpMethod, uri: String, body: Option<Vec<u8>>, read_body: bool) -> HttpRequest {
        HttpRequest {
            method,
            uri,
            headers: vec![("content-type".to_string(), self.config.content_type().to_string())],
            body,
            read_body,
        }
    }

    fn execute(&self, request: &HttpRequest, timeout: Option<Duration>) -> Result<Envelope, ApiError> {
        let timeout = self.effective_timeout(timeout);
        match self.transport.send(request, timeout) {
            Ok(response) => {
                debug!(
                    method = request.method.as_str(),
                    uri = %request.uri,
                    status = response.status,
                    "response received"
                );
                let body = if request.read_body { response.body } else { None };
                Ok(Envelope::new(response.status, body))
            }
            Err(err) => {
                warn!(
                    method = request.method.as_str(),
                    uri = %request.uri,
                    error = %err,
                    "no response"
                );
                Err(ApiError::transport(&request.uri, err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::error::Parameter;
    use crate::http::{HttpResponse, TransportError};

    /// Records every request and answers with a canned result.
    struct Recorder {
        sent: RefCell<Vec<(HttpRequest, Duration)>>,
        reply: Result<HttpResponse, TransportError>,
    }

    impl Recorder {
        fn answering(status: u16, body: &[u8]) -> Self {
            Self {
                sent: RefCell::new(Vec::new()),
                reply: Ok(HttpResponse {
                    status,
                    body: Some(body.to_vec()),
                }),
            }
        }

        fn failing(err: TransportError) -> Self {
            Self {
                sent: RefCell::new(Vec::new()),
                reply: Err(err),
            }
        }

        fn last(&self) -> (HttpRequest, Duration) {
            self.sent.borrow().last().cloned().unwrap()
        }
    }

    impl Transport for Recorder {
        fn send(&self, request: &HttpRequest, timeout: Duration) -> Result<HttpResponse, TransportError> {
            self.sent.borrow_mut().push((request.clone(), timeout));
            self.reply.clone()
        }
    }

    fn config() -> Config {
        Config::new("h", "", "", Parameters::new("/v1/organisation/", "accounts")).unwrap()
    }

    fn content_type(request: &HttpRequest) -> Vec<&str> {
        request
            .headers
            .iter()
            .filter(|(name, _)| name == "content-type")
            .map(|(_, value)| value.as_str())
            .collect()
    }

    #[test]
    fn new_rejects_missing_host() {
        let err = Client::new("", "", "", Parameters::new("/v1/organisation/", "accounts")).unwrap_err();
        assert!(matches!(err, ApiError::MissingParameter(Parameter::Host)));
    }

    #[test]
    fn target_uri_is_derived_at_construction() {
        let client = Client::new("h", "8080", "http", Parameters::new("/v1/organisation/", "accounts")).unwrap();
        assert_eq!(client.target_uri(), "http://h:8080/v1/organisation/accounts/");
    }

    #[test]
    fn build_create_posts_payload_to_target() {
        let recorder = Recorder::answering(201, b"{}");
        let client = Client::with_transport(config(), &recorder);
        let req = client.build_create(b"{\"data\":{}}");
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.uri, "http://h:8080/v1/organisation/accounts/");
        assert_eq!(req.body.as_deref(), Some(&b"{\"data\":{}}"[..]));
        assert_eq!(content_type(&req), vec!["application/vnd.api+json"]);
        assert!(req.read_body);
    }

    #[test]
    fn build_fetch_appends_id() {
        let recorder = Recorder::answering(200, b"{}");
        let client = Client::with_transport(config(), &recorder);
        let req = client.build_fetch("abc-123");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.uri, "http://h:8080/v1/organisation/accounts/abc-123");
        assert!(req.body.is_none());
        assert_eq!(content_type(&req), vec!["application/vnd.api+json"]);
    }

    #[test]
    fn build_delete_adds_version_and_keeps_content_type() {
        let recorder = Recorder::answering(204, b"");
        let client = Client::with_transport(config(), &recorder);
        let req = client.build_delete("abc-123", 3);
        assert_eq!(req.method, HttpMethod::Delete);
        assert_eq!(req.uri, "http://h:8080/v1/organisation/accounts/abc-123?version=3");
        assert!(req.body.is_none());
        assert!(!req.read_body);
        assert_eq!(content_type(&req), vec!["application/vnd.api+json"]);
    }

    #[test]
    fn create_returns_status_and_body() {
        let recorder = Recorder::answering(201, br#"{"data":{"id":"a","version":0}}"#);
        let client = Client::with_transport(config(), &recorder);
        let envelope = client.create(b"{}", None).unwrap();
        assert_eq!(envelope.status_code, 201);
        assert_eq!(envelope.body(), br#"{"data":{"id":"a","version":0}}"#);
        assert_eq!(recorder.sent.borrow().len(), 1);
    }

    #[test]
    fn client_error_statuses_are_not_errors() {
        let recorder = Recorder::answering(409, br#"{"error_message":"duplicate"}"#);
        let client = Client::with_transport(config(), &recorder);
        let envelope = client.create(b"{}", None).unwrap();
        assert_eq!(envelope.status_code, 409);

        let recorder = Recorder::answering(404, b"");
        let client = Client::with_transport(config(), &recorder);
        assert_eq!(client.fetch("missing", None).unwrap().status_code, 404);
    }

    #[test]
    fn delete_drops_body() {
        let recorder = Recorder::answering(204, b"ignored");
        let client = Client::with_transport(config(), &recorder);
        let envelope = client.delete("abc-123", 0, None).unwrap();
        assert_eq!(envelope.status_code, 204);
        assert!(envelope.body.is_none());
    }

    #[test]
    fn transport_failure_yields_sentinel_status() {
        let recorder = Recorder::failing(TransportError::Failed("connection refused".to_string()));
        let client = Client::with_transport(config(), &recorder);
        let err = client.fetch("abc-123", None).unwrap_err();
        match &err {
            ApiError::TransportFailure { uri, envelope, .. } => {
                assert_eq!(uri, "http://h:8080/v1/organisation/accounts/abc-123");
                assert_eq!(envelope.status_code, -1);
                assert!(envelope.body.is_none());
            }
            other => panic!("expected TransportFailure, got {other:?}"),
        }
        assert!(!err.is_timeout());
    }

    #[test]
    fn timeout_falls_back_to_config() {
        let recorder = Recorder::answering(200, b"{}");
        let client = Client::with_transport(config(), &recorder);

        client.fetch("a", None).unwrap();
        assert_eq!(recorder.last().1, Duration::from_secs(10));

        client.fetch("a", Some(Duration::ZERO)).unwrap();
        assert_eq!(recorder.last().1, Duration::from_secs(10));

        client.fetch("a", Some(Duration::from_millis(5))).unwrap();
        assert_eq!(recorder.last().1, Duration::from_millis(5));
    }

    #[test]
    fn configured_timeout_is_used_when_no_override() {
        let params = Parameters::new("/v1/organisation/", "accounts").timeout(Duration::from_secs(2));
        let config = Config::new("h", "", "", params).unwrap();
        let recorder = Recorder::answering(204, b"");
        let client = Client::with_transport(config, &recorder);
        client.delete("a", 1, None).unwrap();
        assert_eq!(recorder.last().1, Duration::from_secs(2));
    }

    #[test]
    fn custom_content_type_goes_on_every_request() {
        let params = Parameters::new("/v1/organisation/", "accounts").content_type("application/json");
        let config = Config::new("h", "", "", params).unwrap();
        let recorder = Recorder::answering(200, b"{}");
        let client = Client::with_transport(config, &recorder);
        client.create(b"{}", None).unwrap();
        client.fetch("a", None).unwrap();
        client.delete("a", 0, None).unwrap();
        for (req, _) in recorder.sent.borrow().iter() {
            assert_eq!(content_type(req), vec!["application/json"], "{:?}", req.method);
        }
    }

    #[test]
    fn reconfigure_builds_new_client() {
        let client = Client::from_config(config());
        let moved = client
            .reconfigure(Parameters::new("/v2/organisation/", "accounts"))
            .unwrap();
        assert_eq!(moved.target_uri(), "http://h:8080/v2/organisation/accounts/");
        assert_eq!(client.target_uri(), "http://h:8080/v1/organisation/accounts/");
    }

    #[test]
    fn reconfigure_rejects_empty_resource() {
        let client = Client::from_config(config());
        let err = client
            .reconfigure(Parameters::new("/v2/organisation/", ""))
            .unwrap_err();
        assert!(matches!(err, ApiError::MissingParameter(Parameter::Resource)));
    }
}
