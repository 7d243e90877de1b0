//! Transport primitives for cluster API calls.
//!
//! [`Transport`] is the client's only dependency on an HTTP stack. The bundled
//! [`ReqwestTransport`] covers the common case; callers with bespoke TLS or
//! proxy needs implement the trait (or wrap their own [`ReqwestClient`]) and
//! hand it to the client builder.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
use http::{HeaderMap, Method};
// self
use crate::{_prelude::*, error::TransportError};

/// Boxed future returned by [`Transport::execute`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<RawResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing cluster API calls.
///
/// Implementations perform exactly one round trip per call, honor the
/// request's timeout, and report pre-status failures as [`TransportError`];
/// non-2xx statuses are not errors at this layer. They must be `Send + Sync +
/// 'static` so one transport can be shared across concurrent callers.
pub trait Transport
where
	Self: 'static + Send + Sync,
{
	/// Executes a single HTTP round trip.
	fn execute(&self, request: ApiRequest) -> TransportFuture<'_>;
}

/// One outbound cluster API call, fully prepared by the client.
#[derive(Clone, Debug)]
pub struct ApiRequest {
	/// HTTP method.
	pub method: Method,
	/// Absolute request URL.
	pub url: Url,
	/// Headers to send, including authorization when a session token is held.
	pub headers: HeaderMap,
	/// JSON payload for POST calls.
	pub body: Option<Vec<u8>>,
	/// Response timeout for this round trip.
	pub timeout: Duration,
}

/// Raw status and body captured from one round trip, before decoding.
#[derive(Clone, Debug)]
pub struct RawResponse {
	/// HTTP status returned by the endpoint.
	pub status: StatusCode,
	/// Response body octets; may be empty.
	pub body: Vec<u8>,
}
impl RawResponse {
	/// Returns `true` for any 2xx status.
	pub fn is_success(&self) -> bool {
		self.status.is_success()
	}

	/// Success without content: 204, or a 2xx with an empty or blank body.
	pub fn is_empty_success(&self) -> bool {
		self.is_success()
			&& (self.status == StatusCode::NO_CONTENT
				|| self.body.iter().all(u8::is_ascii_whitespace))
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one
/// place. Supply a custom [`ReqwestClient`] to control TLS roots, proxies, or
/// connection pooling; per-request timeouts are applied by the client itself.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestTransport {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestTransport {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Transport for ReqwestTransport {
	fn execute(&self, request: ApiRequest) -> TransportFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let mut builder = client
				.request(request.method, request.url)
				.headers(request.headers)
				.timeout(request.timeout);

			if let Some(body) = request.body {
				builder = builder.body(body);
			}

			let response = builder.send().await.map_err(TransportError::from)?;
			let status = response.status();
			let body = response.bytes().await.map_err(TransportError::from)?.to_vec();

			Ok(RawResponse { status, body })
		})
	}
}
