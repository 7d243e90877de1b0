//! Cluster client orchestration: session, admission, execution, and decoding.

// crates.io
use http::{
	HeaderMap, HeaderValue, Method,
	header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
};
use serde::de::DeserializeOwned;
// self
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;
use crate::{
	_prelude::*,
	auth::{self, AuthToken, ServiceAccount, session::Session},
	codec,
	error::{ConfigError, SigningError},
	http::{ApiRequest, RawResponse, Transport},
	model::{Metrics, Summary},
	obs::{self, CallKind, CallOutcome, CallSpan},
};

/// Default per-call response timeout applied when the builder does not override it.
pub const DEFAULT_RESPONSE_TIMEOUT: Duration = Duration::from_secs(20);
/// Default ceiling on simultaneous in-flight requests per client instance.
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 10;

const LOGIN_SEGMENTS: &[&str] = &["acs", "api", "v1", "auth", "login"];
const SUMMARY_SEGMENTS: &[&str] = &["mesos", "master", "state-summary"];

#[derive(Serialize)]
struct LoginRequest<'a> {
	uid: &'a str,
	token: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
	token: String,
}

/// Client for the cluster's telemetry surface.
///
/// One instance serves many concurrent callers; clones share the session, the
/// admission gate, and the transport. Endpoint methods ensure a valid session
/// token (when a service account is configured), execute the call under the
/// admission gate, and decode the response into its typed shape or error.
#[derive(Clone)]
pub struct ClusterClient {
	base_url: Url,
	transport: Arc<dyn Transport>,
	session: Arc<Session>,
	admission: Arc<Semaphore>,
	response_timeout: Duration,
}
impl ClusterClient {
	/// Starts building a client for the given cluster base URL.
	pub fn builder(base_url: Url) -> ClusterClientBuilder {
		ClusterClientBuilder::new(base_url)
	}

	/// Seeds the session with a token obtained elsewhere.
	///
	/// Useful when an outer layer manages authentication itself; subsequent
	/// calls attach this token until a 401 invalidates it.
	pub fn set_auth_token(&self, token: AuthToken) {
		self.session.store(token);
	}

	/// Exchanges a signed service-account assertion for a session token.
	///
	/// A successful login also stores the token for subsequent calls. Login
	/// failures are terminal for this call; the client never retries them.
	pub async fn login(&self, account: &ServiceAccount) -> Result<AuthToken> {
		const KIND: CallKind = CallKind::Login;

		let span = CallSpan::new(KIND, "login");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span.instrument(self.login_inner(account)).await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		result
	}

	/// Fetches the cluster state summary (cluster name plus agent roster).
	pub async fn summary(&self) -> Result<Summary> {
		self.fetch(CallKind::Summary, "summary", self.endpoint_url(SUMMARY_SEGMENTS)).await
	}

	/// Fetches the node-level metrics document for one agent.
	///
	/// An empty document (`{}` or a blank body) is a success and decodes to the
	/// zero value.
	pub async fn node_metrics(&self, node_id: &str) -> Result<Metrics> {
		let url = self.endpoint_url(&["system", "v1", "agent", node_id, "metrics", "v0", "node"]);

		self.fetch(CallKind::NodeMetrics, "node_metrics", url).await
	}

	/// Fetches one container's metrics document from an agent.
	///
	/// The endpoint answers 204 for containers currently reporting nothing;
	/// that decodes to the zero-valued document rather than an error.
	pub async fn container_metrics(&self, node_id: &str, container_id: &str) -> Result<Metrics> {
		let url = self.endpoint_url(&[
			"system", "v1", "agent", node_id, "metrics", "v0", "containers", container_id,
		]);

		self.fetch(CallKind::ContainerMetrics, "container_metrics", url).await
	}

	async fn login_inner(&self, account: &ServiceAccount) -> Result<AuthToken> {
		let assertion = auth::sign(account, OffsetDateTime::now_utc())?;
		let payload = LoginRequest { uid: &account.account_id, token: &assertion };
		let body =
			serde_json::to_vec(&payload).map_err(|source| SigningError::Payload { source })?;
		let mut headers = HeaderMap::new();

		headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

		let request = ApiRequest {
			method: Method::POST,
			url: self.endpoint_url(LOGIN_SEGMENTS),
			headers,
			body: Some(body),
			timeout: self.response_timeout,
		};
		let response = self.dispatch(request).await?;

		if !response.is_success() {
			return Err(codec::decode_error_body(&response).into());
		}

		let login: LoginResponse = codec::decode_json(&response.body)?;
		let token = AuthToken::new(login.token);

		self.session.store(token.clone());

		Ok(token)
	}

	async fn fetch<T>(&self, kind: CallKind, stage: &'static str, url: Url) -> Result<T>
	where
		T: DeserializeOwned + Default,
	{
		let span = CallSpan::new(kind, stage);

		obs::record_call_outcome(kind, CallOutcome::Attempt);

		let result = span.instrument(self.fetch_inner(url)).await;

		match &result {
			Ok(_) => obs::record_call_outcome(kind, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(kind, CallOutcome::Failure),
		}

		result
	}

	async fn fetch_inner<T>(&self, url: Url) -> Result<T>
	where
		T: DeserializeOwned + Default,
	{
		let token = self.ensure_authenticated().await?;
		let response = self.dispatch(self.get_request(url.clone(), token.as_ref())).await?;

		if response.status == StatusCode::UNAUTHORIZED {
			return self.recover_unauthorized(url, token, response).await;
		}

		codec::decode_response(&response)
	}

	/// Handles a 401 on a token-bearing call: invalidate the rejected token,
	/// then re-login and retry the call exactly once when a service account is
	/// available. A second 401 surfaces to the caller; the client never loops.
	async fn recover_unauthorized<T>(
		&self,
		url: Url,
		token: Option<AuthToken>,
		response: RawResponse,
	) -> Result<T>
	where
		T: DeserializeOwned + Default,
	{
		let Some(rejected) = token else {
			return codec::decode_response(&response);
		};

		self.session.invalidate(&rejected);

		if self.session.account().is_none() {
			return codec::decode_response(&response);
		}

		let fresh = self.ensure_authenticated().await?;
		let retry = self.dispatch(self.get_request(url, fresh.as_ref())).await?;

		codec::decode_response(&retry)
	}

	/// Returns the held token, logging in first when a service account is
	/// configured and no token is held. Concurrent unauthenticated callers
	/// funnel into one login round trip; waiters adopt the stored token.
	async fn ensure_authenticated(&self) -> Result<Option<AuthToken>> {
		if let Some(token) = self.session.current() {
			return Ok(Some(token));
		}

		let Some(account) = self.session.account().cloned() else {
			return Ok(None);
		};
		let _authenticating = self.session.begin_login().await;

		// A concurrent login may have finished while waiting on the guard.
		if let Some(token) = self.session.current() {
			return Ok(Some(token));
		}

		Ok(Some(self.login(&account).await?))
	}

	async fn dispatch(&self, request: ApiRequest) -> Result<RawResponse> {
		let _permit = self.admission.acquire().await;

		Ok(self.transport.execute(request).await?)
	}

	fn get_request(&self, url: Url, token: Option<&AuthToken>) -> ApiRequest {
		let mut headers = HeaderMap::new();

		headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

		// The cluster API authenticates with a `token=` authorization scheme; a
		// token with invalid header octets falls through to an unauthenticated
		// call and surfaces as a 401.
		let authorization = token
			.and_then(|token| HeaderValue::from_str(&format!("token={}", token.expose())).ok());

		if let Some(value) = authorization {
			headers.insert(AUTHORIZATION, value);
		}

		ApiRequest { method: Method::GET, url, headers, body: None, timeout: self.response_timeout }
	}

	fn endpoint_url(&self, segments: &[&str]) -> Url {
		let mut url = self.base_url.clone();

		// The builder rejects cannot-be-a-base URLs, so the path is editable.
		if let Ok(mut path) = url.path_segments_mut() {
			path.pop_if_empty().extend(segments);
		}

		url
	}
}
impl Debug for ClusterClient {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClusterClient")
			.field("base_url", &self.base_url.as_str())
			.field("response_timeout", &self.response_timeout)
			.field("authenticated", &self.session.current().is_some())
			.finish()
	}
}

/// Builder collecting the client's construction parameters.
pub struct ClusterClientBuilder {
	base_url: Url,
	transport: Option<Arc<dyn Transport>>,
	service_account: Option<ServiceAccount>,
	response_timeout: Duration,
	max_concurrent_requests: usize,
}
impl ClusterClientBuilder {
	fn new(base_url: Url) -> Self {
		Self {
			base_url,
			transport: None,
			service_account: None,
			response_timeout: DEFAULT_RESPONSE_TIMEOUT,
			max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
		}
	}

	/// Attaches a service account so endpoint calls authenticate automatically.
	pub fn service_account(mut self, account: ServiceAccount) -> Self {
		self.service_account = Some(account);

		self
	}

	/// Overrides the per-call response timeout (defaults to 20 seconds).
	pub fn response_timeout(mut self, timeout: Duration) -> Self {
		self.response_timeout = timeout;

		self
	}

	/// Overrides the ceiling on simultaneous in-flight requests (defaults to 10).
	pub fn max_concurrent_requests(mut self, limit: usize) -> Self {
		self.max_concurrent_requests = limit;

		self
	}

	/// Supplies a custom transport in place of the bundled reqwest one.
	pub fn transport<T>(mut self, transport: T) -> Self
	where
		T: Transport,
	{
		self.transport = Some(Arc::new(transport));

		self
	}

	/// Builds the client, provisioning the bundled reqwest transport when no
	/// custom one was supplied.
	#[cfg(feature = "reqwest")]
	pub fn build(mut self) -> Result<ClusterClient, ConfigError> {
		let transport =
			self.transport.take().unwrap_or_else(|| Arc::new(ReqwestTransport::default()));

		self.assemble(transport)
	}

	/// Builds the client with the supplied transport; available without the
	/// `reqwest` feature.
	pub fn build_with_transport<T>(self, transport: T) -> Result<ClusterClient, ConfigError>
	where
		T: Transport,
	{
		let transport: Arc<dyn Transport> = Arc::new(transport);

		self.assemble(transport)
	}

	fn assemble(self, transport: Arc<dyn Transport>) -> Result<ClusterClient, ConfigError> {
		if self.base_url.cannot_be_a_base() {
			return Err(ConfigError::OpaqueBaseUrl);
		}
		if self.max_concurrent_requests == 0 {
			return Err(ConfigError::ZeroConcurrency);
		}

		Ok(ClusterClient {
			base_url: self.base_url,
			transport,
			session: Arc::new(Session::new(self.service_account)),
			admission: Arc::new(Semaphore::new(self.max_concurrent_requests)),
			response_timeout: self.response_timeout,
		})
	}
}
