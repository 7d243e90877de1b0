//! Client-level error taxonomy shared across signing, request execution, and decoding.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// The remote endpoint explicitly rejected the request.
	#[error(transparent)]
	Api(#[from] ApiError),
	/// Local configuration problem raised while building the client.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// A response body did not match the JSON shape expected by the endpoint.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// Credential signing failed before the login request was issued.
	#[error(transparent)]
	Signing(#[from] SigningError),
	/// Network-level failure before an HTTP status was obtained.
	#[error(transparent)]
	Transport(#[from] TransportError),
}

/// Structured rejection returned by the cluster API for any non-2xx response.
///
/// Equality is structural across all three fields so callers can branch on
/// exact error identity, such as re-authenticating on 401 or skipping a poll
/// cycle on 404.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiError {
	/// HTTP status code returned by the endpoint.
	pub status_code: StatusCode,
	/// Error title, taken from the structured body or the status line.
	pub title: String,
	/// Longer error description; empty when the body carried none.
	pub description: String,
}
impl ApiError {
	/// Creates an error from a structured `{"title","description"}` body.
	pub fn new(
		status_code: StatusCode,
		title: impl Into<String>,
		description: impl Into<String>,
	) -> Self {
		Self { status_code, title: title.into(), description: description.into() }
	}

	/// Creates the status-line fallback used when the body is absent or unparseable.
	pub fn from_status(status_code: StatusCode) -> Self {
		Self { status_code, title: status_code.to_string(), description: String::new() }
	}
}
impl Display for ApiError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		if self.description.is_empty() {
			f.write_str(&self.title)
		} else {
			write!(f, "{}: {}", self.title, self.description)
		}
	}
}
impl std::error::Error for ApiError {}

/// Configuration and validation failures raised while building a client.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ConfigError {
	/// Base URL cannot carry request paths (for example `mailto:` URLs).
	#[error("Cluster base URL cannot carry request paths.")]
	OpaqueBaseUrl,
	/// The admission gate must admit at least one request.
	#[error("The maximum concurrent request count must be at least 1.")]
	ZeroConcurrency,
}

/// Credential signing failures; fatal for that login attempt and never retried.
#[derive(Debug, ThisError)]
pub enum SigningError {
	/// Service-account private key could not be parsed.
	#[error("Service-account private key is malformed.")]
	MalformedKey {
		/// Underlying PEM or DER parsing failure.
		#[source]
		source: BoxError,
	},
	/// Login payload could not be serialized into JSON.
	#[error("Login payload could not be serialized.")]
	Payload {
		/// Underlying serialization failure.
		#[source]
		source: serde_json::Error,
	},
	/// The signature operation itself failed.
	#[error("Signing the login assertion failed.")]
	Signature {
		/// Underlying signature failure.
		#[source]
		source: rsa::signature::Error,
	},
}
impl SigningError {
	/// Wraps a key-parsing failure.
	pub fn malformed_key(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::MalformedKey { source: Box::new(src) }
	}
}

/// Transport-level failures raised before an HTTP status was obtained.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// The in-flight call was cancelled before completing.
	#[error("Cluster API call was cancelled before completing.")]
	Cancelled,
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the cluster API.")]
	Io(#[from] std::io::Error),
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the cluster API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// The response timeout elapsed before the round trip completed.
	#[error("Cluster API call timed out.")]
	Timeout {
		/// Transport-specific timeout error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// Wraps a transport-specific timeout error.
	pub fn timeout(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Timeout { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		if e.is_timeout() { Self::timeout(e) } else { Self::network(e) }
	}
}

/// Raised when a response body fails to parse as the endpoint's expected shape.
#[derive(Debug, ThisError)]
#[error("Response body did not match the shape expected for {target}.")]
pub struct DecodeError {
	/// Name of the Rust type the body was decoded into.
	pub target: &'static str,
	/// Truncated copy of the offending body kept for diagnostics.
	pub snippet: String,
	/// Structured parsing failure naming the offending JSON path.
	#[source]
	pub source: serde_path_to_error::Error<serde_json::Error>,
}
