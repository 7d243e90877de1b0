//! Opaque session token wrapper that redacts sensitive material.

// self
use crate::_prelude::*;

/// Opaque authentication token issued by the login endpoint.
///
/// The wrapper keeps the token text out of logs; callers needing the raw value
/// go through [`expose`](AuthToken::expose) deliberately.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken(String);
impl AuthToken {
	/// Wraps a token string returned by the login endpoint.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for AuthToken {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for AuthToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("AuthToken").field(&"<redacted>").finish()
	}
}
impl Display for AuthToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}
