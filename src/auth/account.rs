//! Service-account identity used to mint login assertions.

// crates.io
use rsa::{RsaPrivateKey, pkcs1::DecodeRsaPrivateKey, pkcs8::DecodePrivateKey};
// self
use crate::{_prelude::*, error::SigningError};

/// Machine identity authenticated with an RSA private key instead of a password.
///
/// The account is supplied once by the caller and cloned into the client, which
/// signs fresh login assertions from it whenever the session must authenticate.
#[derive(Clone)]
pub struct ServiceAccount {
	/// Account identifier presented as the `uid` claim during login.
	pub account_id: String,
	private_key: RsaPrivateKey,
}
impl ServiceAccount {
	/// Creates an account from an identifier and an already-parsed RSA key.
	pub fn new(account_id: impl Into<String>, private_key: RsaPrivateKey) -> Self {
		Self { account_id: account_id.into(), private_key }
	}

	/// Parses a PEM-encoded RSA private key (PKCS#8 or PKCS#1) into an account.
	pub fn from_pem(account_id: impl Into<String>, pem: &str) -> Result<Self, SigningError> {
		let private_key = RsaPrivateKey::from_pkcs8_pem(pem)
			.or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
			.map_err(SigningError::malformed_key)?;

		Ok(Self::new(account_id, private_key))
	}

	pub(crate) fn private_key(&self) -> &RsaPrivateKey {
		&self.private_key
	}
}
impl Debug for ServiceAccount {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ServiceAccount")
			.field("account_id", &self.account_id)
			.field("private_key", &"<redacted>")
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::_preludet::*;

	#[test]
	fn from_pem_accepts_pkcs8() {
		let account = test_service_account("telegraf");

		assert_eq!(account.account_id, "telegraf");
	}

	#[test]
	fn from_pem_rejects_garbage() {
		let err = ServiceAccount::from_pem("telegraf", "not a key")
			.expect_err("Garbage PEM should be rejected.");

		assert!(matches!(err, SigningError::MalformedKey { .. }));
	}

	#[test]
	fn debug_redacts_the_key() {
		let rendered = format!("{:?}", test_service_account("telegraf"));

		assert!(rendered.contains("telegraf"));
		assert!(rendered.contains("<redacted>"));
		assert!(!rendered.contains("PRIVATE KEY"));
	}
}
