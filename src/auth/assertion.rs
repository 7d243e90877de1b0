//! Login assertion minting: a compact RS256 JWS over the account's `uid` claim.
//!
//! The assertion is created per login attempt, exchanged once for a session
//! token, and discarded; nothing here touches client state.

// crates.io
use base64::prelude::{BASE64_URL_SAFE_NO_PAD, Engine as _};
use rsa::{
	pkcs1v15::SigningKey,
	signature::{SignatureEncoding, Signer as _},
};
use sha2::Sha256;
use time::Duration;
// self
use crate::{_prelude::*, auth::ServiceAccount, error::SigningError};

/// How long a freshly minted assertion stays acceptable to the login endpoint.
pub const ASSERTION_VALIDITY: Duration = Duration::minutes(5);

#[derive(Serialize)]
struct AssertionHeader {
	alg: &'static str,
	typ: &'static str,
}

#[derive(Serialize)]
struct AssertionClaims<'a> {
	uid: &'a str,
	#[serde(with = "time::serde::timestamp")]
	exp: OffsetDateTime,
}

/// Renders and signs the compact login assertion for `account`, valid for
/// [`ASSERTION_VALIDITY`] after `now`.
pub fn sign(account: &ServiceAccount, now: OffsetDateTime) -> Result<String, SigningError> {
	let header = AssertionHeader { alg: "RS256", typ: "JWT" };
	let claims = AssertionClaims { uid: &account.account_id, exp: now + ASSERTION_VALIDITY };
	let signing_input = format!("{}.{}", encode_segment(&header)?, encode_segment(&claims)?);
	let signing_key = SigningKey::<Sha256>::new(account.private_key().clone());
	let signature = signing_key
		.try_sign(signing_input.as_bytes())
		.map_err(|source| SigningError::Signature { source })?;

	Ok(format!("{signing_input}.{}", BASE64_URL_SAFE_NO_PAD.encode(signature.to_bytes())))
}

fn encode_segment<T>(segment: &T) -> Result<String, SigningError>
where
	T: Serialize,
{
	let json = serde_json::to_vec(segment).map_err(|source| SigningError::Payload { source })?;

	Ok(BASE64_URL_SAFE_NO_PAD.encode(json))
}
