//! Response classification and JSON decoding for the cluster's endpoint shapes.
//!
//! The upstream API is inconsistent about failures: some endpoints answer with
//! a structured `{"title","description"}` document, others with HTML or no
//! body at all. Decoding therefore runs dual-path, falling back to the status
//! line whenever the structured shape is absent.

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	error::{ApiError, DecodeError},
	http::RawResponse,
};

const SNIPPET_LIMIT: usize = 256;

/// Decodes a classified response into the endpoint's expected shape.
///
/// 2xx with content decodes the JSON body; 204 or a 2xx without content yields
/// the zero value of the target; any other status decodes as [`ApiError`].
pub fn decode_response<T>(response: &RawResponse) -> Result<T>
where
	T: DeserializeOwned + Default,
{
	if !response.is_success() {
		return Err(decode_error_body(response).into());
	}
	if response.is_empty_success() {
		return Ok(T::default());
	}

	decode_json(&response.body).map_err(Error::from)
}

/// Deserializes a JSON body into `T`, reporting failures with the offending
/// JSON path and a body snippet.
pub fn decode_json<T>(body: &[u8]) -> Result<T, DecodeError>
where
	T: DeserializeOwned,
{
	let mut deserializer = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut deserializer).map_err(|source| DecodeError {
		target: std::any::type_name::<T>(),
		snippet: snippet(body),
		source,
	})
}

/// Builds the typed API error for a non-2xx response.
///
/// The structured `{"title","description"}` shape wins when it parses; any
/// other body falls back to the status line as the title with an empty
/// description.
pub fn decode_error_body(response: &RawResponse) -> ApiError {
	#[derive(Deserialize)]
	struct ErrorBody {
		title: String,
		description: String,
	}

	match serde_json::from_slice::<ErrorBody>(&response.body) {
		Ok(body) => ApiError::new(response.status, body.title, body.description),
		Err(_) => ApiError::from_status(response.status),
	}
}

fn snippet(body: &[u8]) -> String {
	let text = String::from_utf8_lossy(body);

	match text.char_indices().nth(SNIPPET_LIMIT) {
		Some((cut, _)) => format!("{}...", &text[..cut]),
		None => text.into_owned(),
	}
}
