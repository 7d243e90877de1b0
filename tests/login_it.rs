// crates.io
use httpmock::prelude::*;
// self
use dcos_telemetry::{
	_preludet::*,
	error::{ApiError, Error},
};

#[tokio::test]
async fn login_returns_the_issued_token() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/acs/api/v1/auth/login")
				.header("content-type", "application/json");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"token": "XXX.YYY.ZZZ"}"#);
		})
		.await;
	let client = test_cluster_client(&server.base_url());
	let token = client
		.login(&test_service_account("telegraf"))
		.await
		.expect("Login should succeed against a 200 response.");

	assert_eq!(token.expose(), "XXX.YYY.ZZZ");

	mock.assert_async().await;
}

#[tokio::test]
async fn login_maps_a_structured_rejection() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/acs/api/v1/auth/login");
			then.status(401)
				.header("content-type", "application/json")
				.body(r#"{"title": "x", "description": "y"}"#);
		})
		.await;
	let client = test_cluster_client(&server.base_url());
	let err = client
		.login(&test_service_account("telegraf"))
		.await
		.expect_err("A 401 login response should surface as an error.");

	match err {
		Error::Api(api) => {
			assert_eq!(api, ApiError::new(StatusCode::UNAUTHORIZED, "x", "y"));
		},
		other => panic!("Expected an API error, got {other:?}."),
	}

	mock.assert_async().await;
}

#[tokio::test]
async fn login_reports_a_malformed_success_body() {
	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/acs/api/v1/auth/login");
			then.status(200).body("not json");
		})
		.await;
	let client = test_cluster_client(&server.base_url());
	let err = client
		.login(&test_service_account("telegraf"))
		.await
		.expect_err("A malformed login body should fail to decode.");

	match err {
		Error::Decode(decode) => {
			assert!(decode.target.ends_with("LoginResponse"));
			assert_eq!(decode.snippet, "not json");
		},
		other => panic!("Expected a decode error, got {other:?}."),
	}
}
