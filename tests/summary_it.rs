// crates.io
use httpmock::prelude::*;
// self
use dcos_telemetry::{
	_preludet::*,
	error::{ApiError, Error},
	model::{Slave, Summary},
};

#[tokio::test]
async fn summary_decodes_an_empty_agent_roster() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/mesos/master/state-summary");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"cluster": "a", "slaves": []}"#);
		})
		.await;
	let client = test_cluster_client(&server.base_url());
	let summary = client.summary().await.expect("An empty roster should decode.");

	assert_eq!(summary, Summary { cluster: "a".into(), slaves: Vec::new() });

	mock.assert_async().await;
}

#[tokio::test]
async fn summary_preserves_agent_order() {
	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/mesos/master/state-summary");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"cluster": "a", "slaves": [{"id": "a"}, {"id": "b"}]}"#);
		})
		.await;
	let client = test_cluster_client(&server.base_url());
	let summary = client.summary().await.expect("A populated roster should decode.");

	assert_eq!(summary, Summary {
		cluster: "a".into(),
		slaves: vec![Slave { id: "a".into() }, Slave { id: "b".into() }],
	});
}

#[tokio::test]
async fn summary_falls_back_to_the_status_line_on_an_unparseable_body() {
	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/mesos/master/state-summary");
			then.status(401).header("content-type", "text/html").body("<html></html>");
		})
		.await;
	let client = test_cluster_client(&server.base_url());
	let err = client.summary().await.expect_err("A 401 should surface as an error.");

	match err {
		Error::Api(api) => {
			assert_eq!(api, ApiError::new(StatusCode::UNAUTHORIZED, "401 Unauthorized", ""));
		},
		other => panic!("Expected an API error, got {other:?}."),
	}
}

#[tokio::test]
async fn repeated_calls_yield_equal_snapshots() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/mesos/master/state-summary");
			then.status(200)
				.header("content-type", "application/json")
				.body(r#"{"cluster": "a", "slaves": [{"id": "a"}]}"#);
		})
		.await;
	let client = test_cluster_client(&server.base_url());
	let first = client.summary().await.expect("First call should succeed.");
	let second = client.summary().await.expect("Second call should succeed.");

	assert_eq!(first, second);

	mock.assert_calls_async(2).await;
}

#[tokio::test]
async fn unreachable_clusters_surface_as_transport_errors() {
	// Nothing listens on the discard port, so the dial itself fails.
	let client = test_cluster_client("http://127.0.0.1:9");
	let err = client.summary().await.expect_err("An unreachable cluster should not decode.");

	assert!(matches!(err, Error::Transport(_)));
}
