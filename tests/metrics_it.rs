// crates.io
use httpmock::prelude::*;
// self
use dcos_telemetry::{_preludet::*, model::Metrics};

#[tokio::test]
async fn node_metrics_decodes_an_empty_object() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/system/v1/agent/foo/metrics/v0/node");
			then.status(200).header("content-type", "application/json").body("{}");
		})
		.await;
	let client = test_cluster_client(&server.base_url());
	let metrics =
		client.node_metrics("foo").await.expect("An empty document should decode.");

	assert_eq!(metrics, Metrics::default());

	mock.assert_async().await;
}

#[tokio::test]
async fn node_metrics_decodes_datapoints() {
	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/system/v1/agent/foo/metrics/v0/node");
			then.status(200).header("content-type", "application/json").body(
				r#"{
					"datapoints": [
						{"name": "cpus.total", "unit": "count", "value": 8.0},
						{"name": "load.1min", "tags": {"interface": "lo"}, "unit": "", "value": 0.25}
					],
					"dimensions": {"mesos_id": "foo"}
				}"#,
			);
		})
		.await;
	let client = test_cluster_client(&server.base_url());
	let metrics =
		client.node_metrics("foo").await.expect("A populated document should decode.");

	assert_eq!(metrics.datapoints.len(), 2);
	assert_eq!(metrics.datapoints[0].name, "cpus.total");
	assert_eq!(metrics.datapoints[1].tags["interface"], "lo");
	assert_eq!(metrics.dimensions["mesos_id"], "foo");
}

#[tokio::test]
async fn container_metrics_treats_no_content_as_the_empty_document() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/system/v1/agent/foo/metrics/v0/containers/bar");
			then.status(204);
		})
		.await;
	let client = test_cluster_client(&server.base_url());
	let metrics = client
		.container_metrics("foo", "bar")
		.await
		.expect("A 204 response should decode to the empty document.");

	assert_eq!(metrics, Metrics::default());

	mock.assert_async().await;
}

#[tokio::test]
async fn container_metrics_treats_a_blank_body_as_the_empty_document() {
	let server = MockServer::start_async().await;
	let _mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/system/v1/agent/foo/metrics/v0/containers/bar");
			then.status(200).body("");
		})
		.await;
	let client = test_cluster_client(&server.base_url());
	let metrics = client
		.container_metrics("foo", "bar")
		.await
		.expect("A blank 200 body should decode to the empty document.");

	assert_eq!(metrics, Metrics::default());
}
