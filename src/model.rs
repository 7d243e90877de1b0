//! Decoded shapes for the cluster telemetry endpoints.
//!
//! Every field defaults so the metrics endpoints' "no content" responses (204,
//! empty body, `{}`) decode to the zero value instead of failing.

// self
use crate::_prelude::*;

/// Top-level cluster snapshot returned by the state-summary endpoint.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Summary {
	/// Human-readable cluster name.
	pub cluster: String,
	/// One entry per agent node; empty when the cluster reports no agents,
	/// never absent on a successful call.
	pub slaves: Vec<Slave>,
}

/// One agent node entry from the state summary.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Slave {
	/// Agent identifier interpolated into the per-node metrics paths.
	pub id: String,
}

/// Metrics document for a node or container; may be entirely empty.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Metrics {
	/// Individual measurements carried by the document.
	pub datapoints: Vec<Datapoint>,
	/// Document-level dimensions that apply to every datapoint.
	pub dimensions: serde_json::Map<String, serde_json::Value>,
}

/// Single measurement with its name, unit, value, and tags.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Datapoint {
	/// Measurement name, such as `cpus.total`.
	pub name: String,
	/// Per-datapoint tags.
	pub tags: BTreeMap<String, String>,
	/// Unit label reported by the agent.
	pub unit: String,
	/// Measurement value.
	pub value: f64,
}
