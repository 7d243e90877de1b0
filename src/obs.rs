//! Optional observability helpers for endpoint calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `dcos_telemetry.call`
//!   with the `call` (endpoint) and `stage` (call site) fields.
//! - Enable `metrics` to increment the `dcos_telemetry_call_total` counter for
//!   every attempt/success/failure, labeled by `call` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Endpoint calls observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
	/// Per-container metrics fetch.
	ContainerMetrics,
	/// Signed-assertion login exchange.
	Login,
	/// Per-node metrics fetch.
	NodeMetrics,
	/// Cluster state-summary fetch.
	Summary,
}
impl CallKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallKind::ContainerMetrics => "container_metrics",
			CallKind::Login => "login",
			CallKind::NodeMetrics => "node_metrics",
			CallKind::Summary => "summary",
		}
	}
}
impl Display for CallKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to an endpoint method.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
