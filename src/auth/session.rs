//! Session token state shared by every caller of one client instance.

// self
use crate::{
	_prelude::*,
	auth::{AuthToken, ServiceAccount},
};

/// Tracks the login token and serializes state transitions.
///
/// The session is either unauthenticated (no token held) or authenticated; the
/// async guard marks the transient authenticating state, so an unauthenticated
/// stampede funnels into a single login round trip while the rest of the
/// callers wait for its outcome.
pub(crate) struct Session {
	account: Option<ServiceAccount>,
	token: RwLock<Option<AuthToken>>,
	login_guard: AsyncMutex<()>,
}
impl Session {
	pub(crate) fn new(account: Option<ServiceAccount>) -> Self {
		Self { account, token: RwLock::new(None), login_guard: AsyncMutex::new(()) }
	}

	/// Service account available for automatic logins, if any.
	pub(crate) fn account(&self) -> Option<&ServiceAccount> {
		self.account.as_ref()
	}

	/// Returns the held token when the session is authenticated.
	pub(crate) fn current(&self) -> Option<AuthToken> {
		self.token.read().clone()
	}

	/// Stores a freshly issued token, transitioning to authenticated.
	pub(crate) fn store(&self, token: AuthToken) {
		*self.token.write() = Some(token);
	}

	/// Drops the held token, but only while it still equals the rejected one.
	///
	/// The comparison keeps a straggling 401 from discarding a fresh token that
	/// another caller stored after a newer login.
	pub(crate) fn invalidate(&self, rejected: &AuthToken) {
		let mut slot = self.token.write();

		if slot.as_ref() == Some(rejected) {
			*slot = None;
		}
	}

	/// Serializes login attempts; hold the guard across sign, login, and store.
	pub(crate) async fn begin_login(&self) -> async_lock::MutexGuard<'_, ()> {
		self.login_guard.lock().await
	}
}
impl Debug for Session {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Session")
			.field("account", &self.account)
			.field("authenticated", &self.token.read().is_some())
			.finish()
	}
}
