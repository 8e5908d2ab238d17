//! Per-request correlation identifier.
//!
//! The [`Trace`](crate::Trace) middleware generates one [`TraceId`] per HTTP
//! request and runs the rest of the request inside [`TraceId::scope`]. Code
//! running on that task can then call [`TraceId::current`]; [`Error`] does so
//! when it is built, which is how error bodies end up with a `traceId`.
//!
//! The id is task-local. Work moved onto another task or a blocking thread
//! must be wrapped in [`TraceId::scope`] again to keep it.
//!
//! [`Error`]: crate::domain::Error

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use uuid::Uuid;

tokio::task_local! {
    static ACTIVE: TraceId;
}

/// Random UUID naming one request.
///
/// # Examples
/// ```
/// use geonotes::TraceId;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let id: TraceId = "6f1c1b7e-4f0a-4c55-9d1e-2b8f1c0e9a71".parse().unwrap();
/// let seen = TraceId::scope(id, async { TraceId::current() }).await;
/// assert_eq!(seen, Some(id));
/// assert_eq!(TraceId::current(), None);
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Fresh random (v4) identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Identifier of the request the calling task is serving, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        ACTIVE.try_with(|id| *id).ok()
    }

    /// Run `fut` with `id` as the current identifier. Scopes nest; the outer
    /// identifier is visible again once `fut` completes.
    pub async fn scope<F: Future>(id: Self, fut: F) -> F::Output {
        ACTIVE.scope(id, fut).await
    }
}

impl From<Uuid> for TraceId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}
