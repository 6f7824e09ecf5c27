use serde_json::Value;

use crate::{
    domain::{Relation, UserRecord},
    Result,
};

/// An authenticated provider session.
///
/// The `state` blob is opaque to core; only the adapter that produced it can
/// interpret it. Created at login or restore, invalidated when the provider
/// rejects it (`AuthExpired`).
#[derive(Clone, Debug)]
pub struct Session {
    pub state: Value,
}

/// One page of a paginated listing, in provider order.
#[derive(Clone, Debug)]
pub struct Page {
    pub records: Vec<UserRecord>,
    /// Cursor for the next page; `None` means the listing is exhausted.
    pub next_cursor: Option<String>,
}

/// Port for the external social-graph provider.
///
/// Login failures surface as `InvalidCredentials` or `TwoFactorRequired`
/// (carrying the identifier to feed back into [`two_factor_login`]); a
/// session rejected mid-pagination surfaces as `AuthExpired`.
///
/// [`two_factor_login`]: GraphProvider::two_factor_login
#[async_trait::async_trait]
pub trait GraphProvider: Send + Sync {
    async fn login(&self, username: &str, password: &str) -> Result<Session>;

    async fn two_factor_login(&self, identifier: &str, code: &str) -> Result<Session>;

    /// Serialize a session for reuse across runs without re-authenticating.
    fn serialize_session(&self, session: &Session) -> Result<Value>;

    fn restore_session(&self, blob: Value) -> Result<Session>;

    async fn fetch_page(
        &self,
        session: &Session,
        relation: Relation,
        cursor: Option<&str>,
    ) -> Result<Page>;
}
