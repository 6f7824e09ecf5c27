use serde::{Deserialize, Serialize};

/// Provider-side numeric account id (`pk`). Stable across requests; the
/// primary key for matching records between lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

/// One account as observed in a followers or followees listing.
///
/// Serializes in the provider's native shape (`pk` / `username`); any other
/// fields the provider returned are retained opaquely in `extra` so the
/// persisted snapshot stays faithful to the response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "pk")]
    pub id: UserId,
    #[serde(rename = "username")]
    pub handle: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UserRecord {
    pub fn new(id: u64, handle: impl Into<String>) -> Self {
        Self {
            id: UserId(id),
            handle: handle.into(),
            extra: serde_json::Map::new(),
        }
    }
}

/// Ordered snapshot of one relation at one point in time. Order is provider
/// pagination order and carries no meaning beyond display.
pub type UserList = Vec<UserRecord>;

/// Which relation of the authenticated account a listing covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relation {
    /// Accounts that follow the authenticated account.
    Followers,
    /// Accounts the authenticated account follows.
    Followees,
}

impl Relation {
    pub fn as_str(self) -> &'static str {
        match self {
            Relation::Followers => "followers",
            Relation::Followees => "followees",
        }
    }
}

impl std::fmt::Display for Relation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_in_provider_shape() {
        let rec = UserRecord::new(42, "alice");
        let v = serde_json::to_value(&rec).unwrap();
        assert_eq!(v, serde_json::json!({"pk": 42, "username": "alice"}));
    }

    #[test]
    fn record_retains_unknown_provider_fields() {
        let raw = serde_json::json!({
            "pk": 7,
            "username": "bob",
            "full_name": "Bob B.",
            "is_private": true,
        });
        let rec: UserRecord = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(rec.id, UserId(7));
        assert_eq!(rec.handle, "bob");
        assert_eq!(rec.extra.get("full_name").unwrap(), "Bob B.");

        // Round-trips without dropping the extras.
        assert_eq!(serde_json::to_value(&rec).unwrap(), raw);
    }

    #[test]
    fn record_requires_pk_and_username() {
        assert!(serde_json::from_value::<UserRecord>(serde_json::json!({"username": "x"})).is_err());
        assert!(serde_json::from_value::<UserRecord>(serde_json::json!({"pk": 1})).is_err());
    }
}
