//! Instagram adapter (private web API).
//!
//! Implements the core `GraphProvider` port with a thin `reqwest` client:
//! password + two-factor login, cookie-based session reuse, and the
//! `max_id`-cursored friendship listings. No rate-limit handling or retries;
//! failures map into the core error taxonomy and surface to the operator.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use followgap_core::{
    domain::Relation,
    errors::Error,
    ports::{GraphProvider, Page, Session},
    Result,
};

const BASE_URL: &str = "https://i.instagram.com/api/v1";
const USER_AGENT: &str =
    "Instagram 275.0.0.27.98 Android (33/13; 420dpi; 1080x2158; Google; Pixel 7; panther; armv8l; en_US)";

/// Everything the adapter needs to resume a session: the authenticated
/// account id (listing URLs are keyed by it) and the auth cookies.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct IgSessionState {
    account_id: u64,
    cookie: String,
}

#[derive(Clone, Debug)]
pub struct IgClient {
    http: reqwest::Client,
    base_url: String,
    username: String,
    device_id: String,
}

impl IgClient {
    pub fn new(username: impl Into<String>) -> Self {
        Self::with_base_url(username, BASE_URL)
    }

    pub fn with_base_url(username: impl Into<String>, base_url: impl Into<String>) -> Self {
        let username = username.into();
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("reqwest client build");
        Self {
            http,
            base_url: base_url.into(),
            device_id: device_id_for(&username),
            username,
        }
    }

    async fn post_auth(&self, endpoint: &str, form: &[(&str, &str)]) -> Result<(u16, Value)> {
        let resp = self
            .http
            .post(format!("{}/accounts/{endpoint}/", self.base_url))
            .form(form)
            .send()
            .await
            .map_err(|e| Error::Provider(format!("instagram request error: {e}")))?;

        let status = resp.status().as_u16();
        let cookie = cookie_from_headers(
            resp.headers()
                .get_all(reqwest::header::SET_COOKIE)
                .iter()
                .filter_map(|v| v.to_str().ok()),
        );
        let body: Value = resp
            .json()
            .await
            .map_err(|e| Error::Provider(format!("instagram response was not json: {e}")))?;

        // Smuggle the cookie into the body for session_from_login below.
        Ok((status, attach_cookie(body, cookie)))
    }
}

#[async_trait::async_trait]
impl GraphProvider for IgClient {
    async fn login(&self, username: &str, password: &str) -> Result<Session> {
        let (status, body) = self
            .post_auth(
                "login",
                &[
                    ("username", username),
                    ("password", password),
                    ("device_id", self.device_id.as_str()),
                ],
            )
            .await?;

        session_from_login(status, body)
    }

    async fn two_factor_login(&self, identifier: &str, code: &str) -> Result<Session> {
        let (status, body) = self
            .post_auth(
                "two_factor_login",
                &[
                    ("username", self.username.as_str()),
                    ("verification_code", code),
                    ("two_factor_identifier", identifier),
                    ("verification_method", "1"),
                    ("trust_this_device", "1"),
                ],
            )
            .await?;

        if status == 400 {
            return Err(Error::InvalidCode);
        }
        session_from_login(status, body)
    }

    fn serialize_session(&self, session: &Session) -> Result<Value> {
        // Validate before handing the blob to storage.
        let _: IgSessionState = serde_json::from_value(session.state.clone())?;
        Ok(session.state.clone())
    }

    fn restore_session(&self, blob: Value) -> Result<Session> {
        let _: IgSessionState = serde_json::from_value(blob.clone())
            .map_err(|e| Error::Provider(format!("saved session is not an instagram session: {e}")))?;
        Ok(Session { state: blob })
    }

    async fn fetch_page(
        &self,
        session: &Session,
        relation: Relation,
        cursor: Option<&str>,
    ) -> Result<Page> {
        let state: IgSessionState = serde_json::from_value(session.state.clone())
            .map_err(|e| Error::Provider(format!("invalid session state: {e}")))?;

        let endpoint = match relation {
            Relation::Followers => "followers",
            Relation::Followees => "following",
        };

        let mut req = self
            .http
            .get(format!(
                "{}/friendships/{}/{endpoint}/",
                self.base_url, state.account_id
            ))
            .header(reqwest::header::COOKIE, &state.cookie);
        if let Some(max_id) = cursor {
            req = req.query(&[("max_id", max_id)]);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| Error::Provider(format!("instagram request error: {e}")))?;

        let status = resp.status().as_u16();
        let body: Value = resp
            .json()
            .await
            .map_err(|e| Error::Provider(format!("instagram response was not json: {e}")))?;

        parse_listing_response(status, &body)
    }
}

/// Deterministic device id seeded from the username, so repeat runs present
/// as the same device.
fn device_id_for(username: &str) -> String {
    let digest = Sha256::digest(username.as_bytes());
    let hex: String = digest.iter().take(8).map(|b| format!("{b:02x}")).collect();
    format!("android-{hex}")
}

/// Join the auth cookies from `Set-Cookie` headers into one `Cookie` value.
fn cookie_from_headers<'a>(headers: impl Iterator<Item = &'a str>) -> String {
    headers
        .filter_map(|h| h.split(';').next())
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>()
        .join("; ")
}

fn attach_cookie(mut body: Value, cookie: String) -> Value {
    if let Some(obj) = body.as_object_mut() {
        obj.insert("__cookie".to_string(), Value::String(cookie));
    }
    body
}

/// Classify a login (or two-factor login) response into a session or one of
/// the auth errors.
fn session_from_login(status: u16, body: Value) -> Result<Session> {
    if body
        .get("two_factor_required")
        .and_then(Value::as_bool)
        .unwrap_or(false)
    {
        let identifier = body
            .pointer("/two_factor_info/two_factor_identifier")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        return Err(Error::TwoFactorRequired { identifier });
    }

    let account_id = body.pointer("/logged_in_user/pk").and_then(Value::as_u64);

    match (status, account_id) {
        (200, Some(account_id)) => {
            let cookie = body
                .get("__cookie")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            let state = serde_json::to_value(IgSessionState { account_id, cookie })?;
            Ok(Session { state })
        }
        (400 | 401 | 403, _) => Err(Error::InvalidCredentials),
        (s, _) => Err(Error::Provider(format!(
            "unexpected login response (status {s}): {}",
            body.get("message").and_then(Value::as_str).unwrap_or("?")
        ))),
    }
}

/// Parse one friendship-listing page, mapping a rejected session to
/// `AuthExpired`.
fn parse_listing_response(status: u16, body: &Value) -> Result<Page> {
    let message = body.get("message").and_then(Value::as_str).unwrap_or("");
    if status == 401 || status == 403 || message == "login_required" {
        return Err(Error::AuthExpired);
    }
    if status != 200 {
        return Err(Error::Provider(format!(
            "listing request failed (status {status}): {message}"
        )));
    }

    let users = body
        .get("users")
        .cloned()
        .ok_or_else(|| Error::Provider("listing response is missing `users`".to_string()))?;
    let records = serde_json::from_value(users)
        .map_err(|e| Error::Provider(format!("listing records did not parse: {e}")))?;

    // next_max_id arrives as a string or a number depending on the listing.
    let next_cursor = match body.get("next_max_id") {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(other) => {
            return Err(Error::Provider(format!(
                "unexpected next_max_id shape: {other}"
            )))
        }
    };

    Ok(Page {
        records,
        next_cursor,
    })
}
