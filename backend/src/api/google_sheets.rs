use chrono::Utc;
use futures::future::{BoxFuture, FutureExt};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::Mutex;

use crate::config::SheetsCredentials;
use crate::error::StoreError;
use crate::models::waitlist_models::WaitlistEntry;
use crate::repositories::waitlist_store::WaitlistStore;

pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com";
const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
// Refresh a little before Google would reject the token.
const TOKEN_EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Serialize)]
struct ServiceAccountClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Deserialize)]
struct SpreadsheetResponse {
    #[serde(default)]
    sheets: Vec<Sheet>,
}

#[derive(Deserialize)]
struct Sheet {
    properties: SheetProperties,
}

#[derive(Deserialize)]
struct SheetProperties {
    title: String,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<String>>,
}

struct CachedToken {
    access_token: String,
    expires_at: i64,
}

/// Appends waitlist rows to the first sheet of a Google spreadsheet,
/// authenticating as a service account.
///
/// Values are placed by header name, so the `Email` and `Timestamp` columns
/// may sit anywhere in the first row.
pub struct SheetsStore {
    client: reqwest::Client,
    credentials: SheetsCredentials,
    token_url: String,
    api_base: String,
    token: Mutex<Option<CachedToken>>,
}

impl SheetsStore {
    pub fn new(credentials: SheetsCredentials) -> Self {
        Self::with_endpoints(credentials, GOOGLE_TOKEN_URL, SHEETS_API_BASE)
    }

    /// Points the store at different Google endpoints, e.g. a local fake.
    pub fn with_endpoints(
        credentials: SheetsCredentials,
        token_url: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            credentials,
            token_url: token_url.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            token: Mutex::new(None),
        }
    }

    async fn access_token(&self) -> Result<String, StoreError> {
        let mut cached = self.token.lock().await;
        let now = Utc::now().timestamp();
        if let Some(token) = cached.as_ref() {
            if token.expires_at - TOKEN_EXPIRY_MARGIN_SECS > now {
                return Ok(token.access_token.clone());
            }
        }

        tracing::debug!("Requesting Google access token for {}", self.credentials.client_email);
        let claims = ServiceAccountClaims {
            iss: &self.credentials.client_email,
            scope: SHEETS_SCOPE,
            aud: &self.token_url,
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };
        let key = EncodingKey::from_rsa_pem(self.credentials.private_key.as_bytes())?;
        let assertion = encode(&Header::new(Algorithm::RS256), &claims, &key)?;

        let response = self
            .client
            .post(&self.token_url)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;
        let response = check_status(response).await?;
        let token: TokenResponse = response.json().await?;

        *cached = Some(CachedToken {
            access_token: token.access_token.clone(),
            expires_at: now + token.expires_in,
        });
        Ok(token.access_token)
    }

    async fn first_sheet_title(&self, access_token: &str) -> Result<String, StoreError> {
        let url = format!(
            "{}/v4/spreadsheets/{}",
            self.api_base, self.credentials.spreadsheet_id
        );
        let response = self
            .client
            .get(&url)
            .query(&[("fields", "sheets.properties.title")])
            .header(AUTHORIZATION, format!("Bearer {}", access_token))
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        let response = check_status(response).await?;
        let spreadsheet: SpreadsheetResponse = response.json().await?;
        spreadsheet
            .sheets
            .into_iter()
            .next()
            .map(|sheet| sheet.properties.title)
            .ok_or(StoreError::NoSheet)
    }

    async fn header_row(&self, access_token: &str, title: &str) -> Result<Vec<String>, StoreError> {
        let range = format!("{}!1:1", quote_sheet(title));
        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}",
            self.api_base,
            self.credentials.spreadsheet_id,
            urlencoding::encode(&range)
        );
        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, format!("Bearer {}", access_token))
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        let response = check_status(response).await?;
        let range: ValueRange = response.json().await?;
        Ok(range.values.into_iter().next().unwrap_or_default())
    }

    pub async fn append_row(&self, entry: &WaitlistEntry) -> Result<(), StoreError> {
        let access_token = self.access_token().await?;
        let title = self.first_sheet_title(&access_token).await?;
        let headers = self.header_row(&access_token, &title).await?;
        let row = row_for_headers(&headers, entry).map_err(|header| StoreError::MissingHeader {
            sheet: title.clone(),
            header,
        })?;

        let range = format!("{}!A1", quote_sheet(&title));
        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}:append",
            self.api_base,
            self.credentials.spreadsheet_id,
            urlencoding::encode(&range)
        );
        let response = self
            .client
            .post(&url)
            .query(&[("valueInputOption", "RAW"), ("insertDataOption", "INSERT_ROWS")])
            .header(AUTHORIZATION, format!("Bearer {}", access_token))
            .json(&json!({ "values": [row] }))
            .send()
            .await?;
        check_status(response).await?;

        tracing::info!("Appended waitlist row to sheet '{}'", title);
        Ok(())
    }
}

fn quote_sheet(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

/// Lays the entry out under the `Email` and `Timestamp` headers. Returns the
/// first header that could not be found.
fn row_for_headers(headers: &[String], entry: &WaitlistEntry) -> Result<Vec<String>, &'static str> {
    let position = |name: &'static str| {
        headers
            .iter()
            .position(|header| header.trim() == name)
            .ok_or(name)
    };
    let email_at = position("Email")?;
    let timestamp_at = position("Timestamp")?;

    let mut row = vec![String::new(); email_at.max(timestamp_at) + 1];
    row[email_at] = entry.email.clone();
    row[timestamp_at] = entry.timestamp.clone();
    Ok(row)
}

impl WaitlistStore for SheetsStore {
    fn append(&self, entry: WaitlistEntry) -> BoxFuture<'_, Result<(), StoreError>> {
        async move { self.append_row(&entry).await }.boxed()
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(StoreError::Upstream {
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Path, Query, State},
        http::StatusCode,
        routing::{get, post},
        Form, Json, Router,
    };
    use jsonwebtoken::{decode, DecodingKey, Validation};
    use serde_json::Value;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const PRIVATE_KEY: &str = include_str!("../../tests/fixtures/service_account_key.pem");
    const PUBLIC_KEY: &str = include_str!("../../tests/fixtures/service_account_pub.pem");
    const CLIENT_EMAIL: &str = "waitlist@studiverse.iam.gserviceaccount.com";

    #[derive(Default)]
    struct FakeGoogle {
        token_url: std::sync::Mutex<String>,
        token_requests: AtomicUsize,
        header_reads: AtomicUsize,
        appended: std::sync::Mutex<Vec<(String, HashMap<String, String>, Value)>>,
        headers: Vec<&'static str>,
        fail_append: bool,
    }

    impl FakeGoogle {
        fn with_headers(headers: &[&'static str]) -> Self {
            Self {
                headers: headers.to_vec(),
                ..Default::default()
            }
        }
    }

    #[derive(Deserialize)]
    struct AssertionClaims {
        iss: String,
        scope: String,
    }

    async fn token(
        State(fake): State<Arc<FakeGoogle>>,
        Form(form): Form<HashMap<String, String>>,
    ) -> Result<Json<Value>, StatusCode> {
        fake.token_requests.fetch_add(1, Ordering::SeqCst);
        if form.get("grant_type").map(String::as_str) != Some(JWT_BEARER_GRANT) {
            return Err(StatusCode::BAD_REQUEST);
        }
        let assertion = form.get("assertion").ok_or(StatusCode::BAD_REQUEST)?;
        let mut validation = Validation::new(Algorithm::RS256);
        let audience = fake.token_url.lock().unwrap().clone();
        validation.set_audience(&[audience]);
        let key = DecodingKey::from_rsa_pem(PUBLIC_KEY.as_bytes()).unwrap();
        let claims = decode::<AssertionClaims>(assertion, &key, &validation)
            .map_err(|_| StatusCode::UNAUTHORIZED)?
            .claims;
        if claims.iss != CLIENT_EMAIL || claims.scope != SHEETS_SCOPE {
            return Err(StatusCode::UNAUTHORIZED);
        }
        Ok(Json(json!({
            "access_token": "ya29.fake",
            "expires_in": 3599,
            "token_type": "Bearer",
        })))
    }

    async fn spreadsheet(Path(id): Path<String>) -> Result<Json<Value>, StatusCode> {
        if id != "sheet-123" {
            return Err(StatusCode::NOT_FOUND);
        }
        Ok(Json(json!({
            "sheets": [
                { "properties": { "title": "Waitlist" } },
                { "properties": { "title": "Archive" } },
            ]
        })))
    }

    async fn header_row(
        State(fake): State<Arc<FakeGoogle>>,
        Path((_id, range)): Path<(String, String)>,
    ) -> Json<Value> {
        fake.header_reads.fetch_add(1, Ordering::SeqCst);
        if fake.headers.is_empty() {
            return Json(json!({ "range": range, "majorDimension": "ROWS" }));
        }
        Json(json!({ "range": range, "majorDimension": "ROWS", "values": [fake.headers] }))
    }

    async fn append(
        State(fake): State<Arc<FakeGoogle>>,
        Path((_id, range)): Path<(String, String)>,
        Query(query): Query<HashMap<String, String>>,
        Json(body): Json<Value>,
    ) -> Result<Json<Value>, StatusCode> {
        if fake.fail_append {
            return Err(StatusCode::SERVICE_UNAVAILABLE);
        }
        fake.appended.lock().unwrap().push((range, query, body));
        Ok(Json(json!({ "updates": { "updatedRows": 1 } })))
    }

    async fn spawn_fake(fake: FakeGoogle) -> (Arc<FakeGoogle>, SheetsStore) {
        let fake = Arc::new(fake);
        let app = Router::new()
            .route("/token", post(token))
            .route("/v4/spreadsheets/{id}", get(spreadsheet))
            .route("/v4/spreadsheets/{id}/values/{range}", get(header_row).post(append))
            .with_state(fake.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let token_url = format!("http://{}/token", addr);
        *fake.token_url.lock().unwrap() = token_url.clone();
        let store = SheetsStore::with_endpoints(
            SheetsCredentials {
                spreadsheet_id: "sheet-123".to_string(),
                client_email: CLIENT_EMAIL.to_string(),
                private_key: PRIVATE_KEY.to_string(),
            },
            token_url,
            format!("http://{}/", addr),
        );
        (fake, store)
    }

    fn entry(email: &str) -> WaitlistEntry {
        WaitlistEntry {
            email: email.to_string(),
            timestamp: "2024-11-02T09:15:27.481Z".to_string(),
        }
    }

    #[tokio::test]
    async fn appends_row_to_first_sheet() {
        let (fake, store) = spawn_fake(FakeGoogle::with_headers(&["Email", "Timestamp"])).await;

        store.append(entry("user@example.com")).await.unwrap();

        let appended = fake.appended.lock().unwrap();
        assert_eq!(appended.len(), 1);
        let (range, query, body) = &appended[0];
        assert_eq!(range, "'Waitlist'!A1:append");
        assert_eq!(fake.header_reads.load(Ordering::SeqCst), 1);
        assert_eq!(query.get("valueInputOption").map(String::as_str), Some("RAW"));
        assert_eq!(query.get("insertDataOption").map(String::as_str), Some("INSERT_ROWS"));
        assert_eq!(
            body,
            &json!({ "values": [["user@example.com", "2024-11-02T09:15:27.481Z"]] })
        );
    }

    #[tokio::test]
    async fn access_token_is_reused_until_expiry() {
        let (fake, store) = spawn_fake(FakeGoogle::with_headers(&["Email", "Timestamp"])).await;

        store.append(entry("one@example.com")).await.unwrap();
        store.append(entry("two@example.com")).await.unwrap();

        assert_eq!(fake.token_requests.load(Ordering::SeqCst), 1);
        assert_eq!(fake.appended.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn upstream_failure_is_reported() {
        let (_fake, store) = spawn_fake(FakeGoogle {
            fail_append: true,
            ..FakeGoogle::with_headers(&["Email", "Timestamp"])
        })
        .await;

        let err = store.append(entry("user@example.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::Upstream { status: 503, .. }));
    }

    #[tokio::test]
    async fn malformed_private_key_fails_before_any_request() {
        let (fake, _) = spawn_fake(FakeGoogle::default()).await;
        let store = SheetsStore::with_endpoints(
            SheetsCredentials {
                spreadsheet_id: "sheet-123".to_string(),
                client_email: CLIENT_EMAIL.to_string(),
                private_key: "not a key".to_string(),
            },
            fake.token_url.lock().unwrap().clone(),
            "http://127.0.0.1:9",
        );

        let err = store.append(entry("user@example.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::Jwt(_)));
        assert_eq!(fake.token_requests.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn values_follow_header_names_not_positions() {
        let (fake, store) =
            spawn_fake(FakeGoogle::with_headers(&["Source", "Timestamp", " Email "])).await;

        store.append(entry("user@example.com")).await.unwrap();

        let appended = fake.appended.lock().unwrap();
        assert_eq!(
            appended[0].2,
            json!({ "values": [["", "2024-11-02T09:15:27.481Z", "user@example.com"]] })
        );
    }

    #[tokio::test]
    async fn missing_header_writes_nothing() {
        let (fake, store) = spawn_fake(FakeGoogle::with_headers(&["Email", "Signed up"])).await;

        let err = store.append(entry("user@example.com")).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::MissingHeader { ref sheet, header: "Timestamp" } if sheet == "Waitlist"
        ));
        assert!(fake.appended.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_header_row_writes_nothing() {
        let (fake, store) = spawn_fake(FakeGoogle::default()).await;

        let err = store.append(entry("user@example.com")).await.unwrap_err();
        assert!(matches!(err, StoreError::MissingHeader { header: "Email", .. }));
        assert!(fake.appended.lock().unwrap().is_empty());
    }
}
