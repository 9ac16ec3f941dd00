// Public-data client (non-sensitive lookups)
// REST-style reads: GET {base}/rest/v1/{table}?{column}=eq.{value}, authenticated with an `apikey` header.

use crate::error::{ApiError, GENERIC_FAILURE_MESSAGE};
use log::{debug, info};
use serde_json::Value;
use std::time::Duration;
use url::Url;

struct Connection {
    client: reqwest::Client,
    base_url: Url,
    api_key: String,
}

/// Must be initialized before use; calls made earlier fail with `ApiError::Uninitialized`.
#[derive(Default)]
pub struct PublicDataClient {
    connection: Option<Connection>,
}

impl PublicDataClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initialize(
        &mut self,
        base_url: &str,
        api_key: &str,
        timeout: Duration,
    ) -> Result<(), ApiError> {
        let base_url = Url::parse(base_url.trim())
            .map_err(|e| ApiError::Decode(format!("invalid public data URL: {}", e)))?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        info!(
            "[PHASE: api] [STEP: public_init] Public data client initialized for {}",
            base_url.host_str().unwrap_or("<no host>")
        );
        self.connection = Some(Connection {
            client,
            base_url,
            api_key: api_key.to_string(),
        });
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.connection.is_some()
    }

    /// Rows of `table` matching every `(column, value)` equality filter.
    pub async fn select(
        &self,
        table: &str,
        filters: &[(&str, &str)],
    ) -> Result<Vec<Value>, ApiError> {
        let conn = self.connection.as_ref().ok_or(ApiError::Uninitialized)?;
        let url = build_select_url(&conn.base_url, table, filters)?;
        debug!("[PHASE: api] [STEP: public_select] GET {}", url.path());

        let resp = conn
            .client
            .get(url)
            .header("apikey", &conn.api_key)
            .bearer_auth(&conn.api_key)
            .send()
            .await?;

        let status = resp.status().as_u16();
        let body = resp.text().await?;
        let value: Option<Value> = serde_json::from_str(&body).ok();

        if !(200..300).contains(&status) {
            let message = value
                .as_ref()
                .and_then(|v| v.get("message"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
            return Err(ApiError::Http { status, message });
        }

        match value {
            Some(Value::Array(rows)) => Ok(rows),
            Some(other) => Err(ApiError::Decode(format!(
                "expected an array of rows, got {}",
                kind_of(&other)
            ))),
            None => Err(ApiError::Decode("response body is not JSON".to_string())),
        }
    }
}

pub fn build_select_url(base: &Url, table: &str, filters: &[(&str, &str)]) -> Result<Url, ApiError> {
    let table = table.trim();
    if table.is_empty() || table.contains('/') {
        return Err(ApiError::Decode(format!("invalid table name '{}'", table)));
    }

    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| ApiError::Decode("public data URL cannot be a base".to_string()))?
        .pop_if_empty()
        .extend(["rest", "v1", table]);
    {
        let mut q = url.query_pairs_mut();
        q.append_pair("select", "*");
        for (column, value) in filters {
            q.append_pair(column, &format!("eq.{}", value));
        }
    }
    Ok(url)
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
