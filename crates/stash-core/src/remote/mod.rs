//! Row-level access to the Supabase REST (PostgREST) API.

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::auth::{parse_api_error, SessionSlot};
use crate::config::ServiceConfig;
use crate::error::{Error, Result};

const RETURN_REPRESENTATION: &str = "return=representation";

/// Thin client over `{supabase_url}/rest/v1/{table}`.
///
/// Every call is a single round trip. Requests are authorized with the
/// signed-in session when one is present, else with the anon key.
#[derive(Clone)]
pub struct RestClient {
    rest_url: String,
    anon_key: String,
    client: Client,
    session: SessionSlot,
}

impl RestClient {
    pub fn new(config: &ServiceConfig, session: SessionSlot) -> Result<Self> {
        Ok(Self::with_client(config, session, Client::builder().build()?))
    }

    #[must_use]
    pub fn with_client(config: &ServiceConfig, session: SessionSlot, client: Client) -> Self {
        Self {
            rest_url: config.rest_url(),
            anon_key: config.supabase_anon_key.clone(),
            client,
            session,
        }
    }

    #[must_use]
    pub const fn session(&self) -> &SessionSlot {
        &self.session
    }

    /// Fetch every row of `table`.
    pub async fn select<T: DeserializeOwned>(&self, table: &str) -> Result<Vec<T>> {
        let request = self
            .request(self.client.get(self.table_url(table)))
            .query(&[("select", "*")]);
        let rows = read_rows(request.send().await?).await?;
        tracing::debug!(table, count = rows.len(), "Selected rows");
        Ok(rows)
    }

    /// Fetch the row with `id`, if any.
    pub async fn select_one<T: DeserializeOwned>(&self, table: &str, id: &str) -> Result<Option<T>> {
        let request = self
            .request(self.client.get(self.table_url(table)))
            .query(&[("select", "*".to_string()), ("id", eq_filter(id))]);
        let rows: Vec<T> = read_rows(request.send().await?).await?;
        Ok(rows.into_iter().next())
    }

    /// Insert one row and return it as stored.
    pub async fn insert<B, T>(&self, table: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .request(self.client.post(self.table_url(table)))
            .header("Prefer", RETURN_REPRESENTATION)
            .json(body);
        let rows: Vec<T> = read_rows(request.send().await?).await?;
        rows.into_iter().next().ok_or_else(|| Error::Api {
            status: StatusCode::OK.as_u16(),
            message: format!("insert into {table} returned no row"),
        })
    }

    /// Overwrite the row with `id` and return it as stored.
    pub async fn update<B, T>(&self, table: &str, id: &str, body: &B) -> Result<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .request(self.client.patch(self.table_url(table)))
            .query(&[("id", eq_filter(id))])
            .header("Prefer", RETURN_REPRESENTATION)
            .json(body);
        let rows: Vec<T> = read_rows(request.send().await?).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| Error::NotFound(format!("{table}/{id}")))
    }

    /// Delete the row with `id`.
    pub async fn delete(&self, table: &str, id: &str) -> Result<()> {
        let request = self
            .request(self.client.delete(self.table_url(table)))
            .query(&[("id", eq_filter(id))])
            .header("Prefer", RETURN_REPRESENTATION);
        let rows: Vec<serde_json::Value> = read_rows(request.send().await?).await?;
        if rows.is_empty() {
            return Err(Error::NotFound(format!("{table}/{id}")));
        }
        Ok(())
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{table}", self.rest_url)
    }

    fn request(&self, request: RequestBuilder) -> RequestBuilder {
        let token = self
            .session
            .access_token()
            .unwrap_or_else(|| self.anon_key.clone());
        request
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .header("Accept", "application/json")
    }
}

fn eq_filter(id: &str) -> String {
    format!("eq.{id}")
}

async fn read_rows<T: DeserializeOwned>(response: Response) -> Result<Vec<T>> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        let error = classify_failure(status, &body);
        tracing::warn!(status = status.as_u16(), "Remote request failed: {}", error);
        return Err(error);
    }
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(&body)?)
}

/// Map an error response onto the crate's error taxonomy.
pub fn classify_failure(status: StatusCode, body: &str) -> Error {
    let message = parse_api_error(status, body);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Unauthorized(message),
        StatusCode::NOT_FOUND => Error::NotFound(message),
        _ => Error::Api {
            status: status.as_u16(),
            message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn classifies_auth_failures() {
        let error = classify_failure(
            StatusCode::UNAUTHORIZED,
            r#"{"code":"PGRST301","message":"JWT expired"}"#,
        );
        assert!(matches!(&error, Error::Unauthorized(message) if message == "JWT expired (401)"));
        assert_eq!(
            classify_failure(StatusCode::FORBIDDEN, "").kind(),
            ErrorKind::Auth
        );
    }

    #[test]
    fn classifies_service_failures() {
        let error = classify_failure(
            StatusCode::BAD_REQUEST,
            r#"{"code":"23502","message":"null value in column \"title\""}"#,
        );
        match error {
            Error::Api { status, message } => {
                assert_eq!(status, 400);
                assert!(message.starts_with("null value in column"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(
            classify_failure(StatusCode::NOT_FOUND, "").kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn eq_filter_formats_postgrest_operator() {
        assert_eq!(eq_filter("42"), "eq.42");
    }
}
