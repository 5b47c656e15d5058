//! PostgREST query builder.
//!
//! Filters, ordering and limits become query-string parameters
//! (`id=eq.7`, `order=created_at.desc`, `limit=1`). Writes ask for the
//! affected rows back with `Prefer: return=representation`.

use core::fmt;

use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::{Gateway, GatewayError, Table};

/// Sort direction for [`Query::order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// A request against one table, built up before a terminal operation.
#[must_use = "a query does nothing until a terminal operation is awaited"]
pub struct Query<'a> {
    gateway: &'a Gateway,
    table: Table,
    params: Vec<(String, String)>,
}

impl<'a> Query<'a> {
    pub(crate) const fn new(gateway: &'a Gateway, table: Table) -> Self {
        Self {
            gateway,
            table,
            params: Vec::new(),
        }
    }

    /// Keep rows where `column` equals `value`.
    pub fn eq(mut self, column: &str, value: impl fmt::Display) -> Self {
        self.params.push((column.to_string(), format!("eq.{value}")));
        self
    }

    /// Sort by `column`.
    pub fn order(mut self, column: &str, direction: Direction) -> Self {
        self.params
            .push(("order".to_string(), format!("{column}.{}", direction.as_str())));
        self
    }

    /// Return at most `n` rows.
    pub fn limit(mut self, n: usize) -> Self {
        self.params.push(("limit".to_string(), n.to_string()));
        self
    }

    /// Query-string parameters collected so far.
    #[must_use]
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    /// Read `columns` (PostgREST select list, e.g. `"*"` or `"name,description"`).
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the request fails or rows do not decode.
    pub async fn select<T: DeserializeOwned>(mut self, columns: &str) -> Result<Vec<T>, GatewayError> {
        self.params.push(("select".to_string(), columns.to_string()));
        let request = self.request(Method::GET)?;
        send(request).await
    }

    /// Insert one row and return the stored rows.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the request fails or rows do not decode.
    pub async fn insert<B, T>(self, row: &B) -> Result<Vec<T>, GatewayError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.write_request(Method::POST)?.json(row);
        send(request).await
    }

    /// Apply `patch` to every matching row and return the updated rows.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the request fails or rows do not decode.
    pub async fn update<B, T>(self, patch: &B) -> Result<Vec<T>, GatewayError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.write_request(Method::PATCH)?.json(patch);
        send(request).await
    }

    /// Delete every matching row and return the deleted rows.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] if the request fails or rows do not decode.
    pub async fn delete<T: DeserializeOwned>(self) -> Result<Vec<T>, GatewayError> {
        let request = self.write_request(Method::DELETE)?;
        send(request).await
    }

    fn request(&self, method: Method) -> Result<RequestBuilder, GatewayError> {
        let url = self.gateway.endpoint(self.table)?;
        Ok(self
            .gateway
            .client()
            .request(method, url)
            .query(&self.params))
    }

    fn write_request(&self, method: Method) -> Result<RequestBuilder, GatewayError> {
        Ok(self
            .request(method)?
            .header("Prefer", "return=representation"))
    }
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<Vec<T>, GatewayError> {
    let response = request.send().await?;
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(GatewayError::from_body(status.as_u16(), &body));
    }

    let body = response.bytes().await?;
    if body.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_slice(&body).map_err(|e| GatewayError::Decode(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::backend::GatewayConfig;

    #[test]
    fn test_params() {
        let config = GatewayConfig::new("https://a.example.com", "anon").unwrap();
        let gateway = Gateway::new(&config).unwrap();
        let query = gateway
            .table(Table::AdminSettings)
            .eq("id", 3)
            .order("created_at", Direction::Asc)
            .limit(1);

        let params: Vec<(&str, &str)> = query
            .params()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(
            params,
            vec![("id", "eq.3"), ("order", "created_at.asc"), ("limit", "1")]
        );
    }
}
