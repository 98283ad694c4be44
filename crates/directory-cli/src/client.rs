//! Async HTTP client wrapping the supplier directory JSON API.

use anyhow::{Context, Result, anyhow};
use directory_core::{
  message::{ContactInput, ContactReceipt, Message},
  query::SupplierQuery,
  supplier::{Supplier, SupplierId, SupplierInput},
};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Connection settings for the directory API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// Async HTTP client for the directory JSON REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  // ── Suppliers ─────────────────────────────────────────────────────────────

  /// `GET /api/suppliers[?search=..][&category=..]`
  pub async fn list_suppliers(&self, query: &SupplierQuery) -> Result<Vec<Supplier>> {
    let resp = self
      .client
      .get(self.url("/suppliers"))
      .query(query)
      .send()
      .await
      .context("GET /suppliers failed")?;
    decode(resp, "GET /suppliers").await
  }

  /// `GET /api/suppliers/:id`
  pub async fn get_supplier(&self, id: SupplierId) -> Result<Supplier> {
    let resp = self
      .client
      .get(self.url(&format!("/suppliers/{id}")))
      .send()
      .await
      .with_context(|| format!("GET /suppliers/{id} failed"))?;
    decode(resp, "GET /suppliers/:id").await
  }

  /// `POST /api/suppliers`
  pub async fn create_supplier(&self, input: &SupplierInput) -> Result<Supplier> {
    let resp = self
      .client
      .post(self.url("/suppliers"))
      .json(input)
      .send()
      .await
      .context("POST /suppliers failed")?;
    decode(resp, "POST /suppliers").await
  }

  /// `PUT /api/suppliers/:id` — replaces every field.
  pub async fn update_supplier(
    &self,
    id: SupplierId,
    input: &SupplierInput,
  ) -> Result<Supplier> {
    let resp = self
      .client
      .put(self.url(&format!("/suppliers/{id}")))
      .json(input)
      .send()
      .await
      .with_context(|| format!("PUT /suppliers/{id} failed"))?;
    decode(resp, "PUT /suppliers/:id").await
  }

  /// `DELETE /api/suppliers/:id`
  pub async fn delete_supplier(&self, id: SupplierId) -> Result<()> {
    let resp = self
      .client
      .delete(self.url(&format!("/suppliers/{id}")))
      .send()
      .await
      .with_context(|| format!("DELETE /suppliers/{id} failed"))?;
    decode::<serde_json::Value>(resp, "DELETE /suppliers/:id").await?;
    Ok(())
  }

  // ── Messages ──────────────────────────────────────────────────────────────

  /// `POST /api/suppliers/:id/contact`
  pub async fn contact(
    &self,
    id: SupplierId,
    input: &ContactInput,
  ) -> Result<ContactReceipt> {
    let resp = self
      .client
      .post(self.url(&format!("/suppliers/{id}/contact")))
      .json(input)
      .send()
      .await
      .with_context(|| format!("POST /suppliers/{id}/contact failed"))?;
    decode(resp, "POST /suppliers/:id/contact").await
  }

  /// `GET /api/suppliers/:id/messages`
  pub async fn list_messages(&self, id: SupplierId) -> Result<Vec<Message>> {
    let resp = self
      .client
      .get(self.url(&format!("/suppliers/{id}/messages")))
      .send()
      .await
      .with_context(|| format!("GET /suppliers/{id}/messages failed"))?;
    decode(resp, "GET /suppliers/:id/messages").await
  }
}

/// Deserialise a success body, or turn the server's `{"error": ...}` body
/// into an error.
async fn decode<T: DeserializeOwned>(resp: Response, what: &str) -> Result<T> {
  let status = resp.status();
  if !status.is_success() {
    let reason = resp
      .json::<serde_json::Value>()
      .await
      .ok()
      .and_then(|v| v["error"].as_str().map(str::to_owned))
      .unwrap_or_else(|| status.to_string());
    return Err(anyhow!("{what} → {status}: {reason}"));
  }
  resp
    .json()
    .await
    .with_context(|| format!("deserialising {what} response"))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn url_joins_api_prefix() {
    let client = ApiClient::new(ApiConfig {
      base_url: "http://localhost:5000/".into(),
    })
    .unwrap();
    assert_eq!(client.url("/suppliers/3"), "http://localhost:5000/api/suppliers/3");
  }
}
