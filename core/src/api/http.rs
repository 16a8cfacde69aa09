// core/src/api/http.rs

//! `reqwest`-backed implementations of `CartBackend` and `CatalogSource`.

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{debug, instrument};

use super::catalog::CatalogSource;
use super::gateway::CartBackend;
use super::response::{expect_success, read_json, transport};
use crate::config::ClientConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::model::{AuthUser, CartEntry, Credentials, EntityId, EquipmentList, NamedRef};

// Fallback messages, used when the backend gives no `error` field.
const LOGIN_FAILED: &str = "Login failed";
const LOGOUT_FAILED: &str = "Logout failed";
const NOT_AUTHENTICATED: &str = "Not authenticated";
const FETCH_CART_FAILED: &str = "Failed to fetch cart";
const UPDATE_CART_FAILED: &str = "Failed to update cart";
const SAVE_ENTRY_FAILED: &str = "Failed to save cart entry";
const REMOVE_ENTRY_FAILED: &str = "Failed to remove cart entry";
const FETCH_SCHOOLS_FAILED: &str = "Failed to fetch schools";
const FETCH_GRADES_FAILED: &str = "Failed to fetch grades";
const FETCH_CLASSES_FAILED: &str = "Failed to fetch classes";
const FETCH_EQUIPMENT_FAILED: &str = "Failed to fetch equipment";

/// HTTP transport to the backend.
///
/// The underlying client keeps a cookie store, so the session cookie set by
/// `login` is sent with every later call. Clones share the same cookie jar.
#[derive(Debug, Clone)]
pub struct HttpGateway {
  client: Client,
  base_url: Url,
}

impl HttpGateway {
  pub fn new(config: &ClientConfig) -> GatewayResult<Self> {
    let client = Client::builder()
      .cookie_store(true)
      .timeout(config.http_timeout)
      .build()
      .map_err(|e| GatewayError::Config(format!("Failed to build HTTP client: {}", e)))?;
    Self::with_client(client, &config.api_base_url)
  }

  pub fn with_client(client: Client, base_url: &str) -> GatewayResult<Self> {
    if base_url.trim().is_empty() {
      return Err(GatewayError::Config("API base URL is empty".to_string()));
    }
    let base_url =
      Url::parse(base_url).map_err(|e| GatewayError::Config(format!("Invalid API base URL '{}': {}", base_url, e)))?;
    if base_url.cannot_be_a_base() {
      return Err(GatewayError::Config(format!("API base URL '{}' cannot hold paths", base_url)));
    }
    Ok(Self { client, base_url })
  }

  /// Catalog client sharing this gateway's connection pool and cookies.
  pub fn catalog(&self) -> HttpCatalog {
    HttpCatalog { gateway: self.clone() }
  }

  fn endpoint(&self, segments: &[&str]) -> Url {
    let mut url = self.base_url.clone();
    if let Ok(mut path) = url.path_segments_mut() {
      // Checked in `with_client`, so this branch always runs.
      path.pop_if_empty().extend(segments);
    }
    url
  }
}

#[async_trait]
impl CartBackend for HttpGateway {
  #[instrument(name = "gateway::login", skip(self, credentials), fields(username = %credentials.username), err(Display))]
  async fn login(&self, credentials: &Credentials) -> GatewayResult<AuthUser> {
    debug!("Attempting login.");
    let resp = self
      .client
      .post(self.endpoint(&["api", "login"]))
      .json(credentials)
      .send()
      .await
      .map_err(transport(LOGIN_FAILED))?;
    read_json(resp, LOGIN_FAILED).await
  }

  #[instrument(name = "gateway::logout", skip(self), err(Display))]
  async fn logout(&self) -> GatewayResult<()> {
    let resp = self
      .client
      .post(self.endpoint(&["api", "logout"]))
      .send()
      .await
      .map_err(transport(LOGOUT_FAILED))?;
    expect_success(resp, LOGOUT_FAILED).await
  }

  #[instrument(name = "gateway::check_auth", skip(self), err(Display))]
  async fn check_auth(&self) -> GatewayResult<AuthUser> {
    let resp = self
      .client
      .get(self.endpoint(&["api", "auth", "status"]))
      .send()
      .await
      .map_err(transport(NOT_AUTHENTICATED))?;
    read_json(resp, NOT_AUTHENTICATED).await
  }

  #[instrument(name = "gateway::get_cart", skip(self), fields(userid = %userid), err(Display))]
  async fn get_cart(&self, userid: &EntityId) -> GatewayResult<Vec<CartEntry>> {
    let resp = self
      .client
      .get(self.endpoint(&["api", "cart"]))
      .query(&[("userid", userid.as_str())])
      .send()
      .await
      .map_err(transport(FETCH_CART_FAILED))?;
    let entries: Vec<CartEntry> = read_json(resp, FETCH_CART_FAILED).await?;
    debug!(count = entries.len(), "Fetched cart.");
    Ok(entries)
  }

  #[instrument(name = "gateway::update_cart", skip(self, entries), fields(userid = %userid, count = entries.len()), err(Display))]
  async fn update_cart(&self, userid: &EntityId, entries: &[CartEntry]) -> GatewayResult<Vec<CartEntry>> {
    let resp = self
      .client
      .post(self.endpoint(&["api", "cart"]))
      .query(&[("userid", userid.as_str())])
      .json(entries)
      .send()
      .await
      .map_err(transport(UPDATE_CART_FAILED))?;
    read_json(resp, UPDATE_CART_FAILED).await
  }

  #[instrument(name = "gateway::upsert_entry", skip(self, entry), fields(userid = %userid, entry_id = %entry.id()), err(Display))]
  async fn upsert_entry(&self, userid: &EntityId, entry: &CartEntry) -> GatewayResult<Vec<CartEntry>> {
    let resp = self
      .client
      .put(self.endpoint(&["api", "cart", "entries", entry.id().as_str()]))
      .query(&[("userid", userid.as_str())])
      .json(entry)
      .send()
      .await
      .map_err(transport(SAVE_ENTRY_FAILED))?;
    read_json(resp, SAVE_ENTRY_FAILED).await
  }

  #[instrument(name = "gateway::delete_entry", skip(self), fields(userid = %userid, entry_id = %entry_id), err(Display))]
  async fn delete_entry(&self, userid: &EntityId, entry_id: &EntityId) -> GatewayResult<Vec<CartEntry>> {
    let resp = self
      .client
      .delete(self.endpoint(&["api", "cart", "entries", entry_id.as_str()]))
      .query(&[("userid", userid.as_str())])
      .send()
      .await
      .map_err(transport(REMOVE_ENTRY_FAILED))?;
    read_json(resp, REMOVE_ENTRY_FAILED).await
  }
}

/// HTTP client for the mock catalog endpoints.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
  gateway: HttpGateway,
}

impl HttpCatalog {
  pub fn new(config: &ClientConfig) -> GatewayResult<Self> {
    HttpGateway::new(config).map(|gateway| gateway.catalog())
  }

  async fn fetch<T: serde::de::DeserializeOwned>(
    &self,
    path: &[&str],
    query: Option<(&str, &EntityId)>,
    fallback: &str,
  ) -> GatewayResult<T> {
    let mut request = self.gateway.client.get(self.gateway.endpoint(path));
    if let Some((name, id)) = query {
      request = request.query(&[(name, id.as_str())]);
    }
    let resp = request.send().await.map_err(transport(fallback))?;
    read_json(resp, fallback).await
  }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
  #[instrument(name = "catalog::schools", skip(self), err(Display))]
  async fn schools(&self) -> GatewayResult<Vec<NamedRef>> {
    self.fetch(&["api", "schools"], None, FETCH_SCHOOLS_FAILED).await
  }

  #[instrument(name = "catalog::grades", skip(self), fields(school_id = %school_id), err(Display))]
  async fn grades(&self, school_id: &EntityId) -> GatewayResult<Vec<NamedRef>> {
    self
      .fetch(&["api", "grades"], Some(("schoolId", school_id)), FETCH_GRADES_FAILED)
      .await
  }

  #[instrument(name = "catalog::classes", skip(self), fields(grade_id = %grade_id), err(Display))]
  async fn classes(&self, grade_id: &EntityId) -> GatewayResult<Vec<NamedRef>> {
    self
      .fetch(&["api", "classes"], Some(("gradeId", grade_id)), FETCH_CLASSES_FAILED)
      .await
  }

  #[instrument(name = "catalog::equipment", skip(self), fields(class_id = %class_id), err(Display))]
  async fn equipment(&self, class_id: &EntityId) -> GatewayResult<EquipmentList> {
    self
      .fetch(&["api", "equipment"], Some(("classId", class_id)), FETCH_EQUIPMENT_FAILED)
      .await
  }
}
