//! HTTP schema registry client
//!
//! Speaks the Confluent-style REST surface: schemas are fetched by id,
//! looked up by (subject, definition), and registered under a subject. All
//! successful answers land in the shared [`SchemaCache`], so each schema id
//! costs at most one round trip per process lifetime.

use crate::schemastream::config::{RegistryCredential, RegistryEndpoint};
use crate::schemastream::registry::auth::{RegistryAuth, StaticTokenProvider};
use crate::schemastream::registry::cache::SchemaCache;
use crate::schemastream::registry::error::RegistryError;
use crate::schemastream::registry::types::SchemaDescriptor;
use crate::schemastream::registry::SchemaResolver;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

const CONTENT_TYPE: &str = "application/vnd.schemaregistry.v1+json";

#[derive(Serialize)]
struct SchemaBody<'a> {
    schema: &'a str,
}

#[derive(Deserialize)]
struct SchemaByIdResponse {
    schema: String,
}

#[derive(Deserialize)]
struct SubjectLookupResponse {
    id: u32,
    version: Option<u32>,
    schema: String,
}

#[derive(Deserialize)]
struct RegisterResponse {
    id: u32,
}

/// Client for a remote schema registry
pub struct RegistryClient {
    base_url: String,
    http: reqwest::Client,
    auth: RegistryAuth,
    cache: SchemaCache,
}

impl RegistryClient {
    /// Creates a client against `base_url` with the given authentication mode
    pub fn new(base_url: impl Into<String>, auth: RegistryAuth) -> Result<Self, RegistryError> {
        Self::with_timeout(base_url, auth, Duration::from_secs(30))
    }

    /// Creates a client with an explicit per-request timeout
    pub fn with_timeout(
        base_url: impl Into<String>,
        auth: RegistryAuth,
        request_timeout: Duration,
    ) -> Result<Self, RegistryError> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| RegistryError::Unavailable(e.to_string()))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        log::info!("Created schema registry client for {}", base_url);

        Ok(Self {
            base_url,
            http,
            auth,
            cache: SchemaCache::new(),
        })
    }

    /// Builds a client from a validated configuration endpoint
    pub fn from_endpoint(endpoint: &RegistryEndpoint) -> Result<Self, RegistryError> {
        let auth = match &endpoint.credential {
            RegistryCredential::None => RegistryAuth::None,
            RegistryCredential::Basic { username, password } => RegistryAuth::Basic {
                username: username.clone(),
                password: password.clone(),
            },
            RegistryCredential::BearerToken(token) => {
                RegistryAuth::Bearer(Arc::new(StaticTokenProvider::new(token.clone())))
            }
        };
        Self::with_timeout(endpoint.base_url.clone(), auth, endpoint.request_timeout)
    }

    async fn authorize(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, RegistryError> {
        let request = request
            .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE)
            .header(reqwest::header::ACCEPT, CONTENT_TYPE);
        match &self.auth {
            RegistryAuth::None => Ok(request),
            RegistryAuth::Basic { username, password } => {
                Ok(request.basic_auth(username, Some(password)))
            }
            RegistryAuth::Bearer(provider) => {
                let token = provider.bearer_token().await?;
                Ok(request.bearer_auth(token))
            }
        }
    }

    async fn fetch_by_id(&self, id: u32) -> Result<SchemaDescriptor, RegistryError> {
        let url = format!("{}/schemas/ids/{}", self.base_url, id);
        let request = self.authorize(self.http.get(&url)).await?;
        let response = request
            .send()
            .await
            .map_err(|e| RegistryError::Unavailable(e.to_string()))?;

        match response.status().as_u16() {
            200 => {
                let body: SchemaByIdResponse = response
                    .json()
                    .await
                    .map_err(|e| RegistryError::Protocol {
                        status: 200,
                        body: e.to_string(),
                    })?;
                // The by-id endpoint does not report the owning subject.
                SchemaDescriptor::parse(id, "", None, body.schema)
            }
            404 => Err(RegistryError::SchemaNotFound(id)),
            status => Err(RegistryError::Protocol {
                status,
                body: response.text().await.unwrap_or_default(),
            }),
        }
    }

    /// Asks the registry whether `definition` is already registered under
    /// `subject`; `Ok(None)` means it is not.
    async fn lookup_subject(
        &self,
        subject: &str,
        definition: &str,
    ) -> Result<Option<SubjectLookupResponse>, RegistryError> {
        let url = format!("{}/subjects/{}", self.base_url, subject);
        let request = self
            .authorize(self.http.post(&url))
            .await?
            .json(&SchemaBody { schema: definition });
        let response = request
            .send()
            .await
            .map_err(|e| RegistryError::Unavailable(e.to_string()))?;

        match response.status().as_u16() {
            200 => {
                let body: SubjectLookupResponse =
                    response
                        .json()
                        .await
                        .map_err(|e| RegistryError::Protocol {
                            status: 200,
                            body: e.to_string(),
                        })?;
                Ok(Some(body))
            }
            404 => Ok(None),
            status => Err(RegistryError::Protocol {
                status,
                body: response.text().await.unwrap_or_default(),
            }),
        }
    }

    async fn register(&self, subject: &str, definition: &str) -> Result<u32, RegistryError> {
        let url = format!("{}/subjects/{}/versions", self.base_url, subject);
        let request = self
            .authorize(self.http.post(&url))
            .await?
            .json(&SchemaBody { schema: definition });
        let response = request
            .send()
            .await
            .map_err(|e| RegistryError::Unavailable(e.to_string()))?;

        match response.status().as_u16() {
            200 => {
                let body: RegisterResponse =
                    response
                        .json()
                        .await
                        .map_err(|e| RegistryError::Protocol {
                            status: 200,
                            body: e.to_string(),
                        })?;
                log::info!(
                    "Registered schema under subject '{}' with id {}",
                    subject,
                    body.id
                );
                Ok(body.id)
            }
            status => Err(RegistryError::Protocol {
                status,
                body: response.text().await.unwrap_or_default(),
            }),
        }
    }
}

#[async_trait]
impl SchemaResolver for RegistryClient {
    async fn resolve(&self, id: u32) -> Result<Arc<SchemaDescriptor>, RegistryError> {
        if let Some(descriptor) = self.cache.get(id) {
            return Ok(descriptor);
        }
        log::debug!("Schema id {} not cached, fetching from registry", id);
        let descriptor = self.fetch_by_id(id).await?;
        Ok(self.cache.insert(descriptor))
    }

    async fn register_or_resolve(
        &self,
        subject: &str,
        definition: &str,
        auto_register: bool,
    ) -> Result<u32, RegistryError> {
        if let Some(id) = self.cache.id_for(subject, definition) {
            return Ok(id);
        }

        if let Some(found) = self.lookup_subject(subject, definition).await? {
            // Cache the registry's canonical form under the returned id.
            let descriptor =
                SchemaDescriptor::parse(found.id, subject, found.version, found.schema)?;
            self.cache.insert(descriptor);
            self.cache.remember_subject(subject, definition, found.id);
            return Ok(found.id);
        }

        if !auto_register {
            return Err(RegistryError::SchemaNotRegistered(subject.to_string()));
        }

        let id = self.register(subject, definition).await?;
        let descriptor = SchemaDescriptor::parse(id, subject, None, definition)?;
        self.cache.insert(descriptor);
        self.cache.remember_subject(subject, definition, id);
        Ok(id)
    }
}
