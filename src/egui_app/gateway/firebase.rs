//! Hosted backend gateway.
//!
//! Talks to the Identity Toolkit REST API for accounts and to the Firestore
//! REST API for records. Calls are async internally and driven to
//! completion on a private runtime, so the trait stays blocking.

use std::future::Future;
use std::sync::Mutex;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tokio::runtime::{Builder, Runtime};

use crate::egui_app::gateway::Gateway;
use crate::egui_app::pending::GatewayResult;
use crate::shared::config::AppConfig;
use crate::shared::error::{GatewayError, SharedError};
use crate::shared::user::{Credential, Session, UserFields, UserRecord};

const PAGE_SIZE: &str = "300";

/// Gateway backed by the hosted auth and document services
pub struct FirebaseGateway {
    config: AppConfig,
    client: Client,
    runtime: Runtime,
    session: Mutex<Option<Session>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponse {
    local_id: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    display_name: Option<String>,
    id_token: String,
    refresh_token: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileResponse {
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    id_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListDocumentsResponse {
    #[serde(default)]
    documents: Vec<Document>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Document {
    name: String,
    #[serde(default)]
    fields: Map<String, Value>,
}

impl Document {
    fn into_record(self) -> UserRecord {
        let id = self.name.rsplit('/').next().unwrap_or_default().to_string();
        let fields = UserFields {
            first_name: string_value(&self.fields, "nombre"),
            last_name: string_value(&self.fields, "apellido"),
            email: string_value(&self.fields, "email"),
            password: string_value(&self.fields, "password"),
        };
        UserRecord::new(id, fields)
    }
}

/// Read a document field as text, whatever scalar type it was stored as.
fn string_value(fields: &Map<String, Value>, key: &str) -> String {
    let Some(Value::Object(typed)) = fields.get(key) else {
        return String::new();
    };
    match typed.iter().next() {
        Some((_, Value::String(s))) => s.clone(),
        Some((kind, _)) if kind == "nullValue" => String::new(),
        Some((_, other)) => other.to_string(),
        None => String::new(),
    }
}

fn encode_fields(fields: &UserFields) -> Value {
    let encoded: Map<String, Value> = fields
        .wire_pairs()
        .into_iter()
        .map(|(name, value)| (name.to_string(), json!({ "stringValue": value })))
        .collect();
    json!({ "fields": encoded })
}

async fn error_body(response: Response) -> (StatusCode, Option<ErrorBody>) {
    let status = response.status();
    let body = response
        .json::<ErrorEnvelope>()
        .await
        .ok()
        .map(|envelope| envelope.error);
    (status, body)
}

/// Decode a successful response body. Malformed payloads surface as
/// [`SharedError`] and convert into a transient gateway error.
async fn decode<T: DeserializeOwned>(response: Response) -> GatewayResult<T> {
    let body = response.bytes().await?;
    let value = serde_json::from_slice::<T>(&body).map_err(SharedError::from)?;
    Ok(value)
}

impl FirebaseGateway {
    pub fn new(config: AppConfig) -> GatewayResult<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("gateway-io")
            .enable_all()
            .build()
            .map_err(|e| GatewayError::transient(format!("Failed to create runtime: {}", e)))?;

        Ok(Self {
            config,
            client: Client::new(),
            runtime,
            session: Mutex::new(None),
        })
    }

    /// Session from the last successful sign-in or sign-up
    pub fn session(&self) -> Option<Session> {
        self.session.lock().ok().and_then(|guard| guard.clone())
    }

    fn store_session(&self, session: &Session) {
        if let Ok(mut guard) = self.session.lock() {
            *guard = Some(session.clone());
        }
    }

    fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    fn accounts_url(&self, action: &str) -> String {
        format!("{}/v1/accounts:{}", self.config.auth_url, action)
    }

    fn collection_url(&self, collection: &str) -> String {
        format!(
            "{}/v1/projects/{}/databases/(default)/documents/{}",
            self.config.firestore_url, self.config.project_id, collection
        )
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}", self.collection_url(collection), id)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session() {
            Some(session) => request.bearer_auth(session.id_token),
            None => request,
        }
    }

    async fn accounts_call<T>(&self, action: &str, body: Value) -> GatewayResult<T>
    where
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.accounts_url(action))
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let (status, body) = error_body(response).await;
            let message = body.and_then(|b| b.message);
            if status.is_server_error() {
                return Err(GatewayError::transient(format!(
                    "Request failed: {} - {}",
                    status,
                    message.unwrap_or_default()
                )));
            }
            return Err(GatewayError::auth(message));
        }

        decode(response).await
    }

    /// Map a failed document call; `id` names the target for not-found errors.
    async fn document_error(response: Response, id: &str) -> GatewayError {
        let (status, body) = error_body(response).await;
        let body_status = body.as_ref().and_then(|b| b.status.clone()).unwrap_or_default();
        let message = body.and_then(|b| b.message);

        if status == StatusCode::NOT_FOUND
            || body_status == "NOT_FOUND"
            || body_status == "FAILED_PRECONDITION"
        {
            return GatewayError::not_found(id);
        }
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return GatewayError::auth(message);
        }
        GatewayError::transient(format!(
            "Request failed: {} - {}",
            status,
            message.unwrap_or_default()
        ))
    }

    async fn list_page(
        &self,
        collection: &str,
        page_token: Option<&str>,
    ) -> GatewayResult<ListDocumentsResponse> {
        let mut query = vec![("pageSize", PAGE_SIZE)];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }

        let response = self
            .authorized(self.client.get(self.collection_url(collection)))
            .query(&query)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::document_error(response, collection).await);
        }
        decode(response).await
    }
}

impl Gateway for FirebaseGateway {
    fn authenticate(&self, credential: &Credential) -> GatewayResult<Session> {
        let body = json!({
            "email": credential.email,
            "password": credential.password,
            "returnSecureToken": true,
        });
        let auth: AuthResponse = self.block_on(self.accounts_call("signInWithPassword", body))?;

        let session = Session {
            local_id: auth.local_id,
            email: auth.email,
            display_name: auth.display_name.filter(|name| !name.is_empty()),
            id_token: auth.id_token,
            refresh_token: auth.refresh_token,
        };
        self.store_session(&session);
        tracing::info!(email = %session.email, "Signed in");
        Ok(session)
    }

    fn register(&self, credential: &Credential, display_name: &str) -> GatewayResult<Session> {
        let body = json!({
            "email": credential.email,
            "password": credential.password,
            "returnSecureToken": true,
        });
        let auth: AuthResponse = self.block_on(self.accounts_call("signUp", body))?;

        let profile_body = json!({
            "idToken": auth.id_token,
            "displayName": display_name,
            "returnSecureToken": true,
        });
        let profile: ProfileResponse = self.block_on(self.accounts_call("update", profile_body))?;

        let session = Session {
            local_id: auth.local_id,
            email: auth.email,
            display_name: profile.display_name.or_else(|| Some(display_name.to_string())),
            id_token: profile.id_token.unwrap_or(auth.id_token),
            refresh_token: profile.refresh_token.unwrap_or(auth.refresh_token),
        };
        self.store_session(&session);
        tracing::info!(email = %session.email, "Registered account");
        Ok(session)
    }

    fn list_records(&self, collection: &str) -> GatewayResult<Vec<UserRecord>> {
        self.block_on(async {
            let mut records = Vec::new();
            let mut page_token: Option<String> = None;
            loop {
                let page = self.list_page(collection, page_token.as_deref()).await?;
                records.extend(page.documents.into_iter().map(Document::into_record));
                match page.next_page_token.filter(|token| !token.is_empty()) {
                    Some(token) => page_token = Some(token),
                    None => break,
                }
            }
            tracing::debug!(collection, count = records.len(), "Listed records");
            Ok(records)
        })
    }

    fn create_record(&self, collection: &str, fields: &UserFields) -> GatewayResult<UserRecord> {
        self.block_on(async {
            let response = self
                .authorized(self.client.post(self.collection_url(collection)))
                .json(&encode_fields(fields))
                .send()
                .await?;

            if !response.status().is_success() {
                return Err(Self::document_error(response, collection).await);
            }
            let document: Document = decode(response).await?;

            let record = UserRecord::new(document.into_record().id, fields.clone());
            tracing::info!(collection, id = %record.id, "Created record");
            Ok(record)
        })
    }

    fn update_record(&self, collection: &str, id: &str, fields: &UserFields) -> GatewayResult<()> {
        let mut query = vec![("currentDocument.exists", "true")];
        query.extend(UserFields::WIRE_NAMES.iter().map(|name| ("updateMask.fieldPaths", *name)));

        self.block_on(async {
            let response = self
                .authorized(self.client.patch(self.document_url(collection, id)))
                .query(&query)
                .json(&encode_fields(fields))
                .send()
                .await?;

            if !response.status().is_success() {
                return Err(Self::document_error(response, id).await);
            }
            tracing::info!(collection, id, "Updated record");
            Ok(())
        })
    }

    fn delete_record(&self, collection: &str, id: &str) -> GatewayResult<()> {
        self.block_on(async {
            let response = self
                .authorized(self.client.delete(self.document_url(collection, id)))
                .query(&[("currentDocument.exists", "true")])
                .send()
                .await?;

            if !response.status().is_success() {
                return Err(Self::document_error(response, id).await);
            }
            tracing::info!(collection, id, "Deleted record");
            Ok(())
        })
    }

    fn sign_out(&self) {
        if let Ok(mut guard) = self.session.lock() {
            *guard = None;
        }
    }
}
