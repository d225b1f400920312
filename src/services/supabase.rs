use crate::core::filter::{Comparison, Condition, PetQuery};
use crate::models::{CandidatePet, QuestionnaireResponse};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with Supabase
#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Table names in the Supabase project
#[derive(Debug, Clone)]
pub struct SupabaseTables {
    pub pets: String,
    pub responses: String,
}

/// Supabase (PostgREST) client
///
/// Handles all communication with the hosted database:
/// - Querying candidate pets with the match filter conditions
/// - Fetching a single pet for the details view
/// - Persisting completed questionnaire responses
pub struct SupabaseClient {
    base_url: String,
    api_key: String,
    client: Client,
    tables: SupabaseTables,
}

/// Render a condition as a PostgREST `column=op.value` pair
pub fn render_condition(condition: &Condition) -> (&'static str, String) {
    let filter = match condition.comparison {
        Comparison::EqBool(value) => format!("eq.{}", value),
        Comparison::Gte(value) => format!("gte.{}", value),
        Comparison::Lte(value) => format!("lte.{}", value),
    };
    (condition.field.column(), filter)
}

/// Render the whole query string, starting with `select=*`
pub fn render_query(query: &PetQuery) -> String {
    let mut params = vec!["select=*".to_string()];
    params.extend(query.conditions().iter().map(|condition| {
        let (column, filter) = render_condition(condition);
        format!("{}={}", column, urlencoding::encode(&filter))
    }));
    params.join("&")
}

impl SupabaseClient {
    /// Create a new Supabase client
    pub fn new(
        base_url: String,
        api_key: String,
        tables: SupabaseTables,
        timeout_secs: u64,
    ) -> Result<Self, SupabaseError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self {
            base_url,
            api_key,
            client,
            tables,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), table)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    async fn check_status(response: Response, action: &str) -> Result<Response, SupabaseError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read body".to_string());
        tracing::error!("Failed to {}: {} - {}", action, status, body);

        Err(SupabaseError::ApiError {
            status: status.as_u16(),
            message: body,
        })
    }

    async fn fetch_pets(&self, query_string: &str) -> Result<Vec<CandidatePet>, SupabaseError> {
        let url = format!("{}?{}", self.table_url(&self.tables.pets), query_string);

        tracing::debug!("Querying pets: {}", url);

        let response = self.authorize(self.client.get(&url)).send().await?;
        let response = Self::check_status(response, "query pets").await?;

        let json: Value = response.json().await?;
        let rows = json
            .as_array()
            .ok_or_else(|| SupabaseError::InvalidResponse("Expected an array of rows".into()))?;

        rows.iter()
            .map(|row| {
                serde_json::from_value(row.clone()).map_err(|e| {
                    SupabaseError::InvalidResponse(format!("Failed to parse pet: {}", e))
                })
            })
            .collect()
    }

    /// Fetch every pet satisfying the query, in the store's natural order
    pub async fn query_pets(&self, query: &PetQuery) -> Result<Vec<CandidatePet>, SupabaseError> {
        let pets = self.fetch_pets(&render_query(query)).await?;
        tracing::debug!("Store returned {} pets for {} conditions", pets.len(), query.conditions().len());
        Ok(pets)
    }

    /// Get a single pet by id
    pub async fn get_pet(&self, pet_id: &str) -> Result<CandidatePet, SupabaseError> {
        let query_string = format!("select=*&id={}", urlencoding::encode(&format!("eq.{}", pet_id)));

        self.fetch_pets(&query_string)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| SupabaseError::NotFound(format!("Pet {} not found", pet_id)))
    }

    /// Insert a completed questionnaire response and return the stored row
    pub async fn save_response(
        &self,
        response: &QuestionnaireResponse,
    ) -> Result<QuestionnaireResponse, SupabaseError> {
        let url = self.table_url(&self.tables.responses);

        let http_response = self
            .authorize(self.client.post(&url))
            .header("Prefer", "return=representation")
            .json(&[response])
            .send()
            .await?;
        let http_response = Self::check_status(http_response, "save questionnaire response").await?;

        let json: Value = http_response.json().await?;
        let row = match json {
            Value::Array(mut rows) if !rows.is_empty() => rows.swap_remove(0),
            Value::Object(_) => json,
            _ => {
                return Err(SupabaseError::InvalidResponse(
                    "Insert returned no representation".into(),
                ))
            }
        };

        tracing::debug!("Saved questionnaire response: {:?}", response);

        serde_json::from_value(row)
            .map_err(|e| SupabaseError::InvalidResponse(format!("Failed to parse response row: {}", e)))
    }
}
