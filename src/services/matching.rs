use crate::core::MatchFilter;
use crate::models::{CandidatePet, QuestionnaireResponse};
use crate::services::supabase::{SupabaseClient, SupabaseError};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Result of running the matching flow for one submission
#[derive(Debug)]
pub struct MatchOutcome {
    pub pets: Vec<CandidatePet>,
    /// Set when the store query failed and `pets` is empty because of it
    pub query_error: Option<String>,
}

/// Runs a submitted questionnaire through the match filter and the store
///
/// The response is persisted on a separate task; its outcome never affects
/// the match result.
#[derive(Clone)]
pub struct MatchingService {
    store: Arc<SupabaseClient>,
    filter: MatchFilter,
}

impl MatchingService {
    pub fn new(store: Arc<SupabaseClient>, filter: MatchFilter) -> Self {
        Self { store, filter }
    }

    pub fn filter(&self) -> &MatchFilter {
        &self.filter
    }

    /// Query candidates; store errors are returned to the caller untouched
    pub async fn find_matching_pets(
        &self,
        response: &QuestionnaireResponse,
    ) -> Result<Vec<CandidatePet>, SupabaseError> {
        let query = self.filter.build_query(response);

        tracing::debug!(
            "Match query for {:?}: {}",
            response,
            serde_json::to_string(&query).unwrap_or_default()
        );

        self.store.query_pets(&query).await
    }

    /// Persist the raw response in the background
    pub fn save_response_in_background(&self, response: QuestionnaireResponse) -> JoinHandle<bool> {
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            match store.save_response(&response).await {
                Ok(_) => true,
                Err(e) => {
                    tracing::warn!("Failed to save questionnaire response, continuing: {}", e);
                    false
                }
            }
        })
    }

    /// Full submission: save in the background, then query
    ///
    /// A failed query yields an empty candidate list.
    pub async fn submit(&self, response: QuestionnaireResponse) -> MatchOutcome {
        // Detached; the handle is dropped
        self.save_response_in_background(response);

        match self.find_matching_pets(&response).await {
            Ok(pets) => {
                tracing::info!("Found {} matching pets", pets.len());
                MatchOutcome { pets, query_error: None }
            }
            Err(e) => {
                tracing::error!("Error finding matching pets: {}", e);
                MatchOutcome {
                    pets: Vec::new(),
                    query_error: Some(e.to_string()),
                }
            }
        }
    }
}
