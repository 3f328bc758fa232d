//! Recommendation flow — turns a user's reading history into a list of
//! suggested titles via the LLM.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ai::prompts::{RECOMMEND_PROMPT_TEMPLATE, RECOMMEND_SYSTEM};
use crate::errors::AppError;
use crate::llm_client::prompts::REAL_BOOKS_INSTRUCTION;
use crate::llm_client::LlmClient;

/// Signals the recommendation prompt is built from. All fields default to
/// empty so clients can send any subset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecommendationInput {
    #[serde(default)]
    pub reading_history: Vec<String>,
    #[serde(default)]
    pub genre_preferences: Vec<String>,
    /// Title to rating, 1-5.
    #[serde(default)]
    pub ratings: HashMap<String, f64>,
}

impl RecommendationInput {
    pub fn is_empty(&self) -> bool {
        self.reading_history.is_empty()
            && self.genre_preferences.is_empty()
            && self.ratings.is_empty()
    }
}

/// Structured output of the recommendation flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsResult {
    pub recommended_books: Vec<String>,
}

/// Asks the LLM for recommendations grounded in the user's history.
pub async fn recommend_books(
    input: &RecommendationInput,
    llm: &LlmClient,
) -> Result<RecommendationsResult, AppError> {
    let prompt = build_recommend_prompt(input)?;
    llm.call_json::<RecommendationsResult>(&prompt, RECOMMEND_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Recommendation flow failed: {e}")))
}

fn build_recommend_prompt(input: &RecommendationInput) -> Result<String, AppError> {
    let history_json = serde_json::to_string(&input.reading_history)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("serializing reading history: {e}")))?;
    let genres_json = serde_json::to_string(&input.genre_preferences)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("serializing genre preferences: {e}")))?;
    let ratings_json = serde_json::to_string(&input.ratings)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("serializing ratings: {e}")))?;

    Ok(RECOMMEND_PROMPT_TEMPLATE
        .replace("{real_books_instruction}", REAL_BOOKS_INSTRUCTION)
        .replace("{reading_history_json}", &history_json)
        .replace("{genre_preferences_json}", &genres_json)
        .replace("{ratings_json}", &ratings_json))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_input() -> RecommendationInput {
        RecommendationInput {
            reading_history: vec!["Moby Dick".to_string(), "Frankenstein".to_string()],
            genre_preferences: vec!["Adventure".to_string()],
            ratings: HashMap::from([("Moby Dick".to_string(), 5.0)]),
        }
    }

    #[test]
    fn test_input_deserializes_with_all_fields() {
        let json = r#"{
            "reading_history": ["Moby Dick"],
            "genre_preferences": ["Adventure", "Gothic"],
            "ratings": {"Moby Dick": 4.5}
        }"#;
        let input: RecommendationInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.reading_history, vec!["Moby Dick"]);
        assert_eq!(input.genre_preferences.len(), 2);
        assert!((input.ratings["Moby Dick"] - 4.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_input_fields_default_to_empty() {
        let input: RecommendationInput = serde_json::from_str("{}").unwrap();
        assert!(input.is_empty());
    }

    #[test]
    fn test_input_with_any_field_is_not_empty() {
        let input: RecommendationInput =
            serde_json::from_str(r#"{"genre_preferences": ["Horror"]}"#).unwrap();
        assert!(!input.is_empty());
    }

    #[test]
    fn test_result_deserializes() {
        let json = r#"{"recommended_books": ["Dracula", "The Turn of the Screw"]}"#;
        let result: RecommendationsResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.recommended_books.len(), 2);
        assert_eq!(result.recommended_books[0], "Dracula");
    }

    #[test]
    fn test_prompt_embeds_all_inputs() {
        let prompt = build_recommend_prompt(&make_input()).unwrap();
        assert!(prompt.contains("\"Moby Dick\""), "got: {prompt}");
        assert!(prompt.contains("\"Frankenstein\""));
        assert!(prompt.contains("\"Adventure\""));
        assert!(prompt.contains("5.0") || prompt.contains("\"Moby Dick\":5"));
        assert!(!prompt.contains("{reading_history_json}"));
        assert!(!prompt.contains("{real_books_instruction}"));
    }
}
