/// Predictor wire format.
/// Must stay in sync with the prediction service.
///
/// Request (POST, JSON):
/// ```text
/// { "current_words": ["Every", "word"], "target_word": "carries" }
/// ```
///
/// Response (JSON):
/// ```text
/// { "next_candidates": [ { "word": "carries", "probability": 1.0 }, ... ] }
/// ```
///
/// Probabilities are in [0, 1] and become importances in [0, 100].

use serde::{Deserialize, Serialize};

use crate::api::error::PredictorError;
use crate::api::types::{CandidateWord, FetchRequest};

/// Request body sent to the predictor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub current_words: Vec<String>,
    pub target_word: String,
}

impl From<&FetchRequest> for PredictRequest {
    fn from(req: &FetchRequest) -> Self {
        Self {
            current_words: req.current_words.clone(),
            target_word: req.target_word.clone(),
        }
    }
}

/// One ranked candidate as the service reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextCandidate {
    pub word: String,
    pub probability: f32,
}

/// Response body from the predictor. Extra fields (the service echoes
/// `current_words`) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub next_candidates: Vec<NextCandidate>,
}

impl PredictResponse {
    /// Parse a response body.
    pub fn from_json(json: &str) -> Result<Self, PredictorError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Map to candidate words, `importance = probability × 100`, keeping the
    /// service's order.
    pub fn into_candidates(self) -> Vec<CandidateWord> {
        self.next_candidates
            .into_iter()
            .map(|c| CandidateWord::new(c.word, c.probability * 100.0))
            .collect()
    }
}

/// Parse a response body straight into candidate words.
pub fn parse_candidates(json: &str) -> Result<Vec<CandidateWord>, PredictorError> {
    PredictResponse::from_json(json).map(PredictResponse::into_candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::StepToken;

    #[test]
    fn request_serializes_with_wire_names() {
        let fetch = FetchRequest {
            token: StepToken(3),
            current_words: vec!["Every".into(), "word".into()],
            target_word: "carries".into(),
        };
        let json = serde_json::to_value(PredictRequest::from(&fetch)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "current_words": ["Every", "word"], "target_word": "carries" })
        );
    }

    #[test]
    fn response_maps_probability_to_importance() {
        let body = r#"{
            "current_words": ["Every"],
            "next_candidates": [
                { "word": "word", "probability": 1.0 },
                { "word": "day", "probability": 0.25 }
            ]
        }"#;
        let cands = parse_candidates(body).unwrap();
        assert_eq!(cands.len(), 2);
        assert_eq!(cands[0], CandidateWord::new("word", 100.0));
        assert_eq!(cands[1], CandidateWord::new("day", 25.0));
    }

    #[test]
    fn empty_candidate_list_is_valid() {
        let cands = parse_candidates(r#"{ "next_candidates": [] }"#).unwrap();
        assert!(cands.is_empty());
    }

    #[test]
    fn missing_field_is_decode_error() {
        let err = parse_candidates(r#"{ "error": "boom" }"#).unwrap_err();
        assert!(matches!(err, PredictorError::Decode(_)));
    }

    #[test]
    fn wrong_types_are_decode_error() {
        let err = parse_candidates(r#"{ "next_candidates": [ { "word": 1, "probability": "x" } ] }"#)
            .unwrap_err();
        assert!(matches!(err, PredictorError::Decode(_)));
    }
}
