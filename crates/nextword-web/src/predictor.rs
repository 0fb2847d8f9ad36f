use gloo::net::http::Request;

use nextword_engine::{parse_candidates, CandidateWord, FetchRequest, PredictRequest, PredictorError};

/// POST one step's request to the predictor and decode the candidate set.
pub async fn fetch_candidates(
    endpoint: &str,
    request: &FetchRequest,
) -> Result<Vec<CandidateWord>, PredictorError> {
    let body = PredictRequest::from(request);
    let response = Request::post(endpoint)
        .json(&body)
        .map_err(|e| PredictorError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| PredictorError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(PredictorError::Status {
            code: response.status(),
            text: response.status_text(),
        });
    }

    let text = response
        .text()
        .await
        .map_err(|e| PredictorError::Network(e.to_string()))?;
    parse_candidates(&text)
}
