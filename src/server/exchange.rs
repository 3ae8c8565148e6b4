//! `GET /exchange` handler and its JSON bodies.
use crate::core::{ConversionError, ConversionHandler, ConversionRequest};
use axum::{
    Json,
    extract::{RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Response body. Serialized as `{"msg":"success","amount":..}` or
/// `{"msg":"error","error":..}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "msg", rename_all = "lowercase")]
pub enum ExchangeResponse {
    Success { amount: String },
    Error { error: String },
}

impl IntoResponse for ConversionError {
    fn into_response(self) -> Response {
        let body = ExchangeResponse::Error {
            error: self.to_string(),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

pub async fn exchange(
    State(handler): State<ConversionHandler>,
    RawQuery(query): RawQuery,
) -> Result<Json<ExchangeResponse>, ConversionError> {
    let request = parse_query(query.as_deref());
    let converted = handler.handle(&request)?;
    Ok(Json(ExchangeResponse::Success {
        amount: converted.formatted,
    }))
}

/// Decodes the query string. Undecodable input yields an empty request, which
/// the handler rejects as missing parameters.
fn parse_query(query: Option<&str>) -> ConversionRequest {
    let pairs = match query {
        Some(query) => serde_urlencoded::from_str::<Vec<(String, String)>>(query)
            .unwrap_or_else(|e| {
                debug!(error = %e, "Failed to decode query string");
                Vec::new()
            }),
        None => Vec::new(),
    };
    ConversionRequest::from_query_pairs(pairs)
}
