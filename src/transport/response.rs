use serde::Deserialize;

use super::money::TransportAmount;
use crate::domain::{GatewayResponse, Status};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unexpected response status: {status}")]
    UnexpectedStatus { status: String },
}

#[derive(Debug, Clone, Deserialize)]
struct GatewayJsonResponse {
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "Message", default)]
    message: Option<String>,
    #[serde(rename = "Cost", default)]
    cost: Option<TransportAmount>,
    #[serde(rename = "Currency", default)]
    currency: Option<String>,
    #[serde(rename = "MsgFollowUpUniqueCode", default)]
    follow_up_code: Option<String>,
    #[serde(rename = "Balance", default)]
    balance: Option<TransportAmount>,
}

fn parse_status(raw: &str) -> Result<Status, TransportError> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("ok") {
        Ok(Status::Ok)
    } else if trimmed.eq_ignore_ascii_case("failed") {
        Ok(Status::Failed)
    } else {
        Err(TransportError::UnexpectedStatus {
            status: raw.to_owned(),
        })
    }
}

pub fn decode_gateway_json_response(json: &str) -> Result<GatewayResponse, TransportError> {
    let parsed: GatewayJsonResponse = serde_json::from_str(json)?;
    Ok(GatewayResponse {
        status: parse_status(&parsed.status)?,
        message: parsed.message,
        cost: parsed.cost.map(TransportAmount::into_amount),
        currency: parsed.currency,
        follow_up_code: parsed.follow_up_code,
        balance: parsed.balance.map(TransportAmount::into_amount),
    })
}
