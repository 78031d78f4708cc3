//! Responses decoded from the gateway's JSON replies.
//!
//! Fields missing from a reply decode to their zero value and unknown fields
//! are ignored. A decoded response may still describe a failed operation, see
//! [`Response::success`] and [`Response::error_code`].

use serde::{Deserialize, Deserializer};

use crate::types::PaymentStatus;

/// Fields common to every reply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Response {
    pub terminal_key: String,
    pub order_id: String,
    /// Documented as a number, sent as a string; both are accepted.
    #[serde(deserialize_with = "string_or_number")]
    pub payment_id: String,
    pub success: bool,
    pub status: String,
    pub error_code: String,
    pub message: String,
    pub details: String,
}

impl Response {
    /// Typed view of [`Response::status`].
    pub fn payment_status(&self) -> PaymentStatus {
        self.status.parse().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct InitResponse {
    #[serde(flatten)]
    pub response: Response,
    pub amount: i64,
    /// Payment form the customer should be redirected to.
    #[serde(rename = "PaymentURL")]
    pub payment_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CancelResponse {
    #[serde(flatten)]
    pub response: Response,
    pub original_amount: i64,
    pub new_amount: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GetStateResponse {
    #[serde(flatten)]
    pub response: Response,
}

macro_rules! impl_deref_response {
    ($($ty:ty),*) => {
        $(
            impl std::ops::Deref for $ty {
                type Target = Response;

                fn deref(&self) -> &Response {
                    &self.response
                }
            }
        )*
    };
}

impl_deref_response!(InitResponse, CancelResponse, GetStateResponse);

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(serde_json::Number),
    }

    Ok(
        match Option::<StringOrNumber>::deserialize(deserializer)? {
            Some(StringOrNumber::String(s)) => s,
            Some(StringOrNumber::Number(n)) => n.to_string(),
            None => String::new(),
        },
    )
}
