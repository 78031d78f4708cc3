//! Payment notifications pushed by the gateway to the merchant's callback URL.
//!
//! Parsing and verification are separate steps: [`Notification::parse`] only
//! checks field types, while [`Client::verify_notification`] checks that the
//! notification is authentic. [`Client::parse_notification`] does both.
//!
//! [`Client::verify_notification`]: crate::Client::verify_notification
//! [`Client::parse_notification`]: crate::Client::parse_notification

use std::collections::HashMap;

use http::StatusCode;
use url::form_urlencoded;

use crate::{
    errors::{Error, Result},
    form::{Form, FormFields},
    token::{TERMINAL_KEY, TOKEN_KEY},
    types::PaymentStatus,
};

/// A payment status update received from the gateway.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notification {
    pub terminal_key: String,
    pub order_id: String,
    pub success: bool,
    pub status: String,
    pub payment_id: i64,
    pub error_code: String,
    pub amount: i64,
    /// Masked card number.
    pub pan: String,
    /// Token supplied by the gateway.
    pub token: String,
}

impl Notification {
    /// Parses a notification from already decoded form fields.
    ///
    /// Only the first value of a repeated key is used and missing keys read as
    /// empty. Parsing stops at the first field that does not match its type.
    pub fn parse<I, K, V>(form: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut fields: HashMap<String, String> = HashMap::new();
        for (key, value) in form {
            fields.entry(key.into()).or_insert_with(|| value.into());
        }
        let get = |key: &str| fields.get(key).map(String::as_str).unwrap_or_default();

        Ok(Notification {
            terminal_key: get(TERMINAL_KEY).to_string(),
            order_id: get("OrderId").to_string(),
            success: parse_bool(get("Success")).ok_or_else(|| {
                Error::field_parse("Success", format!("invalid boolean {:?}", get("Success")))
            })?,
            status: get("Status").to_string(),
            payment_id: get("PaymentId")
                .parse()
                .map_err(|err| Error::field_parse("PaymentId", err))?,
            error_code: get("ErrorCode").to_string(),
            amount: get("Amount")
                .parse()
                .map_err(|err| Error::field_parse("Amount", err))?,
            pan: get("Pan").to_string(),
            token: get(TOKEN_KEY).to_string(),
        })
    }

    /// Parses a raw `application/x-www-form-urlencoded` request body.
    pub fn from_body(body: &str) -> Result<Self> {
        Self::parse(form_urlencoded::parse(body.as_bytes()))
    }

    /// Typed view of [`Notification::status`].
    pub fn payment_status(&self) -> PaymentStatus {
        self.status.parse().unwrap_or_default()
    }
}

/// Accepts `1`, `t`, `T`, `true`, `TRUE`, `True` and their `false`
/// counterparts `0`, `f`, `F`, `false`, `FALSE`, `False`.
fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

/// Fields the token is recomputed over. `TerminalKey` is added by the signer
/// and `Token` is what is being checked, so neither is written here.
impl FormFields for Notification {
    fn write_fields(&self, form: &mut Form) {
        form.push_str("OrderId", &self.order_id);
        form.push_bool("Success", self.success);
        form.push_str("Status", &self.status);
        form.push_int("PaymentId", self.payment_id);
        form.push_str("ErrorCode", &self.error_code);
        form.push_int("Amount", self.amount);
        form.push_str("Pan", &self.pan);
    }
}

/// The reply the gateway expects once a notification has been accepted:
/// status 200 with the body `OK`.
///
/// Any other reply makes the gateway deliver the notification again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotificationAck;

impl NotificationAck {
    pub const BODY: &'static str = "OK";

    pub fn status(&self) -> StatusCode {
        StatusCode::OK
    }

    pub fn body(&self) -> &'static str {
        Self::BODY
    }

    /// Writes the body to `w`, returning the number of bytes written.
    pub fn write_to<W: std::io::Write>(&self, w: &mut W) -> std::io::Result<usize> {
        w.write_all(Self::BODY.as_bytes())?;
        Ok(Self::BODY.len())
    }
}

impl From<NotificationAck> for http::Response<String> {
    fn from(ack: NotificationAck) -> Self {
        let mut response = http::Response::new(ack.body().to_string());
        *response.status_mut() = ack.status();
        response
    }
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for NotificationAck {
    fn into_response(self) -> axum::response::Response {
        (self.status(), self.body()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> Vec<(&'static str, &'static str)> {
        vec![
            ("TerminalKey", "testDEMO"),
            ("OrderId", "21050"),
            ("Success", "true"),
            ("Status", "CONFIRMED"),
            ("PaymentId", "13660"),
            ("ErrorCode", "0"),
            ("Amount", "100000"),
            ("Pan", "430000******0777"),
            ("Token", "deadbeef"),
        ]
    }

    #[test]
    fn test_parse_notification() {
        let n = Notification::parse(payload()).unwrap();

        assert_eq!(n.terminal_key, "testDEMO");
        assert_eq!(n.order_id, "21050");
        assert!(n.success);
        assert_eq!(n.payment_status(), PaymentStatus::Confirmed);
        assert_eq!(n.payment_id, 13660);
        assert_eq!(n.error_code, "0");
        assert_eq!(n.amount, 100000);
        assert_eq!(n.pan, "430000******0777");
        assert_eq!(n.token, "deadbeef");
    }

    #[test]
    fn test_parse_first_value_wins() {
        let mut form = payload();
        form.push(("OrderId", "other"));
        let n = Notification::parse(form).unwrap();
        assert_eq!(n.order_id, "21050");
    }

    #[test]
    fn test_parse_bool_literals() {
        for (literal, expected) in [("TRUE", true), ("t", true), ("1", true), ("False", false)] {
            let form = payload()
                .into_iter()
                .map(|(k, v)| if k == "Success" { (k, literal) } else { (k, v) });
            assert_eq!(Notification::parse(form).unwrap().success, expected);
        }
    }

    #[test]
    fn test_parse_errors_name_field() {
        let cases = [
            ("Success", "yes"),
            ("PaymentId", "13660a"),
            ("Amount", "1.5"),
        ];
        for (field, bad) in cases {
            let form = payload()
                .into_iter()
                .map(|(k, v)| if k == field { (k, bad) } else { (k, v) });
            match Notification::parse(form) {
                Err(Error::FieldParse { field: f, .. }) => assert_eq!(f, field),
                other => panic!("expected parse error for {field}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_parse_missing_numeric_field() {
        let form = payload().into_iter().filter(|(k, _)| *k != "Amount");
        let err = Notification::parse(form).unwrap_err();
        assert!(err.to_string().starts_with("merchant: failed to parse Amount"));
    }

    #[test]
    fn test_from_body() {
        let n = Notification::from_body(
            "TerminalKey=testDEMO&OrderId=21050&Success=false&Status=REJECTED\
             &PaymentId=13660&ErrorCode=1051&Amount=100000&Pan=430000%2A%2A%2A%2A%2A%2A0777&Token=abc",
        )
        .unwrap();

        assert!(!n.success);
        assert_eq!(n.payment_status(), PaymentStatus::Rejected);
        assert_eq!(n.pan, "430000******0777");
    }

    #[test]
    fn test_notification_fields() {
        let n = Notification::parse(payload()).unwrap();
        let form = n.to_form();

        assert_eq!(form.get("Success"), Some("Y"));
        assert_eq!(form.get("PaymentId"), Some("13660"));
        assert!(!form.contains_key("Token"));
        assert!(!form.contains_key("TerminalKey"));
    }

    #[test]
    fn test_ack() {
        let response: http::Response<String> = NotificationAck.into();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.body(), "OK");

        let mut buf = Vec::new();
        assert_eq!(NotificationAck.write_to(&mut buf).unwrap(), 2);
        assert_eq!(buf, b"OK");
    }
}
