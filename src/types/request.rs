//! Requests issued by the [`Client`](crate::Client).
//!
//! Required fields are not validated locally: a request missing one is still
//! sent, and the gateway reports the problem through the response's
//! `Success`/`ErrorCode` fields.

use std::collections::BTreeMap;

use bon::Builder;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::de::DeserializeOwned;

use crate::{
    form::{Form, FormFields},
    types::{CancelResponse, GetStateResponse, InitResponse},
};

/// A request type bound to its gateway operation.
pub trait Request: FormFields {
    /// The decoded reply of this operation.
    type Response: DeserializeOwned;

    /// Operation path under the client's base URL.
    const PATH: &'static str;
}

/// Additional data attached to an [`InitRequest`] under the `DATA` key.
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestData {
    /// Customer email. Required by the gateway.
    #[builder(into)]
    pub email: String,
    /// Any other attributes, emitted after `Email` in key order.
    #[builder(default)]
    pub other: BTreeMap<String, String>,
}

impl RequestData {
    pub fn new(email: impl Into<String>) -> Self {
        RequestData {
            email: email.into(),
            other: BTreeMap::new(),
        }
    }

    /// Adds an extra attribute, replacing any previous value for `key`.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.other.insert(key.into(), value.into());
        self
    }

    /// Encodes the data as `Email=<value>|<Key>=<value>|...`.
    ///
    /// Values are escaped like URL query values, keys are written as is.
    ///
    /// ```
    /// use tinkoff_merchant::types::RequestData;
    ///
    /// let data = RequestData::new("test@test.ru").with("Phone", "+71234567890");
    /// assert_eq!(data.encode(), "Email=test%40test.ru|Phone=%2B71234567890");
    /// ```
    pub fn encode(&self) -> String {
        std::iter::once(encode_pair("Email", &self.email))
            .chain(self.other.iter().map(|(k, v)| encode_pair(k, v)))
            .collect::<Vec<_>>()
            .join("|")
    }
}

/// Bytes escaped in a `DATA` value: all but `A-Za-z0-9-_.~`. Space is
/// written as `+` instead.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b' ');

fn encode_pair(key: &str, value: &str) -> String {
    let value = utf8_percent_encode(value, QUERY_VALUE)
        .to_string()
        .replace(' ', "+");
    format!("{key}={value}")
}

/// Creates a new payment.
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq)]
pub struct InitRequest {
    /// Amount in kopecks. Required.
    pub amount: i64,
    /// Merchant-side order identifier. Required.
    #[builder(into)]
    pub order_id: String,
    #[builder(into, default)]
    pub ip: String,
    #[builder(into, default)]
    pub description: String,
    /// ISO 4217 numeric currency code.
    #[builder(default)]
    pub currency: i64,
    #[builder(into, default)]
    pub pay_form: String,
    #[builder(into, default)]
    pub customer_key: String,
    /// Registers the payment as the parent of future recurring charges.
    #[builder(default)]
    pub recurrent: bool,
    /// Required by the gateway, optional here so partial requests can be built.
    pub data: Option<RequestData>,
}

impl FormFields for InitRequest {
    fn write_fields(&self, form: &mut Form) {
        form.push_int("Amount", self.amount);
        form.push_str("OrderId", &self.order_id);
        form.push_str("IP", &self.ip);
        form.push_str("Description", &self.description);
        form.push_int("Currency", self.currency);
        form.push_str("PayForm", &self.pay_form);
        form.push_str("CustomerKey", &self.customer_key);
        form.push_bool("Recurrent", self.recurrent);
        form.push_data(self.data.as_ref());
    }
}

impl Request for InitRequest {
    type Response = InitResponse;
    const PATH: &'static str = "Init";
}

/// Cancels a payment, fully or partially.
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq)]
pub struct CancelRequest {
    /// Required.
    pub payment_id: i64,
    #[builder(into, default)]
    pub ip: String,
    #[builder(into, default)]
    pub reason: String,
    /// Amount to refund; the whole payment when zero.
    #[builder(default)]
    pub amount: i64,
}

impl FormFields for CancelRequest {
    fn write_fields(&self, form: &mut Form) {
        form.push_int("PaymentId", self.payment_id);
        form.push_str("IP", &self.ip);
        form.push_str("Reason", &self.reason);
        form.push_int("Amount", self.amount);
    }
}

impl Request for CancelRequest {
    type Response = CancelResponse;
    const PATH: &'static str = "Cancel";
}

/// Queries the current state of a payment.
#[derive(Builder, Debug, Clone, Default, PartialEq, Eq)]
pub struct GetStateRequest {
    /// Required.
    pub payment_id: i64,
    #[builder(into, default)]
    pub ip: String,
}

impl FormFields for GetStateRequest {
    fn write_fields(&self, form: &mut Form) {
        form.push_int("PaymentId", self.payment_id);
        form.push_str("IP", &self.ip);
    }
}

impl Request for GetStateRequest {
    type Response = GetStateResponse;
    const PATH: &'static str = "GetState";
}
