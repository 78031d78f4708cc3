//! # Tinkoff Merchant
//!
//! A blocking client for the Tinkoff Merchant API (`https://securepay.tinkoff.ru/rest`).
//!
//! It builds signed form requests for the `Init`, `Cancel` and `GetState`
//! operations, decodes their JSON replies, and verifies the payment
//! notifications the gateway posts to the merchant's callback URL.
//!
//! ## Core Components Overview
//!
//! - **[`form`]**: Flattening request records into form fields.
//! - **[`token`]**: The SHA-256 token that authenticates requests and notifications.
//! - **[`types`]**: Request, response and payment status types.
//! - **[`client`]**: The HTTP client tying the above together.
//! - **[`notification`]**: Parsing inbound notifications and acknowledging them.
//! - **[`global`]**: An optional process-wide default client.
//!
//! ## Sending Requests
//!
//! ```no_run
//! use tinkoff_merchant::{Client, types::GetStateRequest};
//!
//! # fn main() -> tinkoff_merchant::errors::Result<()> {
//! let client = Client::new("TinkoffBankTest", "secret");
//! let state = client.get_state(&GetStateRequest::builder().payment_id(13660).build())?;
//! println!("{}: {}", state.payment_id, state.payment_status());
//! # Ok(())
//! # }
//! ```
//!
//! ## Handling Notifications
//!
//! The gateway expects a `200 OK` with the body `OK` once a notification is
//! accepted, see [`NotificationAck`].
//!
//! ```
//! use tinkoff_merchant::{Client, NotificationAck, errors::Error};
//!
//! let client = Client::new("TinkoffBankTest", "secret");
//! let body = "TerminalKey=TinkoffBankTest&OrderId=21050&Success=true&Status=CONFIRMED\
//!             &PaymentId=13660&ErrorCode=0&Amount=100000&Pan=430000******0777&Token=forged";
//!
//! let form = url::form_urlencoded::parse(body.as_bytes());
//! match client.parse_notification(form) {
//!     Ok(_notification) => { let _reply: http::Response<String> = NotificationAck.into(); }
//!     Err(err) => assert!(matches!(err, Error::BadToken)),
//! }
//! ```

pub mod client;
pub mod errors;
pub mod form;
pub mod global;
pub mod notification;
pub mod token;
pub mod types;

pub use client::{Client, DEFAULT_BASE_URL};
pub use errors::{Error, Result};
pub use global::{cancel, default_client, get_state, init, parse_notification, set_client};
pub use notification::{Notification, NotificationAck};
pub use token::Credentials;
