//! Process-wide default client.
//!
//! [`set_client`] is meant to be called once during startup, before any of the
//! free functions in this module are used. The slot cannot be replaced or
//! cleared afterwards.

use once_cell::sync::OnceCell;

use crate::{
    client::Client,
    errors::{Error, Result},
    notification::Notification,
    types::{
        CancelRequest, CancelResponse, GetStateRequest, GetStateResponse, InitRequest,
        InitResponse,
    },
};

static DEFAULT_CLIENT: OnceCell<Client> = OnceCell::new();

/// Installs the default client used by [`init`], [`cancel`], [`get_state`]
/// and [`parse_notification`].
///
/// Fails with [`Error::AlreadyConfigured`] if a client was already installed.
pub fn set_client(client: Client) -> Result<()> {
    DEFAULT_CLIENT
        .set(client)
        .map_err(|_| Error::AlreadyConfigured)?;

    #[cfg(feature = "tracing")]
    tracing::debug!(
        "Default client configured: terminal_key='{}'",
        default_client()?.terminal_key()
    );

    Ok(())
}

/// Returns the default client, or [`Error::NotConfigured`] before
/// [`set_client`] has been called.
pub fn default_client() -> Result<&'static Client> {
    DEFAULT_CLIENT.get().ok_or(Error::NotConfigured)
}

/// [`Client::init`] on the default client.
pub fn init(request: &InitRequest) -> Result<InitResponse> {
    default_client()?.init(request)
}

/// [`Client::cancel`] on the default client.
pub fn cancel(request: &CancelRequest) -> Result<CancelResponse> {
    default_client()?.cancel(request)
}

/// [`Client::get_state`] on the default client.
pub fn get_state(request: &GetStateRequest) -> Result<GetStateResponse> {
    default_client()?.get_state(request)
}

/// [`Client::parse_notification`] on the default client.
pub fn parse_notification<I, K, V>(form: I) -> Result<Notification>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    default_client()?.parse_notification(form)
}
