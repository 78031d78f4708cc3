use bon::Builder;
use url::Url;

use crate::{
    errors::{Error, Result},
    form::{Form, FormFields},
    notification::Notification,
    token::{Credentials, PASSWORD_KEY},
    types::{
        CancelRequest, CancelResponse, GetStateRequest, GetStateResponse, InitRequest,
        InitResponse, Request,
    },
};

/// Production endpoint of the Merchant API.
pub const DEFAULT_BASE_URL: &str = "https://securepay.tinkoff.ru/rest";

fn default_base_url() -> Url {
    // DEFAULT_BASE_URL is a constant absolute URL, parsing cannot fail.
    Url::parse(DEFAULT_BASE_URL).expect("DEFAULT_BASE_URL is a valid URL")
}

/// A blocking client for the Merchant API.
///
/// Holds only immutable configuration, so a single instance can be shared by
/// concurrent callers.
///
/// ```no_run
/// use tinkoff_merchant::{Client, types::{InitRequest, RequestData}};
///
/// # fn main() -> tinkoff_merchant::errors::Result<()> {
/// let client = Client::new("TinkoffBankTest", "secret");
///
/// let response = client.init(
///     &InitRequest::builder()
///         .amount(100_000)
///         .order_id("21050")
///         .data(RequestData::new("customer@example.com"))
///         .build(),
/// )?;
///
/// if response.success {
///     println!("redirect to {}", response.payment_url);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Builder, Debug, Clone)]
pub struct Client {
    credentials: Credentials,
    /// Operation paths are appended to this URL.
    #[builder(default = default_base_url())]
    base_url: Url,
    #[builder(default)]
    http: reqwest::blocking::Client,
}

impl Client {
    /// Creates a client for the production endpoint.
    pub fn new(terminal_key: impl Into<String>, password: impl Into<String>) -> Self {
        Client::builder()
            .credentials(Credentials::new(terminal_key, password))
            .build()
    }

    /// Points the client at another endpoint, e.g. a test server.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.base_url = Url::parse(base_url)?;
        Ok(self)
    }

    pub fn terminal_key(&self) -> &str {
        self.credentials.terminal_key()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Collects the fields of `record` and signs them with this client's
    /// credentials.
    ///
    /// The returned form still holds `Password`; [`Client::execute`] strips it
    /// before sending.
    pub fn signed_form<R: FormFields + ?Sized>(&self, record: &R) -> Form {
        let mut form = record.to_form();
        self.credentials.sign(&mut form);
        form
    }

    /// Sends `request` to its operation endpoint and decodes the reply.
    ///
    /// Gateway-side failures are part of the decoded response; only transport
    /// and decoding problems are returned as errors.
    pub fn execute<R: Request>(&self, request: &R) -> Result<R::Response> {
        let url = self.endpoint(R::PATH)?;

        let mut form = self.signed_form(request);
        form.remove(PASSWORD_KEY);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Sending {} request: url='{}', order_id='{}', payment_id='{}'",
            R::PATH,
            url,
            form.get("OrderId").unwrap_or_default(),
            form.get("PaymentId").unwrap_or_default(),
        );

        let response = self.http.post(url).form(&form).send()?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Received {} response: status={}",
            R::PATH,
            response.status()
        );

        let body = response.text()?;

        Ok(serde_json::from_str(&body)?)
    }

    /// Creates a payment.
    pub fn init(&self, request: &InitRequest) -> Result<InitResponse> {
        self.execute(request)
    }

    /// Cancels a payment.
    pub fn cancel(&self, request: &CancelRequest) -> Result<CancelResponse> {
        self.execute(request)
    }

    /// Fetches the state of a payment.
    pub fn get_state(&self, request: &GetStateRequest) -> Result<GetStateResponse> {
        self.execute(request)
    }

    /// Checks that `notification` was issued for this terminal and carries
    /// the token the gateway would compute with this client's password.
    pub fn verify_notification(&self, notification: &Notification) -> Result<()> {
        if notification.terminal_key != self.terminal_key() {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                "Rejected notification: terminal_key='{}', order_id='{}'",
                notification.terminal_key,
                notification.order_id
            );
            return Err(Error::BadKey);
        }

        let expected = self.credentials.token_for(&notification.to_form());
        if expected != notification.token {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                "Rejected notification with invalid token: order_id='{}', payment_id={}",
                notification.order_id,
                notification.payment_id
            );
            return Err(Error::BadToken);
        }

        Ok(())
    }

    /// Parses and verifies a notification from decoded form fields, e.g. the
    /// parsed body of the callback request.
    pub fn parse_notification<I, K, V>(&self, form: I) -> Result<Notification>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let notification = Notification::parse(form)?;
        self.verify_notification(&notification)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            "Accepted notification: order_id='{}', status='{}'",
            notification.order_id,
            notification.status
        );

        Ok(notification)
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidBaseUrl(self.base_url.clone()))?
            .pop_if_empty()
            .push(path);
        Ok(url)
    }
}
