mod common;

use common::MockGateway;
use tinkoff_merchant::{
    Client, Error, Notification,
    form::FormFields,
    token::TOKEN_KEY,
    types::{CancelRequest, GetStateRequest, InitRequest},
};

// The default client is process-wide, so everything touching it lives in a
// single test.
#[test]
fn test_default_client_lifecycle() {
    assert!(matches!(
        tinkoff_merchant::init(&InitRequest::default()),
        Err(Error::NotConfigured)
    ));
    assert!(matches!(
        tinkoff_merchant::parse_notification(Vec::<(String, String)>::new()),
        Err(Error::NotConfigured)
    ));

    let gateway = MockGateway::start();
    let client = Client::new("testDEMO", "testPass")
        .with_base_url(&gateway.url("rest"))
        .unwrap();
    tinkoff_merchant::set_client(client.clone()).unwrap();

    assert!(matches!(
        tinkoff_merchant::set_client(client.clone()),
        Err(Error::AlreadyConfigured)
    ));

    assert_eq!(tinkoff_merchant::init(&InitRequest::default()).unwrap().message, "ok");
    assert_eq!(tinkoff_merchant::cancel(&CancelRequest::default()).unwrap().message, "ok");
    assert_eq!(
        tinkoff_merchant::get_state(&GetStateRequest::default()).unwrap().message,
        "ok"
    );

    let mut notification = Notification {
        terminal_key: "testDEMO".to_string(),
        order_id: "21050".to_string(),
        success: true,
        status: "AUTHORIZED".to_string(),
        payment_id: 13660,
        error_code: "0".to_string(),
        amount: 100000,
        pan: "430000******0777".to_string(),
        token: String::new(),
    };
    let mut signed = client.signed_form(&notification);
    notification.token = signed.remove(TOKEN_KEY).unwrap();

    let mut form = notification.to_form();
    form.set("TerminalKey", notification.terminal_key.clone());
    form.set("Success", "true");
    form.set("Token", notification.token.clone());

    let parsed = tinkoff_merchant::parse_notification(form.clone()).unwrap();
    assert_eq!(parsed, notification);

    form.set("TerminalKey", "otherDEMO");
    assert!(matches!(
        tinkoff_merchant::parse_notification(form),
        Err(Error::BadKey)
    ));
}
