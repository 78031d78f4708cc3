//! In-process stand-in for the Merchant API.

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex, mpsc},
    thread,
};

use axum::{
    Form, Json, Router,
    extract::{Path, State},
    response::IntoResponse,
    routing::post,
};
use serde_json::json;

/// Operation name and form fields of every request the gateway received.
pub type Received = Arc<Mutex<Vec<(String, HashMap<String, String>)>>>;

pub struct MockGateway {
    pub addr: SocketAddr,
    pub received: Received,
}

impl MockGateway {
    /// Starts the gateway on a background runtime.
    ///
    /// - `/rest/{operation}` answers `{"Message": "ok"}`
    /// - `/failing/{operation}` answers a gateway-side failure
    /// - `/broken/{operation}` answers a body that is not JSON
    pub fn start() -> Self {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let received = Received::default();
        let state = received.clone();
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .enable_all()
                .build()
                .unwrap();

            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
                tx.send(listener.local_addr().unwrap()).unwrap();

                let app = Router::new()
                    .route("/rest/{operation}", post(ok))
                    .route("/failing/{operation}", post(failing))
                    .route("/broken/{operation}", post(broken))
                    .with_state(state);

                axum::serve(listener, app).await.unwrap();
            });
        });

        MockGateway {
            addr: rx.recv().unwrap(),
            received,
        }
    }

    pub fn url(&self, prefix: &str) -> String {
        format!("http://{}/{prefix}", self.addr)
    }

    pub fn received(&self) -> Vec<(String, HashMap<String, String>)> {
        self.received.lock().unwrap().clone()
    }
}

async fn ok(
    State(received): State<Received>,
    Path(operation): Path<String>,
    Form(form): Form<HashMap<String, String>>,
) -> impl IntoResponse {
    received.lock().unwrap().push((operation, form));
    Json(json!({ "Message": "ok" }))
}

async fn failing(Path(operation): Path<String>) -> impl IntoResponse {
    Json(json!({
        "Success": false,
        "ErrorCode": "9999",
        "Message": format!("{operation} failed"),
        "Details": "Terminal is blocked"
    }))
}

async fn broken() -> impl IntoResponse {
    "<html>Bad Gateway</html>"
}
