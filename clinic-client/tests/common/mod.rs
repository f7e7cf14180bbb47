// clinic-client/tests/common/mod.rs
// 测试用后端 - 记录请求并按测试给定的规则应答

#![allow(dead_code)]

use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use clinic_client::{ClientConfig, NetworkHttpClient};
use serde_json::Value;
use std::sync::{Arc, Mutex};

pub const TEST_TOKEN: &str = "test-token";

/// One request as the backend saw it
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Value,
}

pub enum MockReply {
    Json(StatusCode, Value),
    Bytes(Vec<u8>),
}

impl MockReply {
    pub fn ok(body: Value) -> Self {
        MockReply::Json(StatusCode::OK, body)
    }

    pub fn created(body: Value) -> Self {
        MockReply::Json(StatusCode::CREATED, body)
    }

    pub fn error(status: StatusCode, message: &str) -> Self {
        MockReply::Json(status, serde_json::json!({ "error": message }))
    }
}

impl IntoResponse for MockReply {
    fn into_response(self) -> Response {
        match self {
            MockReply::Json(status, body) => (status, Json(body)).into_response(),
            MockReply::Bytes(bytes) => bytes.into_response(),
        }
    }
}

type Responder = dyn Fn(&RecordedRequest) -> MockReply + Send + Sync;

#[derive(Clone)]
struct MockState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    responder: Arc<Responder>,
}

pub struct MockBackend {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockBackend {
    /// Bind to an ephemeral port and serve `responder` for every route
    pub async fn spawn(
        responder: impl Fn(&RecordedRequest) -> MockReply + Send + Sync + 'static,
    ) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            requests: requests.clone(),
            responder: Arc::new(responder),
        };
        let app = Router::new().fallback(handle).with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind listener");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });

        Self {
            base_url: format!("http://{addr}"),
            requests,
        }
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::new(&self.base_url).with_token(TEST_TOKEN)
    }

    pub fn client(&self) -> NetworkHttpClient {
        self.config().build_http_client().expect("build client")
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

async fn handle(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> MockReply {
    let request = RecordedRequest {
        method,
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    };
    let reply = (state.responder)(&request);
    state.requests.lock().expect("requests lock").push(request);
    reply
}
