//! JSON-RPC 2.0 message types and the Vista method set.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

pub const JSONRPC_VERSION: &str = "2.0";
pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;
pub const NO_ACTIVE_VIEW: i32 = -32000;

/// Outbound method carrying one handler call to the extension.
pub const NOTIFY_METHOD: &str = "notify";

/// Outbound method carrying a cycle that finished after its request returned,
/// such as a throttled search.
pub const RECONCILED_METHOD: &str = "reconciled";

/// JSON-RPC 2.0 Request ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequestId {
    Number(u64),
    String(String),
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestId::Number(n) => write!(f, "{n}"),
            RequestId::String(s) => write!(f, "{s}"),
        }
    }
}

impl From<u64> for RequestId {
    fn from(n: u64) -> Self {
        RequestId::Number(n)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        RequestId::String(s.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    pub jsonrpc: String,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RequestId>,
}

impl Request {
    #[must_use]
    pub fn new(method: impl Into<String>, params: Option<Value>, id: RequestId) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
            id: Some(id),
        }
    }

    #[must_use]
    pub fn notification(method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
            id: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
    pub id: RequestId,
}

impl Response {
    #[must_use]
    pub fn success(id: RequestId, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: Some(result),
            error: None,
            id,
        }
    }

    #[must_use]
    pub fn error(id: RequestId, error: RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            result: None,
            error: Some(error),
            id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub jsonrpc: String,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl Notification {
    #[must_use]
    pub fn new(method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
        }
    }
}

/// `notify` with `{handler, args}`.
impl From<vista_types::Notification> for Notification {
    fn from(call: vista_types::Notification) -> Self {
        Self::new(
            NOTIFY_METHOD,
            Some(json!({"handler": call.handler, "args": call.args})),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcError {
    #[must_use]
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    #[must_use]
    pub fn parse_error() -> Self {
        Self::new(PARSE_ERROR, "Parse error")
    }

    #[must_use]
    pub fn invalid_request() -> Self {
        Self::new(INVALID_REQUEST, "Invalid Request")
    }

    #[must_use]
    pub fn method_not_found() -> Self {
        Self::new(METHOD_NOT_FOUND, "Method not found")
    }

    #[must_use]
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(INVALID_PARAMS, message)
    }

    #[must_use]
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(INTERNAL_ERROR, message)
    }

    #[must_use]
    pub fn no_active_view() -> Self {
        Self::new(NO_ACTIVE_VIEW, "No active view")
    }
}

impl std::fmt::Display for RpcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RPC error {}: {}", self.code, self.message)
    }
}

impl std::error::Error for RpcError {}

/// Any frame on the wire. A request without an id is a notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Message {
    Request(Request),
    Response(Response),
    Notification(Notification),
}

impl Message {
    #[must_use]
    pub fn is_request(&self) -> bool {
        matches!(self, Message::Request(r) if r.id.is_some())
    }

    #[must_use]
    pub fn is_notification(&self) -> bool {
        matches!(self, Message::Request(r) if r.id.is_none())
            || matches!(self, Message::Notification(_))
    }
}

impl From<vista_types::Notification> for Message {
    fn from(call: vista_types::Notification) -> Self {
        Message::Notification(call.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    First,
    Last,
}

/// Inbound call: render payloads from the extension, input from the host.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// A fresh render payload (the document JSON)
    Render(Value),
    SearchText { text: String },
    Select { id: String },
    /// Activate the action at `index`, or the primary action
    Activate { index: Option<usize> },
    Move { direction: Direction },
    /// Value picked in the search bar dropdown
    DropdownChange { value: String },
    /// Text typed into the search bar dropdown
    DropdownSearch { text: String },
    /// Committed form field value
    FieldChange { id: String, value: Value },
    /// Text typed into a form dropdown field
    FieldSearch { id: String, text: String },
    Focus { id: String },
    Blur { id: String },
    /// Text typed into an open submenu, named by its `key`
    SubmenuSearch { key: String, text: String },
}

#[derive(Deserialize)]
struct TextParams {
    text: String,
}

#[derive(Deserialize)]
struct IdParams {
    id: String,
}

#[derive(Deserialize)]
struct DropdownChangeParams {
    value: String,
}

#[derive(Deserialize)]
struct FieldChangeParams {
    id: String,
    value: Value,
}

#[derive(Deserialize)]
struct FieldSearchParams {
    id: String,
    text: String,
}

#[derive(Deserialize)]
struct SubmenuSearchParams {
    key: String,
    text: String,
}

#[derive(Deserialize)]
struct ActivateParams {
    #[serde(default)]
    index: Option<usize>,
}

#[derive(Deserialize)]
struct MoveParams {
    direction: Direction,
}

impl Command {
    /// Decode a request into a command.
    ///
    /// # Errors
    ///
    /// `METHOD_NOT_FOUND` for an unknown method, `INVALID_PARAMS` when the
    /// params do not fit the method.
    pub fn from_request(request: &Request) -> Result<Self, RpcError> {
        let params = request.params.as_ref();
        match request.method.as_str() {
            "render" => Ok(Self::Render(params.cloned().unwrap_or(Value::Null))),
            "searchText" => decode::<TextParams>(params).map(|p| Self::SearchText { text: p.text }),
            "select" => decode::<IdParams>(params).map(|p| Self::Select { id: p.id }),
            "activate" => {
                decode::<ActivateParams>(params).map(|p| Self::Activate { index: p.index })
            }
            "move" => decode::<MoveParams>(params).map(|p| Self::Move {
                direction: p.direction,
            }),
            "dropdownChange" => {
                decode::<DropdownChangeParams>(params).map(|p| Self::DropdownChange {
                    value: p.value,
                })
            }
            "dropdownSearch" => {
                decode::<TextParams>(params).map(|p| Self::DropdownSearch { text: p.text })
            }
            "fieldChange" => decode::<FieldChangeParams>(params).map(|p| Self::FieldChange {
                id: p.id,
                value: p.value,
            }),
            "fieldSearch" => decode::<FieldSearchParams>(params).map(|p| Self::FieldSearch {
                id: p.id,
                text: p.text,
            }),
            "focus" => decode::<IdParams>(params).map(|p| Self::Focus { id: p.id }),
            "blur" => decode::<IdParams>(params).map(|p| Self::Blur { id: p.id }),
            "submenuSearch" => {
                decode::<SubmenuSearchParams>(params).map(|p| Self::SubmenuSearch {
                    key: p.key,
                    text: p.text,
                })
            }
            _ => Err(RpcError::method_not_found()),
        }
    }
}

fn decode<T: DeserializeOwned>(params: Option<&Value>) -> Result<T, RpcError> {
    let params = params.cloned().unwrap_or_else(|| json!({}));
    serde_json::from_value(params).map_err(|e| RpcError::invalid_params(e.to_string()))
}
