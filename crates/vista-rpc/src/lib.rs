//! JSON-RPC 2.0 framing between Vista and an extension process.
//!
//! The extension sends render payloads and the host's input as requests; the
//! host answers with reconciliation results and pushes handler calls back as
//! `notify` notifications.
//!
//! - [`protocol`]: message types, inbound commands and the outbound `notify`
//! - [`transport`]: 4-byte length-prefixed codec for stream framing
//! - [`notifier`]: a [`Notifier`](vista_types::Notifier) feeding a channel
//!
//! # Example
//!
//! ```no_run
//! use futures_util::StreamExt;
//! use tokio_util::codec::FramedRead;
//! use vista_rpc::{Command, JsonRpcCodec, Message};
//!
//! # async fn example() -> Result<(), vista_rpc::Error> {
//! let mut frames = FramedRead::new(tokio::io::stdin(), JsonRpcCodec::new());
//! while let Some(message) = frames.next().await {
//!     if let Message::Request(request) = message? {
//!         let command = Command::from_request(&request)?;
//!         println!("{command:?}");
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod notifier;
pub mod protocol;
pub mod transport;

pub use error::{Error, Result};
pub use notifier::ChannelNotifier;
pub use protocol::{
    Command, Direction, INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, JSONRPC_VERSION,
    METHOD_NOT_FOUND, Message, NO_ACTIVE_VIEW, NOTIFY_METHOD, Notification, PARSE_ERROR,
    RECONCILED_METHOD, Request, RequestId, Response, RpcError,
};
pub use transport::{CodecError, JsonRpcCodec};
