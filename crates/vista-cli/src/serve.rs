//! Stdio host: one extension process driving one view session.
//!
//! Requests are answered in arrival order. Handler calls raised while a
//! request is handled are written before its response. Throttled searches
//! settle on a timer and are pushed as `reconciled` notifications.

use anyhow::{Context, Result};
use futures_util::{Sink, SinkExt, StreamExt};
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{debug, info, warn};
use vista_core::config::Config;
use vista_core::{Notifier, ViewSession, parse};
use vista_rpc::{
    ChannelNotifier, CodecError, Command, Direction, JsonRpcCodec, Message, Notification,
    RECONCILED_METHOD, Request, Response, RpcError,
};

/// Serve until the extension closes its end of the stream.
///
/// # Errors
///
/// Returns an error on I/O failure or a frame that breaks the stream framing.
/// Malformed JSON inside a well-framed message is logged and skipped.
pub async fn run<R, W>(config: Config, reader: R, writer: W) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (notifier, mut outbound) = ChannelNotifier::channel();
    let mut session = ViewSession::new(config, notifier);
    let mut frames = FramedRead::new(reader, JsonRpcCodec::new());
    let mut sink = FramedWrite::new(writer, JsonRpcCodec::new());

    info!("Serving view session on stdio");

    loop {
        let wake = session.next_deadline().map(tokio::time::Instant::from_std);

        tokio::select! {
            frame = frames.next() => {
                let Some(frame) = frame else {
                    info!("Extension closed the stream");
                    break;
                };
                match frame {
                    Ok(Message::Request(request)) => {
                        let response = handle_request(&mut session, &request, Instant::now());
                        flush(&mut outbound, &mut sink).await?;
                        if let Some(response) = response {
                            sink.send(Message::Response(response))
                                .await
                                .context("Failed to write response")?;
                        }
                    }
                    Ok(other) => debug!(?other, "Ignoring message that is not a request"),
                    Err(CodecError::Json(e)) => warn!("Skipping malformed message: {e}"),
                    Err(CodecError::Utf8(e)) => warn!("Skipping message with invalid UTF-8: {e}"),
                    Err(e) => return Err(e).context("Failed to read message"),
                }
            }
            () = sleep_until(wake) => {
                let Some(result) = session.poll(Instant::now()) else {
                    continue;
                };
                flush(&mut outbound, &mut sink).await?;
                let params = serde_json::to_value(&result)?;
                sink.send(Message::Notification(Notification::new(
                    RECONCILED_METHOD,
                    Some(params),
                )))
                .await
                .context("Failed to write reconciliation")?;
            }
        }
    }

    flush(&mut outbound, &mut sink).await
}

async fn sleep_until(deadline: Option<tokio::time::Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// Write every queued handler call.
async fn flush<S>(outbound: &mut UnboundedReceiver<Message>, sink: &mut S) -> Result<()>
where
    S: Sink<Message, Error = CodecError> + Unpin,
{
    while let Ok(message) = outbound.try_recv() {
        sink.send(message)
            .await
            .context("Failed to write notification")?;
    }
    Ok(())
}

/// Run one request against the session. Requests without an id get no
/// response; their failures are only logged.
pub fn handle_request<N: Notifier>(
    session: &mut ViewSession<N>,
    request: &Request,
    now: Instant,
) -> Option<Response> {
    let result = Command::from_request(request).and_then(|command| {
        debug!(?command, "Dispatching");
        dispatch(session, command, now)
    });

    match (request.id.clone(), result) {
        (Some(id), Ok(value)) => Some(Response::success(id, value)),
        (Some(id), Err(error)) => Some(Response::error(id, error)),
        (None, Ok(_)) => None,
        (None, Err(error)) => {
            warn!(method = %request.method, code = error.code, "{}", error.message);
            None
        }
    }
}

fn dispatch<N: Notifier>(
    session: &mut ViewSession<N>,
    command: Command,
    now: Instant,
) -> Result<Value, RpcError> {
    match command {
        Command::Render(payload) => to_result(&session.render(parse(&payload))),
        Command::SearchText { text } => to_result(&session.set_search_text(&text, now)),
        Command::Select { id } => to_result(&session.select_id(&id)),
        Command::Activate { index } => {
            let outcome = match index {
                Some(index) => session.activate(index),
                None => session.activate_primary(),
            }
            .map_err(rpc_error)?;
            to_result(&outcome)
        }
        Command::Move { direction } => {
            let event = match direction {
                Direction::Up => session.select_prev(),
                Direction::Down => session.select_next(),
                Direction::First => session.select_first(),
                Direction::Last => session.select_last(),
            };
            to_result(&event)
        }
        Command::DropdownChange { value } => to_result(&session.dropdown_changed(&value)),
        Command::DropdownSearch { text } => {
            session.dropdown_search_changed(&text);
            Ok(Value::Null)
        }
        Command::FieldChange { id, value } => {
            session.set_field_value(&id, value).map_err(rpc_error)?;
            Ok(Value::Null)
        }
        Command::FieldSearch { id, text } => {
            session.set_field_search_text(&id, &text).map_err(rpc_error)?;
            Ok(Value::Null)
        }
        Command::Focus { id } => {
            session.focus_field(&id).map_err(rpc_error)?;
            Ok(Value::Null)
        }
        Command::Blur { id } => {
            session.blur_field(&id).map_err(rpc_error)?;
            Ok(Value::Null)
        }
        Command::SubmenuSearch { key, text } => {
            let panel = session.search_submenu_key(&key, &text).map_err(rpc_error)?;
            to_result(&panel)
        }
    }
}

fn to_result<T: Serialize>(value: &T) -> Result<Value, RpcError> {
    serde_json::to_value(value).map_err(|e| RpcError::internal_error(e.to_string()))
}

fn rpc_error(error: vista_core::Error) -> RpcError {
    use vista_core::Error;

    match error {
        Error::NoActiveView => RpcError::no_active_view(),
        Error::NoSuchAction(_)
        | Error::Submit { .. }
        | Error::UnknownField(_)
        | Error::UnknownSubmenu(_) => RpcError::invalid_params(error.to_string()),
        other => RpcError::internal_error(other.to_string()),
    }
}
