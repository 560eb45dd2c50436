//! Reqwest-backed Telegram Bot API client.
//!
//! This adapter owns transport details only: request shaping, timeouts, HTTP
//! error mapping, and response-envelope decoding. Message rendering and
//! update routing live in the console dispatcher.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;

use super::dto::{InlineKeyboardMarkup, Update};
use crate::inbound::console::{ConsoleTransport, Keyboard, TransportError};

const API_BASE: &str = "https://api.telegram.org";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// Hold time requested from Telegram for each long poll.
const POLL_HOLD_SECONDS: u64 = 30;
/// Request deadline for long polls; leaves margin over the hold time.
const POLL_REQUEST_TIMEOUT: Duration = Duration::from_secs(40);

/// Failure raised by the Telegram Bot API client.
#[derive(Debug, Error)]
pub enum TelegramError {
    /// The request never completed: connect failure, timeout, broken body.
    #[error("telegram transport failed: {message}")]
    Transport {
        /// Human-readable transport detail.
        message: String,
    },
    /// Telegram answered with a non-success HTTP status outside the envelope
    /// protocol.
    #[error("telegram returned an error status: {message}")]
    Status {
        /// Status line plus a preview of the response body.
        message: String,
    },
    /// Telegram understood the request and refused it (`ok: false`).
    #[error("telegram rejected the request: {message}")]
    Rejected {
        /// Method name plus the `description` field of the envelope.
        message: String,
    },
    /// The response body was not a valid Bot API envelope.
    #[error("telegram response could not be decoded: {message}")]
    Decode {
        /// Human-readable decode detail.
        message: String,
    },
}

impl TelegramError {
    fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    fn status(message: impl Into<String>) -> Self {
        Self::Status {
            message: message.into(),
        }
    }

    fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Response envelope wrapping every Bot API result.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct ApiEnvelope<T> {
    ok: bool,
    #[serde(default)]
    result: Option<T>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Serialize)]
struct GetUpdatesPayload {
    offset: i64,
    timeout: u64,
    allowed_updates: &'static [&'static str],
}

#[derive(Debug, Serialize)]
struct SendMessagePayload<'a> {
    chat_id: i64,
    text: &'a str,
    parse_mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<&'a InlineKeyboardMarkup>,
}

#[derive(Debug, Serialize)]
struct EditMessageTextPayload<'a> {
    chat_id: i64,
    message_id: i64,
    text: &'a str,
    parse_mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<&'a InlineKeyboardMarkup>,
}

#[derive(Debug, Serialize)]
struct AnswerCallbackQueryPayload<'a> {
    callback_query_id: &'a str,
}

/// Client for one bot token against the public Bot API endpoint.
pub struct TelegramClient {
    client: Client,
    base: String,
}

impl TelegramClient {
    /// Build a client for the given bot token.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying HTTP client cannot be
    /// constructed.
    pub fn new(token: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            base: format!("{API_BASE}/bot{token}"),
        })
    }

    /// Fetch updates past `offset`, holding the poll open server-side.
    ///
    /// # Errors
    ///
    /// Returns a [`TelegramError`] when the request fails or the response is
    /// not a valid update batch.
    pub async fn get_updates(&self, offset: i64) -> Result<Vec<Update>, TelegramError> {
        let payload = GetUpdatesPayload {
            offset,
            timeout: POLL_HOLD_SECONDS,
            allowed_updates: &["message", "callback_query"],
        };
        self.call("getUpdates", &payload, Some(POLL_REQUEST_TIMEOUT))
            .await
    }

    /// Send a Markdown message, optionally with an inline keyboard.
    ///
    /// # Errors
    ///
    /// Returns a [`TelegramError`] when the request fails or Telegram rejects
    /// the message.
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&InlineKeyboardMarkup>,
    ) -> Result<(), TelegramError> {
        let payload = SendMessagePayload {
            chat_id,
            text,
            parse_mode: "Markdown",
            reply_markup: keyboard,
        };
        self.call::<_, serde_json::Value>("sendMessage", &payload, None)
            .await
            .map(|_| ())
    }

    /// Replace the text and keyboard of a previously sent message.
    ///
    /// # Errors
    ///
    /// Returns a [`TelegramError`] when the request fails or Telegram rejects
    /// the edit.
    pub async fn edit_message_text(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        keyboard: Option<&InlineKeyboardMarkup>,
    ) -> Result<(), TelegramError> {
        let payload = EditMessageTextPayload {
            chat_id,
            message_id,
            text,
            parse_mode: "Markdown",
            reply_markup: keyboard,
        };
        self.call::<_, serde_json::Value>("editMessageText", &payload, None)
            .await
            .map(|_| ())
    }

    /// Acknowledge a callback press.
    ///
    /// # Errors
    ///
    /// Returns a [`TelegramError`] when the request fails or Telegram rejects
    /// the acknowledgement.
    pub async fn answer_callback_query(&self, callback_id: &str) -> Result<(), TelegramError> {
        let payload = AnswerCallbackQueryPayload {
            callback_query_id: callback_id,
        };
        self.call::<_, serde_json::Value>("answerCallbackQuery", &payload, None)
            .await
            .map(|_| ())
    }

    async fn call<P: Serialize + Sync, T: DeserializeOwned>(
        &self,
        method: &str,
        payload: &P,
        deadline: Option<Duration>,
    ) -> Result<T, TelegramError> {
        let mut request = self
            .client
            .post(format!("{}/{}", self.base, method))
            .json(payload);
        if let Some(limit) = deadline {
            request = request.timeout(limit);
        }
        let response = request.send().await.map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        decode_envelope(method, status, body.as_ref())
    }
}

#[async_trait]
impl ConsoleTransport for TelegramClient {
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<Keyboard>,
    ) -> Result<(), TransportError> {
        let markup = keyboard.map(InlineKeyboardMarkup::from_rows);
        TelegramClient::send_message(self, chat_id, text, markup.as_ref())
            .await
            .map_err(TransportError::from)
    }

    async fn edit_message(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        keyboard: Option<Keyboard>,
    ) -> Result<(), TransportError> {
        let markup = keyboard.map(InlineKeyboardMarkup::from_rows);
        self.edit_message_text(chat_id, message_id, text, markup.as_ref())
            .await
            .map_err(TransportError::from)
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<(), TransportError> {
        self.answer_callback_query(callback_id)
            .await
            .map_err(TransportError::from)
    }
}

impl From<TelegramError> for TransportError {
    fn from(error: TelegramError) -> Self {
        match error {
            TelegramError::Rejected { message } => Self::rejected(message),
            other => Self::transport(other.to_string()),
        }
    }
}

fn map_transport_error(error: reqwest::Error) -> TelegramError {
    TelegramError::transport(error.to_string())
}

/// Decode a Bot API response body into the expected result type.
///
/// Telegram reports refusals as `{ok: false, description}` with a non-success
/// status; both the envelope and the raw status path are handled here.
fn decode_envelope<T: DeserializeOwned>(
    method: &str,
    status: StatusCode,
    body: &[u8],
) -> Result<T, TelegramError> {
    match serde_json::from_slice::<ApiEnvelope<T>>(body) {
        Ok(envelope) if envelope.ok => envelope
            .result
            .ok_or_else(|| TelegramError::decode(format!("{method}: envelope missing result"))),
        Ok(envelope) => {
            let detail = envelope
                .description
                .unwrap_or_else(|| format!("status {}", status.as_u16()));
            Err(TelegramError::rejected(format!("{method}: {detail}")))
        }
        Err(_) if !status.is_success() => Err(map_status_error(method, status, body)),
        Err(error) => Err(TelegramError::decode(format!(
            "{method}: invalid envelope: {error}"
        ))),
    }
}

fn map_status_error(method: &str, status: StatusCode, body: &[u8]) -> TelegramError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        format!("{method}: status {}", status.as_u16())
    } else {
        format!("{method}: status {}: {preview}", status.as_u16())
    };
    TelegramError::status(message)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network envelope and mapping helpers.

    use rstest::rstest;

    use super::*;

    #[test]
    fn decodes_successful_envelopes() {
        let body = br#"{"ok": true, "result": [{"update_id": 5}]}"#;

        let updates: Vec<Update> =
            decode_envelope("getUpdates", StatusCode::OK, body).expect("envelope should decode");

        assert_eq!(updates.len(), 1);
        assert_eq!(updates.first().map(|update| update.update_id), Some(5));
    }

    #[test]
    fn rejections_carry_the_api_description() {
        let body = br#"{"ok": false, "description": "Bad Request: chat not found"}"#;

        let error = decode_envelope::<serde_json::Value>(
            "sendMessage",
            StatusCode::BAD_REQUEST,
            body,
        )
        .expect_err("refusal should surface");

        assert!(
            matches!(error, TelegramError::Rejected { .. }),
            "ok:false should map to Rejected",
        );
        assert_eq!(
            error.to_string(),
            "telegram rejected the request: sendMessage: Bad Request: chat not found"
        );
    }

    #[test]
    fn missing_result_in_ok_envelope_is_a_decode_failure() {
        let body = br#"{"ok": true}"#;

        let error = decode_envelope::<Vec<Update>>("getUpdates", StatusCode::OK, body)
            .expect_err("missing result should surface");

        assert!(matches!(error, TelegramError::Decode { .. }));
    }

    #[rstest]
    #[case::gateway(StatusCode::BAD_GATEWAY, b"<html>upstream down</html>".as_slice())]
    #[case::empty_body(StatusCode::SERVICE_UNAVAILABLE, b"".as_slice())]
    fn non_envelope_error_statuses_map_to_status_errors(
        #[case] status: StatusCode,
        #[case] body: &[u8],
    ) {
        let error = decode_envelope::<serde_json::Value>("getUpdates", status, body)
            .expect_err("error status should surface");

        assert!(
            matches!(error, TelegramError::Status { .. }),
            "non-envelope bodies on error statuses should map to Status",
        );
    }

    #[test]
    fn garbage_on_success_status_is_a_decode_failure() {
        let error = decode_envelope::<serde_json::Value>("getUpdates", StatusCode::OK, b"not json")
            .expect_err("garbage should surface");

        assert!(matches!(error, TelegramError::Decode { .. }));
    }

    #[test]
    fn body_previews_are_compacted_and_capped() {
        let long_body = "word ".repeat(100);

        let preview = body_preview(long_body.as_bytes());

        assert!(preview.ends_with("..."));
        assert!(preview.chars().count() <= 163);
        assert!(!preview.contains("  "), "whitespace should be compacted");
    }

    #[test]
    fn transport_failures_fold_into_transport_errors() {
        let error = TransportError::from(TelegramError::status("getUpdates: status 502"));
        assert_eq!(
            error,
            TransportError::transport("telegram returned an error status: getUpdates: status 502")
        );

        let rejected = TransportError::from(TelegramError::rejected("sendMessage: chat not found"));
        assert_eq!(
            rejected,
            TransportError::rejected("sendMessage: chat not found")
        );
    }
}
