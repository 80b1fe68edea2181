//! JSON body codec and response encoders.
//!
//! One decode policy for every message: unknown fields are ignored, missing
//! fields take their protobuf default, and an empty body decodes to the
//! message default. A body that is present but malformed is a hard error.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::error::RestError;

/// Content type of every JSON response body.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Decode a JSON request body into a typed message.
///
/// # Errors
///
/// Returns [`RestError::InvalidJson`] when the body is non-empty and is not
/// valid JSON for `T`.
///
/// # Examples
///
/// ```
/// #[derive(Default, serde::Deserialize)]
/// #[serde(default)]
/// struct CreateNote { title: String }
///
/// let note: CreateNote = noted_rest::decode(br#"{"title":"T","unknown":1}"#).unwrap();
/// assert_eq!(note.title, "T");
///
/// let empty: CreateNote = noted_rest::decode(b"").unwrap();
/// assert_eq!(empty.title, "");
///
/// assert!(noted_rest::decode::<CreateNote>(b"{\"title\":").is_err());
/// ```
pub fn decode<T>(body: &[u8]) -> Result<T, RestError>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(RestError::InvalidJson)
}

/// Encode a typed message as JSON using its wire field names.
///
/// # Errors
///
/// Returns [`RestError::Encode`] if a field can't be represented (for
/// example an out-of-range timestamp).
pub fn encode<T>(message: &T) -> Result<Vec<u8>, RestError>
where
    T: Serialize,
{
    serde_json::to_vec(message).map_err(RestError::Encode)
}

/// `200 OK` response with a JSON-encoded message body.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReply<T>(pub T);

impl<T: Serialize> IntoResponse for JsonReply<T> {
    fn into_response(self) -> Response {
        match encode(&self.0) {
            Ok(bytes) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)],
                bytes,
            )
                .into_response(),
            Err(err) => err.into_response(),
        }
    }
}

/// `200 OK` response carrying a raw file payload as an attachment.
///
/// The payload bypasses JSON entirely. The download name is
/// `<stem>.<extension>`, or just `<stem>` when there is no extension.
#[derive(Debug, Clone)]
pub struct FileReply {
    bytes: Vec<u8>,
    content_type: &'static str,
    filename: String,
}

impl FileReply {
    /// Build an attachment reply.
    #[must_use]
    pub fn new(bytes: Vec<u8>, content_type: &'static str, stem: &str, extension: &str) -> Self {
        let filename = if extension.is_empty() {
            stem.to_owned()
        } else {
            format!("{stem}.{extension}")
        };
        Self {
            bytes,
            content_type,
            filename,
        }
    }

    /// Download name advertised in `Content-Disposition`.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    fn disposition(&self) -> HeaderValue {
        let escaped = self.filename.replace(['"', '\\'], "_");
        HeaderValue::from_str(&format!("attachment; filename=\"{escaped}\""))
            .unwrap_or_else(|_| HeaderValue::from_static("attachment"))
    }
}

impl IntoResponse for FileReply {
    fn into_response(self) -> Response {
        let disposition = self.disposition();
        (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, HeaderValue::from_static(self.content_type)),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            self.bytes,
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;

    #[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct UpdateGroupRequest {
        group_id: String,
        name: String,
        member_count: i32,
        tags: Vec<String>,
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        response.into_body().collect().await.unwrap().to_bytes().to_vec()
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let decoded: UpdateGroupRequest =
            decode(br#"{"name":"team","favourite_colour":"teal"}"#).unwrap();
        assert_eq!(decoded.name, "team");
    }

    #[test]
    fn missing_fields_default() {
        let decoded: UpdateGroupRequest = decode(br#"{"group_id":"g1"}"#).unwrap();
        assert_eq!(
            decoded,
            UpdateGroupRequest {
                group_id: "g1".to_owned(),
                ..UpdateGroupRequest::default()
            }
        );
    }

    #[test]
    fn empty_and_blank_bodies_decode_to_default() {
        assert_eq!(decode::<UpdateGroupRequest>(b"").unwrap(), UpdateGroupRequest::default());
        assert_eq!(
            decode::<UpdateGroupRequest>(b" \n\t").unwrap(),
            UpdateGroupRequest::default()
        );
    }

    #[test]
    fn malformed_body_fails_instead_of_defaulting() {
        let err = decode::<UpdateGroupRequest>(b"{\"name\": ").unwrap_err();
        assert!(matches!(err, RestError::InvalidJson(_)));
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn wrong_field_type_fails() {
        let err = decode::<UpdateGroupRequest>(br#"{"member_count":"three"}"#).unwrap_err();
        assert!(matches!(err, RestError::InvalidJson(_)));
    }

    #[test]
    fn non_object_body_fails() {
        assert!(decode::<UpdateGroupRequest>(b"[1,2]").is_err());
        assert!(decode::<UpdateGroupRequest>(b"null").is_err());
    }

    #[test]
    fn encode_then_decode_is_identity() {
        let original = UpdateGroupRequest {
            group_id: "g1".to_owned(),
            name: "Écrivains".to_owned(),
            member_count: 12,
            tags: vec!["a".to_owned(), "b".to_owned()],
        };
        let bytes = encode(&original).unwrap();
        let decoded: UpdateGroupRequest = decode(&bytes).unwrap();
        assert_eq!(decoded, original);
    }

    #[tokio::test]
    async fn json_reply_uses_wire_names_and_json_content_type() {
        let response = JsonReply(UpdateGroupRequest {
            group_id: "g1".to_owned(),
            ..UpdateGroupRequest::default()
        })
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            JSON_CONTENT_TYPE
        );
        let json: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(json["group_id"], "g1");
        assert_eq!(json["member_count"], 0);
    }

    #[tokio::test]
    async fn file_reply_is_an_attachment() {
        let response =
            FileReply::new(b"# Title".to_vec(), "text/markdown; charset=utf-8", "n1", "md")
                .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/markdown; charset=utf-8"
        );
        assert_eq!(
            response.headers().get(header::CONTENT_DISPOSITION).unwrap(),
            "attachment; filename=\"n1.md\""
        );
        assert_eq!(body_bytes(response).await, b"# Title");
    }

    #[test]
    fn file_reply_without_extension() {
        let reply = FileReply::new(Vec::new(), "application/octet-stream", "n1", "");
        assert_eq!(reply.filename(), "n1");
    }

    #[test]
    fn disposition_escapes_quotes() {
        let reply = FileReply::new(Vec::new(), "application/pdf", "a\"b", "pdf");
        assert_eq!(reply.disposition(), "attachment; filename=\"a_b.pdf\"");
    }
}
