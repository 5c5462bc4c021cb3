use axum::{
    body::Bytes,
    extract::{FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
    Form,
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, error};

use crate::util::error::HandlerError;
use crate::util::storage::UploadedFile;
use crate::util::validation::decode_body;

/// Multipart part carrying the uploaded image.
pub const IMAGE_FIELD: &str = "image";

/// Transport-neutral view of a request body: the submitted fields plus the
/// uploaded image, if any.
///
/// JSON bodies must be objects. Multipart and url-encoded values arrive as
/// strings; a key that is repeated, or that ends in `[]`, becomes an array.
/// An empty body yields an empty field map.
#[derive(Debug, Default)]
pub struct RequestContext {
    pub fields: Map<String, Value>,
    pub upload: Option<UploadedFile>,
}

impl RequestContext {
    /// Decode the fields into a typed request.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, HandlerError> {
        decode_body(self.fields.clone()).map_err(|e| HandlerError::from_service(e, "Invalid request body"))
    }

    /// Decode the fields and hand over the upload.
    pub fn into_parts<T: DeserializeOwned>(self) -> Result<(T, Option<UploadedFile>), HandlerError> {
        let request = self.parse()?;
        Ok((request, self.upload))
    }

    fn push_field(&mut self, key: &str, value: Value) {
        let (key, as_array) = match key.strip_suffix("[]") {
            Some(key) => (key, true),
            None => (key, false),
        };
        match self.fields.get_mut(key) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None if as_array => {
                self.fields.insert(key.to_string(), Value::Array(vec![value]));
            }
            None => {
                self.fields.insert(key.to_string(), value);
            }
        }
    }

    async fn from_multipart(mut multipart: Multipart) -> Result<Self, HandlerError> {
        let mut context = RequestContext::default();

        loop {
            let field = match multipart.next_field().await {
                Ok(Some(field)) => field,
                Ok(None) => break,
                Err(e) => {
                    error!("Error getting next multipart field: {}", e);
                    return Err(HandlerError::bad_request("Invalid multipart body", e.body_text()));
                }
            };

            let name = field.name().map(|s| s.to_string()).unwrap_or_default();
            let file_name = field.file_name().map(|s| s.to_string());

            match file_name {
                Some(filename) if name == IMAGE_FIELD => {
                    let content_type = field
                        .content_type()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "application/octet-stream".to_string());
                    let content = field.bytes().await.map_err(|e| {
                        error!("Failed to read uploaded file {}: {}", filename, e);
                        HandlerError::bad_request("Invalid multipart body", e.body_text())
                    })?;
                    // Browsers send an empty part when no file was picked.
                    if filename.is_empty() && content.is_empty() {
                        continue;
                    }
                    debug!("Received upload {} ({} bytes)", filename, content.len());
                    context.upload = Some(UploadedFile { filename, content_type, content });
                }
                Some(filename) => {
                    debug!("Ignoring unexpected file part {} ({})", name, filename);
                }
                None => {
                    let text = field.text().await.map_err(|e| {
                        error!("Failed to read multipart field {}: {}", name, e);
                        HandlerError::bad_request("Invalid multipart body", e.body_text())
                    })?;
                    context.push_field(&name, Value::String(text));
                }
            }
        }

        Ok(context)
    }

    fn from_json(body: &[u8]) -> Result<Self, HandlerError> {
        if body.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(RequestContext::default());
        }
        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(fields)) => Ok(RequestContext { fields, upload: None }),
            Ok(_) => Err(HandlerError::bad_request("Invalid request body", "Request body must be a JSON object")),
            Err(e) => {
                debug!("Rejecting malformed JSON body: {}", e);
                Err(HandlerError::bad_request("Invalid JSON body", e.to_string()))
            }
        }
    }
}

impl<S> FromRequest<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = HandlerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| HandlerError::bad_request("Invalid multipart body", e.body_text()))?;
            return Self::from_multipart(multipart).await;
        }

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, state)
                .await
                .map_err(|e| HandlerError::bad_request("Invalid form body", e.body_text()))?;
            let mut context = RequestContext::default();
            for (key, value) in pairs {
                context.push_field(&key, Value::String(value));
            }
            return Ok(context);
        }

        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| HandlerError::bad_request("Invalid request body", e.body_text()))?;
        Self::from_json(&body)
    }
}
