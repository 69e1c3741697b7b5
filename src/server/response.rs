//! HTTP response head construction and helpers for handlers.

use serde::Serialize;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::server::error::Error;

/// HTTP status codes with their standard reason phrases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Ok = 200,
    Created = 201,
    NoContent = 204,
    NotFound = 404,
}

impl StatusCode {
    /// Get the reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Created => "Created",
            StatusCode::NoContent => "No Content",
            StatusCode::NotFound => "Not Found",
        }
    }

    /// The numeric code.
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }
}

/// Everything the status line and headers of one response need.
///
/// The body is not part of it: callers write it after the head, which lets
/// files be streamed straight from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseData {
    code: u16,
    description: String,
    content_type: Option<String>,
    content_length: u64,
}

impl ResponseData {
    /// Response data with an arbitrary code and description.
    pub fn new(
        code: u16,
        description: impl Into<String>,
        content_type: Option<String>,
        content_length: u64,
    ) -> Self {
        Self {
            code,
            description: description.into(),
            content_type,
            content_length,
        }
    }

    /// Response data for a standard status code.
    pub fn with_status(status: StatusCode, content_type: Option<String>, content_length: u64) -> Self {
        Self::new(status.as_u16(), status.reason_phrase(), content_type, content_length)
    }

    /// The numeric status code.
    pub fn code(&self) -> u16 {
        self.code
    }

    /// The reason phrase written after the code.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The `Content-Type` to advertise, if any.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// The number of body bytes that follow the head.
    pub fn content_length(&self) -> u64 {
        self.content_length
    }

    /// Render the status line and headers, including the blank separator line.
    ///
    /// `Content-Type` appears only when set; `Content-Length` and
    /// `Connection: close` always do.
    pub fn head(&self) -> String {
        let mut head = format!("HTTP/1.1 {} {}\r\n", self.code, self.description);
        if let Some(content_type) = &self.content_type {
            head.push_str(&format!("Content-Type: {content_type}\r\n"));
        }
        head.push_str(&format!("Content-Length: {}\r\n", self.content_length));
        head.push_str("Connection: close\r\n");
        head.push_str("\r\n");
        head
    }

    /// Write the head to `out`. The body, if any, is up to the caller.
    pub async fn write_head<W>(&self, out: &mut W) -> std::io::Result<()>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        out.write_all(self.head().as_bytes()).await
    }
}

/// Write a complete response: head followed by `body`.
pub async fn write_response<W>(
    out: &mut W,
    status: StatusCode,
    content_type: Option<&str>,
    body: &[u8],
) -> Result<(), Error>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    let data = ResponseData::with_status(status, content_type.map(str::to_string), body.len() as u64);
    data.write_head(out).await?;
    out.write_all(body).await?;
    Ok(())
}

/// Serialize `value` to JSON and write it as a complete `application/json` response.
pub async fn write_json<W, T>(out: &mut W, status: StatusCode, value: &T) -> Result<(), Error>
where
    W: AsyncWrite + Unpin + ?Sized,
    T: Serialize + ?Sized,
{
    let json = serde_json::to_vec(value)?;
    write_response(out, status, Some("application/json"), &json).await
}

/// Write a 404 with no content type and an empty body.
pub async fn write_not_found<W>(out: &mut W) -> Result<(), Error>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    ResponseData::with_status(StatusCode::NotFound, None, 0)
        .write_head(out)
        .await?;
    Ok(())
}
