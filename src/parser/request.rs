//! HTTP request parsing and representation.

use serde::de::DeserializeOwned;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

use crate::parser::error::Error;
use crate::parser::form::{decode_form_encoded, Params};

const CONTENT_LENGTH_PREFIX: &str = "Content-Length: ";
const CONTENT_TYPE_PREFIX: &str = "Content-Type: ";
const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// A parsed HTTP request. One is built per connection and never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: String,
    path: String,
    headers: String,
    body: String,
    content_type: Option<String>,
    query_params: Params,
    post_params: Params,
}

impl Request {
    /// Build a request from its wire parts.
    ///
    /// # Arguments
    ///
    /// * `method` - The request method, verbatim
    /// * `target` - The request target; anything after the first `?` becomes query parameters
    /// * `headers` - The concatenated header block
    /// * `content_type` - The recognised `Content-Type` value, if any
    /// * `body` - The raw body, empty when there is none
    ///
    /// # Returns
    ///
    /// A request whose post parameters are decoded only when `content_type`
    /// is exactly `application/x-www-form-urlencoded`
    pub fn new(
        method: impl Into<String>,
        target: &str,
        headers: impl Into<String>,
        content_type: Option<String>,
        body: impl Into<String>,
    ) -> Self {
        let (path, query) = split_target(target);
        let body = body.into();

        let query_params = query.map(decode_form_encoded).unwrap_or_default();
        let post_params = if content_type.as_deref() == Some(FORM_URLENCODED) {
            decode_form_encoded(&body)
        } else {
            Params::new()
        };

        Self {
            method: method.into(),
            path: path.to_string(),
            headers: headers.into(),
            body,
            content_type,
            query_params,
            post_params,
        }
    }

    /// The request method, exactly as sent.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The clean path: the request target without its query string.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The raw header block, every header line concatenated without terminators.
    pub fn headers(&self) -> &str {
        &self.headers
    }

    /// The raw body; empty when the request had none.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The value of the `Content-Type` header, if the request carried one.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Parameters decoded from the query string.
    pub fn query_params(&self) -> &Params {
        &self.query_params
    }

    /// Parameters decoded from a form-encoded body.
    pub fn post_params(&self) -> &Params {
        &self.post_params
    }

    /// All query string values for `name`; empty when absent.
    pub fn query_param(&self, name: &str) -> &[String] {
        self.query_params.get(name)
    }

    /// All form-encoded body values for `name`; empty when absent.
    pub fn post_param(&self, name: &str) -> &[String] {
        self.post_params.get(name)
    }

    /// Check if the request has a JSON body.
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|content_type| content_type.starts_with("application/json"))
    }

    /// Parse the request body as JSON.
    ///
    /// # Returns
    ///
    /// The parsed value, or an error if the request is not `application/json`
    /// or the body does not deserialize into `T`
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        if !self.is_json() {
            return Err(Error::NotJson);
        }
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// The three tokens of a request line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestLine<'a> {
    pub method: &'a str,
    pub target: &'a str,
    pub version: &'a str,
}

/// Split a request line on single spaces.
///
/// Trailing empty tokens are dropped before counting. Anything other than
/// exactly three tokens is not a request.
pub fn parse_request_line(line: &str) -> Option<RequestLine<'_>> {
    let mut parts: Vec<&str> = line.split(' ').collect();
    while parts.last().is_some_and(|part| part.is_empty()) {
        parts.pop();
    }

    match parts.as_slice() {
        &[method, target, version] => Some(RequestLine {
            method,
            target,
            version,
        }),
        _ => None,
    }
}

/// What the header scan extracts from the lines between the request line and
/// the blank separator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderBlock {
    /// Every header line concatenated, in order, without terminators.
    pub raw: String,
    /// Declared body length; zero means no body.
    pub content_length: usize,
    pub content_type: Option<String>,
}

/// Scan header lines, recognising `Content-Length` and `Content-Type`.
///
/// # Arguments
///
/// * `lines` - Header lines without their line terminators, excluding the blank separator
///
/// # Returns
///
/// The header block, or an error for a line with no colon or a
/// `Content-Length` that is not a non-negative integer
pub fn parse_headers<I, S>(lines: I) -> Result<HeaderBlock, Error>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut block = HeaderBlock::default();

    for line in lines {
        let line = line.as_ref();
        let Some((_, value)) = line.split_once(':') else {
            return Err(Error::MalformedHeader(line.to_string()));
        };

        block.raw.push_str(line);

        if line.starts_with(CONTENT_LENGTH_PREFIX) {
            let value = value.trim();
            block.content_length = value
                .parse()
                .map_err(|_| Error::InvalidContentLength(value.to_string()))?;
        } else if line.starts_with(CONTENT_TYPE_PREFIX) {
            block.content_type = Some(value.trim().to_string());
        }
    }

    Ok(block)
}

/// Split a request target on the first `?` into the clean path and the query string.
pub fn split_target(target: &str) -> (&str, Option<&str>) {
    match target.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (target, None),
    }
}

/// Read one request from `reader`.
///
/// # Returns
///
/// * `Ok(Some(request))` - A complete request
/// * `Ok(None)` - The request line is malformed or the stream was empty; the
///   connection must be closed without a response
/// * `Err(_)` - The stream failed or ended inside the header block or body
pub async fn read_request<R>(reader: &mut R) -> Result<Option<Request>, Error>
where
    R: AsyncBufRead + Unpin,
{
    let Some(request_line) = read_line(reader).await? else {
        return Ok(None);
    };
    let Some(RequestLine { method, target, .. }) = parse_request_line(&request_line) else {
        return Ok(None);
    };

    let mut lines = Vec::new();
    loop {
        let line = read_line(reader).await?.ok_or(Error::UnexpectedEof)?;
        if line.is_empty() {
            break;
        }
        lines.push(line);
    }
    let headers = parse_headers(&lines)?;

    let body = if headers.content_length > 0 {
        read_body(reader, headers.content_length).await?
    } else {
        String::new()
    };

    Ok(Some(Request::new(
        method,
        target,
        headers.raw,
        headers.content_type,
        body,
    )))
}

/// Read a line, stripping `\n` and an optional `\r` before it. `None` at end of stream.
async fn read_line<R>(reader: &mut R) -> Result<Option<String>, Error>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    if reader.read_until(b'\n', &mut buf).await? == 0 {
        return Ok(None);
    }

    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }

    String::from_utf8(buf).map(Some).map_err(|_| Error::InvalidUtf8)
}

/// Read exactly `length` body bytes.
async fn read_body<R>(reader: &mut R, length: usize) -> Result<String, Error>
where
    R: AsyncBufRead + Unpin,
{
    // Allocation follows the bytes received, not the declared length.
    let mut body = Vec::new();
    (&mut *reader).take(length as u64).read_to_end(&mut body).await?;
    if body.len() < length {
        return Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into());
    }

    Ok(String::from_utf8_lossy(&body).into_owned())
}
