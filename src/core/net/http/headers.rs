use core::fmt::Write;

use heapless::String;

use super::Error;

const HEADER_RENDER_SIZE: usize = 192;

fn reason_phrase(code: u16) -> &'static str {
    match code {
        200 => "OK",
        204 => "No Content",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// HTTP request method. Anything beyond the two the device serves is
/// answered with 405.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Unsupported,
}

impl HttpMethod {
    fn parse(token: &str) -> Self {
        match token {
            "GET" => HttpMethod::Get,
            "POST" => HttpMethod::Post,
            _ => HttpMethod::Unsupported,
        }
    }
}

/// HTTP response content type.
#[derive(Debug, Clone, Copy)]
pub enum ContentType {
    Json,
    TextHtml,
}

impl ContentType {
    fn as_str(self) -> &'static str {
        match self {
            ContentType::Json => "application/json",
            ContentType::TextHtml => "text/html; charset=utf-8",
        }
    }
}

/// Response status line plus content headers. The connection is always
/// closed after one exchange.
pub struct ResponseHeaders {
    status: u16,
    content: Option<(ContentType, usize)>,
}

impl ResponseHeaders {
    pub const fn success() -> Self {
        Self {
            status: 200,
            content: None,
        }
    }

    pub const fn no_content() -> Self {
        Self {
            status: 204,
            content: None,
        }
    }

    pub const fn not_found() -> Self {
        Self {
            status: 404,
            content: None,
        }
    }

    pub const fn bad_request() -> Self {
        Self {
            status: 400,
            content: None,
        }
    }

    #[must_use]
    pub const fn with_content(mut self, content_type: ContentType, length: usize) -> Self {
        self.content = Some((content_type, length));
        self
    }

    pub(super) fn render(&self) -> Result<String<HEADER_RENDER_SIZE>, Error> {
        let mut out = String::new();
        write!(
            out,
            "HTTP/1.1 {} {}\r\n",
            self.status,
            reason_phrase(self.status)
        )?;
        if let Some((content_type, length)) = self.content {
            write!(out, "Content-Type: {}\r\n", content_type.as_str())?;
            write!(out, "Content-Length: {length}\r\n")?;
        }
        write!(out, "Connection: close\r\n\r\n")?;
        Ok(out)
    }
}

/// Split the request head into method, path and the header block.
pub(super) fn parse_request_line(head: &str) -> Option<(HttpMethod, &str, &str)> {
    let (request_line, rest) = head.split_once("\r\n")?;
    let mut tokens = request_line.split(' ');
    let method = HttpMethod::parse(tokens.next()?);
    let path = tokens.next()?;
    Some((method, path, rest))
}

/// Extract the Content-Length value from the header block, if present.
pub(super) fn find_content_length(headers: &str) -> Option<usize> {
    for line in headers.split("\r\n") {
        let (name, value) = match line.split_once(':') {
            Some(parts) => parts,
            None => continue,
        };
        if name.eq_ignore_ascii_case("content-length") {
            return value.trim().parse().ok();
        }
    }
    None
}

/// Position right after the `\r\n\r\n` head terminator, if received.
pub(super) fn find_head_end(buffer: &[u8]) -> Option<usize> {
    buffer
        .windows(4)
        .position(|window| window == b"\r\n\r\n")
        .map(|pos| pos + 4)
}
