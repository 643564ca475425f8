use embassy_net::tcp::TcpSocket;
use embedded_io_async::Write as _;
use heapless::{String, Vec};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::headers::{find_content_length, find_head_end, parse_request_line};
use super::{ContentType, Error, HttpMethod, HttpResult, ResponseHeaders};

const HEAD_BUFFER_SIZE: usize = 512;
const BODY_BUFFER_SIZE: usize = 512;
const STREAM_CHUNK_SIZE: usize = 1024;

/// One HTTP exchange over an accepted socket.
///
/// The request head is read and parsed up front; the body is pulled
/// lazily by the JSON reader. Exactly one response is written, then the
/// connection is closed by the server.
pub struct HttpConnection<'a> {
    method: HttpMethod,
    path: String<64>,

    socket: TcpSocket<'a>,
    content_length: usize,
    head_buf: Vec<u8, HEAD_BUFFER_SIZE>,
    head_end: usize,
    body_buf: Vec<u8, BODY_BUFFER_SIZE>,
}

impl<'a> HttpConnection<'a> {
    /// Read and parse the request head from a freshly accepted socket.
    pub(crate) async fn from_socket(mut socket: TcpSocket<'a>) -> Result<Self, Error> {
        let mut head_buf = Vec::<u8, HEAD_BUFFER_SIZE>::new();
        head_buf.resize(HEAD_BUFFER_SIZE, 0).ok();

        let mut received = 0;
        let head_end = loop {
            let count = socket
                .read(&mut head_buf[received..])
                .await
                .map_err(Error::from)?;
            if count == 0 {
                return Err(Error::Closed);
            }
            received += count;
            if let Some(end) = find_head_end(&head_buf[..received]) {
                break end;
            }
            if received == HEAD_BUFFER_SIZE {
                return Err(Error::Parse);
            }
        };
        head_buf.truncate(received);

        let head = core::str::from_utf8(&head_buf[..head_end]).map_err(|_| Error::Parse)?;
        let (method, raw_path, rest_headers) = parse_request_line(head).ok_or(Error::Parse)?;
        let content_length = find_content_length(rest_headers).unwrap_or(0);

        let mut path = String::new();
        let _ = path.push_str(raw_path);
        Ok(Self {
            method,
            path,
            socket,
            content_length,
            head_buf,
            head_end,
            body_buf: Vec::new(),
        })
    }

    /// Request method and path, copied out so handlers can keep using the
    /// connection mutably while routing.
    pub fn route(&self) -> (HttpMethod, String<64>) {
        (self.method, self.path.clone())
    }

    /// Write a JSON response, headers included.
    pub async fn write_json<T: Serialize>(&mut self, data: &T) -> HttpResult {
        let mut body = [0u8; BODY_BUFFER_SIZE];
        let length = serde_json_core::to_slice(data, &mut body).map_err(|_| Error::Closed)?;
        let headers = ResponseHeaders::success().with_content(ContentType::Json, length);
        self.write_headers(&headers).await?;
        self.write_all(&body[..length]).await
    }

    /// Write an HTML page response, headers included.
    pub async fn write_html(&mut self, body: &str) -> HttpResult {
        let headers =
            ResponseHeaders::success().with_content(ContentType::TextHtml, body.len());
        self.write_headers(&headers).await?;
        for chunk in body.as_bytes().chunks(STREAM_CHUNK_SIZE) {
            self.write_all(chunk).await?;
        }
        Ok(())
    }

    /// Write a body-less response.
    pub async fn write_headers(&mut self, headers: &ResponseHeaders) -> HttpResult {
        let rendered = headers.render()?;
        self.write_all(rendered.as_bytes()).await
    }

    /// Read and decode the request body as JSON.
    pub async fn read_json<T: DeserializeOwned>(&mut self) -> Result<T, Error> {
        let body = self.read_body().await?;
        let (data, _) = serde_json_core::from_slice(body).map_err(|_| Error::Parse)?;
        Ok(data)
    }

    async fn read_body(&mut self) -> Result<&[u8], Error> {
        if self.content_length == 0 {
            return Err(Error::NoData);
        }
        if self.content_length > BODY_BUFFER_SIZE {
            return Err(Error::Parse);
        }

        self.body_buf.clear();
        // part of the body may already sit behind the request head
        if self.head_buf.len() > self.head_end {
            self.body_buf
                .extend_from_slice(&self.head_buf[self.head_end..])
                .map_err(|()| Error::Parse)?;
        }

        while self.body_buf.len() < self.content_length {
            let mut chunk = [0u8; 256];
            let count = self.socket.read(&mut chunk).await.map_err(Error::from)?;
            if count == 0 {
                break;
            }
            self.body_buf
                .extend_from_slice(&chunk[..count])
                .map_err(|()| Error::Parse)?;
        }

        let length = self.content_length.min(self.body_buf.len());
        Ok(&self.body_buf[..length])
    }

    async fn write_all(&mut self, buf: &[u8]) -> HttpResult {
        self.socket.write_all(buf).await?;
        self.socket.flush().await?;
        Ok(())
    }
}
