pub mod connection;
pub mod headers;
pub mod server;

pub use connection::HttpConnection;
pub use headers::{ContentType, HttpMethod, ResponseHeaders};
pub use server::{HttpHandler, HttpServer};

#[derive(Debug)]
pub enum Error {
    Closed,
    Parse,
    NoData,
    FormatHeaders,
}

impl From<core::fmt::Error> for Error {
    fn from(_error: core::fmt::Error) -> Self {
        Error::FormatHeaders
    }
}

impl From<embassy_net::tcp::Error> for Error {
    fn from(err: embassy_net::tcp::Error) -> Self {
        match err {
            embassy_net::tcp::Error::ConnectionReset => Error::Closed,
        }
    }
}

pub type HttpResult = Result<(), Error>;
