use embassy_net::Stack;
use embassy_net::tcp::TcpSocket;
use embassy_time::Duration;
use esp_println::println;

use super::connection::HttpConnection;
use super::HttpResult;

const SOCKET_TIMEOUT: Duration = Duration::from_secs(30);

/// A request handler plugged into the server.
pub trait HttpHandler {
    async fn handle_request(&self, conn: HttpConnection<'_>) -> HttpResult;
}

/// Single-connection HTTP server over the embassy TCP stack.
///
/// One request per connection; the handler writes the response and the
/// socket is closed afterwards. Enough for a configuration page that is
/// polled by one browser.
pub struct HttpServer<'a, T: HttpHandler> {
    handler: &'a T,
}

impl<'a, T: HttpHandler> HttpServer<'a, T> {
    pub fn new(handler: &'a T) -> Self {
        Self { handler }
    }

    pub async fn listen_and_serve(
        &self,
        stack: Stack<'static>,
        port: u16,
        rx_buffer: &mut [u8],
        tx_buffer: &mut [u8],
    ) -> ! {
        loop {
            let mut socket = TcpSocket::new(stack, rx_buffer, tx_buffer);
            socket.set_timeout(Some(SOCKET_TIMEOUT));

            if socket.accept(port).await.is_err() {
                continue;
            }

            let conn = match HttpConnection::from_socket(socket).await {
                Ok(connection) => connection,
                Err(error) => {
                    println!("http: connection startup error: {error:?}");
                    continue;
                }
            };

            if let Err(error) = self.handler.handle_request(conn).await {
                println!("http: connection error: {error:?}");
            }
        }
    }
}
