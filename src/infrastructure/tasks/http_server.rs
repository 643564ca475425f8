//! HTTP server tasks for the control and setup interfaces.

use embassy_net::Stack;

use crate::config::HTTP_PORT;
use crate::controllers::{ControlHttpController, SetupHttpController};
use crate::core::net::http::{HttpHandler, HttpServer};

const RX_BUFFER_SIZE: usize = 1024;
const TX_BUFFER_SIZE: usize = 2048;

#[embassy_executor::task]
pub async fn control_http_task(stack: Stack<'static>, controller: &'static ControlHttpController) {
    serve(stack, controller).await;
}

#[embassy_executor::task]
pub async fn setup_http_task(stack: Stack<'static>, controller: &'static SetupHttpController) {
    serve(stack, controller).await;
}

async fn serve<T: HttpHandler>(stack: Stack<'static>, handler: &'static T) -> ! {
    let mut rx_buffer = [0u8; RX_BUFFER_SIZE];
    let mut tx_buffer = [0u8; TX_BUFFER_SIZE];
    HttpServer::new(handler)
        .listen_and_serve(stack, HTTP_PORT, &mut rx_buffer, &mut tx_buffer)
        .await
}
