//! HTTP controller for the lamp control page.

use heapless::String;
use lamplink_protocol::{Command, ID_HEX_LEN};
use lamplink_control::LampRequest;
use serde::{Deserialize, Serialize};

use crate::core::net::http::{
    HttpConnection, HttpHandler, HttpMethod, HttpResult, ResponseHeaders,
};
use crate::infrastructure::services::submit_request;
use crate::infrastructure::tasks::latest_snapshot;

use super::pages::INDEX_PAGE;

/// `GET /values` payload the page polls for its sliders.
#[derive(Debug, Serialize)]
struct LampValues {
    brightness: u8,
    hue: u8,
    id: String<ID_HEX_LEN>,
}

/// `POST /slider` body: one axis moved.
#[derive(Debug, Deserialize)]
struct SliderChange {
    slider: String<16>,
    value: u8,
}

/// `POST /command` body.
#[derive(Debug, Deserialize)]
struct CommandChange {
    command: String<16>,
}

#[derive(Debug, Default)]
pub struct ControlHttpController;

impl HttpHandler for ControlHttpController {
    async fn handle_request(&self, conn: HttpConnection<'_>) -> HttpResult {
        let mut conn = conn;
        let (method, path) = conn.route();
        match (method, path.as_str()) {
            (HttpMethod::Get, "/") => conn.write_html(INDEX_PAGE).await,
            (HttpMethod::Get, "/values") => handle_get_values(&mut conn).await,
            (HttpMethod::Post, "/slider") => handle_slider(&mut conn).await,
            (HttpMethod::Post, "/command") => handle_command(&mut conn).await,
            _ => conn.write_headers(&ResponseHeaders::not_found()).await,
        }
    }
}

async fn handle_get_values(conn: &mut HttpConnection<'_>) -> HttpResult {
    let snapshot = latest_snapshot();

    let values = if !snapshot.bound {
        // nothing learned yet; the page shows placeholders
        LampValues {
            brightness: 0,
            hue: 0,
            id: String::try_from("???").unwrap_or_default(),
        }
    } else if snapshot.command == Command::Startup {
        // known lamp, but levels not confirmed by any traffic yet
        LampValues {
            brightness: 0,
            hue: 0,
            id: snapshot.identity_hex,
        }
    } else {
        LampValues {
            brightness: snapshot.intensity,
            hue: snapshot.color_balance,
            id: snapshot.identity_hex,
        }
    };

    conn.write_json(&values).await
}

async fn handle_slider(conn: &mut HttpConnection<'_>) -> HttpResult {
    let change = conn.read_json::<SliderChange>().await?;
    match change.slider.as_str() {
        "brightness" => submit_request(LampRequest::SetIntensity(change.value)),
        "hue" => submit_request(LampRequest::SetHue(change.value)),
        _ => return conn.write_headers(&ResponseHeaders::bad_request()).await,
    }
    conn.write_headers(&ResponseHeaders::no_content()).await
}

async fn handle_command(conn: &mut HttpConnection<'_>) -> HttpResult {
    let change = conn.read_json::<CommandChange>().await?;
    match change.command.as_str() {
        "ON" => submit_request(LampRequest::On),
        "OFF" => submit_request(LampRequest::Off),
        "RECONFIG" => submit_request(LampRequest::Learn),
        _ => return conn.write_headers(&ResponseHeaders::bad_request()).await,
    }
    conn.write_headers(&ResponseHeaders::no_content()).await
}
