pub mod dhcp_server;
pub mod http_server;
pub mod led;
pub mod link;
pub mod persistence;
pub mod status;

pub use dhcp_server::dhcp_server_task;
pub use http_server::{control_http_task, setup_http_task};
pub use led::{led_task, set_blink_mode, BlinkMode};
pub use link::link_task;
pub use persistence::persistence_task;
pub use status::{latest_snapshot, snapshot_cache_task};
