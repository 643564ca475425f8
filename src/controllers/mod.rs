mod button;
mod control_http;
mod pages;
mod setup_http;

pub use button::button_task;
pub use control_http::ControlHttpController;
pub use setup_http::SetupHttpController;
