mod random;
pub mod wifi_ap;
pub mod wifi_sta;

pub use wifi_ap::start_wifi_ap;
pub use wifi_sta::start_wifi_sta;
