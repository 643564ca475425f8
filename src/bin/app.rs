#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};

use esp_alloc as _;
use esp_backtrace as _;
use esp_hal::clock::CpuClock;
use esp_hal::gpio::{Input, InputConfig, Level, Output, OutputConfig, Pull};
use esp_hal::timer::timg::TimerGroup;
use esp_hal::uart::{Config as UartConfig, DataBits, Parity, StopBits, Uart};
use esp_storage::FlashStorage;
use static_cell::StaticCell;

use lamplink_control::LampCoordinator;
use lamplink_esp_dimmer::config::{BUILD_VERSION, LINK_BAUD_RATE, SETTINGS_PARTITION_OFFSET};
use lamplink_esp_dimmer::controllers::{
    button_task, ControlHttpController, SetupHttpController,
};
use lamplink_esp_dimmer::infrastructure::drivers::wifi_ap::AP_IP_ADDRESS;
use lamplink_esp_dimmer::infrastructure::drivers::{start_wifi_ap, start_wifi_sta};
use lamplink_esp_dimmer::infrastructure::repositories::SettingsStorage;
use lamplink_esp_dimmer::infrastructure::services::{
    persistence_receiver, request_receiver, snapshot_receiver, ChannelSnapshotPublisher,
    LedPairingIndicator, QueuedSettingsStore,
};
use lamplink_esp_dimmer::infrastructure::tasks::{
    control_http_task, dhcp_server_task, led_task, link_task, persistence_task,
    set_blink_mode, setup_http_task, snapshot_cache_task, BlinkMode,
};
use lamplink_esp_dimmer::mk_static;

esp_bootloader_esp_idf::esp_app_desc!();

static FLASH_STORAGE: StaticCell<FlashStorage<'static>> = StaticCell::new();

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    esp_println::logger::init_logger_from_env();
    esp_println::println!("lamplink dimmer {BUILD_VERSION} starting");

    // Initialize hardware
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Allocate heap memory (64 + 32 KB)
    esp_alloc::heap_allocator!(
        #[unsafe(link_section = ".dram2_uninit")] size: 64 * 1024
    );
    esp_alloc::heap_allocator!(size: 32 * 1024);

    // Start rtos
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    // Load device settings and spawn the flash writer
    let flash = FLASH_STORAGE.init(FlashStorage::new(peripherals.FLASH));
    let mut storage = SettingsStorage::new(
        flash as *mut FlashStorage<'static>,
        SETTINGS_PARTITION_OFFSET,
    );
    let settings = storage.load().unwrap_or_default();
    spawner
        .spawn(persistence_task(storage, persistence_receiver()))
        .ok();

    // Status LED and buttons
    let led = Output::new(peripherals.GPIO2, Level::Low, OutputConfig::default());
    spawner.spawn(led_task(led)).ok();

    let toggle = Input::new(peripherals.GPIO0, InputConfig::default().with_pull(Pull::Up));
    let brighter = Input::new(peripherals.GPIO4, InputConfig::default().with_pull(Pull::Up));
    let dimmer = Input::new(peripherals.GPIO5, InputConfig::default().with_pull(Pull::Up));
    spawner.spawn(button_task(toggle, brighter, dimmer)).ok();

    // Radio module strapping: CS selects the module, SET high is
    // transparent data mode.
    let _lcs_cs = Output::new(peripherals.GPIO18, Level::Low, OutputConfig::default());
    let _lcs_set = Output::new(peripherals.GPIO19, Level::High, OutputConfig::default());
    Timer::after(Duration::from_millis(100)).await;

    // Serial link to the lamp receiver module
    let uart_config = UartConfig::default()
        .with_baudrate(LINK_BAUD_RATE)
        .with_data_bits(DataBits::_8)
        .with_parity(Parity::None)
        .with_stop_bits(StopBits::_1);
    let uart = Uart::new(peripherals.UART1, uart_config)
        .expect("link uart init")
        .with_tx(peripherals.GPIO25)
        .with_rx(peripherals.GPIO26)
        .into_async();

    // Coordinator owns the lamp state; everything else talks to it
    // through the request and snapshot queues.
    let coordinator = LampCoordinator::new(
        settings.lamp,
        QueuedSettingsStore::new(settings.clone()),
        LedPairingIndicator,
        ChannelSnapshotPublisher,
    );
    spawner
        .spawn(link_task(uart, coordinator, request_receiver()))
        .ok();
    spawner.spawn(snapshot_cache_task(snapshot_receiver())).ok();

    // Provisioned devices join the configured network and serve the
    // control page; unprovisioned ones open the setup AP.
    if settings.wifi.is_configured() {
        let stack = start_wifi_sta(spawner, peripherals.WIFI, settings.wifi.clone()).await;
        set_blink_mode(BlinkMode::Client);
        let controller = mk_static!(ControlHttpController, ControlHttpController);
        spawner.spawn(control_http_task(stack, controller)).ok();
    } else {
        let stack = start_wifi_ap(spawner, peripherals.WIFI).await;
        set_blink_mode(BlinkMode::AccessPoint);
        spawner.spawn(dhcp_server_task(stack, AP_IP_ADDRESS)).ok();
        let controller = mk_static!(
            SetupHttpController,
            SetupHttpController::new(settings.lamp)
        );
        spawner.spawn(setup_http_task(stack, controller)).ok();
    }

    loop {
        Timer::after(Duration::from_secs(5)).await;
    }
}
