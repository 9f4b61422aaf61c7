use std::sync::Arc;
use std::time::Duration;

use opsdeck_bridge::NotificationChannel;
use opsdeck_bridge::notification::ChannelNotifier;
use opsdeck_client::ApiClient;
use opsdeck_display::NotificationCenter;

fn main() -> anyhow::Result<()> {
    simple_logger::SimpleLogger::new()
        .with_colors(true)
        .with_threads(true)
        .with_local_timestamps()
        .init()
        .expect("failed to build logger instance");

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("failed to build tokio runtime");
    runtime.block_on(run())
}

async fn run() -> anyhow::Result<()> {
    let config = opsdeck_client::load_config().await?;

    let NotificationChannel { tx, rx } = NotificationChannel::new();
    let center = Arc::new(NotificationCenter::new());
    center.mount();
    let display = tokio::spawn(opsdeck_display::run(center.clone(), rx));

    let notifier = Arc::new(ChannelNotifier::new(tx));
    let client = ApiClient::new(&config.api)?.with_notifier(notifier);

    if config.startup_probe.enabled {
        match client.get(&config.startup_probe.endpoint).await {
            Ok(data) => log::info!("Management API is reachable: {data}"),
            Err(err) => log::error!("Startup health probe failed: {err}"),
        }
    }

    // Dropping the client closes the notification channel; the display loop
    // then drains whatever is queued and finishes.
    drop(client);
    display.await?;

    // Let live toasts play out their lifecycle before shutting down.
    while !center.toasts().is_empty() {
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    Ok(())
}
