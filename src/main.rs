//! batmon: battery telemetry for status bars.
//!
//! Prints one JSON line per poll on stdout; logs go to stderr.
//! Run with:  `RUST_LOG=info batmon [path/to/batmon.toml]`

use anyhow::Result;
use batmon_config::{default_path, load as load_config, ConfigWatcher};
use batmon_display::{render, Style};
use batmon_system::{spawn_monitor, SysfsSource};
use std::io::Write;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Structured logging; RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("batmon v{} starting", env!("CARGO_PKG_VERSION"));

    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(default_path);
    let config = load_config(&path)?;

    let mut style  = Style::from_config(&config.display);
    let source     = SysfsSource::new(&config.battery.sysfs_root);
    let mut monitor = spawn_monitor(source, config.poll_settings());
    let (_watcher, mut reloads) = ConfigWatcher::spawn(&path);

    let mut stdout = std::io::stdout().lock();
    let interrupted = tokio::signal::ctrl_c();
    tokio::pin!(interrupted);

    loop {
        tokio::select! {
            changed = monitor.reports.changed() => {
                if changed.is_err() {
                    break;
                }
                let rendered = monitor
                    .reports
                    .borrow_and_update()
                    .as_ref()
                    .map(|report| render(report, &style));
                if let Some(rendered) = rendered {
                    writeln!(stdout, "{}", rendered.to_json()?)?;
                    stdout.flush()?;
                }
            }
            Some(alert) = monitor.alerts.recv() => {
                // Delivery (desktop notification, sound…) belongs to the consumer.
                warn!(battery = alert.battery_index, percent = alert.percentage, "{}", alert.message);
            }
            Some(()) = reloads.recv() => match load_config(&path) {
                Ok(config) => {
                    info!("Config reloaded from '{}'", path.display());
                    style = Style::from_config(&config.display);
                    monitor.reconfigure(config.poll_settings());
                }
                Err(e) => error!("Ignoring invalid config: {e}"),
            },
            _ = &mut interrupted => {
                info!("Interrupted");
                break;
            }
        }
    }

    monitor.shutdown().await;
    Ok(())
}
