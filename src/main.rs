use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;
use tradejournal::application::journal::TradeJournal;
use tradejournal::config::JournalConfig;
use tradejournal::infrastructure::JsonFileStore;
use tradejournal::interfaces::JournalApp;

// A writer that sends logs to the UI via a crossbeam channel
struct ChannelWriter {
    sender: crossbeam_channel::Sender<String>,
}

impl std::io::Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let msg = String::from_utf8_lossy(buf).trim_end().to_string();
        let _ = self.sender.try_send(msg);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[derive(Clone)]
struct ChannelWriterFactory {
    sender: crossbeam_channel::Sender<String>,
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for ChannelWriterFactory {
    type Writer = ChannelWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ChannelWriter {
            sender: self.sender.clone(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let (log_tx, log_rx) = crossbeam_channel::unbounded();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false).pretty();

    let ui_layer = tracing_subscriber::fmt::layer()
        .with_writer(ChannelWriterFactory { sender: log_tx })
        .with_ansi(false)
        .with_target(false);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .with(ui_layer)
        .init();

    info!("Starting Trade Journal...");

    let config = JournalConfig::from_env()?;
    let store = JsonFileStore::new(&config.data_dir)?;
    info!("Journal data directory: {}", store.dir().display());

    let journal = TradeJournal::load(Arc::new(store), config.storage_key.clone())?;
    info!("Loaded {} trades from '{}'", journal.len(), journal.key());

    // Screenshot reads run here; the runtime must outlive the UI loop.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()?;

    let app = JournalApp::new(journal, config, runtime.handle().clone(), log_rx);

    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Trade Journal"),
        ..Default::default()
    };

    eframe::run_native(
        "Trade Journal",
        native_options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|e| anyhow::anyhow!("Eframe error: {}", e))?;

    drop(runtime);
    Ok(())
}
