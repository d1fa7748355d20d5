/// Marquee Player - command line signage player
///
/// Loads a persisted playlist, then drives the playback scheduler against
/// simulated media: timer items advance on their configured durations and
/// videos are reported as ended after a fixed delay.
use clap::Parser;
use marquee_core::types::{ContentKind, PersistedPlaylist};
use marquee_core::{AssetRef, MediaWarmer, UrlResolver};
use marquee_playback::{CachingResolver, PlaybackScheduler, Prefetcher, SchedulerEvent};
use marquee_sync::{HttpIntegrationService, IntegrationCache};
use marquee_timeline::TimelineStore;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "marquee-player")]
#[command(about = "Play a Marquee playlist in the terminal", long_about = None)]
struct Cli {
    /// Path to a persisted playlist JSON file
    playlist: PathBuf,

    /// Base URL of the integration server, e.g. http://localhost:3000
    #[arg(short, long)]
    server: Option<String>,

    /// Seconds a simulated video plays before it reports ending
    #[arg(long, default_value_t = 5)]
    video_secs: u64,
}

/// Resolver for playlists whose URLs are already directly playable.
struct DirectResolver;

#[async_trait::async_trait]
impl UrlResolver for DirectResolver {
    async fn resolve(&self, asset: &AssetRef) -> marquee_core::Result<String> {
        Ok(asset.url.clone())
    }
}

/// Warmer that only records what playback would have prefetched.
struct LoggingWarmer;

#[async_trait::async_trait]
impl MediaWarmer for LoggingWarmer {
    async fn warm(&self, url: &str) -> marquee_core::Result<()> {
        info!(url, "prefetched upcoming media");
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marquee_player=info,marquee_playback=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let raw = std::fs::read_to_string(&cli.playlist)?;
    let persisted: PersistedPlaylist = serde_json::from_str(&raw)?;

    let mut store = TimelineStore::new();
    store.restore_persisted(persisted)?;
    info!(
        playlist = store.name(),
        items = store.len(),
        total_secs = store.total_duration_secs(),
        "loaded playlist"
    );

    let items = store.items().to_vec();
    let kinds: Vec<ContentKind> = items.iter().map(|item| item.kind()).collect();

    let resolver = Arc::new(CachingResolver::new(Arc::new(DirectResolver)));
    let prefetcher = Prefetcher::new(resolver.clone(), Arc::new(LoggingWarmer));

    let mut scheduler = PlaybackScheduler::new(items, resolver).with_prefetcher(prefetcher);
    if let Some(base_url) = &cli.server {
        let service = HttpIntegrationService::new(base_url)?;
        scheduler = scheduler.with_integration_cache(Arc::new(IntegrationCache::new(Arc::new(
            service,
        ))));
    }

    let (handle, mut events) = scheduler.start();
    let handle = Arc::new(handle);

    while let Some(event) = events.recv().await {
        match event {
            SchedulerEvent::ItemStarted { index, item_id, url } => {
                info!(index, %item_id, url, kind = kinds[index].as_str(), "now showing");
                if kinds[index] == ContentKind::Video {
                    let handle = handle.clone();
                    let video_secs = cli.video_secs;
                    tokio::spawn(async move {
                        tokio::time::sleep(Duration::from_secs(video_secs)).await;
                        if handle.notify_media_ended().is_err() {
                            warn!("player stopped before the video finished");
                        }
                    });
                }
            }
            SchedulerEvent::ItemResolved { index, item_id, url } => {
                info!(index, %item_id, url, "resolved playable url");
            }
            SchedulerEvent::ItemFailed {
                index,
                item_id,
                message,
            } => {
                warn!(index, %item_id, message, "item failed to resolve");
            }
            SchedulerEvent::Ended => {
                info!("playlist finished");
                break;
            }
        }
    }

    Ok(())
}
