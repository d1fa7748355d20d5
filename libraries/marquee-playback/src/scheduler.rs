//! Playback state machine
//!
//! Walks the item sequence in order, arming exactly one advance trigger per
//! item: a wall-clock timer for image/website/integration items, or the
//! host's media-end notification for video items. A manual next disarms the
//! pending trigger and advances immediately. Closing the player aborts the
//! scheduling task; no advance fires afterwards.
//!
//! There is deliberately no timeout fallback for a video whose end-of-media
//! signal never arrives: playback stalls on that item until a manual next
//! or close.

use crate::events::SchedulerEvent;
use crate::error::{PlaybackError, Result};
use crate::prefetch::Prefetcher;
use crate::resolver::CachingResolver;
use marquee_core::types::{ItemContent, PlaylistItem, MIN_ITEM_DURATION_SECS};
use marquee_core::AssetRef;
use marquee_sync::IntegrationCache;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Scheduler lifecycle state, observable through [`PlayerHandle::state`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Not started
    Idle,
    /// Showing the item at this index
    Playing(usize),
    /// The sequence completed
    Ended,
}

enum PlayerCommand {
    /// Manual "next" control
    Next,
    /// The host's media element reached its natural end
    ///
    /// Tagged with the index showing when the signal was raised, so a
    /// duplicate end signal from a previous video cannot skip the next
    /// one.
    MediaEnded {
        index: usize,
    },
}

/// Drives playback over a snapshot of the timeline
pub struct PlaybackScheduler {
    items: Vec<PlaylistItem>,
    resolver: Arc<CachingResolver>,
    prefetcher: Option<Prefetcher>,
    integrations: Option<Arc<IntegrationCache>>,
}

impl PlaybackScheduler {
    /// Scheduler over the given item sequence
    pub fn new(items: Vec<PlaylistItem>, resolver: Arc<CachingResolver>) -> Self {
        Self {
            items,
            resolver,
            prefetcher: None,
            integrations: None,
        }
    }

    /// Warm upcoming assets through this prefetcher
    pub fn with_prefetcher(mut self, prefetcher: Prefetcher) -> Self {
        self.prefetcher = Some(prefetcher);
        self
    }

    /// Warm integration data for integration items as they start
    pub fn with_integration_cache(mut self, cache: Arc<IntegrationCache>) -> Self {
        self.integrations = Some(cache);
        self
    }

    /// Start playback at index 0
    ///
    /// An empty sequence emits `Ended` immediately. The returned handle
    /// controls the session; the receiver sees every transition.
    pub fn start(self) -> (PlayerHandle, mpsc::UnboundedReceiver<SchedulerEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(PlaybackState::Idle);

        let task = tokio::spawn(self.run(event_tx, cmd_rx, state_tx));

        (
            PlayerHandle {
                cmd: cmd_tx,
                state: state_rx,
                task,
            },
            event_rx,
        )
    }

    async fn run(
        self,
        events: mpsc::UnboundedSender<SchedulerEvent>,
        mut cmd: mpsc::UnboundedReceiver<PlayerCommand>,
        state: watch::Sender<PlaybackState>,
    ) {
        let n = self.items.len();
        if n == 0 {
            info!("empty sequence, ending immediately");
            let _ = state.send(PlaybackState::Ended);
            let _ = events.send(SchedulerEvent::Ended);
            return;
        }

        let mut index = 0;
        loop {
            let item = &self.items[index];
            let _ = state.send(PlaybackState::Playing(index));
            self.enter_item(index, item, &events);

            wait_for_advance(index, item, &mut cmd).await;
            debug!(index, "advancing");

            if index == n - 1 {
                let _ = state.send(PlaybackState::Ended);
                let _ = events.send(SchedulerEvent::Ended);
                info!("sequence complete");
                return;
            }
            index += 1;
        }
    }

    /// Announce the item, kick off its resolution, warm the next one
    fn enter_item(
        &self,
        index: usize,
        item: &PlaylistItem,
        events: &mpsc::UnboundedSender<SchedulerEvent>,
    ) {
        // Warm the integration payload while the item is on screen
        if let (
            Some(cache),
            ItemContent::Integration {
                integration_id,
                integration,
            },
        ) = (&self.integrations, &item.content)
        {
            let cache = cache.clone();
            let item_id = item.id.clone();
            let integration_id = integration_id.clone();
            let known = integration.clone();
            tokio::spawn(async move {
                cache.load(&item_id, &integration_id, known).await;
            });
        }

        // Announce the item before any resolution work so the event
        // stream never reorders against playback
        let _ = events.send(SchedulerEvent::ItemStarted {
            index,
            item_id: item.id.clone(),
            url: item.url.clone(),
        });

        // Resolve the signed URL off the advance path; a hung resolver
        // must not delay the timer
        let asset = AssetRef::new(item.asset_id.clone(), item.url.clone());
        let resolver = self.resolver.clone();
        let item_id = item.id.clone();
        let events = events.clone();
        tokio::spawn(async move {
            match resolver.resolve(&asset).await {
                Ok(url) => {
                    let _ = events.send(SchedulerEvent::ItemResolved {
                        index,
                        item_id,
                        url,
                    });
                }
                Err(e) => {
                    let _ = events.send(SchedulerEvent::ItemFailed {
                        index,
                        item_id,
                        message: e.to_string(),
                    });
                }
            }
        });

        if let (Some(prefetcher), Some(next)) = (&self.prefetcher, self.items.get(index + 1)) {
            prefetcher.warm_ahead(next);
        }
    }
}

/// Block until this item's advance trigger fires
///
/// Timer-driven kinds arm one timer; video arms only the media-end
/// listener. A manual next fires either way, disarming the timer by
/// dropping it.
async fn wait_for_advance(
    index: usize,
    item: &PlaylistItem,
    cmd: &mut mpsc::UnboundedReceiver<PlayerCommand>,
) {
    if item.is_timer_driven() {
        let secs = item.duration_secs.max(MIN_ITEM_DURATION_SECS);
        let sleep = tokio::time::sleep(Duration::from_millis(u64::from(secs) * 1000));
        tokio::pin!(sleep);

        let mut commands_open = true;
        loop {
            if commands_open {
                tokio::select! {
                    () = &mut sleep => return,
                    maybe = cmd.recv() => match maybe {
                        Some(PlayerCommand::Next) => return,
                        // A stale media-end from a previous video item
                        Some(PlayerCommand::MediaEnded { .. }) => {}
                        None => commands_open = false,
                    },
                }
            } else {
                sleep.as_mut().await;
                return;
            }
        }
    } else {
        // No timer for video; only the end-of-media signal for this
        // index (or manual next) advances. If the handle is gone, stall
        // faithfully.
        loop {
            match cmd.recv().await {
                Some(PlayerCommand::Next) => return,
                Some(PlayerCommand::MediaEnded { index: ended }) if ended == index => return,
                // End signal raised against an earlier item
                Some(PlayerCommand::MediaEnded { .. }) => {}
                None => std::future::pending::<()>().await,
            }
        }
    }
}

/// Control handle for a running playback session
pub struct PlayerHandle {
    cmd: mpsc::UnboundedSender<PlayerCommand>,
    state: watch::Receiver<PlaybackState>,
    task: JoinHandle<()>,
}

impl PlayerHandle {
    /// Advance immediately, disarming any pending timer first
    pub fn advance_manually(&self) -> Result<()> {
        self.cmd
            .send(PlayerCommand::Next)
            .map_err(|_| PlaybackError::SchedulerClosed)
    }

    /// Report that the current video reached its natural end
    ///
    /// The signal is bound to the item showing when it is raised; a
    /// duplicate raised against an already-advanced item is dropped, as
    /// is one arriving after the session ended.
    pub fn notify_media_ended(&self) -> Result<()> {
        let PlaybackState::Playing(index) = *self.state.borrow() else {
            return Ok(());
        };
        self.cmd
            .send(PlayerCommand::MediaEnded { index })
            .map_err(|_| PlaybackError::SchedulerClosed)
    }

    /// Current scheduler state
    pub fn state(&self) -> PlaybackState {
        *self.state.borrow()
    }

    /// Close the player
    ///
    /// Synchronously disarms the pending trigger; no advance fires after
    /// this returns. There is no pause or resume.
    pub fn close(&self) {
        self.task.abort();
    }

    /// Wait for the session to end on its own
    pub async fn wait(self) {
        let _ = self.task.await;
    }
}
