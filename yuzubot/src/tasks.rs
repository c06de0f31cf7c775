//! Periodic background tasks: the moderation-history sweep and the hourly
//! time report. Both run on independent tokio timers and never take the
//! process down on failure.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chatwork_client::ChatworkClient;
use tokio::task::JoinHandle;
use tracing::{debug, error};
use yuzubot_storage::TimeReportRepository;

use crate::jst;
use crate::moderation::{SenderHistory, SWEEP_INTERVAL, WINDOW};

/// Purges aged-out sender history every [`SWEEP_INTERVAL`].
pub fn spawn_history_sweeper(history: Arc<SenderHistory>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            ticker.tick().await;
            history.sweep(Instant::now(), WINDOW);
            debug!(tracked = history.tracked_senders(), "sender history swept");
        }
    })
}

/// Posts the hourly time report to every opted-in room when the JST minute
/// hits zero.
pub fn spawn_time_report(
    client: ChatworkClient,
    rooms: TimeReportRepository,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(60));
        loop {
            ticker.tick().await;
            if jst::current_minute() != 0 {
                continue;
            }

            let room_ids = match rooms.all_rooms().await {
                Ok(ids) => ids,
                Err(e) => {
                    error!(error = %e, "failed to load time-report rooms");
                    continue;
                }
            };

            let hour = jst::current_hour();
            let message = format!("[info][title]時報[/title]現在時刻は、{hour}時です。[/info]");
            for room_id in room_ids {
                if let Err(e) = client.send_message(room_id, &message).await {
                    error!(error = %e, room_id, "failed to send time report");
                }
            }
        }
    })
}
