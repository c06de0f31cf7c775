//! Sliding-window spam moderation.
//!
//! Keeps a per-sender window of recent message bodies, scores each inbound
//! message for duplicates and emoticon floods, and downgrades offenders to
//! the readonly role through the Chatwork API. Administrators are exempt
//! from every trigger; the exemption is checked before any action. All API
//! failures here are logged and swallowed: moderation is best-effort.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chatwork_client::{count_emojis, is_admin, markup, ChatworkClient, RoleAssignment};
use tracing::{debug, error, info, warn};
use yuzubot_core::{MessageEvent, Middleware};

/// Trailing window over which duplicates and emoji counts are evaluated.
pub const WINDOW: Duration = Duration::from_secs(60);
/// Interval of the background sweep that drops aged-out history.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(10);

/// Emoji count at or above which the sender is downgraded.
pub const EMOJI_DOWNGRADE_THRESHOLD: usize = 15;
/// Duplicate count at which the sender is downgraded (exactly once).
pub const REPEAT_DOWNGRADE_THRESHOLD: usize = 15;
/// Duplicate count at which the sender is warned.
pub const REPEAT_WARN_THRESHOLD: usize = 10;

#[derive(Debug, Clone)]
struct HistoryEntry {
    body: String,
    seen_at: Instant,
}

/// Per-sender history of recent message bodies. Owned by the moderator
/// instance rather than living in a global, so tests and multi-instance
/// deployments each get their own map. Not shared across worker processes.
#[derive(Default)]
pub struct SenderHistory {
    inner: Mutex<HashMap<i64, Vec<HistoryEntry>>>,
}

impl SenderHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `(body, now)` to the sender's history, purges entries older
    /// than `window`, and returns how many retained entries (including the
    /// new one) equal `body`.
    pub fn record(&self, account_id: i64, body: &str, now: Instant, window: Duration) -> usize {
        let mut map = self.inner.lock().unwrap();
        let entries = map.entry(account_id).or_default();
        entries.push(HistoryEntry {
            body: body.to_string(),
            seen_at: now,
        });
        entries.retain(|e| now.duration_since(e.seen_at) <= window);
        entries.iter().filter(|e| e.body == body).count()
    }

    /// Drops the sender's history entirely (used after a downgrade).
    pub fn clear(&self, account_id: i64) {
        self.inner.lock().unwrap().remove(&account_id);
    }

    /// Replaces every sender's history with a filtered copy, dropping
    /// senders whose window emptied. The replace keeps in-flight `record`
    /// calls from ever observing a half-filtered vec.
    pub fn sweep(&self, now: Instant, window: Duration) {
        let mut map = self.inner.lock().unwrap();
        let mut swept: HashMap<i64, Vec<HistoryEntry>> = HashMap::with_capacity(map.len());
        for (sender, entries) in map.iter() {
            let kept: Vec<HistoryEntry> = entries
                .iter()
                .filter(|e| now.duration_since(e.seen_at) <= window)
                .cloned()
                .collect();
            if !kept.is_empty() {
                swept.insert(*sender, kept);
            }
        }
        *map = swept;
    }

    /// Number of senders currently tracked.
    pub fn tracked_senders(&self) -> usize {
        self.inner.lock().unwrap().len()
    }
}

/// Why a sender is being downgraded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DowngradeReason {
    EmojiFlood,
    RepeatedMessage,
}

/// Moderation decision for one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpamVerdict {
    Clean,
    /// Duplicate count in the warn band; reply, no role change.
    Warn { repeats: usize },
    Downgrade(DowngradeReason),
    /// Past the downgrade point already; drop without another role call.
    AlreadyFlagged,
}

/// Scores one message. `repeats` is the retained duplicate count from
/// [`SenderHistory::record`], including the message itself.
pub fn evaluate(body: &str, repeats: usize) -> SpamVerdict {
    let emoji_count = if markup::contains_toall(body) {
        // A broadcast ping counts as a flood on its own.
        EMOJI_DOWNGRADE_THRESHOLD
    } else {
        count_emojis(body)
    };

    if emoji_count >= EMOJI_DOWNGRADE_THRESHOLD {
        return SpamVerdict::Downgrade(DowngradeReason::EmojiFlood);
    }

    match repeats {
        r if r == REPEAT_DOWNGRADE_THRESHOLD => {
            SpamVerdict::Downgrade(DowngradeReason::RepeatedMessage)
        }
        r if r > REPEAT_DOWNGRADE_THRESHOLD => SpamVerdict::AlreadyFlagged,
        r if r >= REPEAT_WARN_THRESHOLD => SpamVerdict::Warn { repeats: r },
        _ => SpamVerdict::Clean,
    }
}

/// Middleware that runs the window check on every inbound event before any
/// command handler sees it.
pub struct SlidingWindowModerator {
    client: ChatworkClient,
    history: Arc<SenderHistory>,
    bot_account_id: i64,
    window: Duration,
}

impl SlidingWindowModerator {
    pub fn new(client: ChatworkClient, history: Arc<SenderHistory>, bot_account_id: i64) -> Self {
        Self {
            client,
            history,
            bot_account_id,
            window: WINDOW,
        }
    }

    async fn warn_sender(&self, event: &MessageEvent, repeats: usize) {
        info!(
            account_id = event.sender.account_id,
            room_id = event.room.room_id,
            repeats,
            "duplicate flood warning"
        );
        let text = markup::reply_to(
            event.sender.account_id,
            event.room.room_id,
            &event.message_id,
            "同じメッセージの連投が検出されています。これ以上続くと権限を閲覧に変更します。",
        );
        if let Err(e) = self.client.send_message(event.room.room_id, &text).await {
            warn!(error = %e, room_id = event.room.room_id, "failed to send spam warning");
        }
    }

    async fn downgrade_sender(
        &self,
        event: &MessageEvent,
        members: &[chatwork_client::RoomMember],
        reason: DowngradeReason,
    ) {
        let account_id = event.sender.account_id;
        let room_id = event.room.room_id;
        info!(account_id, room_id, ?reason, "downgrading sender to readonly");

        let assignment = RoleAssignment::demote_to_readonly(members, account_id);
        if let Err(e) = self.client.update_member_roles(room_id, &assignment).await {
            error!(error = %e, account_id, room_id, "failed to update member roles");
            return;
        }

        // History restarts after a downgrade; the sender can no longer post
        // until re-promoted anyway.
        self.history.clear(account_id);

        let name = members
            .iter()
            .find(|m| m.account_id == account_id)
            .map(|m| m.name.as_str())
            .unwrap_or("対象ユーザー");
        let notice = match reason {
            DowngradeReason::EmojiFlood => {
                format!("絵文字が多すぎるため、{name}さんの権限を閲覧に変更しました。")
            }
            DowngradeReason::RepeatedMessage => {
                format!("同じメッセージの連投が続いたため、{name}さんの権限を閲覧に変更しました。")
            }
        };
        if let Err(e) = self.client.send_message(room_id, &notice).await {
            warn!(error = %e, room_id, "failed to send downgrade notice");
        }
    }
}

#[async_trait]
impl Middleware for SlidingWindowModerator {
    async fn before(&self, event: &MessageEvent) -> yuzubot_core::Result<bool> {
        let account_id = event.sender.account_id;
        if account_id == self.bot_account_id {
            return Ok(true);
        }

        let repeats = self
            .history
            .record(account_id, &event.body, Instant::now(), self.window);
        let verdict = evaluate(&event.body, repeats);

        match verdict {
            SpamVerdict::Clean => Ok(true),
            SpamVerdict::AlreadyFlagged => {
                debug!(account_id, "duplicate past downgrade point, dropped");
                Ok(false)
            }
            SpamVerdict::Warn { .. } | SpamVerdict::Downgrade(_) => {
                let members = match self.client.room_members(event.room.room_id).await {
                    Ok(members) => members,
                    Err(e) => {
                        warn!(error = %e, room_id = event.room.room_id,
                            "member fetch failed, skipping moderation");
                        return Ok(false);
                    }
                };

                if is_admin(&members, account_id) {
                    debug!(account_id, "admin exempt from moderation");
                    return Ok(true);
                }

                match verdict {
                    SpamVerdict::Warn { repeats } => self.warn_sender(event, repeats).await,
                    SpamVerdict::Downgrade(reason) => {
                        self.downgrade_sender(event, &members, reason).await
                    }
                    _ => unreachable!(),
                }
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdicts_for_duplicates(n: usize) -> Vec<SpamVerdict> {
        let history = SenderHistory::new();
        let now = Instant::now();
        (0..n)
            .map(|i| {
                let at = now + Duration::from_millis(i as u64);
                let repeats = history.record(1, "おはよう", at, WINDOW);
                evaluate("おはよう", repeats)
            })
            .collect()
    }

    #[test]
    fn fifteenth_duplicate_downgrades_exactly_once() {
        let verdicts = verdicts_for_duplicates(20);

        let downgrades = verdicts
            .iter()
            .filter(|v| matches!(v, SpamVerdict::Downgrade(DowngradeReason::RepeatedMessage)))
            .count();
        assert_eq!(downgrades, 1);
        assert_eq!(
            verdicts[14],
            SpamVerdict::Downgrade(DowngradeReason::RepeatedMessage)
        );
        // Later duplicates within the window stay silent.
        for v in &verdicts[15..] {
            assert_eq!(*v, SpamVerdict::AlreadyFlagged);
        }
    }

    #[test]
    fn warn_band_warns_without_downgrade() {
        let verdicts = verdicts_for_duplicates(14);

        for (i, v) in verdicts.iter().enumerate() {
            match i + 1 {
                1..=9 => assert_eq!(*v, SpamVerdict::Clean, "message {}", i + 1),
                10..=14 => assert_eq!(*v, SpamVerdict::Warn { repeats: i + 1 }),
                _ => unreachable!(),
            }
        }
    }

    #[test]
    fn aged_out_entries_reset_the_repeat_count() {
        let history = SenderHistory::new();
        let now = Instant::now();

        for i in 0..14 {
            history.record(1, "スパム", now + Duration::from_millis(i), WINDOW);
        }
        // Past the window: everything above ages out.
        let later = now + WINDOW + Duration::from_secs(1);
        let repeats = history.record(1, "スパム", later, WINDOW);

        assert_eq!(repeats, 1);
        assert_eq!(evaluate("スパム", repeats), SpamVerdict::Clean);
    }

    #[test]
    fn distinct_bodies_do_not_accumulate() {
        let history = SenderHistory::new();
        let now = Instant::now();

        for i in 0..30 {
            history.record(1, &format!("メッセージ{i}"), now + Duration::from_millis(i), WINDOW);
        }
        let repeats = history.record(1, "メッセージ0", now + Duration::from_secs(1), WINDOW);

        assert_eq!(repeats, 2);
    }

    #[test]
    fn histories_are_per_sender() {
        let history = SenderHistory::new();
        let now = Instant::now();

        for _ in 0..14 {
            history.record(1, "同じ", now, WINDOW);
        }
        let other = history.record(2, "同じ", now, WINDOW);

        assert_eq!(other, 1);
    }

    #[test]
    fn emoji_flood_downgrades_regardless_of_repeats() {
        let body = "(devil)".repeat(15);
        assert_eq!(
            evaluate(&body, 1),
            SpamVerdict::Downgrade(DowngradeReason::EmojiFlood)
        );
    }

    #[test]
    fn fourteen_emojis_is_clean() {
        let body = "(clap)".repeat(14);
        assert_eq!(evaluate(&body, 1), SpamVerdict::Clean);
    }

    #[test]
    fn toall_marker_counts_as_flood_on_its_own() {
        assert_eq!(
            evaluate("[toall]\n全員集合", 1),
            SpamVerdict::Downgrade(DowngradeReason::EmojiFlood)
        );
    }

    #[test]
    fn emoji_rule_wins_over_repeat_rule() {
        let body = "(devil)".repeat(15);
        // 15th duplicate of an emoji flood still reports the flood.
        assert_eq!(
            evaluate(&body, 15),
            SpamVerdict::Downgrade(DowngradeReason::EmojiFlood)
        );
    }

    #[test]
    fn sweep_drops_aged_senders() {
        let history = SenderHistory::new();
        let now = Instant::now();

        history.record(1, "a", now, WINDOW);
        history.record(2, "b", now + Duration::from_secs(55), WINDOW);
        assert_eq!(history.tracked_senders(), 2);

        history.sweep(now + Duration::from_secs(70), WINDOW);

        // Sender 1's entry aged out; sender 2's is still inside the window.
        assert_eq!(history.tracked_senders(), 1);
    }

    #[test]
    fn clear_forgets_a_sender() {
        let history = SenderHistory::new();
        let now = Instant::now();

        for _ in 0..15 {
            history.record(1, "同じ", now, WINDOW);
        }
        history.clear(1);

        assert_eq!(history.record(1, "同じ", now, WINDOW), 1);
    }
}
