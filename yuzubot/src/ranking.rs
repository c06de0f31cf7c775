//! Ranking-diff engine: append-only room-counter snapshots diffed against
//! the live room list, rendered as a top-N leaderboard.

use chatwork_client::{ChatworkClient, RoomSummary};
use tracing::{info, instrument};
use yuzubot_core::BotError;
use yuzubot_storage::SnapshotRepository;

use crate::jst;

/// Which counter the leaderboard ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingMetric {
    Message,
    File,
}

impl RankingMetric {
    pub fn title(&self) -> &'static str {
        match self {
            RankingMetric::Message => "メッセージ数ランキング",
            RankingMetric::File => "ファイル数ランキング",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            RankingMetric::Message => "コメ",
            RankingMetric::File => "個",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RankingMetric::Message => "メッセージ",
            RankingMetric::File => "ファイル",
        }
    }

    fn value(&self, room: &RoomSummary) -> i64 {
        match self {
            RankingMetric::Message => room.message_num,
            RankingMetric::File => room.file_num,
        }
    }
}

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomDiff {
    pub room_id: i64,
    pub name: String,
    pub diff: i64,
}

/// Leaderboard outcome; the two no-data cases get distinct user messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Leaderboard {
    /// No snapshot has ever been captured.
    NoSnapshot,
    /// A snapshot exists but the top growth is zero (or no room matched).
    NoGrowth,
    Ready(String),
}

/// Growth per room since the snapshot, sorted descending. Rooms absent from
/// the snapshot are skipped — no synthetic zero baseline. The sort is
/// stable, so ties keep the API's original room order.
pub fn compute_diffs(
    snapshot: &[RoomSummary],
    live: &[RoomSummary],
    metric: RankingMetric,
) -> Vec<RoomDiff> {
    let mut diffs: Vec<RoomDiff> = live
        .iter()
        .filter_map(|room| {
            let baseline = snapshot.iter().find(|s| s.room_id == room.room_id)?;
            Some(RoomDiff {
                room_id: room.room_id,
                name: room.name.clone(),
                diff: metric.value(room) - metric.value(baseline),
            })
        })
        .collect();
    diffs.sort_by(|a, b| b.diff.cmp(&a.diff));
    diffs
}

/// A leaderboard whose best row grew by exactly zero is reported as
/// no-data rather than rendered as an all-zero table.
fn has_growth(diffs: &[RoomDiff]) -> bool {
    diffs.first().is_some_and(|top| top.diff != 0)
}

/// Renders the top `limit` rows plus the capture-provenance footer.
pub fn render_leaderboard(
    diffs: &[RoomDiff],
    limit: usize,
    metric: RankingMetric,
    day: &str,
    hour: i64,
) -> String {
    let mut out = format!("[info][title]{}[/title]", metric.title());
    for (i, row) in diffs.iter().take(limit).enumerate() {
        out.push_str(&format!(
            "{}位 {} (ID: {}) - {}{}\n",
            i + 1,
            row.name,
            row.room_id,
            row.diff,
            metric.unit()
        ));
    }
    out.push_str(&format!("[hr]統計開始: {day}、{hour}時[/info]"));
    out
}

pub struct RankingEngine {
    client: ChatworkClient,
    snapshots: SnapshotRepository,
    excluded_rooms: Vec<i64>,
}

impl RankingEngine {
    pub fn new(
        client: ChatworkClient,
        snapshots: SnapshotRepository,
        excluded_rooms: Vec<i64>,
    ) -> Self {
        Self {
            client,
            snapshots,
            excluded_rooms,
        }
    }

    /// Captures the live room list as a new snapshot row tagged with the
    /// JST day and hour. Always an append.
    #[instrument(skip(self))]
    pub async fn capture(&self) -> Result<(), BotError> {
        let list = self
            .client
            .room_list()
            .await
            .map_err(|e| BotError::Api(e.to_string()))?;
        let json =
            serde_json::to_string(&list).map_err(|e| BotError::Database(e.to_string()))?;
        self.snapshots
            .insert(&json, &jst::today(), jst::current_hour())
            .await
            .map_err(|e| BotError::Database(e.to_string()))?;
        info!(rooms = list.len(), "snapshot captured");
        Ok(())
    }

    /// Diffs live counters against the most recent snapshot.
    #[instrument(skip(self))]
    pub async fn leaderboard(
        &self,
        metric: RankingMetric,
        limit: usize,
    ) -> Result<Leaderboard, BotError> {
        let Some(snapshot) = self
            .snapshots
            .latest()
            .await
            .map_err(|e| BotError::Database(e.to_string()))?
        else {
            return Ok(Leaderboard::NoSnapshot);
        };

        let baseline: Vec<RoomSummary> = serde_json::from_str(&snapshot.list)
            .map_err(|e| BotError::Database(e.to_string()))?;
        let live: Vec<RoomSummary> = self
            .client
            .room_list()
            .await
            .map_err(|e| BotError::Api(e.to_string()))?
            .into_iter()
            .filter(|room| !self.excluded_rooms.contains(&room.room_id))
            .collect();

        let diffs = compute_diffs(&baseline, &live, metric);
        if !has_growth(&diffs) {
            return Ok(Leaderboard::NoGrowth);
        }
        Ok(Leaderboard::Ready(render_leaderboard(
            &diffs,
            limit,
            metric,
            &snapshot.day,
            snapshot.hour,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(room_id: i64, name: &str, message_num: i64, file_num: i64) -> RoomSummary {
        RoomSummary {
            room_id,
            name: name.to_string(),
            message_num,
            file_num,
            task_num: 0,
            icon_path: String::new(),
        }
    }

    #[test]
    fn rooms_absent_from_snapshot_are_skipped() {
        let snapshot = vec![room(1, "A", 10, 0)];
        let live = vec![room(1, "A", 15, 0), room(2, "B", 5, 0)];

        let diffs = compute_diffs(&snapshot, &live, RankingMetric::Message);

        assert_eq!(
            diffs,
            vec![RoomDiff {
                room_id: 1,
                name: "A".to_string(),
                diff: 5
            }]
        );
    }

    #[test]
    fn diffs_sort_descending() {
        let snapshot = vec![room(1, "A", 100, 0), room(2, "B", 100, 0), room(3, "C", 100, 0)];
        let live = vec![room(1, "A", 101, 0), room(2, "B", 150, 0), room(3, "C", 120, 0)];

        let diffs = compute_diffs(&snapshot, &live, RankingMetric::Message);

        let order: Vec<i64> = diffs.iter().map(|d| d.room_id).collect();
        assert_eq!(order, vec![2, 3, 1]);
    }

    #[test]
    fn ties_keep_api_room_order() {
        let snapshot = vec![room(7, "先", 10, 0), room(8, "後", 20, 0)];
        let live = vec![room(7, "先", 15, 0), room(8, "後", 25, 0)];

        let diffs = compute_diffs(&snapshot, &live, RankingMetric::Message);

        let order: Vec<i64> = diffs.iter().map(|d| d.room_id).collect();
        assert_eq!(order, vec![7, 8]);
    }

    #[test]
    fn file_metric_diffs_file_counters() {
        let snapshot = vec![room(1, "A", 0, 3)];
        let live = vec![room(1, "A", 0, 9)];

        let diffs = compute_diffs(&snapshot, &live, RankingMetric::File);

        assert_eq!(diffs[0].diff, 6);
    }

    #[test]
    fn zero_top_growth_counts_as_no_data() {
        let flat = vec![
            RoomDiff {
                room_id: 1,
                name: "A".to_string(),
                diff: 0,
            },
            RoomDiff {
                room_id: 2,
                name: "B".to_string(),
                diff: 0,
            },
        ];
        assert!(!has_growth(&flat));
        assert!(!has_growth(&[]));

        let grown = vec![RoomDiff {
            room_id: 1,
            name: "A".to_string(),
            diff: 5,
        }];
        assert!(has_growth(&grown));
    }

    #[test]
    fn render_matches_expected_shape() {
        let diffs = vec![RoomDiff {
            room_id: 1,
            name: "A".to_string(),
            diff: 30,
        }];

        let text = render_leaderboard(&diffs, 8, RankingMetric::Message, "2024-01-01", 9);

        assert!(text.contains("1位 A (ID: 1) - 30コメ"));
        assert!(text.contains("統計開始: 2024-01-01、9時"));
        assert!(text.starts_with("[info][title]メッセージ数ランキング[/title]"));
    }

    #[test]
    fn render_truncates_to_limit() {
        let diffs: Vec<RoomDiff> = (0..40)
            .map(|i| RoomDiff {
                room_id: i,
                name: format!("部屋{i}"),
                diff: 100 - i,
            })
            .collect();

        let short = render_leaderboard(&diffs, 8, RankingMetric::Message, "2024-01-01", 9);
        let long = render_leaderboard(&diffs, 30, RankingMetric::Message, "2024-01-01", 9);

        assert!(short.contains("8位"));
        assert!(!short.contains("9位"));
        assert!(long.contains("30位"));
        assert!(!long.contains("31位"));
    }

    #[test]
    fn file_unit_renders_as_pieces() {
        let diffs = vec![RoomDiff {
            room_id: 3,
            name: "資料室".to_string(),
            diff: 4,
        }];

        let text = render_leaderboard(&diffs, 8, RankingMetric::File, "2024-02-02", 14);

        assert!(text.contains("1位 資料室 (ID: 3) - 4個"));
        assert!(text.contains("[info][title]ファイル数ランキング[/title]"));
    }
}
