//! Command handlers, registered on the chain in priority order: ping,
//! delete, markup filter, fixed keyword commands, then the fallback
//! message counter. First match wins; one command per inbound event.

mod ai;
mod coin;
mod counter;
mod delete;
mod filter;
mod fortune;
mod member_ranking;
mod ping;
mod room_info;
mod stats;
mod time_report;
mod whoami;

pub use ai::AiHandler;
pub use coin::CoinFlipHandler;
pub use counter::MessageCountHandler;
pub use delete::DeleteMessageHandler;
pub use filter::BotMarkupFilter;
pub use fortune::{FortuneHandler, FORTUNES};
pub use member_ranking::MemberRankingHandler;
pub use ping::PingHandler;
pub use room_info::RoomInfoHandler;
pub use stats::StatsHandler;
pub use time_report::TimeReportHandler;
pub use whoami::WhoAmIHandler;
