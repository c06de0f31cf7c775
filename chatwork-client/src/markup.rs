//! Chatwork message-markup helpers: reply formatting, the reply-reference
//! parser, and mention stripping. All reference extraction lives here so
//! handlers never pattern-match markup themselves.

use once_cell::sync::Lazy;
use regex::Regex;

static REPLY_REF: Lazy<Regex> = Lazy::new(|| Regex::new(r"to=(\d+)-(\d+)").unwrap());
static TO_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[To:\d+\]").unwrap());

/// A `to={room}-{message}` reference found in reply/quote markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyRef {
    pub room_id: i64,
    pub message_id: String,
}

/// Formats a reply to the given message in the standard
/// `[rp aid=…][pname:…]さん` shape used for every bot response.
pub fn reply_to(account_id: i64, room_id: i64, message_id: &str, text: &str) -> String {
    format!("[rp aid={account_id} to={room_id}-{message_id}][pname:{account_id}]さん\n{text}")
}

/// Extracts every reply reference from the body, in order of appearance.
/// The empty vec is the "no match" result.
pub fn parse_reply_refs(body: &str) -> Vec<ReplyRef> {
    REPLY_REF
        .captures_iter(body)
        .filter_map(|caps| {
            let room_id = caps[1].parse().ok()?;
            Some(ReplyRef {
                room_id,
                message_id: caps[2].to_string(),
            })
        })
        .collect()
}

/// Command text of a body: `[To:…]` mention tags removed, surrounding
/// whitespace trimmed.
pub fn strip_to_tags(body: &str) -> String {
    TO_TAG.replace_all(body, "").trim().to_string()
}

/// True when the body starts with markup the bot must not re-process: its
/// own reply prefix, a mention, or an `[info]` block.
pub fn starts_with_bot_markup(body: &str, bot_account_id: i64) -> bool {
    body.starts_with(&format!("[rp aid={bot_account_id}"))
        || body.starts_with("[To:")
        || body.starts_with("[info]")
}

/// True when the body contains a reply reference addressed to the account.
pub fn is_reply_to(body: &str, account_id: i64) -> bool {
    body.contains(&format!("[rp aid={account_id} "))
        || body.contains(&format!("[rp aid={account_id}]"))
}

/// Broadcast marker used to ping every room member.
pub fn contains_toall(body: &str) -> bool {
    body.contains("[toall]")
}
