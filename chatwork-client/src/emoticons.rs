//! The fixed Chatwork emoticon catalog and emoji counting used for spam
//! scoring. Counts are substring occurrences of the catalog codes plus
//! Unicode emoji characters.

/// Chatwork's built-in emoticon codes.
pub const EMOTICONS: &[&str] = &[
    ":)", ":(", ":D", "8-)", ":o", ";)", "(sweat)", ":|", ":*", ":p", "(blush)", ":^)", "|-)",
    "(inlove)", ":]", "(talk)", "(yawn)", "(puke)", "(emo)", "8-|", ":#", "(nod)", "(shake)",
    "(^^;)", "(whew)", "(clap)", "(bow)", "(roger)", "(flex)", "(dance)", ":/", "(gogo)",
    "(think)", "(please)", "(quick)", "(anger)", "(devil)", "(lightbulb)", "(*)", "(h)", "(F)",
    "(cracker)", "(eat)", "(^)", "(coffee)", "(beer)", "(handshake)", "(y)",
];

/// Counts catalog emoticons and Unicode emoji in the body.
pub fn count_emojis(body: &str) -> usize {
    let catalog: usize = EMOTICONS
        .iter()
        .map(|code| body.matches(code).count())
        .sum();
    let unicode = body.chars().filter(|c| is_unicode_emoji(*c)).count();
    catalog + unicode
}

/// Copyright/registered signs, the misc-symbol and dingbat blocks, and the
/// astral emoji planes. Deliberately narrower than "all symbols" so CJK
/// punctuation in ordinary prose is never scored.
fn is_unicode_emoji(c: char) -> bool {
    matches!(c, '\u{00a9}' | '\u{00ae}')
        || ('\u{2600}'..='\u{27bf}').contains(&c)
        || ('\u{2b00}'..='\u{2bff}').contains(&c)
        || ('\u{1f000}'..='\u{1faff}').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_catalog_emoticons() {
        assert_eq!(count_emojis("(bow)(bow)(devil)"), 3);
        assert_eq!(count_emojis("おはようございます"), 0);
    }

    #[test]
    fn counts_repeated_single_code() {
        let body = "(clap)".repeat(15);
        assert_eq!(count_emojis(&body), 15);
    }

    #[test]
    fn counts_unicode_emoji() {
        assert_eq!(count_emojis("🎉🎉🔥"), 3);
        assert_eq!(count_emojis("✨です"), 1);
    }

    #[test]
    fn plain_ascii_punctuation_is_not_counted() {
        assert_eq!(count_emojis("1 + 2 = 3 (maybe)"), 0);
    }

    #[test]
    fn mixed_catalog_and_unicode() {
        assert_eq!(count_emojis("(beer)🍺(beer)"), 3);
    }
}
