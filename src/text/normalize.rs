// Tweet text normalization.
//
// Produces the lower-case, ASCII-alphanumeric token string that both the
// sentiment classifier and the word cloud consume.

use once_cell::sync::Lazy;
use regex_lite::Regex;

/// `@handle` mentions.
static MENTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"@\w+").expect("valid mention regex"));

/// `scheme://...` and bare `www.` links, up to the next whitespace.
static URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w+://\S+|www\.\S+").expect("valid url regex"));

/// Everything that isn't a lower-case letter, digit, space or tab.
static NON_ALNUM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^0-9a-z \t]").expect("valid non-alnum regex"));

/// The repost marker after lower-casing.
const REPOST_MARKER: &str = "rt";

/// Clean raw tweet text.
///
/// Lower-cases, strips mentions and links, replaces punctuation with spaces,
/// drops the "RT" marker and collapses whitespace. Idempotent:
/// `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(raw_text: &str) -> String {
    let lower = raw_text.to_lowercase();
    let without_mentions = MENTION.replace_all(&lower, " ");
    // Links go before punctuation, otherwise "http://x.co" would leave "http x co"
    let without_urls = URL.replace_all(&without_mentions, " ");
    let alnum_only = NON_ALNUM.replace_all(&without_urls, " ");

    alnum_only
        .split_whitespace()
        .filter(|token| *token != REPOST_MARKER)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_mentions() {
        assert_eq!(normalize("hello @alice world"), "hello world");
        assert_eq!(normalize("@bob_99 thanks!"), "thanks");
    }

    #[test]
    fn strips_urls_whole() {
        assert_eq!(
            normalize("$X is terrible http://x.co"),
            "x is terrible"
        );
        assert_eq!(
            normalize("read https://example.com/a?b=c now"),
            "read now"
        );
        assert_eq!(normalize("see www.example.org"), "see");
    }

    #[test]
    fn strips_repost_marker_only_as_token() {
        assert_eq!(normalize("RT @bot: meh"), "meh");
        assert_eq!(normalize("art start rt"), "art start");
    }

    #[test]
    fn lowercases_and_collapses_whitespace() {
        assert_eq!(normalize("  I   LOVE\t\tRust\n!! "), "i love rust");
    }

    #[test]
    fn punctuation_only_is_empty() {
        assert_eq!(normalize("!!! ... ???"), "");
        assert_eq!(normalize("https://t.co/abc"), "");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn non_ascii_letters_are_removed() {
        assert_eq!(normalize("café ☕ time"), "caf time");
    }

    #[test]
    fn idempotent_on_samples() {
        let samples = [
            "I love $X!!",
            "RT @bot: meh",
            "$X is terrible http://x.co",
            "Check www.site.com/RT-this ... rt RT Rt",
            "@a@b @c: r t",
            "tabs\tand\nnewlines",
            "",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }
}
