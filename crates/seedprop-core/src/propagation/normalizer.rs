use std::sync::OnceLock;

use regex::Regex;

fn url_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(^|\s)http\S*").expect("valid url regex"))
}

fn whitespace_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace regex"))
}

fn mention_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(^|\s)@\S*").expect("valid mention regex"))
}

fn retweet_marker() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^rt @\S+?:").expect("valid retweet regex"))
}

/// Canonicalize a raw message so retweets and quotes of the same text compare equal.
///
/// Lowercases, drops URL tokens, collapses whitespace, removes a leading
/// `rt @handle:` marker and then any remaining `@mention` tokens. The result is
/// trimmed and single-spaced, so normalizing it again is a no-op.
pub fn normalize(text: &str) -> String {
    let text = text.to_lowercase();
    let text = url_token().replace_all(&text, "$1");
    let text = whitespace_run().replace_all(text.trim(), " ");
    let text = retweet_marker().replace(&text, "");
    // The marker may be glued to a URL, so URLs are stripped again with the mentions
    let text = url_token().replace_all(&text, "$1");
    let text = mention_token().replace_all(&text, "$1");

    // Removing tokens can leave doubled spaces behind
    whitespace_run().replace_all(text.trim(), " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retweet_scenario() {
        assert_eq!(normalize("RT @bob: check this http://x.co @carol"), "check this");
    }

    #[test]
    fn test_case_and_whitespace() {
        assert_eq!(normalize("  Hello   World \t again "), "hello world again");
    }

    #[test]
    fn test_strips_urls_and_mentions_mid_text() {
        assert_eq!(
            normalize("see https://t.co/abc and @dave now"),
            "see and now"
        );
        assert_eq!(normalize("HTTPS://EXAMPLE.COM"), "");
    }

    #[test]
    fn test_marker_only_at_start() {
        assert_eq!(normalize("so rt @bob: this"), "so rt this");
        assert_eq!(normalize("rt @bob:"), "");
        assert_eq!(normalize("http://x.co RT @bob: hi"), "hi");
    }

    #[test]
    fn test_marker_needs_a_handle() {
        // Without a handle the `@:` is a plain mention token and `rt` stays
        assert_eq!(normalize("rt @: hi"), "rt hi");
        assert_eq!(normalize("RT @b: hi"), "hi");
    }

    #[test]
    fn test_keeps_embedded_at_and_http() {
        // Only tokens that begin with the pattern are removed
        assert_eq!(normalize("mail a@b.com"), "mail a@b.com");
        assert_eq!(normalize("no-http here"), "no-http here");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "RT @bob: check this http://x.co @carol",
            "a @b  c",
            "RT @a: RT @b: hello",
            "Buy now!!  http://spam.example",
            "@only @mentions",
            "plain text",
            "rt @a:http://x.co",
        ];

        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", sample);
        }
    }
}
