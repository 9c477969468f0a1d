//! Text cleanup for feed content
//!
//! Feed descriptions arrive as HTML fragments with entity-encoded
//! punctuation. Excerpts are stored as plain text, so tags are stripped
//! and entities decoded before truncation.

/// Named entities seen in the wild that are worth decoding explicitly.
/// Numeric (`&#8217;`) and hex (`&#x27;`) forms are handled generically.
const NAMED_ENTITIES: &[(&str, &str)] = &[
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&nbsp;", " "),
    ("&hellip;", "..."),
    ("&mdash;", "\u{2014}"),
    ("&ndash;", "\u{2013}"),
    ("&ldquo;", "\u{201C}"),
    ("&rdquo;", "\u{201D}"),
    ("&lsquo;", "\u{2018}"),
    ("&rsquo;", "\u{2019}"),
];

/// Maximum excerpt length in characters
pub const EXCERPT_MAX_CHARS: usize = 300;

/// Decode named, decimal, and hex HTML entities
pub fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let bytes = text.as_bytes();
    let mut i = 0;

    'outer: while i < bytes.len() {
        if bytes[i] == b'&' {
            if let Some(end) = text[i..].find(';').map(|off| i + off) {
                let entity = &text[i..=end];

                for &(name, replacement) in NAMED_ENTITIES {
                    if entity == name {
                        out.push_str(replacement);
                        i = end + 1;
                        continue 'outer;
                    }
                }

                if let Some(ch) = decode_numeric(entity) {
                    out.push(ch);
                    i = end + 1;
                    continue;
                }
            }
        }

        let ch = text[i..].chars().next().unwrap_or('\u{FFFD}');
        out.push(ch);
        i += ch.len_utf8();
    }

    out
}

/// Decode `&#NNNN;` or `&#xHHHH;` into a char
fn decode_numeric(entity: &str) -> Option<char> {
    let inner = entity.strip_prefix("&#")?.strip_suffix(';')?;

    let code = if let Some(hex) = inner.strip_prefix('x').or_else(|| inner.strip_prefix('X')) {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        inner.parse::<u32>().ok()?
    };

    char::from_u32(code)
}

/// Strip HTML tags, leaving only text content
pub fn strip_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;

    for ch in text.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }

    out
}

/// Truncate to at most `max` characters, respecting char boundaries
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// Produce a plain-text excerpt from raw feed HTML
pub fn clean_excerpt(raw: &str) -> String {
    truncate_chars(&decode_entities(&strip_tags(raw)), EXCERPT_MAX_CHARS)
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_named_entities() {
        assert_eq!(decode_entities("Tom &amp; Jerry"), "Tom & Jerry");
        assert_eq!(decode_entities("&lt;b&gt;"), "<b>");
        assert_eq!(decode_entities("wait&hellip;"), "wait...");
    }

    #[test]
    fn test_decode_numeric_entities() {
        assert_eq!(decode_entities("it&#8217;s"), "it\u{2019}s");
        assert_eq!(decode_entities("it&#x27;s"), "it's");
    }

    #[test]
    fn test_decode_leaves_unknown_entities() {
        assert_eq!(decode_entities("&unknown; &"), "&unknown; &");
    }

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("<p>Hello <b>world</b></p>"), "Hello world");
        assert_eq!(strip_tags("no tags"), "no tags");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        let s = "\u{00E9}".repeat(10);
        assert_eq!(truncate_chars(&s, 4).chars().count(), 4);
    }

    #[test]
    fn test_clean_excerpt() {
        let raw = "<p>Breaking: it&#8217;s <b>big</b> news</p>";
        assert_eq!(clean_excerpt(raw), "Breaking: it\u{2019}s big news");
    }

    #[test]
    fn test_clean_excerpt_truncates_to_300_chars() {
        let raw = "x".repeat(500);
        assert_eq!(clean_excerpt(&raw).chars().count(), EXCERPT_MAX_CHARS);
    }
}
