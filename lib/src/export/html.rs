use std::fmt::Write;

/// Characters replaced by [`escape_html`], with their entities
const HTML_ESCAPES: [(char, &str); 5] = [
    ('&', "&amp;"),
    ('"', "&quot;"),
    ('\'', "&#39;"),
    ('>', "&gt;"),
    ('<', "&lt;"),
];

/// Shared preamble of every Netscape bookmark file this crate writes
pub(crate) const DOCUMENT_HEADER: &str = "<!DOCTYPE NETSCAPE-Bookmark-file-1>

<meta http-equiv='Content-Type' content='text/html; charset=UTF-8' />
<title>Bookmarks</title>
<h1>Bookmarks</h1>

<dl><p>
";

fn entity_for(c: char) -> Option<&'static str> {
    HTML_ESCAPES
        .iter()
        .find(|(from, _)| *from == c)
        .map(|(_, entity)| *entity)
}

/// Replace `& " ' > <` with named entities; everything else is untouched
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match entity_for(c) {
            Some(entity) => out.push_str(entity),
            None => out.push(c),
        }
    }
    out
}

/// [`escape_html`], then every code point above 127 as `&#x{hex};`
///
/// The result is pure ASCII. Applying it twice is not a no-op: the `&` of
/// each generated entity gets escaped again on the second pass.
pub fn sanitize_for_html(text: &str) -> String {
    let escaped = escape_html(text);
    let mut out = String::with_capacity(escaped.len());
    for c in escaped.chars() {
        if u32::from(c) > 127 {
            // Writing to a String cannot fail
            let _ = write!(out, "&#x{:x};", u32::from(c));
        } else {
            out.push(c);
        }
    }
    out
}

/// One `<dt><a ...>` line, newline-terminated
pub(crate) fn link_line(url: &str, text: &str) -> String {
    format!(
        "<dt><a href=\"{}\">{}</a>\n",
        sanitize_for_html(url),
        sanitize_for_html(text)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "")]
    #[case("plain text", "plain text")]
    #[case("a & b", "a &amp; b")]
    #[case("\"quoted\"", "&quot;quoted&quot;")]
    #[case("it's", "it&#39;s")]
    #[case("<b>", "&lt;b&gt;")]
    #[case("Café", "Café")]
    fn test_escape_html(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape_html(input), expected);
    }

    #[rstest]
    #[case("Café", "Caf&#xe9;")]
    #[case("Café <3", "Caf&#xe9; &lt;3")]
    #[case("日本", "&#x65e5;&#x672c;")]
    #[case("😀", "&#x1f600;")]
    #[case("\u{80}", "&#x80;")]
    #[case("\u{7f}", "\u{7f}")]
    #[case("http://x?a=1&b=2", "http://x?a=1&amp;b=2")]
    fn test_sanitize_for_html(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize_for_html(input), expected);
    }

    #[test]
    fn test_sanitize_output_is_safe_ascii() {
        let input = "<script>alert('x & \"y\"')</script> naïve façade ✓ 🦀";
        let out = sanitize_for_html(input);

        assert!(out.is_ascii());
        for (i, c) in out.char_indices() {
            match c {
                '"' | '\'' | '<' | '>' => panic!("raw {:?} at {} in {}", c, i, out),
                '&' => {
                    let rest = &out[i..];
                    let end = rest.find(';').expect("entity terminated");
                    let entity = &rest[..=end];
                    assert!(
                        entity.starts_with("&#x")
                            || ["&amp;", "&quot;", "&#39;", "&gt;", "&lt;"].contains(&entity),
                        "unexpected entity {}",
                        entity
                    );
                }
                _ => {}
            }
        }
    }

    #[test]
    fn test_sanitize_twice_reescapes_ampersands() {
        let once = sanitize_for_html("é & ü");
        let twice = sanitize_for_html(&once);
        assert_eq!(once, "&#xe9; &amp; &#xfc;");
        assert_eq!(twice, "&amp;#xe9; &amp;amp; &amp;#xfc;");
    }

    #[test]
    fn test_link_line() {
        assert_eq!(
            link_line("http://x?a=1&b=2", "Café <3"),
            "<dt><a href=\"http://x?a=1&amp;b=2\">Caf&#xe9; &lt;3</a>\n"
        );
    }
}
