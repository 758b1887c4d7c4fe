use super::html::{link_line, DOCUMENT_HEADER};
use crate::error::Result;
use crate::models::HistoryRecord;

const HISTORY_OPEN: &str = "
<dl><dt><h3>History</h3>

<dl><p>";
const HISTORY_CLOSE: &str = "</dl></p>\n</dl>";

/// Controls which history records reach the document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Keep records whose title is empty, using the URL as the link text.
    /// Off by default: titleless entries are dropped, matching the
    /// long-standing output of this tool.
    pub include_untitled: bool,
}

/// Wrap pre-rendered `<dt>` lines in the history document template
pub fn wrap_history_items(items: &str) -> String {
    let mut doc = String::with_capacity(
        DOCUMENT_HEADER.len() + HISTORY_OPEN.len() + items.len() + HISTORY_CLOSE.len(),
    );
    doc.push_str(DOCUMENT_HEADER);
    doc.push_str(HISTORY_OPEN);
    doc.push_str(items);
    doc.push_str(HISTORY_CLOSE);
    doc
}

/// The `<dt>` line for a record, or `None` if `options` drop it
pub fn render_record(record: &HistoryRecord, options: RenderOptions) -> Option<String> {
    if record.has_title() {
        Some(link_line(&record.url, &record.title))
    } else if options.include_untitled {
        Some(link_line(&record.url, &record.url))
    } else {
        None
    }
}

/// Render records in input order into a complete bookmarks document
pub fn render_document<'a, I>(records: I, options: RenderOptions) -> String
where
    I: IntoIterator<Item = &'a HistoryRecord>,
{
    let items: String = records
        .into_iter()
        .filter_map(|record| render_record(record, options))
        .collect();
    wrap_history_items(&items)
}

/// Like [`render_document`] over a fallible record stream; returns the
/// document and the number of links it contains
pub fn try_render_document<I>(records: I, options: RenderOptions) -> Result<(String, usize)>
where
    I: IntoIterator<Item = Result<HistoryRecord>>,
{
    let mut items = String::new();
    let mut count = 0;
    for record in records {
        if let Some(line) = render_record(&record?, options) {
            items.push_str(&line);
            count += 1;
        }
    }
    Ok((wrap_history_items(&items), count))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExportError;

    const EMPTY_DOCUMENT: &str = "<!DOCTYPE NETSCAPE-Bookmark-file-1>

<meta http-equiv='Content-Type' content='text/html; charset=UTF-8' />
<title>Bookmarks</title>
<h1>Bookmarks</h1>

<dl><p>

<dl><dt><h3>History</h3>

<dl><p></dl></p>
</dl>";

    // The first link shares a line with the list opening tag
    fn dt_lines(doc: &str) -> Vec<&str> {
        doc.match_indices("<dt><a")
            .map(|(i, _)| {
                let rest = &doc[i..];
                &rest[..rest.find('\n').unwrap_or(rest.len())]
            })
            .collect()
    }

    #[test]
    fn test_empty_document_matches_template() {
        let doc = render_document(&[] as &[HistoryRecord], RenderOptions::default());
        assert_eq!(doc, EMPTY_DOCUMENT);
    }

    #[test]
    fn test_skips_untitled_records() {
        let records = vec![
            HistoryRecord::new("http://a", ""),
            HistoryRecord::new("http://b", "B"),
        ];
        let doc = render_document(&records, RenderOptions::default());
        assert_eq!(dt_lines(&doc), vec!["<dt><a href=\"http://b\">B</a>"]);
        assert!(!doc.contains("http://a"));
    }

    #[test]
    fn test_include_untitled_uses_url_as_text() {
        let records = vec![HistoryRecord::new("http://a?x=1&y=2", "")];
        let options = RenderOptions {
            include_untitled: true,
        };
        let doc = render_document(&records, options);
        assert_eq!(
            dt_lines(&doc),
            vec!["<dt><a href=\"http://a?x=1&amp;y=2\">http://a?x=1&amp;y=2</a>"]
        );
    }

    #[test]
    fn test_preserves_order() {
        let records = vec![HistoryRecord::new("u1", "A"), HistoryRecord::new("u2", "B")];
        let doc = render_document(&records, RenderOptions::default());
        assert_eq!(
            dt_lines(&doc),
            vec!["<dt><a href=\"u1\">A</a>", "<dt><a href=\"u2\">B</a>"]
        );
    }

    #[test]
    fn test_full_document_bytes() {
        let records = vec![HistoryRecord::new("http://x?a=1&b=2", "Café <3")];
        let doc = render_document(&records, RenderOptions::default());
        let expected = EMPTY_DOCUMENT.replace(
            "<dl><p></dl></p>",
            "<dl><p><dt><a href=\"http://x?a=1&amp;b=2\">Caf&#xe9; &lt;3</a>\n</dl></p>",
        );
        assert_eq!(doc, expected);
    }

    #[test]
    fn test_render_is_deterministic() {
        let records = vec![
            HistoryRecord::new("https://rust-lang.org/", "Rust"),
            HistoryRecord::new("https://crates.io/", "crates.io: Rust Package Registry"),
        ];
        let first = render_document(&records, RenderOptions::default());
        let second = render_document(&records, RenderOptions::default());
        assert_eq!(first, second);
    }

    #[test]
    fn test_try_render_counts_links() {
        let records = vec![
            Ok(HistoryRecord::new("http://a", "A")),
            Ok(HistoryRecord::new("http://b", "")),
            Ok(HistoryRecord::new("http://c", "C")),
        ];
        let (doc, count) = try_render_document(records, RenderOptions::default()).unwrap();
        assert_eq!(count, 2);
        assert_eq!(dt_lines(&doc).len(), 2);
    }

    #[test]
    fn test_try_render_propagates_errors() {
        let records = vec![
            Ok(HistoryRecord::new("http://a", "A")),
            Err(ExportError::Config("boom".to_string())),
        ];
        let result = try_render_document(records, RenderOptions::default());
        assert!(matches!(result, Err(ExportError::Config(_))));
    }
}
