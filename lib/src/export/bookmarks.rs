use super::html::{link_line, sanitize_for_html, DOCUMENT_HEADER};
use crate::error::{ExportError, Result};
use serde::Deserialize;
use std::path::Path;

/// A node of Chrome's JSON `Bookmarks` file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BookmarkNode {
    Url {
        #[serde(default)]
        name: String,
        url: String,
    },
    Folder {
        #[serde(default)]
        name: String,
        #[serde(default)]
        children: Vec<BookmarkNode>,
    },
    /// Node types this exporter does not know about are skipped
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize)]
pub struct BookmarkFile {
    pub roots: BookmarkRoots,
}

#[derive(Debug, Deserialize)]
pub struct BookmarkRoots {
    pub bookmark_bar: BookmarkNode,
    pub other: BookmarkNode,
    #[serde(default)]
    pub synced: Option<BookmarkNode>,
}

impl BookmarkFile {
    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|source| ExportError::ReadFailed {
                path: path.to_path_buf(),
                source,
            })?;
        Self::parse(&contents)
    }

    /// Roots in output order: bookmark bar, other, then synced if present
    pub fn roots(&self) -> impl Iterator<Item = &BookmarkNode> {
        [Some(&self.roots.bookmark_bar), Some(&self.roots.other)]
            .into_iter()
            .chain(std::iter::once(self.roots.synced.as_ref()))
            .flatten()
    }
}

fn render_node(node: &BookmarkNode, out: &mut String, links: &mut usize) {
    match node {
        BookmarkNode::Url { name, url } => {
            out.push_str(&link_line(url, name));
            *links += 1;
        }
        BookmarkNode::Folder { name, children } => {
            out.push_str("<dt><h3>");
            out.push_str(&sanitize_for_html(name));
            out.push_str("</h3>\n<dl><p>\n");
            for child in children {
                render_node(child, out, links);
            }
            out.push_str("</dl><p>\n");
        }
        BookmarkNode::Unknown => {}
    }
}

/// Render the bookmark tree, keeping its folder structure; returns the
/// document and the number of links
pub fn render_bookmarks(file: &BookmarkFile) -> (String, usize) {
    let mut doc = String::from(DOCUMENT_HEADER);
    let mut links = 0;
    for root in file.roots() {
        render_node(root, &mut doc, &mut links);
    }
    doc.push_str("</dl><p>\n");
    (doc, links)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "checksum": "e68417696614de65818e666d48227636",
        "roots": {
            "bookmark_bar": {
                "children": [
                    {
                        "date_added": "13245678900000000",
                        "id": "1",
                        "name": "Google",
                        "type": "url",
                        "url": "https://www.google.com/"
                    },
                    {
                        "children": [
                            {
                                "id": "3",
                                "name": "Rust & Café",
                                "type": "url",
                                "url": "https://www.rust-lang.org/?a=1&b=2"
                            }
                        ],
                        "id": "2",
                        "name": "Dev",
                        "type": "folder"
                    }
                ],
                "id": "1",
                "name": "Bookmarks Bar",
                "type": "folder"
            },
            "other": {
                "children": [
                    { "id": "9", "name": "Mystery", "type": "separator" }
                ],
                "id": "2",
                "name": "Other Bookmarks",
                "type": "folder"
            }
        },
        "version": 1
    }"#;

    #[test]
    fn test_parse_tree() {
        let file = BookmarkFile::parse(SAMPLE).unwrap();
        assert!(file.roots.synced.is_none());
        match &file.roots.bookmark_bar {
            BookmarkNode::Folder { name, children } => {
                assert_eq!(name, "Bookmarks Bar");
                assert_eq!(children.len(), 2);
            }
            other => panic!("expected folder, got {:?}", other),
        }
        match &file.roots.other {
            BookmarkNode::Folder { children, .. } => {
                assert_eq!(children, &vec![BookmarkNode::Unknown]);
            }
            other => panic!("expected folder, got {:?}", other),
        }
    }

    #[test]
    fn test_render_keeps_folders() {
        let file = BookmarkFile::parse(SAMPLE).unwrap();
        let (doc, links) = render_bookmarks(&file);

        assert_eq!(links, 2);
        assert!(doc.starts_with(DOCUMENT_HEADER));
        assert!(doc.ends_with("</dl><p>\n</dl><p>\n"));

        let expected_body = "<dt><h3>Bookmarks Bar</h3>\n<dl><p>\n\
             <dt><a href=\"https://www.google.com/\">Google</a>\n\
             <dt><h3>Dev</h3>\n<dl><p>\n\
             <dt><a href=\"https://www.rust-lang.org/?a=1&amp;b=2\">Rust &amp; Caf&#xe9;</a>\n\
             </dl><p>\n\
             </dl><p>\n\
             <dt><h3>Other Bookmarks</h3>\n<dl><p>\n\
             </dl><p>\n";
        assert!(doc.contains(expected_body), "unexpected body:\n{}", doc);
    }

    #[test]
    fn test_synced_root_renders_last() {
        let json = r#"{"roots": {
            "bookmark_bar": {"type": "folder", "name": "Bar", "children": []},
            "other": {"type": "folder", "name": "Other", "children": []},
            "synced": {"type": "folder", "name": "Mobile", "children": [
                {"type": "url", "name": "Phone", "url": "https://m.example/"}
            ]}
        }}"#;
        let file = BookmarkFile::parse(json).unwrap();
        let (doc, links) = render_bookmarks(&file);
        assert_eq!(links, 1);
        let bar = doc.find("Bar").unwrap();
        let other = doc.find("Other").unwrap();
        let mobile = doc.find("Mobile").unwrap();
        assert!(bar < other && other < mobile);
    }

    #[test]
    fn test_malformed_json_is_error() {
        let result = BookmarkFile::parse("{\"roots\": ");
        assert!(matches!(result, Err(crate::error::ExportError::Json(_))));
    }
}
