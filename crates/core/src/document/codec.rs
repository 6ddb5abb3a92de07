use std::path::Path;

use tracing::debug;

use super::types::{Document, DocumentError, DocumentKind, LoadedDocument};
use crate::config::ResolvedConfig;
use crate::frontmatter::{self, DumpOptions, Frontmatter};
use crate::markdown_ast::{MarkdownCodec, RenderOptions};
use crate::nodes::Node;

/// Load/save boundary between files on disk and editable documents.
///
/// Holds the formatting choices applied when writing: list marker for the
/// body and key order for the front matter.
#[derive(Debug, Clone, Default)]
pub struct DocumentCodec {
    markdown: MarkdownCodec,
    frontmatter: DumpOptions,
}

impl DocumentCodec {
    pub fn new(render: RenderOptions, frontmatter: DumpOptions) -> Self {
        Self { markdown: MarkdownCodec::new(render), frontmatter }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(config.markdown.into(), (&config.frontmatter).into())
    }

    /// Split markdown text into front matter and body tree.
    ///
    /// A document without a `---` block gets an empty front matter.
    ///
    /// # Errors
    /// * `Frontmatter` - The YAML block is invalid or not a mapping
    pub fn split(&self, text: &str) -> Result<Document, DocumentError> {
        let parsed = frontmatter::parse(text)?;
        let front_matter = parsed.frontmatter.unwrap_or_default();
        let body = self.markdown.parse(&parsed.body);

        debug!(
            bytes = text.len(),
            keys = front_matter.fields.len(),
            blocks = body.len(),
            "split document"
        );
        Ok(Document { front_matter, body })
    }

    /// Render front matter and body back into one markdown text.
    pub fn merge(
        &self,
        front_matter: &Frontmatter,
        body: &[Node],
    ) -> Result<String, DocumentError> {
        let rendered = self.markdown.render(body)?;
        let text = frontmatter::attach(Some(front_matter), &rendered, &self.frontmatter)?;

        debug!(
            keys = front_matter.fields.len(),
            blocks = body.len(),
            bytes = text.len(),
            "merged document"
        );
        Ok(text)
    }

    pub fn merge_document(&self, doc: &Document) -> Result<String, DocumentError> {
        self.merge(&doc.front_matter, &doc.body)
    }

    /// Load `content` read from `path`, interpreting it by file extension.
    pub fn load(&self, path: &Path, content: &str) -> Result<LoadedDocument, DocumentError> {
        match DocumentKind::from_path(path)? {
            DocumentKind::Markdown => Ok(LoadedDocument::Markdown(self.split(content)?)),
            DocumentKind::Yaml => serde_yaml::from_str(content)
                .map(LoadedDocument::Data)
                .map_err(|e| DocumentError::Yaml(path.display().to_string(), e)),
            DocumentKind::Json => serde_json::from_str(content)
                .map(LoadedDocument::Data)
                .map_err(|e| DocumentError::Json(path.display().to_string(), e)),
        }
    }

    /// Produce the file text for `doc` when saved to `path`.
    ///
    /// # Errors
    /// * `KindMismatch` - Data saved to a markdown path, or a markdown document
    ///   saved to a data path
    pub fn save(&self, path: &Path, doc: &LoadedDocument) -> Result<String, DocumentError> {
        let kind = DocumentKind::from_path(path)?;
        let display = || path.display().to_string();

        match (kind, doc) {
            (DocumentKind::Markdown, LoadedDocument::Markdown(doc)) => self.merge_document(doc),
            (DocumentKind::Yaml, LoadedDocument::Data(value)) => {
                serde_yaml::to_string(value).map_err(|e| DocumentError::Yaml(display(), e))
            }
            (DocumentKind::Json, LoadedDocument::Data(value)) => {
                serde_json::to_string_pretty(value)
                    .map(|json| json + "\n")
                    .map_err(|e| DocumentError::Json(display(), e))
            }
            (_, doc) => {
                Err(DocumentError::KindMismatch { path: display(), found: doc.kind_name() })
            }
        }
    }
}

/// Split with default formatting options. See [`DocumentCodec::split`].
pub fn split(text: &str) -> Result<Document, DocumentError> {
    DocumentCodec::default().split(text)
}

/// Merge with default formatting options. See [`DocumentCodec::merge`].
pub fn merge(front_matter: &Frontmatter, body: &[Node]) -> Result<String, DocumentError> {
    DocumentCodec::default().merge(front_matter, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown_ast::ListMarker;
    use crate::nodes::{Element, ElementKind, Marks, NodePath};
    use serde_json::json;
    use std::path::PathBuf;

    const EXAMPLE: &str = "---\ntitle: Hello\n---\n# Welcome\n\nThis is **bold** and _italic_.\n";

    #[test]
    fn split_example_document() {
        let doc = split(EXAMPLE).unwrap();

        assert_eq!(doc.front_matter.get("title").and_then(|v| v.as_str()), Some("Hello"));
        assert_eq!(
            doc.to_json().unwrap()["body"],
            json!([
                {"type": "h1", "children": [{"text": "Welcome"}]},
                {"type": "p", "children": [
                    {"text": "This is "},
                    {"text": "bold", "bold": true},
                    {"text": " and "},
                    {"text": "italic", "italic": true},
                    {"text": "."}
                ]}
            ])
        );
    }

    #[test]
    fn empty_document() {
        let doc = split("").unwrap();
        assert!(doc.front_matter.is_empty());
        assert!(doc.body.is_empty());
        assert_eq!(merge(&Frontmatter::new(), &[]).unwrap(), "");
    }

    #[test]
    fn merge_attaches_front_matter() {
        let doc = split(EXAMPLE).unwrap();
        let text = merge(&doc.front_matter, &doc.body).unwrap();

        assert_eq!(text, "---\ntitle: Hello\n---\n\n# Welcome\n\nThis is **bold** and *italic*.\n");
    }

    #[test]
    fn invalid_yaml_fails_split() {
        let err = split("---\ntitle: [unclosed\n---\nbody\n").unwrap_err();
        assert!(matches!(err, DocumentError::Frontmatter(_)));
    }

    #[test]
    fn codec_uses_configured_style() {
        let mut config = ResolvedConfig::default();
        config.markdown.list_marker = ListMarker::Plus;
        config.frontmatter.sort_keys = true;
        let codec = DocumentCodec::from_config(&config);

        let doc = codec.split("---\nb: 1\na: 2\n---\n- x\n- y\n").unwrap();
        let text = codec.merge_document(&doc).unwrap();
        assert_eq!(text, "---\na: 2\nb: 1\n---\n\n+ x\n+ y\n");
    }

    #[test]
    fn from_json_prunes_unknown_nodes() {
        let value = json!({
            "frontMatter": {"title": "T"},
            "body": [
                {"type": "table", "children": []},
                {"type": "p", "children": [{"text": "kept"}]}
            ]
        });

        let doc = Document::from_json(&value).unwrap();
        assert_eq!(doc.body, vec![Node::from(Element::paragraph(vec![Node::text("kept")]))]);
        assert_eq!(doc.to_json().unwrap()["frontMatter"], json!({"title": "T"}));
    }

    #[test]
    fn from_json_rejects_non_objects() {
        assert!(matches!(Document::from_json(&json!([])), Err(DocumentError::NotAnObject(_))));
        assert!(matches!(
            Document::from_json(&json!({"frontMatter": [1, 2]})),
            Err(DocumentError::InvalidFrontMatter(_))
        ));
    }

    #[test]
    fn edits_leave_original_untouched() {
        let doc = split("# Title\n\nfirst\n").unwrap();
        let path = NodePath::from(vec![1, 0]);

        let edited = doc.with_replaced(&path, Node::styled("second", Marks::BOLD)).unwrap();
        assert_eq!(doc.node_at(&path).unwrap(), &Node::text("first"));
        assert_eq!(edited.node_at(&path).unwrap(), &Node::styled("second", Marks::BOLD));
        assert_eq!(merge(&edited.front_matter, &edited.body).unwrap(), "# Title\n\n**second**\n");

        let (shorter, removed) = edited.with_removed(&NodePath::from(vec![0])).unwrap();
        assert_eq!(shorter.body.len(), 1);
        assert!(matches!(removed, Node::Element(Element { kind: ElementKind::Heading(_), .. })));

        let end = Element::paragraph(vec![Node::text("end")]);
        let longer = doc.with_inserted(&NodePath::from(vec![2]), end.into()).unwrap();
        assert_eq!(longer.body.len(), 3);
        assert_eq!(doc.body.len(), 2);
    }

    #[test]
    fn load_by_extension() {
        let codec = DocumentCodec::default();

        let md = codec.load(&PathBuf::from("post.md"), "# Hi\n").unwrap();
        assert!(matches!(md, LoadedDocument::Markdown(_)));

        let yaml = codec.load(&PathBuf::from("data/menu.yml"), "- a\n- b\n").unwrap();
        assert_eq!(yaml, LoadedDocument::Data(serde_yaml::from_str("[a, b]").unwrap()));

        let json = codec.load(&PathBuf::from("site.JSON"), "{\"name\": \"x\"}").unwrap();
        assert_eq!(json.meta().get("name").and_then(|v| v.as_str()), Some("x"));

        let err = codec.load(&PathBuf::from("logo.png"), "").unwrap_err();
        assert!(matches!(err, DocumentError::UnhandledDocumentType(p) if p == "logo.png"));
    }

    #[test]
    fn save_by_extension() {
        let codec = DocumentCodec::default();
        let data = LoadedDocument::Data(serde_yaml::from_str("name: x\ncount: 2").unwrap());

        assert_eq!(codec.save(&PathBuf::from("a.yaml"), &data).unwrap(), "name: x\ncount: 2\n");
        assert_eq!(
            codec.save(&PathBuf::from("a.json"), &data).unwrap(),
            "{\n  \"name\": \"x\",\n  \"count\": 2\n}\n"
        );

        let err = codec.save(&PathBuf::from("a.md"), &data).unwrap_err();
        assert!(matches!(err, DocumentError::KindMismatch { found: "data", .. }));

        let doc = LoadedDocument::Markdown(Document::default());
        let err = codec.save(&PathBuf::from("a.json"), &doc).unwrap_err();
        assert!(matches!(err, DocumentError::KindMismatch { found: "markdown", .. }));
    }
}
