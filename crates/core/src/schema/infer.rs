//! Template inference from existing front matter.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::json;
use serde_yaml::{Mapping, Value};

use super::types::{Field, FieldConfig, FieldType, Template};

/// Key under which a top-level sequence is edited.
pub const SEQUENCE_KEY: &str = "_";

const IMAGE_EXTENSIONS: &[&str] =
    &["png", "jpg", "jpeg", "gif", "webp", "svg", "avif", "bmp", "ico"];

static COLOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("valid regex"));

/// Build the fallback template for `path` from its current `meta`.
pub fn generate_template(path: &str, meta: &Value) -> Template {
    Template {
        name: SEQUENCE_KEY.to_string(),
        label: SEQUENCE_KEY.to_string(),
        hide_body: !path.ends_with(".md"),
        fields: generate_fields(&wrap_meta(meta.clone())),
        pages: vec![path.to_string()],
    }
}

/// Wrap a top-level sequence as `{_: [...]}` so it can be edited as a field.
pub fn wrap_meta(meta: Value) -> Value {
    match meta {
        Value::Sequence(_) => {
            let mut mapping = Mapping::new();
            mapping.insert(Value::String(SEQUENCE_KEY.to_string()), meta);
            Value::Mapping(mapping)
        }
        other => other,
    }
}

/// One field per key of `meta`, in key order. Non-mappings have no fields.
pub fn generate_fields(meta: &Value) -> Vec<Field> {
    match meta {
        Value::Mapping(mapping) => {
            mapping.iter().map(|(key, value)| infer_field(key_label(key), value)).collect()
        }
        Value::Tagged(tagged) => generate_fields(&tagged.value),
        _ => Vec::new(),
    }
}

fn infer_field(name: String, value: &Value) -> Field {
    match value {
        Value::Sequence(items) => {
            // Item fields come from the union of all mapping items
            let mut merged = Mapping::new();
            for item in items {
                if let Value::Mapping(fields) = item {
                    for (key, value) in fields {
                        merged.insert(key.clone(), value.clone());
                    }
                }
            }
            Field {
                config: Some(FieldConfig::default()),
                fields: Some(generate_fields(&Value::Mapping(merged))),
                ..Field::new(name, FieldType::FieldGroupList)
            }
        }
        Value::Mapping(_) => Field {
            fields: Some(generate_fields(value)),
            ..Field::new(name, FieldType::FieldGroup)
        },
        Value::Bool(_) => {
            Field { default: Some(json!(false)), ..Field::new(name, FieldType::Boolean) }
        }
        Value::Number(_) => Field {
            default: Some(json!(0)),
            config: Some(FieldConfig { required: Some(false), color_format: None }),
            ..Field::new(name, FieldType::Number)
        },
        Value::String(s) if is_image(s) => Field {
            default: Some(json!("")),
            config: Some(FieldConfig::default()),
            ..Field::new(name, FieldType::File)
        },
        Value::String(s) if COLOR_RE.is_match(s) => Field {
            default: Some(json!("")),
            config: Some(FieldConfig { required: Some(false), color_format: Some("RGB".into()) }),
            ..Field::new(name, FieldType::Color)
        },
        Value::Tagged(tagged) => infer_field(name, &tagged.value),
        Value::String(_) | Value::Null => text_field(name),
    }
}

fn text_field(name: String) -> Field {
    Field {
        default: Some(json!("")),
        config: Some(FieldConfig { required: Some(false), color_format: None }),
        ..Field::new(name, FieldType::Text)
    }
}

fn key_label(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => "null".to_string(),
        other => serde_yaml::to_string(other).unwrap_or_default().trim_end().to_string(),
    }
}

/// True when `path` has a common image file extension.
pub fn is_image(path: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn yaml(text: &str) -> Value {
        serde_yaml::from_str(text).unwrap()
    }

    #[rstest]
    #[case("images/cover.png", true)]
    #[case("/uploads/Photo.JPEG", true)]
    #[case("icon.svg", true)]
    #[case("notes.md", false)]
    #[case("png", false)]
    #[case("", false)]
    fn detects_images(#[case] path: &str, #[case] expected: bool) {
        assert_eq!(is_image(path), expected);
    }

    #[rstest]
    #[case("flag: true", FieldType::Boolean)]
    #[case("count: 3", FieldType::Number)]
    #[case("ratio: 0.5", FieldType::Number)]
    #[case("cover: /img/a.webp", FieldType::File)]
    #[case("accent: \"#ff00AA\"", FieldType::Color)]
    #[case("accent: \"#ff00\"", FieldType::Text)]
    #[case("title: Hello", FieldType::Text)]
    #[case("empty: ~", FieldType::Text)]
    #[case("author: {name: x}", FieldType::FieldGroup)]
    #[case("tags: [a, b]", FieldType::FieldGroupList)]
    fn infers_field_types(#[case] meta: &str, #[case] expected: FieldType) {
        let fields = generate_fields(&yaml(meta));
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].field_type, expected);
    }

    #[test]
    fn group_list_fields_are_the_union_of_items() {
        let meta = yaml("links:\n  - {label: a, url: x}\n  - {label: b, new: true}\n");
        let fields = generate_fields(&meta);
        let children = fields[0].fields.as_ref().unwrap();

        let names: Vec<_> = children.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["label", "url", "new"]);
        assert_eq!(children[2].field_type, FieldType::Boolean);
    }

    #[test]
    fn nested_groups_recurse() {
        let fields = generate_fields(&yaml("seo:\n  title: x\n  image: og.png\n"));
        let children = fields[0].fields.as_ref().unwrap();
        assert_eq!(children[0].field_type, FieldType::Text);
        assert_eq!(children[1].field_type, FieldType::File);
    }

    #[test]
    fn data_file_sequences_are_wrapped() {
        let template = generate_template("data/menu.yml", &yaml("- {name: Home, url: /}\n"));

        assert!(template.hide_body);
        assert_eq!(template.pages, ["data/menu.yml"]);
        assert_eq!(template.fields.len(), 1);
        assert_eq!(template.fields[0].name, SEQUENCE_KEY);
        assert_eq!(template.fields[0].field_type, FieldType::FieldGroupList);
    }

    #[test]
    fn template_json_shape() {
        let template = generate_template("post.md", &yaml("title: Hi\naccent: \"#00ff00\"\n"));

        insta::assert_snapshot!(serde_json::to_string_pretty(&template).unwrap(), @r###"
        {
          "name": "_",
          "label": "_",
          "hide_body": false,
          "fields": [
            {
              "name": "title",
              "label": "title",
              "description": "",
              "hidden": false,
              "type": "text",
              "default": "",
              "config": {
                "required": false
              }
            },
            {
              "name": "accent",
              "label": "accent",
              "description": "",
              "hidden": false,
              "type": "color",
              "default": "",
              "config": {
                "required": false,
                "color_format": "RGB"
              }
            }
          ],
          "pages": [
            "post.md"
          ]
        }
        "###);
    }
}
