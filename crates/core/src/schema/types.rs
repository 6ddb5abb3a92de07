//! Form template types consumed by the front-matter form renderer.

use serde::Serialize;
use serde_json::Value;

/// Widget used to edit a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Number,
    Boolean,
    File,
    Color,
    FieldGroup,
    FieldGroupList,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_format: Option<String>,
}

/// One front-matter key as shown in the form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name: String,
    pub label: String,
    pub description: String,
    pub hidden: bool,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<FieldConfig>,
    /// Child fields of `field_group` and `field_group_list`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<Field>>,
}

impl Field {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        let name = name.into();
        Self {
            label: name.clone(),
            name,
            description: String::new(),
            hidden: false,
            field_type,
            default: None,
            config: None,
            fields: None,
        }
    }
}

/// A set of fields and the pages it applies to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
    pub name: String,
    pub label: String,
    /// Data files have no markdown body to edit.
    pub hide_body: bool,
    pub fields: Vec<Field>,
    pub pages: Vec<String>,
}
