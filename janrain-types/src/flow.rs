//! Static flow documents and the asset parser.
//!
//! The CDN serves a flow as JavaScript, not JSON:
//!
//! ```text
//! janrain.capture.ui.handleCaptureResponse({"stat":"ok"},function () { janrain.capture.ui.render({...}); });
//! ```
//!
//! The status object precedes the render marker and the flow document is the
//! argument of the `render(` call. The format is undocumented, so the marker
//! strings and the trailer length below must stay exactly as they are.

use crate::lenient;
use crate::response::STAT_OK;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Text that opens the render callback wrapping the flow document.
pub const RENDER_MARKER: &str = "function () { janrain.capture.ui.render(";

/// Wrapper call around the status object.
pub const STATUS_WRAPPER: &str = "janrain.capture.ui.handleCaptureResponse(";

/// Characters closing the render call after the document.
pub const RENDER_TRAILER_LEN: usize = 6;

/// A decoded flow: forms, fields and translations keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowDocument {
    #[serde(default)]
    pub fields: BTreeMap<String, FieldDescriptor>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of a flow's `fields` map.
///
/// Forms list their member field names under `fields`; fields point back at
/// the forms using them under `forms`. Any other attribute (label,
/// validation, options...) is preserved in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub name: Option<String>,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub field_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forms: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FieldDescriptor {
    /// Member field names of a form, in declaration order.
    #[must_use]
    pub fn member_names(&self) -> Vec<&str> {
        self.fields
            .as_ref()
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

impl FlowDocument {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(name)
    }

    /// Resolves a form's member fields, in order.
    ///
    /// Each descriptor gets its `name` stamped and its `forms` back-reference
    /// removed. Returns `None` when the form is unknown or lists no fields.
    #[must_use]
    pub fn form_fields(&self, form_name: &str) -> Option<Vec<FieldDescriptor>> {
        let members = self.field(form_name)?.member_names();
        if members.is_empty() {
            return None;
        }

        let resolved = members
            .into_iter()
            .map(|name| {
                let mut descriptor = self.field(name).cloned().unwrap_or_default();
                descriptor.name = Some(name.to_string());
                descriptor.forms = None;
                descriptor
            })
            .collect();
        Some(resolved)
    }

    /// The value of a `"string"`-typed field, `null` when it has none.
    ///
    /// Existence is checked before the type, so an unknown name never reaches
    /// the type comparison.
    #[must_use]
    pub fn translation(&self, name: &str) -> Option<&Value> {
        static UNSET: Value = Value::Null;

        let field = self.field(name)?;
        if field.field_type.as_deref() != Some("string") {
            return None;
        }
        Some(field.value.as_ref().unwrap_or(&UNSET))
    }
}

/// Extracts the flow document from a raw CDN asset.
///
/// Returns `None` when the render marker is missing, when the status object
/// does not decode or is not `"ok"`, or when the document itself does not
/// decode. The document is never parsed for a rejected status.
#[must_use]
pub fn decode_flow_asset(raw: &str) -> Option<FlowDocument> {
    let marker_at = raw.find(RENDER_MARKER)?;

    let status = raw[..marker_at].replace(STATUS_WRAPPER, "");
    let status: Value = serde_json::from_str(drop_trailing_chars(&status, 1)).ok()?;
    if status.get("stat").and_then(Value::as_str) != Some(STAT_OK) {
        return None;
    }

    let document = raw[marker_at + RENDER_MARKER.len()..].trim();
    serde_json::from_str(drop_trailing_chars(document, RENDER_TRAILER_LEN)).ok()
}

/// Drops the last `n` characters, or everything when the text is shorter.
fn drop_trailing_chars(text: &str, n: usize) -> &str {
    if n == 0 {
        return text;
    }
    match text.char_indices().rev().nth(n - 1) {
        Some((at, _)) => &text[..at],
        None => "",
    }
}
