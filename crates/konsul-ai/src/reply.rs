//! Normalisation of the reply shapes providers actually return.
//!
//! A completion arrives as plain text, as a list of content parts, or as
//! something else entirely (safety blocks, tool-call stubs). Everything is
//! mapped through [`RawReply::from_value`] exactly once; call sites never
//! probe JSON shapes themselves. Normalisation always produces a string.

use serde_json::Value;

/// One element of a multi-part completion.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyPart {
    /// Bare string part.
    Plain(String),
    /// Object part carrying a `text` field, e.g. `{"type": "text", "text": "..."}`.
    Labeled { text: String },
    /// Any other part (inline images, function calls). Contributes no text.
    Opaque(Value),
}

impl ReplyPart {
    fn from_value(value: Value) -> Self {
        if let Value::String(s) = value {
            return ReplyPart::Plain(s);
        }
        if let Some(text) = value.get("text").and_then(Value::as_str) {
            return ReplyPart::Labeled {
                text: text.to_string(),
            };
        }
        ReplyPart::Opaque(value)
    }

    fn into_text(self) -> String {
        match self {
            ReplyPart::Plain(s) => s,
            ReplyPart::Labeled { text } => text,
            ReplyPart::Opaque(_) => String::new(),
        }
    }
}

/// A completion as the provider returned it, before normalisation.
#[derive(Debug, Clone, PartialEq)]
pub enum RawReply {
    Text(String),
    Parts(Vec<ReplyPart>),
    /// Neither a string nor a part list; rendered generically.
    Other(Value),
}

impl RawReply {
    /// Map any wire JSON into a reply. This is the only place reply shapes
    /// are inspected.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(text) => RawReply::Text(text),
            Value::Array(items) => {
                RawReply::Parts(items.into_iter().map(ReplyPart::from_value).collect())
            }
            other => RawReply::Other(other),
        }
    }

    /// Collapse to the canonical answer string. Infallible: parts concatenate
    /// in order with no separator, unknown shapes render as JSON.
    pub fn normalize(self) -> String {
        match self {
            RawReply::Text(text) => text,
            RawReply::Parts(parts) => parts.into_iter().map(ReplyPart::into_text).collect(),
            RawReply::Other(value) => value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_text_passes_through_unchanged() {
        let reply = RawReply::from_value(json!("Berdasarkan PMK-190, pembayaran APBN..."));
        assert_eq!(reply.normalize(), "Berdasarkan PMK-190, pembayaran APBN...");
    }

    #[test]
    fn normalize_is_idempotent_on_text() {
        let once = RawReply::from_value(json!("jawaban")).normalize();
        let twice = RawReply::from_value(json!(once.clone())).normalize();
        assert_eq!(once, twice);
    }

    #[test]
    fn mixed_parts_concatenate_without_separator() {
        let reply = RawReply::from_value(json!([{ "text": "a" }, "b", { "text": "c" }]));
        assert_eq!(reply.normalize(), "abc");
    }

    #[test]
    fn labeled_parts_keep_order() {
        let reply = RawReply::from_value(json!([
            { "type": "text", "text": "Pasal 1 " },
            { "type": "text", "text": "mengatur pembayaran." },
        ]));
        assert_eq!(reply.normalize(), "Pasal 1 mengatur pembayaran.");
    }

    #[test]
    fn textless_parts_contribute_nothing() {
        let reply = RawReply::from_value(json!([
            { "text": "hasil" },
            { "type": "image", "url": "https://example.com/x.png" },
            42,
        ]));
        assert_eq!(reply.normalize(), "hasil");
    }

    #[test]
    fn empty_part_list_normalizes_to_empty() {
        assert_eq!(RawReply::from_value(json!([])).normalize(), "");
    }

    #[test]
    fn unknown_shape_renders_generically() {
        let reply = RawReply::from_value(json!({ "blocked": true }));
        assert!(matches!(reply, RawReply::Other(_)));
        assert_eq!(reply.normalize(), r#"{"blocked":true}"#);
    }

    #[test]
    fn object_with_non_string_text_is_opaque() {
        // {"text": 3} is not a labeled text part.
        let reply = RawReply::from_value(json!([{ "text": 3 }]));
        assert_eq!(reply.normalize(), "");
    }
}
