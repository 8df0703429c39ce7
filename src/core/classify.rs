//! Metadata classification
//!
//! Splits a call's metadata into the promoted error (if any) and the
//! remaining caller fields.

use super::metadata::{ErrorValue, FieldValue, Metadata, ERROR_KEY};

/// Result of classifying one call's metadata
#[derive(Debug, Clone, PartialEq)]
pub enum Classified {
    /// No metadata argument was given
    NoMetadata,
    /// Metadata without a recognized error
    Plain(Metadata),
    /// A recognized error under `error`, plus every other field
    WithError(ErrorValue, Metadata),
}

/// Classify an optional metadata bag
///
/// Only a [`FieldValue::Error`] under the `error` key is promoted. Any other
/// value under that key, including a JSON object with a `message` string,
/// stays an ordinary field.
pub fn classify(meta: Option<Metadata>) -> Classified {
    let Some(mut meta) = meta else {
        return Classified::NoMetadata;
    };

    match meta.remove(ERROR_KEY) {
        Some(FieldValue::Error(error)) => Classified::WithError(error, meta),
        Some(other) => {
            meta.add_field(ERROR_KEY, other);
            Classified::Plain(meta)
        }
        None => Classified::Plain(meta),
    }
}
