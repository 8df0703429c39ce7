//! Payload shaping
//!
//! Turns a [`Classified`] metadata bag into the object handed to a sink.
//!
//! | Classification       | Structured                  | Human                 |
//! |----------------------|-----------------------------|-----------------------|
//! | NoMetadata           | `{}`                        | `{}`                  |
//! | Plain(fields)        | `{ meta: fields }`          | `fields`              |
//! | WithError(err, rest) | `{ error: err, meta: rest }`| `{ ...rest, error: err }` |
//!
//! `error` is always promoted to the top level. In structured mode `meta` is
//! present whenever a metadata argument was passed, even if it ends up empty.

use super::classify::Classified;
use super::metadata::ERROR_KEY;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key that nests caller metadata in structured mode
pub const META_KEY: &str = "meta";

/// The object a sink receives alongside the message
pub type Payload = Map<String, Value>;

/// Payload shape policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Schema-stable output; caller fields nested under `meta`
    #[default]
    Structured,
    /// Flattened output for inline display
    Human,
}

impl OutputMode {
    pub fn from_pretty(pretty: bool) -> Self {
        if pretty {
            OutputMode::Human
        } else {
            OutputMode::Structured
        }
    }

    pub fn is_human(&self) -> bool {
        matches!(self, OutputMode::Human)
    }
}

/// Build the payload for a classified bag
pub fn shape(classified: Classified, mode: OutputMode) -> Payload {
    let mut payload = Payload::new();

    match (classified, mode) {
        (Classified::NoMetadata, _) => {}
        (Classified::Plain(fields), OutputMode::Structured) => {
            payload.insert(META_KEY.to_string(), Value::Object(fields.to_json_map()));
        }
        (Classified::Plain(fields), OutputMode::Human) => {
            payload = fields.to_json_map();
        }
        (Classified::WithError(error, rest), OutputMode::Structured) => {
            payload.insert(ERROR_KEY.to_string(), error.to_json_value());
            payload.insert(META_KEY.to_string(), Value::Object(rest.to_json_map()));
        }
        (Classified::WithError(error, rest), OutputMode::Human) => {
            payload = rest.to_json_map();
            payload.insert(ERROR_KEY.to_string(), error.to_json_value());
        }
    }

    payload
}
