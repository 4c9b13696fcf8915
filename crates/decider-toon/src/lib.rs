//! # decider-toon
//!
//! Deterministic encoder and decoder for **TOON**, the compact human-readable
//! text form decider uses for machine-readable output.
//!
//! TOON covers the JSON data model: `null`, booleans, integers, floats,
//! strings, sequences and maps. Identifier-like strings are written without
//! quotes, map keys are always emitted in byte-wise sorted order, and the
//! decoder makes a single pass over the input bytes with an explicit stack of
//! open containers.
//!
//! ## Quick start
//!
//! ```rust
//! use decider_toon::{decode, encode, Map, Value};
//!
//! let mut map = Map::new();
//! map.insert("zebra".to_string(), Value::from("z"));
//! map.insert("alpha".to_string(), Value::from("a"));
//! map.insert("count".to_string(), Value::from(3));
//! let value = Value::Map(map);
//!
//! let toon = encode(&value, None).unwrap();
//! assert_eq!(toon, "{alpha:a count:3 zebra:z}");
//!
//! assert_eq!(decode(&toon).unwrap(), value);
//! ```
//!
//! ## Modules
//!
//! - [`types`] — the `Value` tree both directions operate on
//! - [`encoder`] — `Value` → TOON text, compact or indented
//! - [`decoder`] — TOON text → `Value`
//! - [`json`] — conversions between `Value`, `serde_json::Value` and JSON text
//! - [`to_value`] / [`from_value`] — serde records to and from `Value`
//! - [`error`] — Error types for encode/decode failures

mod de;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod json;
mod ser;
pub mod types;

pub use de::{from_str, from_value};
pub use decoder::{decode, Decoder, MAX_DEPTH};
pub use encoder::{encode, to_writer, Indent};
pub use error::ToonError;
pub use json::{from_json, to_json};
pub use ser::to_value;
pub use types::{Map, Value};
