//! Value codec collaborator.
//!
//! Values travel between the host and the SurrealQL implementation in a binary
//! encoding. The codec is opaque here; [`format_value`] and [`parse_value`]
//! only sequence its steps.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::errors::Result;

/// Text rendering of a decoded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueFormat {
    /// JSON text
    Json,
    /// SurrealQL literal text
    SurrealQl,
}

/// External binary value codec.
pub trait ValueCodec: Send + Sync {
    /// Encode a host value into the binary form.
    fn encode(&self, value: &Value) -> Result<Vec<u8>>;

    /// Decode the binary form back into a host value.
    fn decode(&self, bytes: &[u8]) -> Result<Value>;

    /// Render an encoded value as text.
    fn render(&self, bytes: &[u8], format: ValueFormat, pretty: bool) -> Result<String>;

    /// Parse SurrealQL literal text into the binary form.
    fn parse_literal(&self, text: &str) -> Result<Vec<u8>>;
}

/// Render a host value as JSON or SurrealQL text.
pub fn format_value<C>(
    codec: &C,
    value: &Value,
    format: ValueFormat,
    pretty: bool,
) -> Result<String>
where
    C: ValueCodec + ?Sized,
{
    let binary = codec.encode(value)?;
    codec.render(&binary, format, pretty)
}

/// Parse SurrealQL literal text back into a host value.
pub fn parse_value<C>(codec: &C, text: &str) -> Result<Value>
where
    C: ValueCodec + ?Sized,
{
    let binary = codec.parse_literal(text)?;
    codec.decode(&binary)
}
