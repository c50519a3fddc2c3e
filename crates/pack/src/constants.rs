//! Top-level constants for polyraw-pack.

use std::fmt;

/// Wire encoding identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodingFormat {
    Json,
    Ubjson,
}

impl EncodingFormat {
    pub fn name(self) -> &'static str {
        match self {
            EncodingFormat::Json => "JSON",
            EncodingFormat::Ubjson => "UBJSON",
        }
    }
}

impl fmt::Display for EncodingFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
