//! Text encoding of source files
//!
//! One charset applies to every file read in a run. Byte-order marks are
//! rejected before decoding, by their literal leading bytes, whatever the
//! configured charset is.

use std::fmt;
use std::path::Path;

use encoding_rs::{Encoding, UTF_8};
use log::warn;

use crate::error::{Error, Result};

/// Unicode byte-order marks recognised at the start of a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrderMark {
    Utf8,
    Utf16Be,
    Utf16Le,
}

impl ByteOrderMark {
    /// Detect a byte-order mark at the start of `data`
    pub fn detect(data: &[u8]) -> Option<Self> {
        if data.starts_with(&[0xEF, 0xBB, 0xBF]) {
            Some(ByteOrderMark::Utf8)
        } else if data.starts_with(&[0xFE, 0xFF]) {
            Some(ByteOrderMark::Utf16Be)
        } else if data.starts_with(&[0xFF, 0xFE]) {
            Some(ByteOrderMark::Utf16Le)
        } else {
            None
        }
    }
}

/// Fail with `EncodingMarkerDetected` if `data` starts with a byte-order mark
pub fn reject_byte_order_mark(data: &[u8], path: &Path) -> Result<()> {
    match ByteOrderMark::detect(data) {
        Some(marker) => Err(Error::EncodingMarkerDetected {
            marker,
            path: path.to_path_buf(),
        }),
        None => Ok(()),
    }
}

impl fmt::Display for ByteOrderMark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ByteOrderMark::Utf8 => "UTF8",
            ByteOrderMark::Utf16Be => "UTF16BE",
            ByteOrderMark::Utf16Le => "UTF16LE",
        };
        f.write_str(name)
    }
}

/// The charset used to decode sources and encode the combined output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEncoding {
    encoding: &'static Encoding,
}

impl TextEncoding {
    /// Look up a charset by its WHATWG label (`utf-8`, `gbk`, `latin1`, ...).
    ///
    /// Unknown labels fall back to UTF-8 with a warning. Charsets that cannot
    /// be written back out (the UTF-16 family and `replacement`) are rejected.
    pub fn from_label(label: &str) -> Result<Self> {
        let encoding = match Encoding::for_label(label.trim().as_bytes()) {
            Some(encoding) => encoding,
            None => {
                warn!("Unsupported charset '{}', using default charset UTF-8", label);
                UTF_8
            }
        };

        if encoding.output_encoding() != encoding {
            return Err(Error::Configuration {
                message: format!(
                    "Charset '{}' cannot be used to write combined output",
                    encoding.name()
                ),
            });
        }

        Ok(Self { encoding })
    }

    /// Canonical name of the charset
    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }

    /// Decode strictly: malformed byte sequences are an error rather than
    /// being replaced.
    pub fn decode(&self, data: &[u8], path: &Path) -> Result<String> {
        self.encoding
            .decode_without_bom_handling_and_without_replacement(data)
            .map(|text| text.into_owned())
            .ok_or_else(|| Error::DecodeFailure {
                path: path.to_path_buf(),
                encoding: self.name().to_string(),
            })
    }

    /// Encode text in this charset.
    ///
    /// Characters the charset cannot represent are an error naming `path`,
    /// never numeric character references. Some decoders accept more than
    /// their encoder writes (`gbk` reads four-byte GB18030 sequences).
    pub fn encode(&self, text: &str, path: &Path) -> Result<Vec<u8>> {
        let (bytes, _, had_errors) = self.encoding.encode(text);
        if had_errors {
            return Err(Error::DecodeFailure {
                path: path.to_path_buf(),
                encoding: self.name().to_string(),
            });
        }
        Ok(bytes.into_owned())
    }
}

impl Default for TextEncoding {
    fn default() -> Self {
        Self { encoding: UTF_8 }
    }
}
