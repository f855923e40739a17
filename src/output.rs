//! One-line JSON output.
//!
//! The backend that spawns the predictor parses whatever it prints, so the
//! layout mirrors the common `json.dumps` defaults: `", "` between members,
//! `": "` after keys, and everything outside ASCII written as `\uXXXX`.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};
use serde_json::ser::Formatter;

/// The line printed to stderr on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub error: String,
}

impl ErrorReport {
    pub fn new(error: impl ToString) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}

/// Spaced separators and ASCII-only strings.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpacedAsciiFormatter;

impl Formatter for SpacedAsciiFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        let mut rest = fragment;
        while let Some(pos) = rest.find(|c: char| !c.is_ascii()) {
            writer.write_all(rest[..pos].as_bytes())?;
            let c = rest[pos..].chars().next().unwrap_or_default();
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                write!(writer, "\\u{unit:04x}")?;
            }
            rest = &rest[pos + c.len_utf8()..];
        }
        writer.write_all(rest.as_bytes())
    }
}

/// Serialize `value` on a single line followed by a newline.
pub fn write_line<W, T>(mut writer: W, value: &T) -> io::Result<()>
where
    W: Write,
    T: ?Sized + Serialize,
{
    let mut ser = serde_json::Serializer::with_formatter(&mut writer, SpacedAsciiFormatter);
    value.serialize(&mut ser)?;
    writer.write_all(b"\n")?;
    writer.flush()
}

/// Same as [`write_line`] but into a `String`, without the trailing newline.
pub fn to_line<T>(value: &T) -> io::Result<String>
where
    T: ?Sized + Serialize,
{
    let mut buf = Vec::new();
    write_line(&mut buf, value)?;
    buf.pop();
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
