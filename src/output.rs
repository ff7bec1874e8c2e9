//! JSON output formatting and file path generation

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::{Number, Value};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for output operations
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OutputError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Largest magnitude below which every integer is exact in an `f64` (2^53).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Serialize `value` to a JSON tree with integral floats written as integers.
///
/// The model types hold every number as `f64`, so a plain `serde_json`
/// round trip turns `5` into `5.0`. Emitter configs are read by JavaScript,
/// where the two are the same number and `5` is the canonical spelling.
pub fn to_wire_value<T: Serialize + ?Sized>(value: &T) -> Result<Value, serde_json::Error> {
    let mut value = serde_json::to_value(value)?;
    integral_numbers(&mut value);
    Ok(value)
}

/// Rewrite integral floats in `value` as integers, recursively.
///
/// Values with a fractional part, and those too large to be exact, are left
/// alone. `-0.0` becomes `0`.
pub fn integral_numbers(value: &mut Value) {
    match value {
        Value::Number(n) if n.is_f64() => {
            if let Some(int) = n.as_f64().and_then(as_integer) {
                *n = int;
            }
        }
        Value::Array(items) => items.iter_mut().for_each(integral_numbers),
        Value::Object(map) => map.values_mut().for_each(integral_numbers),
        _ => {}
    }
}

fn as_integer(f: f64) -> Option<Number> {
    if f.fract() != 0.0 || f.abs() >= MAX_SAFE_INTEGER {
        return None;
    }
    if f >= 0.0 {
        Some(Number::from(f as u64))
    } else {
        Some(Number::from(f as i64))
    }
}

/// Serialize `value` as JSON with `indent` spaces per level.
///
/// An indent of 0 produces compact single-line JSON. Pretty output ends
/// without a trailing newline, like `serde_json::to_string_pretty`.
/// Integral numbers are written without a fractional part (see
/// [`to_wire_value`]).
///
/// # Examples
///
/// ```
/// use particle_upgrade::output::to_json_string;
///
/// let value = serde_json::json!({"a": [1.0, 0.5]});
/// assert_eq!(to_json_string(&value, 0).unwrap(), r#"{"a":[1,0.5]}"#);
/// assert_eq!(to_json_string(&value, 2).unwrap(), "{\n  \"a\": [\n    1,\n    0.5\n  ]\n}");
/// ```
pub fn to_json_string<T: Serialize + ?Sized>(value: &T, indent: usize) -> Result<String, OutputError> {
    let value = to_wire_value(value)?;
    if indent == 0 {
        return Ok(serde_json::to_string(&value)?);
    }

    let spaces = " ".repeat(indent);
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(spaces.as_bytes()));
    value.serialize(&mut ser)?;

    // serde_json only writes valid UTF-8
    String::from_utf8(buf).map_err(|e| OutputError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

/// Write JSON text to a file, followed by a newline.
///
/// Parent directories are created if they don't exist.
pub fn save_json(content: &str, path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(path, format!("{}\n", content))?;
    Ok(())
}

/// Generate the output path for a converted document.
///
/// | Scenario | Output |
/// |----------|--------|
/// | No `--out-dir` | `{input_dir}/{stem}.v3.json` |
/// | With `--out-dir dir` | `dir/{stem}.json` |
///
/// The default keeps the `.v3` infix so the source document is never
/// overwritten in place.
pub fn generate_output_path(input: &Path, out_dir: Option<&Path>) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("output");

    match out_dir {
        Some(dir) => dir.join(format!("{}.json", stem)),
        None => {
            let parent = input.parent().unwrap_or(Path::new(""));
            let name = format!("{}.v3.json", stem);
            if parent.as_os_str().is_empty() {
                PathBuf::from(name)
            } else {
                parent.join(name)
            }
        }
    }
}
