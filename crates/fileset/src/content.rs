//! Text and JSON content of a single-file set
//!
//! Reads need the set to resolve to exactly one path and return `Ok(None)`
//! otherwise, or when that path is not an existing file. Writes go to the
//! single resolved path or, for a set that resolves to nothing, to the
//! pattern taken literally; anything else is [`Error::TargetAmbiguity`].
//!
//! `alter` and `alter_json` are plain read-modify-write sequences without
//! file locking: another process writing between the read and the write
//! loses its update. [`FileSet::alter_checked`] detects that case.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::checksum::compute_content_checksum;
use crate::{Error, FileSet, LogLevel, NormalizedPath, Result, io, resolver};

impl FileSet {
    /// Raw bytes of the single resolved file.
    pub fn read_bytes(&self) -> Result<Option<Vec<u8>>> {
        match self.single() {
            Some(path) => io::read_bytes(path),
            None => Ok(None),
        }
    }

    /// UTF-8 text of the single resolved file.
    pub fn read(&self) -> Result<Option<String>> {
        let Some(path) = self.single() else {
            return Ok(None);
        };
        io::read_bytes(path)?
            .map(|bytes| decode_text(path, bytes))
            .transpose()
    }

    /// Overwrite (or create) the target file, creating parent folders first.
    pub fn write(&mut self, content: impl AsRef<[u8]>) -> Result<()> {
        let target = self.write_target()?;
        self.write_to(target, content.as_ref())
    }

    /// Replace the target's text with `handler(current)`.
    ///
    /// A missing file reads as an empty string.
    pub fn alter<F>(&mut self, handler: F) -> Result<()>
    where
        F: FnOnce(String) -> String,
    {
        let target = self.write_target()?;
        let current = match io::read_bytes(&target)? {
            Some(bytes) => decode_text(&target, bytes)?,
            None => String::new(),
        };
        let updated = handler(current);
        self.write_to(target, updated.as_bytes())
    }

    /// Like [`FileSet::alter`], but fails with [`Error::StaleContent`] when
    /// the current content no longer has checksum `expected`.
    ///
    /// `expected` comes from [`FileSet::content_checksum`]; a missing file
    /// has the checksum of empty content.
    pub fn alter_checked<F>(&mut self, expected: &str, handler: F) -> Result<()>
    where
        F: FnOnce(String) -> String,
    {
        let target = self.write_target()?;
        let bytes = io::read_bytes(&target)?.unwrap_or_default();
        let actual = compute_content_checksum(&bytes);
        if actual != expected {
            return Err(Error::StaleContent {
                path: target.to_native(),
                expected: expected.to_string(),
                actual,
            });
        }
        let updated = handler(decode_text(&target, bytes)?);
        self.write_to(target, updated.as_bytes())
    }

    /// `sha256:<hex>` checksum of the single resolved file's content.
    pub fn content_checksum(&self) -> Result<Option<String>> {
        Ok(self.read_bytes()?.map(compute_content_checksum))
    }

    /// Append to the target file, creating it if absent.
    ///
    /// With `new_line`, the context's line separator is written first when
    /// the file already has content.
    pub fn append(&mut self, content: impl AsRef<[u8]>, new_line: bool) -> Result<()> {
        let target = self.write_target()?;
        let has_content = std::fs::metadata(target.to_native()).is_ok_and(|m| m.len() > 0);

        let mut buffer = Vec::new();
        if new_line && has_content {
            buffer.extend_from_slice(self.context().line_ending().as_str().as_bytes());
        }
        buffer.extend_from_slice(content.as_ref());

        io::append(&target, &buffer)?;
        self.context()
            .log(LogLevel::Detail, format_args!("Appended {} bytes to {target}", buffer.len()));
        self.replace_paths(vec![target]);
        Ok(())
    }

    /// Decode the single resolved file as JSON.
    ///
    /// # Errors
    ///
    /// [`Error::ContentFormat`] if the file exists but is not valid JSON for `T`.
    pub fn read_json<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        let Some(path) = self.single() else {
            return Ok(None);
        };
        io::read_bytes(path)?
            .map(|bytes| serde_json::from_slice(&bytes).map_err(|e| Error::json(path.to_native(), e)))
            .transpose()
    }

    /// Write `value` as JSON, indented by `indent` spaces (`None` or `Some(0)`
    /// for the compact form).
    pub fn write_json<T>(&mut self, value: &T, indent: Option<usize>) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let target = self.write_target()?;
        let encoded = encode_json(value, indent).map_err(|e| Error::json(target.to_native(), e))?;
        self.write_to(target, &encoded)
    }

    /// Replace the target's JSON with `handler(current)`; `current` is
    /// `None` when the file does not exist.
    pub fn alter_json<T, F>(&mut self, handler: F, indent: Option<usize>) -> Result<()>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(Option<T>) -> T,
    {
        let target = self.write_target()?;
        let current = io::read_bytes(&target)?
            .map(|bytes| serde_json::from_slice(&bytes).map_err(|e| Error::json(target.to_native(), e)))
            .transpose()?;
        let updated = handler(current);
        let encoded =
            encode_json(&updated, indent).map_err(|e| Error::json(target.to_native(), e))?;
        self.write_to(target, &encoded)
    }

    fn write_target(&self) -> Result<NormalizedPath> {
        match self.paths() {
            [only] => Ok(only.clone()),
            [] if resolver::is_literal(self.pattern()) => Ok(NormalizedPath::new(self.pattern())),
            paths => Err(Error::TargetAmbiguity {
                pattern: self.pattern().to_string(),
                count: paths.len(),
            }),
        }
    }

    /// Write and make the set resolve to the written file.
    fn write_to(&mut self, target: NormalizedPath, content: &[u8]) -> Result<()> {
        io::write_atomic(&target, content)?;
        self.context()
            .log(LogLevel::Detail, format_args!("Wrote {} bytes to {target}", content.len()));
        self.replace_paths(vec![target]);
        Ok(())
    }
}

fn decode_text(path: &NormalizedPath, bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| Error::ContentFormat {
        path: path.to_native(),
        format: "UTF-8".into(),
        message: e.to_string(),
    })
}

fn encode_json<T>(value: &T, indent: Option<usize>) -> serde_json::Result<Vec<u8>>
where
    T: Serialize + ?Sized,
{
    match indent {
        None | Some(0) => serde_json::to_vec(value),
        Some(width) => {
            let indent = " ".repeat(width);
            let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
            let mut out = Vec::new();
            let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
            value.serialize(&mut serializer)?;
            Ok(out)
        }
    }
}
