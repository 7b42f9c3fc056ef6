/// Compiled shader blob
///
/// Wire layout (little-endian, no padding), consumed by the runtime loader:
///
/// ```text
/// u16  uniform count
/// per uniform:
///   u8   name length
///   [u8] name bytes (no NUL)
///   u8   type
///   u8   array element count
///   u16  first register
///   u16  register count
///   u8   texture component
///   u8   texture dimension
///   u8   texture format
/// u32  source length
/// [u8] source bytes
/// u8   NUL
/// ```
///
/// Any change to field order or width is a breaking format change.

use std::io::Write;
use crate::error::{Error, Result};
use crate::uniform::{Uniform, UniformTable, UniformType};

/// Uniform table plus final source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledBlob {
    pub uniforms: UniformTable,
    pub source: String,
}

impl CompiledBlob {
    pub fn new(uniforms: UniformTable, source: String) -> Self {
        Self { uniforms, source }
    }

    /// Encode the blob
    ///
    /// # Errors
    ///
    /// `SerializationWriteFailure` if a field does not fit its wire width
    /// (more than 65535 uniforms, a name longer than 255 bytes, or a source
    /// longer than 4 GiB).
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let count = u16::try_from(self.uniforms.len()).map_err(|_| {
            write_failure(format!("{} uniforms exceed the blob limit", self.uniforms.len()))
        })?;
        let source_len = u32::try_from(self.source.len()).map_err(|_| {
            write_failure(format!("source of {} bytes exceeds the blob limit", self.source.len()))
        })?;

        let mut bytes = Vec::with_capacity(2 + self.uniforms.len() * 16 + self.source.len() + 5);
        bytes.extend_from_slice(&count.to_le_bytes());

        for uniform in &self.uniforms {
            let name_len = u8::try_from(uniform.name.len()).map_err(|_| {
                write_failure(format!("uniform name '{}' is longer than 255 bytes", uniform.name))
            })?;

            bytes.push(name_len);
            bytes.extend_from_slice(uniform.name.as_bytes());
            bytes.push(uniform.kind.as_u8());
            bytes.push(uniform.num);
            bytes.extend_from_slice(&uniform.reg_index.to_le_bytes());
            bytes.extend_from_slice(&uniform.reg_count.to_le_bytes());
            bytes.push(uniform.tex_component);
            bytes.push(uniform.tex_dimension);
            bytes.push(uniform.tex_format);

            crate::shaderc_trace!("galaxy3d::shaderc::Blob",
                "{}, {}, {}, {}, {}",
                uniform.name, uniform.kind, uniform.num, uniform.reg_index, uniform.reg_count);
        }

        bytes.extend_from_slice(&source_len.to_le_bytes());
        bytes.extend_from_slice(self.source.as_bytes());
        bytes.push(0);

        Ok(bytes)
    }

    /// Encode the blob and write it in one piece
    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        let bytes = self.to_bytes()?;
        writer
            .write_all(&bytes)
            .and_then(|_| writer.flush())
            .map_err(|e| write_failure(format!("failed to write blob: {}", e)))
    }

    /// Decode a blob produced by [`CompiledBlob::to_bytes`]
    ///
    /// # Errors
    ///
    /// `InvalidBlob` on truncated input, an unknown uniform type, a source
    /// that is not UTF-8, a missing NUL terminator, or trailing bytes.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut reader = ByteReader::new(bytes);

        let count = reader.u16("uniform count")?;
        let mut uniforms = UniformTable::new();

        for index in 0..count {
            let name_len = reader.u8("name length")?;
            let name = std::str::from_utf8(reader.take(usize::from(name_len), "name")?)
                .map_err(|_| Error::InvalidBlob(format!("uniform {} name is not UTF-8", index)))?
                .to_string();
            let kind_value = reader.u8("type")?;
            let kind = UniformType::from_u8(kind_value).ok_or_else(|| {
                Error::InvalidBlob(format!("uniform '{}' has unknown type {}", name, kind_value))
            })?;

            uniforms.push(Uniform {
                name,
                kind,
                num: reader.u8("array size")?,
                reg_index: reader.u16("register index")?,
                reg_count: reader.u16("register count")?,
                tex_component: reader.u8("texture component")?,
                tex_dimension: reader.u8("texture dimension")?,
                tex_format: reader.u8("texture format")?,
            });
        }

        let source_len = reader.u32("source length")? as usize;
        let source = std::str::from_utf8(reader.take(source_len, "source")?)
            .map_err(|_| Error::InvalidBlob("source is not UTF-8".to_string()))?
            .to_string();

        if reader.u8("NUL terminator")? != 0 {
            return Err(Error::InvalidBlob("source is not NUL-terminated".to_string()));
        }
        if !reader.is_empty() {
            return Err(Error::InvalidBlob(format!("{} trailing bytes", reader.remaining())));
        }

        Ok(Self { uniforms, source })
    }
}

fn write_failure(message: String) -> Error {
    crate::shaderc_error!("galaxy3d::shaderc::Blob", "{}", message);
    Error::SerializationWriteFailure(message)
}

/// Little-endian reader over a byte slice
struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take(&mut self, len: usize, what: &str) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(len).filter(|&end| end <= self.bytes.len()).ok_or_else(|| {
            Error::InvalidBlob(format!("truncated while reading {} at offset {}", what, self.pos))
        })?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn u8(&mut self, what: &str) -> Result<u8> {
        Ok(self.take(1, what)?[0])
    }

    fn u16(&mut self, what: &str) -> Result<u16> {
        let b = self.take(2, what)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    fn u32(&mut self, what: &str) -> Result<u32> {
        let b = self.take(4, what)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}

#[cfg(test)]
#[path = "blob_tests.rs"]
mod tests;
