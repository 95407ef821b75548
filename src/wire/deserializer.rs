//! Cursor-based reader for the little-endian wire format.
//!
//! Every read either advances the cursor past a complete value or fails with a
//! [`MockError::Decode`] carrying the offset it stopped at. Callers must abandon the
//! whole enclosing payload after a failure: the cursor is left wherever the failing
//! read stopped and the remaining bytes are no longer aligned to field boundaries.

use crate::foundation::error::{MockError, MockResult};
use crate::wire::tags::{RuntimeType, number_tag};

/// Reader over one payload buffer.
#[derive(Clone, Debug)]
pub struct Deserializer<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Deserializer<'a> {
    /// Starts reading `buf` at offset 0.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current cursor offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left after the cursor.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Fails if any bytes are left unread.
    pub fn finish(&self) -> MockResult<()> {
        if self.remaining() != 0 {
            return Err(MockError::decode(
                self.pos,
                format!("{} trailing bytes after payload", self.remaining()),
            ));
        }
        Ok(())
    }

    fn take(&mut self, n: usize) -> MockResult<&'a [u8]> {
        if self.remaining() < n {
            return Err(MockError::decode(
                self.pos,
                format!("need {n} bytes, {} left", self.remaining()),
            ));
        }
        let out = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(out)
    }

    fn take_array<const N: usize>(&mut self) -> MockResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Reads one signed byte.
    pub fn read_i8(&mut self) -> MockResult<i8> {
        Ok(i8::from_le_bytes(self.take_array()?))
    }

    /// Reads a 32-bit signed integer.
    pub fn read_i32(&mut self) -> MockResult<i32> {
        Ok(i32::from_le_bytes(self.take_array()?))
    }

    /// Reads a 64-bit signed integer.
    pub fn read_i64(&mut self) -> MockResult<i64> {
        Ok(i64::from_le_bytes(self.take_array()?))
    }

    /// Reads a 32-bit float.
    pub fn read_f32(&mut self) -> MockResult<f32> {
        Ok(f32::from_le_bytes(self.take_array()?))
    }

    /// Reads a one-byte boolean; any non-zero byte is `true`.
    pub fn read_bool(&mut self) -> MockResult<bool> {
        Ok(self.read_i8()? != 0)
    }

    /// Reads a length-prefixed string.
    ///
    /// The prefix counts the trailing NUL the encoder appends, which is dropped.
    pub fn read_string(&mut self) -> MockResult<String> {
        let at = self.pos;
        let len = self.read_i32()?;
        if len < 0 {
            return Err(MockError::decode(at, format!("negative string length {len}")));
        }
        if len == 0 {
            return Ok(String::new());
        }
        let bytes = self.take(len as usize)?;
        let text = match bytes.split_last() {
            Some((0, head)) => head,
            _ => bytes,
        };
        std::str::from_utf8(text)
            .map(str::to_owned)
            .map_err(|e| MockError::decode(at + 4, format!("invalid utf-8 in string: {e}")))
    }

    /// Reads a tagged number (int32 or float32 payload).
    pub fn read_number(&mut self) -> MockResult<f64> {
        let at = self.pos;
        let tag = self.read_i8()? as u8;
        match tag {
            number_tag::INT32 => Ok(f64::from(self.read_i32()?)),
            number_tag::FLOAT32 => Ok(f64::from(self.read_f32()?)),
            other => Err(MockError::decode(at, format!("unsupported number tag {other}"))),
        }
    }

    /// Reads the runtime-type byte that prefixes optional values.
    pub fn read_runtime_type(&mut self) -> MockResult<RuntimeType> {
        let at = self.pos;
        let raw = self.read_i8()?;
        RuntimeType::from_i8(raw)
            .ok_or_else(|| MockError::decode(at, format!("unknown runtime type tag {raw}")))
    }

    /// Reads an optional value: a tag byte, then `read` unless the tag says absent.
    ///
    /// Only the [`RuntimeType::Undefined`] sentinel means absent; any other tag byte
    /// means the payload follows immediately.
    pub fn read_optional<T>(
        &mut self,
        read: impl FnOnce(&mut Self) -> MockResult<T>,
    ) -> MockResult<Option<T>> {
        let tag = self.read_i8()?;
        if tag == RuntimeType::Undefined.as_i8() {
            return Ok(None);
        }
        read(self).map(Some)
    }

    /// Reads a union selector, rejecting anything outside `0..branches`.
    pub fn read_selector(&mut self, branches: usize) -> MockResult<u8> {
        let at = self.pos;
        let raw = self.read_i8()?;
        if raw < 0 || raw as usize >= branches {
            return Err(MockError::decode(
                at,
                format!("selector {raw} out of range for {branches} branches"),
            ));
        }
        Ok(raw as u8)
    }

    /// Reads a selector and hands it to `read` to decode the chosen branch.
    pub fn read_union<T>(
        &mut self,
        branches: usize,
        read: impl FnOnce(&mut Self, u8) -> MockResult<T>,
    ) -> MockResult<T> {
        let selector = self.read_selector(branches)?;
        read(self, selector)
    }

    /// Reads an `int32` element count followed by that many elements.
    ///
    /// Every element must consume at least one byte, so a count larger than the
    /// bytes left is rejected before anything is read.
    pub fn read_array<T>(
        &mut self,
        mut read: impl FnMut(&mut Self) -> MockResult<T>,
    ) -> MockResult<Vec<T>> {
        let at = self.pos;
        let count = self.read_i32()?;
        if count < 0 {
            return Err(MockError::decode(at, format!("negative array length {count}")));
        }
        let count = count as usize;
        if count > self.remaining() {
            return Err(MockError::decode(
                at,
                format!("array length {count} exceeds {} remaining bytes", self.remaining()),
            ));
        }
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            out.push(read(self)?);
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/wire/deserializer.rs"]
mod tests;
