//! Two-step string return contract: ask for the length, then copy into a buffer
//! the caller sized from it.

use crate::foundation::error::{MockError, MockResult};
use crate::foundation::ids::Handle;
use crate::recorder::session::Recorder;

impl Recorder {
    /// Boxes a string for return across the boundary.
    pub fn allocate_string(&mut self, s: impl Into<String>) -> Handle {
        self.handles.allocate(s.into())
    }

    /// UTF-8 byte length of the string behind `handle`; `0` if there is none.
    pub fn string_length(&self, handle: Handle) -> usize {
        match self.handles.resolve::<String>(handle) {
            Some(s) => s.len(),
            None => {
                tracing::debug!(?handle, "string_length on non-string handle");
                0
            }
        }
    }

    /// Copies the string behind `handle` into `buffer`, returning the byte count.
    ///
    /// Non-string handles copy nothing. A buffer shorter than the string is an
    /// error and is left untouched.
    pub fn string_data(&self, handle: Handle, buffer: &mut [u8]) -> MockResult<usize> {
        let Some(s) = self.handles.resolve::<String>(handle) else {
            tracing::debug!(?handle, "string_data on non-string handle");
            return Ok(0);
        };
        if buffer.len() < s.len() {
            return Err(MockError::marshal(format!(
                "buffer of {} bytes cannot hold {} byte string",
                buffer.len(),
                s.len()
            )));
        }
        buffer[..s.len()].copy_from_slice(s.as_bytes());
        Ok(s.len())
    }

    /// Copies the string out through the length/data contract and releases it.
    pub fn take_string(&mut self, handle: Handle) -> MockResult<Option<String>> {
        if self.handles.resolve::<String>(handle).is_none() {
            return Ok(None);
        }
        let mut buf = vec![0u8; self.string_length(handle)];
        let n = self.string_data(handle, &mut buf)?;
        buf.truncate(n);
        self.release(handle);
        String::from_utf8(buf)
            .map(Some)
            .map_err(|e| MockError::marshal(format!("string is not utf-8: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/recorder/marshal.rs"]
mod tests;
