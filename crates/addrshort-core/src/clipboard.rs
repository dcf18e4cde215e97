//! Clipboard sinks for copy commands.

use tracing::debug;

use crate::error::Result;

pub trait Clipboard {
    /// Replace the clipboard contents with `text`.
    fn set_text(&mut self, text: &str) -> Result<()>;
}

impl<T: Clipboard + ?Sized> Clipboard for &mut T {
    fn set_text(&mut self, text: &str) -> Result<()> {
        (**self).set_text(text)
    }
}

/// Keeps the last copied text in memory
#[derive(Debug, Clone, Default)]
pub struct BufferClipboard {
    contents: Option<String>,
    writes: usize,
}

impl BufferClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    /// Number of successful writes so far
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Clipboard for BufferClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.contents = Some(text.to_string());
        self.writes += 1;
        Ok(())
    }
}

/// The operating system clipboard (Unicode text format)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        debug!("Setting system clipboard to {:?}", text);
        platform::set_unicode_text(text)
    }
}

#[cfg(target_os = "windows")]
mod platform {
    use windows::Win32::Foundation::{HANDLE, HGLOBAL, HWND};
    use windows::Win32::System::DataExchange::{
        CloseClipboard, EmptyClipboard, OpenClipboard, SetClipboardData,
    };
    use windows::Win32::System::Memory::{
        GMEM_MOVEABLE, GlobalAlloc, GlobalFree, GlobalLock, GlobalUnlock,
    };
    use windows::Win32::System::Ole::CF_UNICODETEXT;

    use crate::error::{Error, Result};

    /// Global memory block freed on drop unless handed to the clipboard
    struct GlobalBuffer(Option<HGLOBAL>);

    impl GlobalBuffer {
        fn with_utf16(text: &str) -> Result<Self> {
            let mut wide: Vec<u16> = text.encode_utf16().collect();
            wide.push(0);
            let bytes = wide.len() * std::mem::size_of::<u16>();

            // SAFETY: GlobalAlloc has no preconditions; failure is reported as an error.
            let handle = unsafe { GlobalAlloc(GMEM_MOVEABLE, bytes) }
                .map_err(|e| Error::Clipboard(format!("GlobalAlloc failed: {e}")))?;
            let buffer = Self(Some(handle));

            // SAFETY: the handle was just allocated with room for `wide`.
            unsafe {
                let ptr = GlobalLock(handle) as *mut u16;
                if ptr.is_null() {
                    return Err(Error::Clipboard("GlobalLock failed".to_string()));
                }
                std::ptr::copy_nonoverlapping(wide.as_ptr(), ptr, wide.len());
                // Returns an error once the lock count reaches zero, which is the expected path.
                let _ = GlobalUnlock(handle);
            }

            Ok(buffer)
        }

        fn release(mut self) -> Option<HGLOBAL> {
            self.0.take()
        }
    }

    impl Drop for GlobalBuffer {
        fn drop(&mut self) {
            if let Some(handle) = self.0.take() {
                // SAFETY: the clipboard never took ownership of this handle.
                unsafe {
                    let _ = GlobalFree(handle);
                }
            }
        }
    }

    /// Open clipboard session, closed on drop
    struct ClipboardSession;

    impl ClipboardSession {
        fn open() -> Result<Self> {
            // SAFETY: a null owner window is permitted.
            unsafe { OpenClipboard(HWND::default()) }
                .map_err(|e| Error::Clipboard(format!("OpenClipboard failed: {e}")))?;
            Ok(Self)
        }
    }

    impl Drop for ClipboardSession {
        fn drop(&mut self) {
            // SAFETY: the clipboard is open on this thread.
            unsafe {
                let _ = CloseClipboard();
            }
        }
    }

    pub fn set_unicode_text(text: &str) -> Result<()> {
        let buffer = GlobalBuffer::with_utf16(text)?;
        let _session = ClipboardSession::open()?;

        // SAFETY: the clipboard is open and owned by this thread.
        unsafe { EmptyClipboard() }
            .map_err(|e| Error::Clipboard(format!("EmptyClipboard failed: {e}")))?;

        let handle = buffer.0.unwrap_or_default();
        // SAFETY: `handle` holds a NUL-terminated UTF-16 string.
        unsafe { SetClipboardData(CF_UNICODETEXT.0 as u32, HANDLE(handle.0)) }
            .map_err(|e| Error::Clipboard(format!("SetClipboardData failed: {e}")))?;

        // The system owns the memory from here on.
        buffer.release();
        Ok(())
    }
}

#[cfg(not(target_os = "windows"))]
mod platform {
    use crate::error::{Error, Result};

    pub fn set_unicode_text(_text: &str) -> Result<()> {
        Err(Error::ClipboardUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_clipboard_keeps_last_write() {
        let mut clipboard = BufferClipboard::new();
        assert_eq!(clipboard.contents(), None);

        clipboard.set_text("000026C0").unwrap();
        clipboard.set_text("app_base+0x26c0").unwrap();
        assert_eq!(clipboard.contents(), Some("app_base+0x26c0"));
        assert_eq!(clipboard.writes(), 2);
    }

    #[test]
    fn test_clipboard_through_mut_ref() {
        fn copy_into(mut sink: impl Clipboard) {
            sink.set_text("x").unwrap();
        }

        let mut clipboard = BufferClipboard::new();
        copy_into(&mut clipboard);
        assert_eq!(clipboard.contents(), Some("x"));
    }

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn test_system_clipboard_unavailable() {
        assert!(matches!(
            SystemClipboard.set_text("x"),
            Err(crate::error::Error::ClipboardUnavailable)
        ));
    }
}
