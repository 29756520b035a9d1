use crate::GalleryError;

/// Write-text capability of the system clipboard. Availability is not
/// guaranteed (headless sessions, permissions), so construction and writes
/// are both fallible.
pub trait ClipboardWriter {
    fn write_text(&mut self, text: &str) -> Result<(), String>;
}

pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, GalleryError> {
        let inner =
            arboard::Clipboard::new().map_err(|e| GalleryError::Clipboard(e.to_string()))?;
        Ok(Self { inner })
    }
}

impl ClipboardWriter for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), String> {
        self.inner.set_text(text.to_owned()).map_err(|e| e.to_string())
    }
}

/// Transient notification display. `show` returns a handle when the
/// platform can dismiss a visible notification later; `dismiss` retires it.
pub trait NotificationBackend {
    type Handle;

    fn show(&mut self, summary: &str, body: &str) -> Option<Self::Handle>;
    fn dismiss(&mut self, handle: Self::Handle);
}

/// Desktop notifications with an auto-dismiss timeout. Display failures are
/// logged at debug and swallowed; a missing notification daemon must never
/// break a copy.
pub struct DesktopNotifications {
    timeout_ms: u32,
}

impl DesktopNotifications {
    pub fn new(timeout_ms: u32) -> Self {
        Self { timeout_ms }
    }
}

impl Default for DesktopNotifications {
    fn default() -> Self {
        Self::new(3000)
    }
}

impl NotificationBackend for DesktopNotifications {
    type Handle = notify_rust::NotificationHandle;

    fn show(&mut self, summary: &str, body: &str) -> Option<Self::Handle> {
        match notify_rust::Notification::new()
            .appname("Mediawall")
            .summary(summary)
            .body(body)
            .timeout(notify_rust::Timeout::Milliseconds(self.timeout_ms))
            .show()
        {
            Ok(handle) => Some(handle),
            Err(e) => {
                tracing::debug!("desktop notification failed (non-fatal): {e}");
                None
            }
        }
    }

    fn dismiss(&mut self, handle: Self::Handle) {
        handle.close();
    }
}

/// Copies text to the clipboard and reports the outcome through a
/// single-slot notification: at most one notification is visible at a time,
/// and a new copy dismisses any still-visible prior one before showing its
/// own.
pub struct ClipboardNotifier<C: ClipboardWriter, N: NotificationBackend> {
    clipboard: C,
    notifications: N,
    current: Option<N::Handle>,
}

impl<C: ClipboardWriter, N: NotificationBackend> ClipboardNotifier<C, N> {
    pub fn new(clipboard: C, notifications: N) -> Self {
        Self {
            clipboard,
            notifications,
            current: None,
        }
    }

    /// Copy `text` and notify. The error is for the caller's bookkeeping
    /// only; the user-visible signal is the failure notification.
    pub fn copy(&mut self, text: &str) -> Result<(), GalleryError> {
        if let Some(handle) = self.current.take() {
            self.notifications.dismiss(handle);
        }
        match self.clipboard.write_text(text) {
            Ok(()) => {
                self.current = self.notifications.show("Copied to clipboard", text);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("clipboard write failed: {e}");
                self.current = self.notifications.show("Copy failed", &e);
                Err(GalleryError::Clipboard(e))
            }
        }
    }
}

/// The production wiring: arboard clipboard, desktop notifications.
pub fn desktop_notifier(
) -> Result<ClipboardNotifier<SystemClipboard, DesktopNotifications>, GalleryError> {
    Ok(ClipboardNotifier::new(
        SystemClipboard::new()?,
        DesktopNotifications::default(),
    ))
}
