//! # UI shell and embedded view contracts.
//!
//! The shell owns presentation and forwards OS callbacks; the host forwards them
//! unmodified to the current [`EmbeddedView`], adding only an existence check.

use std::sync::Arc;

use crate::core::HostHandle;

use super::EmbeddedRuntime;

/// Result of an activity launched by the embedded view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityResult {
    /// Code the activity was launched with.
    pub request_code: i32,
    /// Code the activity finished with.
    pub result_code: i32,
    /// Opaque result payload.
    pub data: Option<Vec<u8>>,
}

/// Outcome of a permission request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionsResult {
    /// Code the request was issued with.
    pub request_code: i32,
    /// Requested permissions.
    pub permissions: Vec<String>,
    /// Grant flags, parallel to `permissions`.
    pub granted: Vec<bool>,
}

/// View component hosting exactly one runtime.
pub trait EmbeddedView: Send + Sync + 'static {
    /// Runtime hosted by this view.
    fn runtime(&self) -> Arc<dyn EmbeddedRuntime>;

    /// Hands a surviving view the handle of the session reusing it.
    ///
    /// Called instead of [`UiShell::create_embedded_view`] when the view came from
    /// [`UiShell::find_embedded_view`]. The runtime must signal through `host` from
    /// now on; the handle of the session that created it is closed.
    fn attach(&self, host: HostHandle);

    /// Receives a forwarded activity result.
    fn on_activity_result(&self, result: &ActivityResult);

    /// Receives a forwarded permission result.
    fn on_permissions_result(&self, result: &PermissionsResult);

    /// Receives back navigation.
    fn on_back_pressed(&self);
}

/// Presentation layer owning the embedded view.
pub trait UiShell: Send + Sync + 'static {
    /// Returns a compatible view that survived from an earlier attachment, if any.
    ///
    /// A returned view is re-attached through [`EmbeddedView::attach`].
    fn find_embedded_view(&self) -> Option<Arc<dyn EmbeddedView>>;

    /// Creates a new view (and its runtime) and inserts it into the shell.
    ///
    /// `host` carries the read-only command line and the signal surface the
    /// runtime uses to request restart or force quit.
    fn create_embedded_view(&self, host: HostHandle) -> Arc<dyn EmbeddedView>;

    /// Default back behaviour when no embedded view is attached.
    fn default_back_pressed(&self);
}
