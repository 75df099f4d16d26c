#![forbid(unsafe_code)]

//! The seam to the host view tree.
//!
//! Widgets in this workspace never lay anything out themselves. They read the
//! frame size of their container and push a translation transform back.

use std::cell::Cell;

use crate::geometry::{Size, Vector};

/// A view owned by the host toolkit.
pub trait HostView {
    /// Current frame size.
    fn size(&self) -> Size;

    /// Apply a translation transform. Hosts that only report size may ignore it.
    fn set_translation(&self, _translation: Vector) {}
}

/// A host view that is not attached to any toolkit.
///
/// Stores whatever it is told. Useful headless and in tests.
#[derive(Debug, Default)]
pub struct DetachedView {
    size: Cell<Size>,
    translation: Cell<Vector>,
}

impl DetachedView {
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size: Cell::new(size),
            translation: Cell::new(Vector::ZERO),
        }
    }

    pub fn resize(&self, size: Size) {
        self.size.set(size);
    }

    /// Last translation applied through [`HostView::set_translation`].
    #[must_use]
    pub fn translation(&self) -> Vector {
        self.translation.get()
    }
}

impl HostView for DetachedView {
    fn size(&self) -> Size {
        self.size.get()
    }

    fn set_translation(&self, translation: Vector) {
        self.translation.set(translation);
    }
}
