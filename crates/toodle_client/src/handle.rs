//! Owned boundary handles.
//!
//! # Responsibility
//! - Tie every boundary allocation to exactly one release call.
//!
//! # Invariants
//! - A `Handle` is never null.
//! - Release runs once, on drop or on explicit `release`, on every exit path.
//! - Handles stay on the thread that acquired them (`NonNull` is `!Send`).

use crate::error::{BoundaryFailure, ClientResult};
use log::trace;
use std::ptr::NonNull;

/// A boundary allocation and the entry point that frees it.
pub trait Resource {
    /// Short name used in errors and logs.
    const KIND: &'static str;

    /// Hands `raw` back to the boundary.
    ///
    /// # Safety
    /// `raw` must be a live allocation of this kind that has not been
    /// released yet.
    unsafe fn release(raw: *mut Self);
}

/// Exclusive owner of one boundary allocation.
pub struct Handle<R: Resource> {
    raw: NonNull<R>,
}

impl<R: Resource> Handle<R> {
    /// Wraps `raw`, or `None` for null.
    ///
    /// # Safety
    /// A non-null `raw` must be an unowned live allocation of kind `R`.
    pub(crate) unsafe fn from_raw(raw: *mut R) -> Option<Self> {
        NonNull::new(raw).map(|raw| Self { raw })
    }

    /// Wraps the result of an entry point that returns a handle.
    ///
    /// Null is a failed fetch and is mapped from the boundary's last error.
    ///
    /// # Safety
    /// Same as `from_raw`, and the entry point must have been the last
    /// boundary call on this thread.
    pub(crate) unsafe fn acquire(raw: *mut R) -> ClientResult<Self> {
        Self::from_raw(raw).ok_or_else(|| BoundaryFailure::take_last().into_fetch_error(R::KIND))
    }

    pub(crate) fn as_ptr(&self) -> *const R {
        self.raw.as_ptr()
    }

    pub(crate) fn as_mut_ptr(&mut self) -> *mut R {
        self.raw.as_ptr()
    }

    /// Releases the allocation now instead of at scope end.
    pub fn release(self) {
        drop(self);
    }
}

impl<R: Resource> Drop for Handle<R> {
    fn drop(&mut self) {
        trace!("event=handle_release module=client kind={}", R::KIND);
        // SAFETY: `raw` came from the boundary, is owned solely by this
        // handle and is released only here.
        unsafe { R::release(self.raw.as_ptr()) }
    }
}

impl<R: Resource> std::fmt::Debug for Handle<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handle")
            .field("kind", &R::KIND)
            .field("raw", &self.raw)
            .finish()
    }
}

/// Entity types that wrap exactly one handle.
pub trait OwnsHandle {
    type Raw: Resource;

    fn handle(&self) -> &Handle<Self::Raw>;
}

#[cfg(test)]
mod tests {
    use super::{Handle, Resource};
    use crate::error::ClientError;
    use std::cell::Cell;

    thread_local! {
        static RELEASED: Cell<usize> = const { Cell::new(0) };
    }

    struct FakeResource(u32);

    impl Resource for FakeResource {
        const KIND: &'static str = "fake";

        unsafe fn release(raw: *mut Self) {
            drop(Box::from_raw(raw));
            RELEASED.with(|count| count.set(count.get() + 1));
        }
    }

    fn released() -> usize {
        RELEASED.with(Cell::get)
    }

    fn fake(value: u32) -> Handle<FakeResource> {
        let raw = Box::into_raw(Box::new(FakeResource(value)));
        unsafe { Handle::from_raw(raw) }.unwrap()
    }

    #[test]
    fn drop_releases_exactly_once() {
        let before = released();
        {
            let handle = fake(1);
            assert_eq!(unsafe { (*handle.as_ptr()).0 }, 1);
        }
        assert_eq!(released(), before + 1);
    }

    #[test]
    fn explicit_release_consumes_the_handle() {
        let before = released();
        let handle = fake(2);
        handle.release();
        assert_eq!(released(), before + 1);
    }

    #[test]
    fn early_return_still_releases() {
        fn fails_midway() -> Result<(), &'static str> {
            let _first = fake(3);
            let _second = fake(4);
            Err("stopped")
        }

        let before = released();
        assert!(fails_midway().is_err());
        assert_eq!(released(), before + 2);
    }

    #[test]
    fn null_is_not_a_handle() {
        assert!(unsafe { Handle::<FakeResource>::from_raw(std::ptr::null_mut()) }.is_none());
        let error = unsafe { Handle::<FakeResource>::acquire(std::ptr::null_mut()) }.unwrap_err();
        assert!(matches!(error, ClientError::NotFound { resource: "fake", .. }));
    }
}
