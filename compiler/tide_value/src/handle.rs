//! Shared, identity-carrying container handles.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

/// Identity of a live container.
///
/// Two handles have the same id exactly when they point at the same
/// container. Ids are only meaningful while the container is alive, which
/// holds for the duration of any walk that holds the values it visits.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ContainerId(usize);

impl fmt::Debug for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:x}", self.0)
    }
}

/// Reference-counted, interior-mutable container.
///
/// The interpreter is single-threaded, so containers are `Rc<RefCell<T>>`.
/// Borrows are kept short: callers copy values out before evaluating them,
/// so user code can freely mutate a block that is being walked.
pub struct Handle<T>(Rc<RefCell<T>>);

impl<T> Handle<T> {
    pub fn new(inner: T) -> Self {
        Handle(Rc::new(RefCell::new(inner)))
    }

    #[inline]
    pub fn id(&self) -> ContainerId {
        ContainerId(Rc::as_ptr(&self.0).cast::<()>() as usize)
    }

    #[inline]
    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    #[inline]
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Handle(Rc::clone(&self.0))
    }
}

// Containers may be cyclic, so Debug prints identity only.
impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({:?})", self.id())
    }
}
