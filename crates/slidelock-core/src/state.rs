use crate::collections::map::HashMap;
use std::cell::{Cell, Ref, RefCell};
use std::rc::{Rc, Weak};

type Observer<T> = Rc<dyn Fn(&T)>;

/// Observable value with a monotonically increasing version.
///
/// Every [`set`](Self::set) bumps the version and notifies subscribers in
/// subscription order after the new value is stored, so observers may read
/// the state (but not write it) from inside their callback.
pub struct MutableState<T: 'static> {
    inner: Rc<StateInner<T>>,
}

struct StateInner<T> {
    value: RefCell<T>,
    version: Cell<u64>,
    observers: RefCell<HashMap<u64, Observer<T>>>,
    next_observer_id: Cell<u64>,
}

impl<T: 'static> Clone for MutableState<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: 'static> MutableState<T> {
    pub fn new(initial: T) -> Self {
        Self {
            inner: Rc::new(StateInner {
                value: RefCell::new(initial),
                version: Cell::new(0),
                observers: RefCell::new(HashMap::default()),
                next_observer_id: Cell::new(1),
            }),
        }
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    pub fn borrow(&self) -> Ref<'_, T> {
        self.inner.value.borrow()
    }

    pub fn version(&self) -> u64 {
        self.inner.version.get()
    }

    pub fn set(&self, value: T) {
        *self.inner.value.borrow_mut() = value;
        self.bump_and_notify();
    }

    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let result = f(&mut self.inner.value.borrow_mut());
        self.bump_and_notify();
        result
    }

    /// Register `observer`; it stays registered until the returned
    /// [`Subscription`] is dropped.
    pub fn subscribe(&self, observer: impl Fn(&T) + 'static) -> Subscription {
        let id = self.inner.next_observer_id.get();
        self.inner.next_observer_id.set(id + 1);
        self.inner
            .observers
            .borrow_mut()
            .insert(id, Rc::new(observer));
        let weak: Weak<StateInner<T>> = Rc::downgrade(&self.inner);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.observers.borrow_mut().remove(&id);
                }
            })),
        }
    }

    fn bump_and_notify(&self) {
        self.inner.version.set(self.inner.version.get() + 1);
        let mut observers: Vec<(u64, Observer<T>)> = self
            .inner
            .observers
            .borrow()
            .iter()
            .map(|(id, observer)| (*id, Rc::clone(observer)))
            .collect();
        observers.sort_by_key(|(id, _)| *id);
        let value = self.inner.value.borrow();
        for (_, observer) in observers {
            observer(&value);
        }
    }
}

impl<T: Clone + 'static> MutableState<T> {
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }
}

impl<T: PartialEq + 'static> MutableState<T> {
    /// Store `value` only if it differs from the current one. Returns whether
    /// the state changed.
    pub fn set_if_changed(&self, value: T) -> bool {
        if *self.inner.value.borrow() == value {
            return false;
        }
        self.set(value);
        true
    }
}

/// Handle returned by [`MutableState::subscribe`].
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

/// Pull-based derived value, recomputed on read only when the upstream
/// version moved since the last computation.
pub struct DerivedState<T: Clone> {
    version: Box<dyn Fn() -> u64>,
    compute: Box<dyn Fn() -> T>,
    cached: RefCell<Option<(u64, T)>>,
    computations: Cell<u64>,
}

impl<T: Clone> DerivedState<T> {
    pub fn new(version: impl Fn() -> u64 + 'static, compute: impl Fn() -> T + 'static) -> Self {
        Self {
            version: Box::new(version),
            compute: Box::new(compute),
            cached: RefCell::new(None),
            computations: Cell::new(0),
        }
    }

    pub fn get(&self) -> T {
        let version = (self.version)();
        if let Some((cached_version, value)) = self.cached.borrow().as_ref() {
            if *cached_version == version {
                return value.clone();
            }
        }
        let value = (self.compute)();
        self.computations.set(self.computations.get() + 1);
        *self.cached.borrow_mut() = Some((version, value.clone()));
        value
    }

    /// Drop the memoized value so the next read recomputes.
    pub fn invalidate(&self) {
        self.cached.borrow_mut().take();
    }

    /// How many times the value was actually computed.
    pub fn computation_count(&self) -> u64 {
        self.computations.get()
    }
}
