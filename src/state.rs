//! Observable view state
//!
//! Store objects with subscribe/publish semantics, decoupled from any
//! rendering layer. Package and tap lists are replaced wholesale on each
//! refresh, never patched in place, so subscribers always observe a
//! complete snapshot.

use tokio::sync::watch;

use crate::packages::Package;

/// A mutable, observable state holder.
pub struct Store<T> {
    tx: watch::Sender<T>,
}

impl<T: Clone> Store<T> {
    pub fn new(initial: T) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Snapshot of the current value.
    pub fn get(&self) -> T {
        self.tx.borrow().clone()
    }

    /// Replace the value wholesale and notify subscribers.
    pub fn replace(&self, value: T) {
        self.tx.send_replace(value);
    }

    /// Mutate in place and notify subscribers.
    pub fn update(&self, mutate: impl FnOnce(&mut T)) {
        self.tx.send_modify(mutate);
    }

    pub fn subscribe(&self) -> Subscription<T> {
        Subscription {
            rx: self.tx.subscribe(),
        }
    }
}

impl<T: Clone + Default> Default for Store<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// A live view onto a [`Store`].
pub struct Subscription<T> {
    rx: watch::Receiver<T>,
}

impl<T: Clone> Subscription<T> {
    pub fn current(&self) -> T {
        self.rx.borrow().clone()
    }

    /// Wait for the next published value. `None` once the store is gone.
    pub async fn next_change(&mut self) -> Option<T> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }
}

/// Installed-package state: formulae and casks, refreshed wholesale.
#[derive(Default)]
pub struct BrewData {
    pub formulae: Store<Vec<Package>>,
    pub casks: Store<Vec<Package>>,
}

impl BrewData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn installed_count(&self) -> usize {
        self.formulae.get().len() + self.casks.get().len()
    }
}

/// Names of currently tapped repositories.
#[derive(Default)]
pub struct TapList {
    store: Store<Vec<String>>,
}

impl TapList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(&self) -> Vec<String> {
        self.store.get()
    }

    pub fn replace(&self, taps: Vec<String>) {
        self.store.replace(taps);
    }

    pub fn subscribe(&self) -> Subscription<Vec<String>> {
        self.store.subscribe()
    }
}
