//! Running Instance Slot
//!
//! Holds the live scanner instance between `start` and `stop`. An instance
//! whose shutdown fails stays in the slot, together with the callbacks the
//! library may still invoke, so a later `release` can retry it.

use std::cell::RefCell;

use async_trait::async_trait;
use scan_core::ScannerError;

#[async_trait(?Send)]
pub trait Shutdown {
    /// Stop the stream and release the camera
    async fn shutdown(&self) -> Result<(), ScannerError>;
}

pub struct InstanceSlot<T> {
    current: RefCell<Option<T>>,
}

impl<T: Shutdown> InstanceSlot<T> {
    pub fn new() -> Self {
        Self {
            current: RefCell::new(None),
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.current.borrow().is_some()
    }

    pub fn set(&self, instance: T) {
        *self.current.borrow_mut() = Some(instance);
    }

    /// Remove without shutting down (instance never started)
    pub fn take(&self) -> Option<T> {
        self.current.borrow_mut().take()
    }

    /// Shut down the held instance. On failure it is put back.
    pub async fn release(&self) -> Result<(), ScannerError> {
        let Some(instance) = self.take() else {
            return Ok(());
        };
        if let Err(e) = instance.shutdown().await {
            self.set(instance);
            return Err(e);
        }
        Ok(())
    }
}
