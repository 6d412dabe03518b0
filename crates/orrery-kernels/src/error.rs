//! Kernel setup errors.

use std::error::Error;
use std::fmt;

use orrery_core::StoreError;
use orrery_engine::SandboxError;

/// Errors from building or registering a reference kernel.
///
/// Setup-phase only: once a kernel's engines are registered, nothing in
/// this crate fails at runtime.
#[derive(Debug)]
pub enum KernelError {
    /// Declaring or looking up store state failed.
    Store(StoreError),
    /// Registering the produced engines failed.
    Sandbox(SandboxError),
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Store(e) => write!(f, "store: {e}"),
            Self::Sandbox(e) => write!(f, "sandbox: {e}"),
        }
    }
}

impl Error for KernelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(e) => Some(e),
            Self::Sandbox(e) => Some(e),
        }
    }
}

impl From<StoreError> for KernelError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

impl From<SandboxError> for KernelError {
    fn from(e: SandboxError) -> Self {
        Self::Sandbox(e)
    }
}
