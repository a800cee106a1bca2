use crate::backend::{Backend, MemoryBackend};
use crate::errors::{CubbyError, CubbyResult, ErrorKind};
use std::fmt::{Display, Formatter};

/// The logical storage partition a store writes into.
///
/// # Variants
/// - `Durable`: survives across sessions of the hosting environment
/// - `Session`: scoped to one session of the hosting environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Partition {
    /// Storage that survives across sessions (the default)
    #[default]
    Durable,
    /// Storage scoped to the current session
    Session,
}

impl Display for Partition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Partition::Durable => write!(f, "durable"),
            Partition::Session => write!(f, "session"),
        }
    }
}

/// The set of backends a hosting environment actually provides.
///
/// # Purpose
/// `StorageEnvironment` is the explicit, owned handle to the backends
/// available to a store factory. A host wires up the partitions it supports;
/// a factory built on the environment fails fast when a required partition is
/// missing. Session storage is frequently unobtainable in real hosts, so it
/// is optional here.
///
/// # Usage
/// ```text
/// // Everything in memory, both partitions available
/// let environment = StorageEnvironment::in_memory();
///
/// // A host providing only durable storage
/// let environment = StorageEnvironment::new()
///     .with_durable(Backend::new(MemoryBackend::new()));
/// ```
#[derive(Clone, Default)]
pub struct StorageEnvironment {
    durable: Option<Backend>,
    session: Option<Backend>,
}

impl StorageEnvironment {
    /// Creates an environment with no partitions attached.
    pub fn new() -> Self {
        StorageEnvironment::default()
    }

    /// Creates an environment with independent in-memory backends for both
    /// partitions.
    pub fn in_memory() -> Self {
        StorageEnvironment {
            durable: Some(Backend::new(MemoryBackend::new())),
            session: Some(Backend::new(MemoryBackend::new())),
        }
    }

    /// Attaches the durable partition backend.
    pub fn with_durable(mut self, backend: Backend) -> Self {
        self.durable = Some(backend);
        self
    }

    /// Attaches the session partition backend.
    pub fn with_session(mut self, backend: Backend) -> Self {
        self.session = Some(backend);
        self
    }

    /// Reports whether a partition is available in this environment.
    pub fn supports(&self, partition: Partition) -> bool {
        match partition {
            Partition::Durable => self.durable.is_some(),
            Partition::Session => self.session.is_some(),
        }
    }

    /// Returns the backend for a partition.
    ///
    /// # Errors
    ///
    /// Returns `EnvironmentUnsupported` if the partition has no backend
    /// attached.
    pub fn backend(&self, partition: Partition) -> CubbyResult<Backend> {
        let backend = match partition {
            Partition::Durable => self.durable.as_ref(),
            Partition::Session => self.session.as_ref(),
        };
        match backend {
            Some(backend) => Ok(backend.clone()),
            None => {
                log::error!("No backend available for {} storage", partition);
                Err(CubbyError::new(
                    &format!("Could not obtain a backend for {} storage", partition),
                    ErrorKind::EnvironmentUnsupported,
                ))
            }
        }
    }
}
