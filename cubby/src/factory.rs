//! The namespace-scoped minter of stores.

use crate::backend::{Partition, StorageEnvironment};
use crate::common::MODULE_NAME;
use crate::entity::{type_tag_of, Entity};
use crate::errors::{CubbyError, CubbyResult, ErrorKind};
use crate::keys::{validate_component, KeyCodec};
use crate::store::{ObjectStore, StoreDescriptor, StoreOptions};
use std::sync::Arc;

/// The entry point: a namespace-scoped factory for typed stores.
///
/// # Purpose
/// A `StoreFactory` owns a shared reference to the hosting environment's
/// backends, validates at construction that the environment can host it, and
/// mints [`ObjectStore`]s scoped to its namespace. Stores minted by one
/// factory share the factory's backends; stores of different factories (or
/// different namespaces) never see each other's entries.
///
/// # Examples
///
/// ```rust,ignore
/// use cubby::factory::StoreFactory;
/// use cubby::store::StoreOptions;
///
/// let factory = StoreFactory::builder().namespace("myapp").build()?;
/// let store = factory.create_store::<Person>(StoreOptions::new())?;
/// ```
#[derive(Clone)]
pub struct StoreFactory {
    inner: Arc<StoreFactoryInner>,
}

impl StoreFactory {
    /// Creates a new `StoreFactoryBuilder` for configuring a factory.
    pub fn builder() -> StoreFactoryBuilder {
        StoreFactoryBuilder::new()
    }

    pub(crate) fn with_environment(
        namespace: &str,
        environment: StorageEnvironment,
    ) -> CubbyResult<Self> {
        validate_component(namespace, "namespace")?;
        // Fail early: a factory without durable storage is unusable
        if !environment.supports(Partition::Durable) {
            log::error!("Current environment has no support for durable storage");
            return Err(CubbyError::new(
                "Current environment has no support for durable storage",
                ErrorKind::EnvironmentUnsupported,
            ));
        }
        let prefix = KeyCodec::factory_prefix(MODULE_NAME, namespace);
        log::info!("Initialized store factory for namespace '{}'", namespace);
        Ok(StoreFactory {
            inner: Arc::new(StoreFactoryInner {
                name: namespace.to_string(),
                prefix,
                environment,
            }),
        })
    }

    /// Mints a store for entities of type `T`.
    ///
    /// # Arguments
    ///
    /// * `options` - `prefix` defaults to the type tag lowercased;
    ///   `partition` defaults to `Durable`
    ///
    /// # Errors
    ///
    /// - `InvalidOperation` if the resolved prefix is empty or contains key
    ///   delimiters
    /// - `EnvironmentUnsupported` if the requested partition has no backend
    pub fn create_store<T: Entity>(&self, options: StoreOptions) -> CubbyResult<ObjectStore<T>> {
        self.inner.create_store(options)
    }

    /// The namespace this factory was built for.
    pub fn name(&self) -> String {
        self.inner.name.clone()
    }

    /// The factory-level key prefix shared by every store this factory
    /// mints. Useful for bulk cleanup by an external collaborator.
    pub fn prefix(&self) -> String {
        self.inner.prefix.clone()
    }
}

impl std::fmt::Debug for StoreFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreFactory")
            .field("name", &self.inner.name)
            .field("prefix", &self.inner.prefix)
            .finish()
    }
}

struct StoreFactoryInner {
    name: String,
    prefix: String,
    environment: StorageEnvironment,
}

impl StoreFactoryInner {
    fn create_store<T: Entity>(&self, options: StoreOptions) -> CubbyResult<ObjectStore<T>> {
        let type_tag = type_tag_of::<T>();
        let prefix = options
            .prefix
            .clone()
            .unwrap_or_else(|| type_tag.to_lowercase());
        validate_component(&prefix, "store prefix")?;

        let backend = self.environment.backend(options.partition)?;
        let codec = KeyCodec::new(MODULE_NAME, &self.name, &prefix);
        let descriptor = StoreDescriptor::new(type_tag, codec, options.partition);
        Ok(ObjectStore::new(descriptor, backend))
    }
}

/// Builder for creating and configuring a [`StoreFactory`].
///
/// `StoreFactoryBuilder` provides a fluent API for configuring a factory
/// before building it. It captures errors during configuration to ensure
/// they are propagated when the factory is built.
///
/// # Examples
///
/// ```rust,ignore
/// use cubby::backend::StorageEnvironment;
/// use cubby::factory::StoreFactory;
///
/// // A factory over in-memory backends
/// let factory = StoreFactory::builder().namespace("myapp").build()?;
///
/// // A factory over an explicitly wired environment
/// let factory = StoreFactory::builder()
///     .namespace("myapp")
///     .environment(StorageEnvironment::new().with_durable(backend))
///     .build()?;
/// ```
pub struct StoreFactoryBuilder {
    error: Option<CubbyError>,
    namespace: Option<String>,
    environment: StorageEnvironment,
}

impl StoreFactoryBuilder {
    /// Creates a new builder with a fully in-memory environment.
    pub fn new() -> Self {
        StoreFactoryBuilder {
            error: None,
            namespace: None,
            environment: StorageEnvironment::in_memory(),
        }
    }

    /// Sets the namespace the factory is scoped to.
    ///
    /// The namespace must be non-empty and free of the key delimiters. An
    /// invalid namespace is captured and returned when calling `build()`.
    pub fn namespace(mut self, namespace: &str) -> Self {
        if self.error.is_none() {
            match validate_component(namespace, "namespace") {
                Ok(()) => self.namespace = Some(namespace.to_string()),
                Err(e) => self.error = Some(e),
            }
        }
        self
    }

    /// Replaces the storage environment the factory's stores write into.
    pub fn environment(mut self, environment: StorageEnvironment) -> Self {
        self.environment = environment;
        self
    }

    /// Builds the factory with the configured settings.
    ///
    /// Any errors captured during configuration are returned here.
    ///
    /// # Errors
    ///
    /// - `InvalidOperation` if no namespace was configured
    /// - `EnvironmentUnsupported` if the environment lacks durable storage
    pub fn build(self) -> CubbyResult<StoreFactory> {
        if let Some(error) = self.error {
            return Err(error);
        }
        let Some(namespace) = self.namespace else {
            return Err(CubbyError::new(
                "A namespace is required to build a store factory",
                ErrorKind::InvalidOperation,
            ));
        };
        StoreFactory::with_environment(&namespace, self.environment)
    }
}

impl Default for StoreFactoryBuilder {
    fn default() -> Self {
        StoreFactoryBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{Backend, MemoryBackend};
    use crate::record::Tracked;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    struct Person {
        name: String,
        age: u32,
    }

    impl Entity for Person {
        fn type_tag(&self) -> String {
            "Person".to_string()
        }
    }

    #[test]
    fn test_build_with_namespace() {
        let factory = StoreFactory::builder().namespace("myapp").build().unwrap();
        assert_eq!(factory.name(), "myapp");
        assert_eq!(factory.prefix(), "_cubby_myapp_");
    }

    #[test]
    fn test_build_without_namespace_fails() {
        let result = StoreFactory::builder().build();
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), &ErrorKind::InvalidOperation);
    }

    #[test]
    fn test_build_with_invalid_namespace_fails() {
        let result = StoreFactory::builder().namespace("my app").build();
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), &ErrorKind::InvalidOperation);
    }

    #[test]
    fn test_builder_keeps_first_error() {
        let result = StoreFactory::builder()
            .namespace("bad_name")
            .namespace("good")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_build_without_durable_partition_fails() {
        let result = StoreFactory::builder()
            .namespace("myapp")
            .environment(StorageEnvironment::new())
            .build();
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().kind(),
            &ErrorKind::EnvironmentUnsupported
        );
    }

    #[test]
    fn test_create_store_with_default_prefix() {
        let factory = StoreFactory::builder().namespace("myapp").build().unwrap();
        let store = factory.create_store::<Person>(StoreOptions::new()).unwrap();
        assert_eq!(store.descriptor().key_prefix(), "_cubby_myapp_person-");
        assert_eq!(store.descriptor().type_tag(), "Person");
    }

    #[test]
    fn test_create_store_with_custom_prefix() {
        let factory = StoreFactory::builder().namespace("myapp").build().unwrap();
        let store = factory
            .create_store::<Person>(StoreOptions::new().prefix("people"))
            .unwrap();
        assert_eq!(store.descriptor().key_prefix(), "_cubby_myapp_people-");
    }

    #[test]
    fn test_create_store_with_invalid_prefix_fails() {
        let factory = StoreFactory::builder().namespace("myapp").build().unwrap();
        let result = factory.create_store::<Person>(StoreOptions::new().prefix("my-people"));
        assert!(result.is_err());
        assert_eq!(result.unwrap_err().kind(), &ErrorKind::InvalidOperation);
    }

    #[test]
    fn test_create_session_store_without_session_partition_fails() {
        let environment =
            StorageEnvironment::new().with_durable(Backend::new(MemoryBackend::new()));
        let factory = StoreFactory::builder()
            .namespace("myapp")
            .environment(environment)
            .build()
            .unwrap();

        let result =
            factory.create_store::<Person>(StoreOptions::new().partition(Partition::Session));
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().kind(),
            &ErrorKind::EnvironmentUnsupported
        );
    }

    #[test]
    fn test_session_store_uses_session_backend() {
        let factory = StoreFactory::builder().namespace("myapp").build().unwrap();
        let durable = factory.create_store::<Person>(StoreOptions::new()).unwrap();
        let session = factory
            .create_store::<Person>(StoreOptions::new().partition(Partition::Session))
            .unwrap();

        let mut record = Tracked::new(Person {
            name: "Ola".to_string(),
            age: 28,
        });
        durable.save(&mut record).unwrap();

        assert_eq!(durable.count().unwrap(), 1);
        assert_eq!(session.count().unwrap(), 0);
    }

    #[test]
    fn test_factories_with_different_namespaces_are_isolated() {
        let shared = Backend::new(MemoryBackend::new());
        let factory_a = StoreFactory::builder()
            .namespace("appa")
            .environment(StorageEnvironment::new().with_durable(shared.clone()))
            .build()
            .unwrap();
        let factory_b = StoreFactory::builder()
            .namespace("appb")
            .environment(StorageEnvironment::new().with_durable(shared))
            .build()
            .unwrap();

        let store_a = factory_a.create_store::<Person>(StoreOptions::new()).unwrap();
        let store_b = factory_b.create_store::<Person>(StoreOptions::new()).unwrap();

        let mut record = Tracked::new(Person {
            name: "Ola".to_string(),
            age: 28,
        });
        store_a.save(&mut record).unwrap();

        assert_eq!(store_a.count().unwrap(), 1);
        assert_eq!(store_b.count().unwrap(), 0);
    }

    #[test]
    fn test_factory_clone_shares_environment() {
        let factory = StoreFactory::builder().namespace("myapp").build().unwrap();
        let clone = factory.clone();

        let store = factory.create_store::<Person>(StoreOptions::new()).unwrap();
        let same_store = clone.create_store::<Person>(StoreOptions::new()).unwrap();

        let mut record = Tracked::new(Person {
            name: "Ola".to_string(),
            age: 28,
        });
        store.save(&mut record).unwrap();
        assert_eq!(same_store.count().unwrap(), 1);
    }
}
