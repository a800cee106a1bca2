use cubby::backend::StorageEnvironment;
use cubby::entity::Entity;
use cubby::errors::CubbyResult;
use cubby::factory::StoreFactory;
use serde::{Deserialize, Serialize};

/// Shared state for one integration test: a factory plus the environment it
/// was built on, so tests can reach the raw backends directly.
#[derive(Clone)]
pub struct TestContext {
    factory: StoreFactory,
    environment: StorageEnvironment,
}

impl TestContext {
    pub fn factory(&self) -> &StoreFactory {
        &self.factory
    }

    pub fn environment(&self) -> &StorageEnvironment {
        &self.environment
    }
}

/// Creates a context with a fully in-memory environment under the default
/// test namespace.
pub fn create_test_context() -> CubbyResult<TestContext> {
    create_named_context("testapp")
}

/// Creates a context with a fully in-memory environment under the given
/// namespace.
pub fn create_named_context(namespace: &str) -> CubbyResult<TestContext> {
    let environment = StorageEnvironment::in_memory();
    let factory = StoreFactory::builder()
        .namespace(namespace)
        .environment(environment.clone())
        .build()?;
    Ok(TestContext {
        factory,
        environment,
    })
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub age: u32,
}

impl Entity for Person {
    fn type_tag(&self) -> String {
        "Person".to_string()
    }
}

impl Person {
    pub fn new(name: &str, age: u32) -> Self {
        Person {
            name: name.to_string(),
            age,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Note {
    pub title: String,
    pub body: String,
}

impl Entity for Note {
    fn type_tag(&self) -> String {
        "Note".to_string()
    }
}

impl Note {
    pub fn new(title: &str, body: &str) -> Self {
        Note {
            title: title.to_string(),
            body: body.to_string(),
        }
    }
}
