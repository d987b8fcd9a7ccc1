//! Factories: how a binding produces its value.
//!
//! A factory receives the [`Container`] (to resolve or bind more names on
//! the fly) and the values of its declared dependencies, in declared
//! order. Three shapes are supported, all reduced to the [`Factory`]
//! trait:
//!
//! - async closures, via [`BindingBuilder::to_factory`](crate::BindingBuilder::to_factory)
//! - completion-handler closures, via [`BindingBuilder::to_callback`](crate::BindingBuilder::to_callback)
//! - plain values, via [`BindingBuilder::to_value`](crate::BindingBuilder::to_value)

use std::any::Any;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::oneshot;

use crate::container::Container;
use crate::error::{BinderyError, BoxError, Result};
use crate::resolved::{Instance, Resolved};

/// Boxed, sendable future.
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

type ClosureFn = dyn Fn(Container, Resolved) -> BoxFuture<Result<Instance>> + Send + Sync;
type CallbackFn = dyn Fn(Container, Completion, Resolved) + Send + Sync;

/// Produces a binding's value.
///
/// Implement this for factories that carry their own state; closures are
/// usually simpler.
///
/// # Examples
/// ```
/// use bindery_container::prelude::*;
/// use bindery_container::factory::Factory;
/// use std::sync::Arc;
///
/// struct Greeting(&'static str);
///
/// #[async_trait::async_trait]
/// impl Factory for Greeting {
///     async fn create(&self, _: Container, deps: Resolved) -> Result<Instance> {
///         let name = deps.get::<String>(0)?;
///         Ok(Arc::new(format!("{}, {name}", self.0)))
///     }
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<()> {
/// let container = Container::new();
/// container.bind("name").to_value(String::from("world"));
/// container.bind("greeting").depends_on("name").to(Greeting("hello"));
///
/// assert_eq!(*container.get_as::<String>("greeting").await?, "hello, world");
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait Factory: Send + Sync + 'static {
    /// Builds the value. `dependencies` holds the declared dependencies'
    /// values in declared order.
    async fn create(&self, container: Container, dependencies: Resolved) -> Result<Instance>;
}

/// A pre-built value, returned unchanged on every resolution.
pub(crate) struct ValueFactory {
    value: Instance,
}

impl ValueFactory {
    pub(crate) fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            value: Arc::new(value),
        }
    }
}

#[async_trait]
impl Factory for ValueFactory {
    async fn create(&self, _: Container, _: Resolved) -> Result<Instance> {
        Ok(self.value.clone())
    }
}

/// An async closure returning `Result<T>`.
pub(crate) struct ClosureFactory {
    f: Box<ClosureFn>,
}

impl ClosureFactory {
    pub(crate) fn new<F, Fut, T>(f: F) -> Self
    where
        F: Fn(Container, Resolved) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
        T: Any + Send + Sync,
    {
        Self {
            f: Box::new(move |container: Container, dependencies: Resolved| -> BoxFuture<Result<Instance>> {
                let fut = f(container, dependencies);
                Box::pin(async move { fut.await.map(|value| Arc::new(value) as Instance) })
            }),
        }
    }
}

#[async_trait]
impl Factory for ClosureFactory {
    async fn create(&self, container: Container, dependencies: Resolved) -> Result<Instance> {
        (self.f)(container, dependencies).await
    }
}

/// A closure that reports its result through a [`Completion`] handle.
pub(crate) struct CallbackFactory {
    name: String,
    f: Box<CallbackFn>,
}

impl CallbackFactory {
    pub(crate) fn new<F>(name: String, f: F) -> Self
    where
        F: Fn(Container, Completion, Resolved) + Send + Sync + 'static,
    {
        Self {
            name,
            f: Box::new(f),
        }
    }
}

#[async_trait]
impl Factory for CallbackFactory {
    async fn create(&self, container: Container, dependencies: Resolved) -> Result<Instance> {
        let (tx, rx) = oneshot::channel();
        (self.f)(container, Completion { tx }, dependencies);

        match rx.await {
            Ok(result) => result,
            Err(_) => Err(BinderyError::Abandoned {
                name: self.name.clone(),
            }),
        }
    }
}

/// One-shot completion handle given to callback-style factories.
///
/// Every method consumes the handle, so a factory completes at most
/// once. Dropping it without completing fails the resolution with
/// [`BinderyError::Abandoned`].
///
/// The handle is `Send + 'static`: it may be moved into a spawned task
/// and completed later.
#[must_use = "the resolution stays pending until the completion is used"]
#[derive(Debug)]
pub struct Completion {
    tx: oneshot::Sender<Result<Instance>>,
}

impl Completion {
    /// Completes with a value.
    pub fn succeed<T: Any + Send + Sync>(self, value: T) {
        self.send(Ok(Arc::new(value)));
    }

    /// Completes with a factory failure.
    pub fn fail(self, error: impl Into<BoxError>) {
        self.send(Err(BinderyError::factory(error)));
    }

    /// Completes with an outcome, forwarding a [`BinderyError`] unchanged.
    ///
    /// Handy when the outcome comes from a nested
    /// [`Container::get`] call.
    pub fn complete<T: Any + Send + Sync>(self, result: Result<T>) {
        self.send(result.map(|value| Arc::new(value) as Instance));
    }

    fn send(self, result: Result<Instance>) {
        // Receiver gone means nobody waits for this value anymore.
        let _ = self.tx.send(result);
    }
}
