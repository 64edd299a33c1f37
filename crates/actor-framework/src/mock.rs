//! # Mock Clients & Testing Guide
//!
//! [`MockClient<T>`] hands out a real [`ResourceClient<T>`] whose requests are answered from a
//! queue of scripted expectations instead of a running actor. Use it to test an entity whose
//! hooks call *another* actor (inject the mock client as that entity's `Context`) or to test a
//! client wrapper's request/response mapping.
//!
//! | | MockClient | Real Actor |
//! |---|---|---|
//! | **State** | None, answers are scripted | Real store |
//! | **Error injection** | `return_err(..)` | Needs a specific state |
//! | **Use case** | Logic *around* a client | The actor itself, full system |
//!
//! ## Patterns
//!
//! 1. **Pure mock**: script answers, call the wrapper, assert on the mapped result.
//! 2. **Actor + mocked dependency**: run the real actor under test with a mocked client as its
//!    context, then [`MockClient::verify`] that the dependency saw exactly the expected calls.
//! 3. **Full system**: no mocks, every actor running (see the domain crate's `tests/`).
//!
//! Expectations are consumed in order. A request of the wrong kind, or for a different id,
//! panics the mock task; the caller then observes [`FrameworkError::ActorDropped`].
//!
//! ```rust
//! use actor_framework::mock::MockClient;
//! use actor_framework::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Seat { id: u32, taken: bool }
//! #[derive(Debug)] struct SeatCreate;
//! #[derive(Debug)] enum SeatAction { Take }
//! #[derive(Debug, thiserror::Error)] #[error("seat error")] struct SeatError;
//!
//! #[async_trait]
//! impl ActorEntity for Seat {
//!     type Id = u32; type Create = SeatCreate; type Update = std::convert::Infallible;
//!     type Action = SeatAction; type ActionResult = bool; type Context = (); type Error = SeatError;
//!     fn from_create_params(id: u32, _: SeatCreate) -> Result<Self, Self::Error> { Ok(Self { id, taken: false }) }
//!     async fn on_update(&mut self, u: std::convert::Infallible, _: &()) -> Result<(), Self::Error> { match u {} }
//!     async fn handle_action(&mut self, _: SeatAction, _: &()) -> Result<bool, Self::Error> { Ok(true) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Seat>::new();
//!     mock.expect_action(7).return_ok(false);
//!     mock.expect_get(8).return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert!(!client.perform_action(7, SeatAction::Take).await.unwrap());
//!     assert!(matches!(client.get(8).await, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! For step-by-step control (inspect the payload, then answer), use [`create_mock_client`]
//! together with [`expect_create`], [`expect_get`], [`expect_action`] and [`expect_query`].

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{Filter, ResourceRequest, Response};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// A scripted answer, in the order it will be consumed.
enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
    Query {
        response: Result<Vec<T>, FrameworkError>,
    },
}

impl<T: ActorEntity> Expectation<T> {
    fn kind(&self) -> &'static str {
        match self {
            Expectation::Get { .. } => "Get",
            Expectation::Create { .. } => "Create",
            Expectation::Delete { .. } => "Delete",
            Expectation::Action { .. } => "Action",
            Expectation::Query { .. } => "Query",
        }
    }
}

type Script<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn push<T: ActorEntity>(script: &Script<T>, expectation: Expectation<T>) {
    script
        .lock()
        .expect("mock script poisoned")
        .push_back(expectation);
}

fn check_id<T: ActorEntity>(expected: &T::Id, actual: &T::Id) {
    assert_eq!(
        expected, actual,
        "mock received a request for {actual}, expected {expected}"
    );
}

/// A mock client with expectation tracking for fluent testing.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    script: Script<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let script: Script<T> = Arc::new(Mutex::new(VecDeque::new()));
        let pending = script.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = pending.lock().expect("mock script poisoned").pop_front();
                answer(request, next);
            }
        });

        Self {
            client: ResourceClient::new(sender),
            script,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, id: T::Id) -> GetExpectation<T> {
        GetExpectation {
            id,
            script: self.script.clone(),
        }
    }

    pub fn expect_create(&mut self) -> CreateExpectation<T> {
        CreateExpectation {
            script: self.script.clone(),
        }
    }

    pub fn expect_delete(&mut self, id: T::Id) -> DeleteExpectation<T> {
        DeleteExpectation {
            id,
            script: self.script.clone(),
        }
    }

    pub fn expect_action(&mut self, id: T::Id) -> ActionExpectation<T> {
        ActionExpectation {
            id,
            script: self.script.clone(),
        }
    }

    /// Expects a `query` or `list` call. The filter is not applied to the scripted result.
    pub fn expect_query(&mut self) -> QueryExpectation<T> {
        QueryExpectation {
            script: self.script.clone(),
        }
    }

    /// Panics unless every expectation has been consumed.
    pub fn verify(&self) {
        let remaining = self.script.lock().expect("mock script poisoned");
        if !remaining.is_empty() {
            let kinds: Vec<&str> = remaining.iter().map(Expectation::kind).collect();
            panic!("Not all expectations were met, remaining: {kinds:?}");
        }
    }
}

fn answer<T: ActorEntity>(request: ResourceRequest<T>, next: Option<Expectation<T>>) {
    match (request, next) {
        (ResourceRequest::Get { id, respond_to }, Some(Expectation::Get { id: want, response })) => {
            check_id::<T>(&want, &id);
            let _ = respond_to.send(response);
        }
        (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
            let _ = respond_to.send(response);
        }
        (
            ResourceRequest::Delete { id, respond_to },
            Some(Expectation::Delete { id: want, response }),
        ) => {
            check_id::<T>(&want, &id);
            let _ = respond_to.send(response);
        }
        (
            ResourceRequest::Action { id, respond_to, .. },
            Some(Expectation::Action { id: want, response }),
        ) => {
            check_id::<T>(&want, &id);
            let _ = respond_to.send(response);
        }
        (ResourceRequest::Query { respond_to, .. }, Some(Expectation::Query { response })) => {
            let _ = respond_to.send(response);
        }
        (request, Some(expected)) => panic!(
            "Unexpected {} request, next expectation is {}",
            request.kind(),
            expected.kind()
        ),
        (request, None) => panic!("Unexpected {} request, no expectations left", request.kind()),
    }
}

pub struct GetExpectation<T: ActorEntity> {
    id: T::Id,
    script: Script<T>,
}

impl<T: ActorEntity> GetExpectation<T> {
    pub fn return_ok(self, value: Option<T>) {
        push(&self.script, Expectation::Get { id: self.id, response: Ok(value) });
    }

    pub fn return_err(self, error: FrameworkError) {
        push(&self.script, Expectation::Get { id: self.id, response: Err(error) });
    }
}

pub struct CreateExpectation<T: ActorEntity> {
    script: Script<T>,
}

impl<T: ActorEntity> CreateExpectation<T> {
    pub fn return_ok(self, id: T::Id) {
        push(&self.script, Expectation::Create { response: Ok(id) });
    }

    pub fn return_err(self, error: FrameworkError) {
        push(&self.script, Expectation::Create { response: Err(error) });
    }
}

pub struct DeleteExpectation<T: ActorEntity> {
    id: T::Id,
    script: Script<T>,
}

impl<T: ActorEntity> DeleteExpectation<T> {
    pub fn return_ok(self) {
        push(&self.script, Expectation::Delete { id: self.id, response: Ok(()) });
    }

    pub fn return_err(self, error: FrameworkError) {
        push(&self.script, Expectation::Delete { id: self.id, response: Err(error) });
    }
}

pub struct ActionExpectation<T: ActorEntity> {
    id: T::Id,
    script: Script<T>,
}

impl<T: ActorEntity> ActionExpectation<T> {
    pub fn return_ok(self, result: T::ActionResult) {
        push(&self.script, Expectation::Action { id: self.id, response: Ok(result) });
    }

    pub fn return_err(self, error: FrameworkError) {
        push(&self.script, Expectation::Action { id: self.id, response: Err(error) });
    }
}

pub struct QueryExpectation<T: ActorEntity> {
    script: Script<T>,
}

impl<T: ActorEntity> QueryExpectation<T> {
    pub fn return_ok(self, items: Vec<T>) {
        push(&self.script, Expectation::Query { response: Ok(items) });
    }

    pub fn return_err(self, error: FrameworkError) {
        push(&self.script, Expectation::Query { response: Err(error) });
    }
}

// =============================================================================
// STEP-BY-STEP HELPERS
// =============================================================================

/// Creates a client and hands back the receiving end, so a test can play the actor itself.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Next message, if it is a Create request.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, Response<T::Id>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next message, if it is a Get request.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next message, if it is an Action request.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Response<T::ActionResult>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

/// Next message, if it is a Query request.
pub async fn expect_query<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(Filter<T>, Response<Vec<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Query { filter, respond_to }) => Some((filter, respond_to)),
        _ => None,
    }
}
