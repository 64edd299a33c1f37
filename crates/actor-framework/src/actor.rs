//! # Generic Actor Server
//!
//! [`ResourceActor`] owns the store for one entity type and answers every
//! [`ResourceRequest`] from a single Tokio task. Because requests are handled one at a time,
//! any read-check-write sequence an entity performs inside a hook or action is atomic with
//! respect to every other request on the same actor.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{Filter, ResourceRequest, Response};
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// # Usage Pattern
///
/// 1. **Create**: `ResourceActor::new()` returns the actor (server) and a client.
/// 2. **Wire**: pass dependencies (other clients) into `actor.run(context)`.
/// 3. **Run**: spawn the run loop in a background task.
///
/// ```rust
/// use actor_framework::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Counter { id: u32, hits: u32 }
/// #[derive(Debug)] struct CounterCreate;
/// #[derive(Debug)] enum CounterAction { Hit }
/// #[derive(Debug, thiserror::Error)] #[error("counter error")] struct CounterError;
///
/// #[async_trait]
/// impl ActorEntity for Counter {
///     type Id = u32;
///     type Create = CounterCreate;
///     type Update = std::convert::Infallible;
///     type Action = CounterAction;
///     type ActionResult = u32;
///     type Context = ();
///     type Error = CounterError;
///
///     fn from_create_params(id: u32, _: CounterCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, hits: 0 })
///     }
///     async fn on_update(&mut self, update: std::convert::Infallible, _: &()) -> Result<(), Self::Error> {
///         match update {}
///     }
///     async fn handle_action(&mut self, _: CounterAction, _: &()) -> Result<u32, Self::Error> {
///         self.hits += 1;
///         Ok(self.hits)
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Counter>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let id = client.create(CounterCreate).await.unwrap();
///     assert_eq!(client.perform_action(id, CounterAction::Hit).await.unwrap(), 1);
/// }
/// ```
///
/// # Store
///
/// Entities live in a `BTreeMap` keyed by id; ids come from a `u32` counter starting at 1,
/// so `list()` and `query()` return entities in creation order.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id: u32,
    entity_type: &'static str,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the request channel; clients wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        // "coffee_queue::model::order::Order" -> "Order"
        let entity_type = std::any::type_name::<T>()
            .rsplit("::")
            .next()
            .unwrap_or("Unknown");
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id: 1,
            entity_type,
        };
        (actor, ResourceClient::new(sender))
    }

    /// Runs the actor's event loop until every client has been dropped.
    ///
    /// The `context` is lent to every hook, so entities can reach dependencies that were
    /// created after this actor.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = self.entity_type;
        info!(entity_type, "Actor started");

        while let Some(request) = self.receiver.recv().await {
            debug!(entity_type, kind = request.kind(), "Request");
            match request {
                ResourceRequest::Create { params, respond_to } => {
                    self.handle_create(params, respond_to, &context).await
                }
                ResourceRequest::Get { id, respond_to } => self.handle_get(id, respond_to),
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => self.handle_update(id, update, respond_to, &context).await,
                ResourceRequest::Delete { id, respond_to } => {
                    self.handle_delete(id, respond_to, &context).await
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => self.handle_action(id, action, respond_to, &context).await,
                ResourceRequest::Query { filter, respond_to } => {
                    self.handle_query(filter, respond_to)
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn handle_create(
        &mut self,
        params: T::Create,
        respond_to: Response<T::Id>,
        context: &T::Context,
    ) {
        let entity_type = self.entity_type;
        debug!(entity_type, ?params, "Create");
        let id = T::Id::from(self.next_id);

        let mut item = match T::from_create_params(id.clone(), params) {
            Ok(item) => item,
            Err(e) => {
                warn!(entity_type, error = %e, "Create failed");
                let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                return;
            }
        };

        if let Some(key) = item.unique_key() {
            let taken = self
                .store
                .values()
                .any(|existing| existing.unique_key().as_deref() == Some(key.as_str()));
            if taken {
                warn!(entity_type, %key, "Unique key already taken");
                let _ = respond_to.send(Err(FrameworkError::Conflict(key)));
                return;
            }
        }

        if let Err(e) = item.on_create(context).await {
            warn!(entity_type, error = %e, "on_create failed");
            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
            return;
        }

        // The counter only advances for stored entities.
        self.next_id += 1;
        self.store.insert(id.clone(), item);
        info!(entity_type, %id, size = self.store.len(), "Created");
        let _ = respond_to.send(Ok(id));
    }

    fn handle_get(&self, id: T::Id, respond_to: Response<Option<T>>) {
        let item = self.store.get(&id).cloned();
        debug!(entity_type = self.entity_type, %id, found = item.is_some(), "Get");
        let _ = respond_to.send(Ok(item));
    }

    async fn handle_update(
        &mut self,
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
        context: &T::Context,
    ) {
        let entity_type = self.entity_type;
        debug!(entity_type, %id, ?update, "Update");
        let Some(item) = self.store.get_mut(&id) else {
            warn!(entity_type, %id, "Not found");
            let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
            return;
        };

        // Work on a copy so a failed hook leaves the stored entity untouched.
        let mut updated = item.clone();
        match updated.on_update(update, context).await {
            Ok(()) => {
                *item = updated.clone();
                info!(entity_type, %id, "Updated");
                let _ = respond_to.send(Ok(updated));
            }
            Err(e) => {
                warn!(entity_type, %id, error = %e, "Update failed");
                let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
            }
        }
    }

    async fn handle_delete(&mut self, id: T::Id, respond_to: Response<()>, context: &T::Context) {
        let entity_type = self.entity_type;
        let Some(item) = self.store.get(&id) else {
            warn!(entity_type, %id, "Not found");
            let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
            return;
        };

        if let Err(e) = item.on_delete(context).await {
            warn!(entity_type, %id, error = %e, "on_delete failed");
            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
            return;
        }
        self.store.remove(&id);
        info!(entity_type, %id, size = self.store.len(), "Deleted");
        let _ = respond_to.send(Ok(()));
    }

    async fn handle_action(
        &mut self,
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
        context: &T::Context,
    ) {
        let entity_type = self.entity_type;
        debug!(entity_type, %id, ?action, "Action");
        let Some(item) = self.store.get_mut(&id) else {
            warn!(entity_type, %id, "Not found");
            let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
            return;
        };

        let result = item
            .handle_action(action, context)
            .await
            .map_err(|e| FrameworkError::EntityError(Box::new(e)));
        match &result {
            Ok(outcome) => info!(entity_type, %id, ?outcome, "Action ok"),
            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
        }
        let _ = respond_to.send(result);
    }

    fn handle_query(&self, filter: Filter<T>, respond_to: Response<Vec<T>>) {
        let matches: Vec<T> = self
            .store
            .values()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect();
        debug!(
            entity_type = self.entity_type,
            scanned = self.store.len(),
            matched = matches.len(),
            "Query"
        );
        let _ = respond_to.send(Ok(matches));
    }
}
