//! # Generic Actor Server
//!
//! The `ResourceActor` owns one store's records and processes requests sequentially, which
//! gives every request exclusive access to the store without any locking.

use super::client::ResourceClient;
use super::entity::ActorEntity;
use super::error::FrameworkError;
use super::message::ResourceRequest;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of records.
///
/// Usage follows three steps:
///
/// 1. **Create**: `ResourceActor::new()` returns the actor (server) and its client.
/// 2. **Wire**: pass dependencies into `actor.run(context)`.
/// 3. **Run**: spawn the run loop on a runtime.
///
/// ## Operations
///
/// * **Insert**: rejects an id that is already stored with [`FrameworkError::AlreadyExists`].
/// * **Get** / **Find** / **FindAll**: return clones; never fail.
/// * **FindOrCreate**: scans with [`ActorEntity::matches`]; on a miss, generates an id with
///   [`ActorEntity::new_id`], builds the record, runs `on_create`, then stores it.
/// * **Action**: looks the record up mutably and hands it the action.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: HashMap<T::Id, T>,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` bounds the request queue; `timeout` bounds every round trip made by the
    /// returned client.
    pub fn new(buffer_size: usize, timeout: Duration) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: HashMap::new(),
        };
        let client = ResourceClient::new(sender).with_timeout(timeout);
        (actor, client)
    }

    /// Runs the actor's event loop, processing messages until every client is dropped.
    pub async fn run(mut self, context: T::Context) {
        // Extract just the type name (e.g., "User" instead of "userstore_binding::model::user::User")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Insert { entity, respond_to } => {
                    let id = entity.id().clone();
                    if self.store.contains_key(&id) {
                        warn!(entity_type, %id, "Already exists");
                        let _ = respond_to.send(Err(FrameworkError::AlreadyExists(id.to_string())));
                        continue;
                    }
                    self.store.insert(id.clone(), entity);
                    info!(entity_type, %id, size = self.store.len(), "Inserted");
                    let _ = respond_to.send(Ok(id));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Find { query, respond_to } => {
                    let item = self.store.values().find(|item| item.matches(&query)).cloned();
                    debug!(entity_type, ?query, found = item.is_some(), "Find");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::FindAll { query, respond_to } => {
                    let items: Vec<T> = self
                        .store
                        .values()
                        .filter(|item| item.matches(&query))
                        .cloned()
                        .collect();
                    debug!(entity_type, ?query, count = items.len(), "FindAll");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::FindOrCreate {
                    query,
                    params,
                    respond_to,
                } => {
                    if let Some(existing) = self.store.values().find(|item| item.matches(&query)) {
                        debug!(entity_type, id = %existing.id(), "FindOrCreate hit");
                        let _ = respond_to.send(Ok(existing.clone()));
                        continue;
                    }

                    debug!(entity_type, ?params, "FindOrCreate miss");
                    let id = T::new_id();
                    match T::from_create_params(id.clone(), params) {
                        Ok(mut item) => {
                            if let Err(e) = item.on_create(&context).await {
                                warn!(entity_type, error = %e, "on_create failed");
                                let _ =
                                    respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            self.store.insert(id.clone(), item.clone());
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(item));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    if let Some(item) = self.store.get_mut(&id) {
                        let result = item
                            .handle_action(action, &context)
                            .await
                            .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                        match &result {
                            Ok(_) => info!(entity_type, %id, "Action ok"),
                            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                        }
                        let _ = respond_to.send(result);
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
