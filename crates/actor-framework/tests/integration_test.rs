use actor_framework::{ActorEntity, FrameworkError, ResourceActor, ResourceClient};
use async_trait::async_trait;

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Locker {
    id: u32,
    label: String,
    holder: Option<String>,
    capacity: u32,
}

#[derive(Debug)]
struct LockerCreate {
    label: String,
    capacity: u32,
}

#[derive(Debug)]
struct LockerUpdate {
    capacity: u32,
}

#[derive(Debug)]
enum LockerAction {
    Claim(String),
    Release,
}

#[derive(Debug, PartialEq, thiserror::Error)]
enum LockerError {
    #[error("label must not be empty")]
    EmptyLabel,
    #[error("capacity must be positive")]
    ZeroCapacity,
}

#[async_trait]
impl ActorEntity for Locker {
    type Id = u32;
    type Create = LockerCreate;
    type Update = LockerUpdate;
    type Action = LockerAction;
    type ActionResult = bool;
    type Context = ();
    type Error = LockerError;

    fn from_create_params(id: u32, params: LockerCreate) -> Result<Self, Self::Error> {
        if params.label.is_empty() {
            return Err(LockerError::EmptyLabel);
        }
        Ok(Self {
            id,
            label: params.label,
            holder: None,
            capacity: params.capacity,
        })
    }

    fn unique_key(&self) -> Option<String> {
        Some(self.label.clone())
    }

    async fn on_update(
        &mut self,
        update: LockerUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        // Mutate first so a rejected update proves the store kept the old copy.
        self.capacity = update.capacity;
        if update.capacity == 0 {
            return Err(LockerError::ZeroCapacity);
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: LockerAction,
        _ctx: &Self::Context,
    ) -> Result<bool, Self::Error> {
        match action {
            LockerAction::Claim(who) => {
                if self.holder.is_some() {
                    return Ok(false);
                }
                self.holder = Some(who);
                Ok(true)
            }
            LockerAction::Release => Ok(self.holder.take().is_some()),
        }
    }
}

fn start() -> ResourceClient<Locker> {
    let (actor, client) = ResourceActor::new(10);
    tokio::spawn(actor.run(()));
    client
}

fn locker(label: &str) -> LockerCreate {
    LockerCreate {
        label: label.into(),
        capacity: 1,
    }
}

// --- Tests ---

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let client = start();

    // 1. Create
    let id = client.create(locker("A1")).await.unwrap();
    assert_eq!(id, 1);

    // 2. Action
    assert!(client
        .perform_action(id, LockerAction::Claim("ann".into()))
        .await
        .unwrap());
    assert!(!client
        .perform_action(id, LockerAction::Claim("bob".into()))
        .await
        .unwrap());
    let stored = client.get(id).await.unwrap().unwrap();
    assert_eq!(stored.holder.as_deref(), Some("ann"));

    // 3. Update
    let updated = client.update(id, LockerUpdate { capacity: 4 }).await.unwrap();
    assert_eq!(updated.capacity, 4);

    // 4. Delete
    client.delete(id).await.unwrap();
    assert!(client.get(id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_unique_key_conflict_does_not_consume_an_id() {
    let client = start();

    assert_eq!(client.create(locker("A1")).await.unwrap(), 1);
    let dup = client.create(locker("A1")).await;
    assert!(matches!(dup, Err(FrameworkError::Conflict(ref key)) if key == "A1"));

    assert_eq!(client.create(locker("A2")).await.unwrap(), 2);
    assert_eq!(client.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_create_validation_error_is_downcastable() {
    let client = start();

    let err = client.create(locker("")).await.unwrap_err();
    assert_eq!(err.entity_error::<LockerError>(), Some(&LockerError::EmptyLabel));
    assert!(client.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_update_keeps_stored_entity() {
    let client = start();
    let id = client.create(locker("B7")).await.unwrap();

    let err = client.update(id, LockerUpdate { capacity: 0 }).await.unwrap_err();
    assert_eq!(err.entity_error::<LockerError>(), Some(&LockerError::ZeroCapacity));
    assert_eq!(client.get(id).await.unwrap().unwrap().capacity, 1);
}

#[tokio::test]
async fn test_missing_ids_report_not_found() {
    let client = start();

    assert!(client.get(42).await.unwrap().is_none());
    assert!(matches!(
        client.delete(42).await,
        Err(FrameworkError::NotFound(_))
    ));
    assert!(matches!(
        client.perform_action(42, LockerAction::Release).await,
        Err(FrameworkError::NotFound(_))
    ));
    assert!(matches!(
        client.update(42, LockerUpdate { capacity: 2 }).await,
        Err(FrameworkError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_query_returns_matches_in_id_order() {
    let client = start();
    for label in ["C3", "C1", "C2"] {
        client.create(locker(label)).await.unwrap();
    }
    client
        .perform_action(2, LockerAction::Claim("cy".into()))
        .await
        .unwrap();

    let free = client.query(|l: &Locker| l.holder.is_none()).await.unwrap();
    let labels: Vec<&str> = free.iter().map(|l| l.label.as_str()).collect();
    assert_eq!(labels, vec!["C3", "C2"]);

    let ids: Vec<u32> = client.list().await.unwrap().iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_concurrent_claims_have_one_winner() {
    let client = start();
    let id = client.create(locker("D1")).await.unwrap();

    let mut handles = Vec::new();
    for n in 0..8 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client
                .perform_action(id, LockerAction::Claim(format!("worker-{n}")))
                .await
                .unwrap()
        }));
    }

    let mut wins = 0;
    for handle in handles {
        if handle.await.unwrap() {
            wins += 1;
        }
    }
    assert_eq!(wins, 1);
}

#[tokio::test]
async fn test_dropped_clients_stop_the_actor() {
    let (actor, client) = ResourceActor::<Locker>::new(4);
    let handle = tokio::spawn(actor.run(()));

    client.create(locker("E1")).await.unwrap();
    drop(client);
    handle.await.unwrap();
}
