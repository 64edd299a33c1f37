use actor_framework::mock::MockClient;
use actor_framework::{ActorClient, FrameworkError};
use coffee_queue::clients::{OrderClient, UserClient};
use coffee_queue::model::{Order, OrderId, RecipeId, RecipeRef, User, UserCreate, UserId};
use coffee_queue::order_actor::OrderError;
use coffee_queue::user_actor::{self, UserError};

fn latte() -> RecipeRef {
    RecipeRef {
        id: RecipeId(1),
        name: "latte".into(),
        price: 350,
    }
}

/// Real User actor with the Order actor mocked out.
///
/// The user's bookkeeping must follow whatever the order actor answers.
async fn user_actor_with(
    orders: &MockClient<Order>,
    username: &str,
    role: &str,
) -> (UserClient, UserId, tokio::task::JoinHandle<()>) {
    let (actor, users) = user_actor::new(10);
    let handle = tokio::spawn(actor.run(OrderClient::new(orders.client())));

    let id = users
        .create_user(UserCreate {
            username: username.into(),
            password: "pw".into(),
            role: role.into(),
        })
        .await
        .expect("Failed to create user");
    (users, id, handle)
}

async fn fetch(users: &UserClient, id: UserId) -> User {
    users
        .get(id)
        .await
        .expect("Failed to get user")
        .expect("User not found")
}

#[tokio::test]
async fn test_place_and_pickup_with_mocked_orders() {
    let mut orders = MockClient::<Order>::new();
    // place_order -> create, pickup_order -> transition to PICKED_UP
    orders.expect_create().return_ok(OrderId(1));
    orders.expect_action(OrderId(1)).return_ok(true);

    let (users, alice, handle) = user_actor_with(&orders, "alice", "customer").await;

    let order_id = users.place_order(alice, latte()).await.unwrap();
    assert_eq!(order_id, OrderId(1));
    let user = fetch(&users, alice).await;
    assert!(user.placed_orders.contains(&order_id));
    assert!(user.order_history.contains(&order_id));

    assert!(users.pickup_order(alice, order_id).await.unwrap());
    let user = fetch(&users, alice).await;
    assert!(user.placed_orders.is_empty());
    assert!(user.order_history.contains(&order_id));

    orders.verify();
    drop(users);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_failed_pickup_keeps_order_placed() {
    let mut orders = MockClient::<Order>::new();
    orders.expect_create().return_ok(OrderId(4));
    orders.expect_action(OrderId(4)).return_ok(false);

    let (users, alice, _handle) = user_actor_with(&orders, "alice", "customer").await;

    let order_id = users.place_order(alice, latte()).await.unwrap();
    assert!(!users.pickup_order(alice, order_id).await.unwrap());
    assert!(fetch(&users, alice).await.placed_orders.contains(&order_id));

    // Not placed by alice: rejected without asking the order actor.
    assert!(!users.pickup_order(alice, OrderId(99)).await.unwrap());
    orders.verify();
}

#[tokio::test]
async fn test_cancel_drops_placed_order_even_when_refused() {
    let mut orders = MockClient::<Order>::new();
    orders.expect_create().return_ok(OrderId(2));
    orders.expect_action(OrderId(2)).return_ok(false);

    let (users, alice, _handle) = user_actor_with(&orders, "alice", "customer").await;

    let order_id = users.place_order(alice, latte()).await.unwrap();
    assert!(users.cancel_placed_order(alice, order_id).await.unwrap());
    assert!(fetch(&users, alice).await.placed_orders.is_empty());
    orders.verify();
}

#[tokio::test]
async fn test_claim_follows_order_answer() {
    let mut orders = MockClient::<Order>::new();
    orders.expect_action(OrderId(5)).return_ok(false);
    orders.expect_action(OrderId(6)).return_ok(true);

    let (users, bob, _handle) = user_actor_with(&orders, "bob", "staff").await;

    assert!(!users.claim_order(bob, OrderId(5)).await.unwrap());
    let user = fetch(&users, bob).await;
    assert_eq!(user.working_order, None);
    assert!(user.order_history.is_empty());

    assert!(users.claim_order(bob, OrderId(6)).await.unwrap());
    let user = fetch(&users, bob).await;
    assert_eq!(user.working_order, Some(OrderId(6)));
    assert!(user.order_history.contains(&OrderId(6)));

    // Already busy: rejected before the order actor is asked.
    assert!(!users.claim_order(bob, OrderId(7)).await.unwrap());
    assert_eq!(fetch(&users, bob).await.working_order, Some(OrderId(6)));
    orders.verify();
}

#[tokio::test]
async fn test_failed_fulfill_keeps_claim() {
    let mut orders = MockClient::<Order>::new();
    orders.expect_action(OrderId(3)).return_ok(true);
    orders.expect_action(OrderId(3)).return_ok(false);
    orders.expect_action(OrderId(3)).return_ok(true);

    let (users, bob, _handle) = user_actor_with(&orders, "bob", "staff").await;

    assert!(users.claim_order(bob, OrderId(3)).await.unwrap());
    assert!(!users.fulfill_current_order(bob).await.unwrap());
    assert_eq!(fetch(&users, bob).await.working_order, Some(OrderId(3)));

    assert!(users.fulfill_current_order(bob).await.unwrap());
    assert_eq!(fetch(&users, bob).await.working_order, None);

    // Nothing left to fulfill.
    assert!(!users.fulfill_current_order(bob).await.unwrap());
    orders.verify();
}

#[tokio::test]
async fn test_return_and_cancel_always_drop_the_claim() {
    let mut orders = MockClient::<Order>::new();
    orders.expect_action(OrderId(1)).return_ok(true);
    orders.expect_action(OrderId(1)).return_ok(false);
    orders.expect_action(OrderId(2)).return_ok(true);
    orders
        .expect_action(OrderId(2))
        .return_err(FrameworkError::NotFound("order_2".into()));

    let (users, bob, _handle) = user_actor_with(&orders, "bob", "staff").await;

    assert!(users.claim_order(bob, OrderId(1)).await.unwrap());
    assert!(users.return_current_order(bob).await.unwrap());
    assert_eq!(fetch(&users, bob).await.working_order, None);

    assert!(users.claim_order(bob, OrderId(2)).await.unwrap());
    assert!(users.cancel_current_order(bob).await.unwrap());
    assert_eq!(fetch(&users, bob).await.working_order, None);

    // No working order: return fails, cancel still succeeds.
    assert!(!users.return_current_order(bob).await.unwrap());
    assert!(users.cancel_current_order(bob).await.unwrap());
    orders.verify();
}

#[tokio::test]
async fn test_order_errors_reach_the_caller() {
    let mut orders = MockClient::<Order>::new();
    orders
        .expect_action(OrderId(9))
        .return_err(FrameworkError::NotFound("order_9".into()));

    let (users, bob, _handle) = user_actor_with(&orders, "bob", "staff").await;

    let result = users.claim_order(bob, OrderId(9)).await;
    assert_eq!(
        result,
        Err(UserError::Order(OrderError::NotFound("order_9".into())))
    );
    assert_eq!(fetch(&users, bob).await.working_order, None);
    orders.verify();
}

#[tokio::test]
async fn test_deleting_busy_staff_releases_the_order() {
    let mut orders = MockClient::<Order>::new();
    orders.expect_action(OrderId(8)).return_ok(true);
    orders.expect_action(OrderId(8)).return_ok(true);

    let (users, bob, _handle) = user_actor_with(&orders, "bob", "staff").await;

    assert!(users.claim_order(bob, OrderId(8)).await.unwrap());
    users.delete(bob).await.unwrap();
    assert!(users.get(bob).await.unwrap().is_none());
    orders.verify();
}
