use userstore_binding::clients::{ChannelClient, UserClient};
use userstore_binding::config::BindingConfig;
use userstore_binding::dispatch::{dispatch, CommandInvocation, CreateDm, SuspendUser};
use userstore_binding::error::{BindingError, ErrorType};
use userstore_binding::framework::mock::MockClient;
use userstore_binding::framework::FrameworkError;
use userstore_binding::lifecycle::{BackendClients, BindingContext};
use userstore_binding::model::{Channel, User, UserFlags};
use userstore_binding::resolution::resolve;

async fn seeded() -> BindingContext {
    let context = BindingContext::start(BindingConfig::default());
    let users = &context.clients().users;
    for (id, name) in [("A", "alice"), ("B", "bob")] {
        users.insert_user(User::new(id, name, "0001")).await.unwrap();
    }
    context
}

#[tokio::test]
async fn test_create_dm_twice_returns_same_channel() {
    let context = seeded().await;
    let db = context.open();

    let first = dispatch(&db, CommandInvocation::new(CreateDm::new("A", "B")))
        .await
        .unwrap();
    let second = dispatch(&db, CommandInvocation::new(CreateDm::new("A", "B")))
        .await
        .unwrap();

    assert!(first.error.is_none() && second.error.is_none());
    let first = first.into_result().unwrap();
    let second = second.into_result().unwrap();
    assert_eq!(first.id(), second.id());

    let channels = context
        .clients()
        .channels
        .find_direct_messages("A".into())
        .await
        .unwrap();
    assert_eq!(channels.len(), 1);
}

#[tokio::test]
async fn test_create_dm_with_self_returns_saved_messages() {
    let context = seeded().await;
    let db = context.open();

    let outcome = dispatch(&db, CommandInvocation::new(CreateDm::new("A", "A")))
        .await
        .unwrap();
    assert!(matches!(
        outcome.into_result().unwrap(),
        Channel::SavedMessages { user, .. } if user == "A"
    ));
}

#[tokio::test]
async fn test_create_dm_with_unknown_user_reports_not_found() {
    let context = seeded().await;
    let db = context.open();

    let outcome = dispatch(&db, CommandInvocation::new(CreateDm::new("A", "Z")))
        .await
        .unwrap();
    assert!(outcome.payload.is_none());
    assert_eq!(outcome.error.unwrap().error_type, ErrorType::NotFound);
}

#[tokio::test]
async fn test_suspend_indefinitely_with_reasons() {
    let context = seeded().await;
    let db = context.open();
    let handle = db.fetch_user("B");
    resolve(&db, &handle).await.unwrap();

    let invocation = CommandInvocation::new(SuspendUser::new(handle, 0, "spam|abuse"));
    assert_eq!(invocation.name(), "users_suspend");
    let outcome = dispatch(&db, invocation).await.unwrap();
    assert!(outcome.is_success());

    let stored = context.clients().users.fetch_user("B").await.unwrap();
    assert!(stored.has_flag(UserFlags::SuspendedUntil));
    assert!(stored.suspended_until.is_none());
    assert_eq!(
        stored.suspension_reasons,
        Some(vec!["spam".to_string(), "abuse".to_string()])
    );
}

#[tokio::test]
async fn test_suspend_for_days_sets_expiry() {
    let context = seeded().await;
    let db = context.open();
    let handle = db.fetch_user("A");
    resolve(&db, &handle).await.unwrap();

    dispatch(&db, CommandInvocation::new(SuspendUser::new(handle, 7, "")))
        .await
        .unwrap()
        .into_result()
        .unwrap();

    let stored = context.clients().users.fetch_user("A").await.unwrap();
    assert!(stored.suspended_until.is_some());
    assert!(stored.suspension_reasons.is_none());
}

fn mocked() -> (MockClient<User>, MockClient<Channel>, BindingContext) {
    let users = MockClient::<User>::new();
    let channels = MockClient::<Channel>::new();
    let context = BindingContext::with_backend(
        BindingConfig::default(),
        BackendClients {
            users: UserClient::new(users.client()),
            channels: ChannelClient::new(channels.client()),
        },
    );
    (users, channels, context)
}

#[tokio::test]
async fn test_invalid_suspend_never_reaches_backend() {
    let (mut users, channels, context) = mocked();
    let db = context.open();

    users
        .expect_get("A".to_string())
        .return_ok(Some(User::new("A", "alice", "0001")));
    let handle = db.fetch_user("A");
    resolve(&db, &handle).await.unwrap();
    assert_eq!(users.request_count(), 1);

    for (days, reason) in [(-5, "spam"), (-1, ""), (1, "spam||abuse"), (i64::from(u32::MAX) + 1, "")] {
        let result = dispatch(
            &db,
            CommandInvocation::new(SuspendUser::new(handle.clone(), days, reason)),
        )
        .await;
        assert!(matches!(result, Err(BindingError::InvalidArgument { .. })), "{days} {reason}");
    }

    assert_eq!(users.request_count(), 1);
    assert_eq!(channels.request_count(), 0);
    users.verify();
}

#[tokio::test]
async fn test_suspend_requires_resolved_handle() {
    let (mut users, _channels, context) = mocked();
    let db = context.open();

    let pending = db.fetch_user("A");
    let result = dispatch(&db, CommandInvocation::new(SuspendUser::new(pending, 1, ""))).await;
    assert!(matches!(result, Err(BindingError::UnresolvedHandle { .. })));

    users.expect_get("B".to_string()).return_ok(None);
    let failed = db.fetch_user("B");
    resolve(&db, &failed).await.unwrap();
    let result = dispatch(&db, CommandInvocation::new(SuspendUser::new(failed, 1, ""))).await;
    assert!(matches!(result, Err(BindingError::UnresolvedHandle { .. })));

    assert_eq!(users.request_count(), 1);
    users.verify();
}

#[tokio::test]
async fn test_empty_dm_participant_is_rejected_locally() {
    let (users, channels, context) = mocked();
    let db = context.open();

    let result = dispatch(&db, CommandInvocation::new(CreateDm::new("", "B"))).await;
    assert!(matches!(result, Err(BindingError::InvalidArgument { argument: "user_a", .. })));
    assert_eq!(users.request_count() + channels.request_count(), 0);
}

#[tokio::test]
async fn test_transport_fault_surfaces_as_backend_unavailable() {
    let (mut users, channels, context) = mocked();
    let db = context.open();

    users
        .expect_get("A".to_string())
        .return_err(FrameworkError::ActorClosed);
    let outcome = dispatch(&db, CommandInvocation::new(CreateDm::new("A", "B")))
        .await
        .unwrap();

    let error = outcome.error.unwrap();
    assert!(error.is_transport());
    assert_eq!(error.kind(), "BackendUnavailable");
    assert_eq!(channels.request_count(), 0);
    users.verify();
}

#[tokio::test]
async fn test_channel_store_timeout_after_users_found() {
    let (mut users, mut channels, context) = mocked();
    let db = context.open();

    users
        .expect_get("A".to_string())
        .return_ok(Some(User::new("A", "alice", "0001")));
    users
        .expect_get("B".to_string())
        .return_ok(Some(User::new("B", "bob", "0001")));
    channels
        .expect_find_or_create()
        .return_err(FrameworkError::Timeout(std::time::Duration::from_millis(50)));

    let value = dispatch(&db, CommandInvocation::new(CreateDm::new("A", "B")))
        .await
        .unwrap()
        .into_value()
        .unwrap();

    assert_eq!(value["error"]["type"], "BackendUnavailable");
    assert_eq!(value.as_object().unwrap().len(), 1);
    users.verify();
    channels.verify();
}

#[tokio::test]
async fn test_suspend_failure_is_reported_as_data() {
    let (mut users, _channels, context) = mocked();
    let db = context.open();

    users
        .expect_get("A".to_string())
        .return_ok(Some(User::new("A", "alice", "0001")));
    users
        .expect_action("A".to_string())
        .return_err(FrameworkError::NotFound("A".into()));

    let handle = db.fetch_user("A");
    resolve(&db, &handle).await.unwrap();
    let outcome = dispatch(&db, CommandInvocation::new(SuspendUser::new(handle, 3, "spam")))
        .await
        .unwrap();

    assert_eq!(outcome.error.unwrap().error_type, ErrorType::NotFound);
    users.verify();
}

#[tokio::test]
async fn test_duration_bounds_against_real_store() {
    let context = seeded().await;
    let db = context.open();
    let handle = db.fetch_user("A");
    resolve(&db, &handle).await.unwrap();

    for days in [100_000_000, i64::from(u32::MAX)] {
        let result = dispatch(
            &db,
            CommandInvocation::new(SuspendUser::new(handle.clone(), days, "spam")),
        )
        .await;
        assert!(
            matches!(result, Err(BindingError::InvalidArgument { argument: "duration", .. })),
            "{days}"
        );
    }

    let accepted = dispatch(
        &db,
        CommandInvocation::new(SuspendUser::new(handle.clone(), 90_000_000, "spam")),
    )
    .await
    .unwrap();
    assert!(accepted.is_success(), "{:?}", accepted.error);

    let stored = context.clients().users.fetch_user("A").await.unwrap();
    assert!(stored.suspended_until.is_some());
    assert!(context.clients().users.fetch_user("B").await.is_ok());
}
