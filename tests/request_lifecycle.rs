mod common;

use std::sync::Arc;

use common::mock_api::MockPostsApi;
use common::recording::RecordingSink;
use postboard::api::{ApiError, ValidationErrors};
use postboard::blog::{BlogAction, BlogState, Post, PostDraft};
use postboard::request::{
    CancelSignal, CoordinatorError, Operation, Payload, RequestCoordinator, RequestFailure,
    RequestKind, Settled,
};
use postboard::BlogStore;

fn post(id: &str, title: &str) -> Post {
    PostDraft::new(title).into_post(id)
}

fn server_error() -> ApiError {
    ApiError::Status {
        status: 500,
        message: "Internal Server Error".to_string(),
    }
}

fn setup(api: MockPostsApi, initial: BlogState) -> (Arc<MockPostsApi>, BlogStore, RequestCoordinator) {
    let api = Arc::new(api);
    let store = BlogStore::new(initial);
    let coordinator = RequestCoordinator::new(api.clone(), Arc::new(store.clone()));
    (api, store, coordinator)
}

fn recording(api: MockPostsApi) -> (Arc<MockPostsApi>, Arc<RecordingSink>, RequestCoordinator) {
    let api = Arc::new(api);
    let sink = Arc::new(RecordingSink::default());
    let coordinator = RequestCoordinator::new(api.clone(), sink.clone());
    (api, sink, coordinator)
}

#[tokio::test]
async fn fetch_emits_started_then_succeeded_with_same_token() {
    let (_api, sink, coordinator) =
        recording(MockPostsApi::with_posts(vec![post("1", "A")]));

    let settled = coordinator
        .run(Operation::FetchAll, &CancelSignal::new())
        .await
        .unwrap();
    assert_eq!(settled, Settled::Fulfilled(Payload::Posts(vec![post("1", "A")])));

    let actions = sink.actions();
    assert_eq!(
        sink.type_names(),
        vec!["blog/getPostList/pending", "blog/getPostList/fulfilled"]
    );
    let started = actions[0].request().unwrap().request_id;
    let finished = actions[1].request().unwrap().request_id;
    assert_eq!(started, finished);
}

#[tokio::test]
async fn each_invocation_gets_a_fresh_token() {
    let (_api, sink, coordinator) = recording(MockPostsApi::new());
    let first = coordinator.fetch_posts();
    let second = coordinator.fetch_posts();
    assert_ne!(first.request_id(), second.request_id());
    first.wait().await.unwrap();
    second.wait().await.unwrap();
    assert_eq!(sink.actions().len(), 4);
}

#[tokio::test]
async fn fetch_success_populates_store() {
    let (_api, store, coordinator) = setup(
        MockPostsApi::with_posts(vec![post("1", "A"), post("2", "B")]),
        BlogState::default(),
    );

    coordinator.fetch_posts().wait().await.unwrap();

    let state = store.get_state();
    assert_eq!(state.items.len(), 2);
    assert!(!state.is_loading());
}

#[tokio::test]
async fn transport_failure_propagates_and_releases_loading() {
    let api = MockPostsApi::new();
    api.fail_next("fetch", server_error());
    let (_api, store, coordinator) = setup(api, BlogState::with_posts(vec![post("1", "A")]));

    let err = coordinator.fetch_posts().wait().await.unwrap_err();
    match err {
        CoordinatorError::Api { kind, source, .. } => {
            assert_eq!(kind, RequestKind::FetchAll);
            assert!(matches!(source, ApiError::Status { status: 500, .. }));
        }
        other => panic!("expected Api error, got {:?}", other),
    }

    let state = store.get_state();
    assert!(!state.is_loading());
    assert_eq!(state.items, vec![post("1", "A")]);
}

#[tokio::test]
async fn transport_failure_is_announced_to_the_reducer() {
    let api = MockPostsApi::new();
    api.fail_next("fetch", server_error());
    let (_api, sink, coordinator) = recording(api);

    let _ = coordinator.run(Operation::FetchAll, &CancelSignal::new()).await;

    match sink.actions().last() {
        Some(BlogAction::RequestFailed {
            error: RequestFailure::Transport { message },
            ..
        }) => assert!(message.contains("500")),
        other => panic!("expected transport failure action, got {:?}", other),
    }
}

#[tokio::test]
async fn create_validation_failure_is_value_carrying() {
    let api = MockPostsApi::new();
    let errors = ValidationErrors::default().with_field("title", "Title is required");
    api.fail_next("create:", ApiError::Validation(errors.clone()));
    let (_api, store, coordinator) = setup(api, BlogState::default());

    let settled = coordinator
        .create_post(PostDraft::new(""))
        .wait()
        .await
        .unwrap();
    assert_eq!(settled, Settled::Rejected(errors));

    let state = store.get_state();
    assert!(state.is_empty());
    assert!(!state.is_loading());
}

#[tokio::test]
async fn update_validation_failure_is_value_carrying() {
    let api = MockPostsApi::with_posts(vec![post("1", "A")]);
    api.fail_next(
        "update:1",
        ApiError::Validation(ValidationErrors::default().with_field("publishDate", "bad")),
    );
    let (_api, sink, coordinator) = recording(api);

    let settled = coordinator
        .update_post("1", post("1", "A2"))
        .wait()
        .await
        .unwrap();
    assert!(matches!(settled, Settled::Rejected(_)));
    assert!(matches!(
        sink.actions().last(),
        Some(BlogAction::RequestFailed {
            error: RequestFailure::Validation(_),
            ..
        })
    ));
}

#[tokio::test]
async fn delete_validation_failure_is_a_fault() {
    let api = MockPostsApi::with_posts(vec![post("1", "A")]);
    api.fail_next("delete:1", ApiError::Validation(ValidationErrors::default()));
    let (_api, store, coordinator) = setup(api, BlogState::with_posts(vec![post("1", "A")]));

    let result = coordinator.delete_post("1").wait().await;
    assert!(matches!(result, Err(CoordinatorError::Api { .. })));
    assert_eq!(store.get_state().len(), 1);
    assert!(!store.get_state().is_loading());
}

#[tokio::test]
async fn create_appends_server_assigned_post() {
    let (api, store, coordinator) = setup(MockPostsApi::new(), BlogState::default());

    let settled = coordinator
        .create_post(PostDraft::new("Hello"))
        .wait()
        .await
        .unwrap();

    let state = store.get_state();
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].id, "srv-1");
    assert_eq!(settled, Settled::Fulfilled(Payload::Post(state.items[0].clone())));
    assert_eq!(api.stored(), state.items);
}

#[tokio::test]
async fn update_replaces_matching_post() {
    let seed = vec![post("1", "A"), post("2", "B")];
    let (_api, store, coordinator) =
        setup(MockPostsApi::with_posts(seed.clone()), BlogState::with_posts(seed));

    coordinator
        .update_post("2", post("2", "B2"))
        .wait()
        .await
        .unwrap();

    let state = store.get_state();
    assert_eq!(state.items[1].title, "B2");
    assert_eq!(state.items[0].title, "A");
}

#[tokio::test]
async fn delete_removes_requested_id() {
    let seed = vec![post("1", "A"), post("2", "B"), post("3", "C")];
    let (api, store, coordinator) =
        setup(MockPostsApi::with_posts(seed.clone()), BlogState::with_posts(seed));

    coordinator.delete_post("2").wait().await.unwrap();

    let ids: Vec<String> = store.get_state().items.iter().map(|p| p.id.clone()).collect();
    assert_eq!(ids, vec!["1", "3"]);
    assert_eq!(api.calls(), vec!["delete:2"]);
}

#[tokio::test]
async fn late_response_from_superseded_request_keeps_loading() {
    let api = MockPostsApi::with_posts(vec![post("1", "A")]);
    let fetch_gate = api.hold("fetch");
    let create_gate = api.hold("create:B");
    let (_api, store, coordinator) = setup(api, BlogState::default());

    let fetch = coordinator.fetch_posts();
    let create = coordinator.create_post(PostDraft::new("B"));
    assert_eq!(store.get_state().in_flight, Some(create.request_id()));

    fetch_gate.notify_one();
    fetch.wait().await.unwrap();

    let state = store.get_state();
    assert!(state.is_loading(), "newer request still pending");
    assert_eq!(state.in_flight, Some(create.request_id()));
    assert_eq!(state.items, vec![post("1", "A")]);

    create_gate.notify_one();
    create.wait().await.unwrap();

    let state = store.get_state();
    assert!(!state.is_loading());
    assert_eq!(state.items.len(), 2);
}

#[tokio::test]
async fn cancelled_request_emits_no_terminal_action() {
    let api = MockPostsApi::with_posts(vec![post("1", "A")]);
    let gate = api.hold("fetch");
    let (_api, sink, coordinator) = recording(api);

    let request = coordinator.fetch_posts();
    request.cancel();
    gate.notify_one();

    assert_eq!(request.wait().await.unwrap(), Settled::Cancelled);
    assert_eq!(sink.type_names(), vec!["blog/getPostList/pending"]);
}

#[tokio::test]
async fn cancelled_request_leaves_collection_untouched() {
    let api = MockPostsApi::with_posts(vec![post("remote", "R")]);
    let gate = api.hold("fetch");
    let (_api, store, coordinator) = setup(api, BlogState::with_posts(vec![post("1", "A")]));

    let request = coordinator.fetch_posts();
    let signal = request.cancel_signal();
    signal.cancel();
    gate.notify_one();
    request.wait().await.unwrap();

    assert_eq!(store.get_state().items, vec![post("1", "A")]);
}

#[tokio::test]
async fn cancel_after_completion_and_double_cancel_are_noops() {
    let (_api, sink, coordinator) = recording(MockPostsApi::new());
    let signal = CancelSignal::new();

    let settled = coordinator.run(Operation::FetchAll, &signal).await.unwrap();
    assert!(matches!(settled, Settled::Fulfilled(_)));

    signal.cancel();
    signal.cancel();
    assert_eq!(sink.actions().len(), 2);
}

#[tokio::test]
async fn pre_cancelled_run_still_announces_start() {
    let (api, sink, coordinator) = recording(MockPostsApi::new());
    let signal = CancelSignal::new();
    signal.cancel();

    let settled = coordinator.run(Operation::FetchAll, &signal).await.unwrap();
    assert_eq!(settled, Settled::Cancelled);
    assert_eq!(sink.type_names(), vec!["blog/getPostList/pending"]);
    assert!(api.calls().is_empty());
}
