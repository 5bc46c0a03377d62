use comments_client::{
    api::{CommentId, LoginForm, NewComment, PostId},
    Dashboard, Error, HttpRemote, KeyValueStore, LoadState, MemoryStore, PersistedState, Remote,
};
use comments_mock_server::{generate_comments, MockServer, SharedServer};

async fn serve(count: usize) -> (HttpRemote, SharedServer) {
    let (addr, server) = comments_mock_server::spawn(MockServer::generate(count, 7))
        .await
        .expect("spawning mock server");
    (HttpRemote::new(format!("http://{addr}/")), server)
}

fn logged_in() -> PersistedState<MemoryStore> {
    let mut state = PersistedState::open(MemoryStore::new()).unwrap();
    state
        .log_in(&LoginForm {
            username: String::from("admin"),
            password: String::from("admin"),
        })
        .unwrap();
    state
}

fn ids(d: &Dashboard<MemoryStore>) -> Vec<u64> {
    d.view().merged().iter().map(|c| c.id.0).collect()
}

#[tokio::test]
async fn fetches_comments() {
    let (remote, _server) = serve(12).await;
    let comments = remote.fetch_comments().await.unwrap();
    assert_eq!(comments, generate_comments(12, 7));
}

#[tokio::test]
async fn delete_remote_comment() {
    let (remote, server) = serve(3).await;
    let mut d = Dashboard::open(logged_in()).unwrap();
    d.load(&remote).await.unwrap();
    assert_eq!(ids(&d), vec![1, 2, 3]);

    d.delete_and_notify(&remote, CommentId(2)).await.unwrap();
    assert_eq!(ids(&d), vec![1, 3]);
    assert_eq!(
        d.persisted().store().get("deletedCommentIds").unwrap(),
        Some(String::from("[2]"))
    );
    assert_eq!(server.lock().await.test_deletions(), &[CommentId(2)]);

    // the server still has it, but it stays hidden
    d.load(&remote).await.unwrap();
    assert_eq!(ids(&d), vec![1, 3]);
}

#[tokio::test]
async fn deleted_local_comment_stays_gone() {
    let (remote, _server) = serve(3).await;
    let mut state = logged_in();
    state
        .push_local_comment(comments_client::api::Comment {
            id: CommentId(500),
            post_id: PostId::DEFAULT,
            name: String::from("local"),
            email: String::from("local@example.org"),
            body: String::from("created earlier"),
        })
        .unwrap();
    let mut d = Dashboard::open(state).unwrap();
    d.load(&remote).await.unwrap();
    assert_eq!(ids(&d), vec![1, 2, 3, 500]);

    d.delete_and_notify(&remote, CommentId(500)).await.unwrap();
    assert!(d.persisted().local_comments().unwrap().is_empty());

    d.load(&remote).await.unwrap();
    assert_eq!(ids(&d), vec![1, 2, 3]);
}

#[tokio::test]
async fn create_comment() {
    let (remote, server) = serve(3).await;
    let mut d = Dashboard::open(logged_in()).unwrap();
    let form = NewComment {
        name: String::from("Jane"),
        email: String::from("jane@example.org"),
        body: String::from("Posted over HTTP"),
    };

    let created = d.create(&remote, &form).await.unwrap();
    assert_eq!(created.id, CommentId(4));
    assert_eq!(created.post_id, PostId::DEFAULT);
    assert_eq!(created.body, "Posted over HTTP");
    assert_eq!(ids(&d), vec![1, 2, 3, 4]);
    assert_eq!(server.lock().await.test_creations(), &[form.clone()]);

    // the server keeps answering with the same id, the local one moves on
    let again = d.create(&remote, &form).await.unwrap();
    assert_eq!(again.id, CommentId(5));
}

#[tokio::test]
async fn search_over_fetched_comments() {
    let (remote, _server) = serve(30).await;
    let mut d = Dashboard::open(logged_in()).unwrap();
    d.load(&remote).await.unwrap();

    let body = &d.view().merged()[17].body;
    let needle = body.split(' ').nth(2).unwrap().to_uppercase();
    d.set_search(needle.clone());
    assert!(d.view().filtered().iter().any(|c| c.id == CommentId(18)));
    for c in d.view().filtered().iter() {
        assert!(c.body.to_lowercase().contains(&needle.to_lowercase()));
    }
}

#[tokio::test]
async fn failed_fetch_is_reported() {
    let (remote, server) = serve(3).await;
    server.lock().await.set_failing(true);
    let mut d = Dashboard::open(logged_in()).unwrap();

    let err = d.load(&remote).await.unwrap_err();
    assert!(matches!(err, Error::Remote(_)));
    assert!(format!("{err}").contains("failure injected by test"), "{err}");
    assert!(matches!(d.load_state(), LoadState::Failed(_)));
    assert!(d.view().merged().is_empty());

    server.lock().await.set_failing(false);
    d.load(&remote).await.unwrap();
    assert_eq!(d.load_state(), &LoadState::Loaded);
    assert_eq!(ids(&d), vec![1, 2, 3]);
}

#[tokio::test]
async fn deletion_stands_when_server_fails() {
    let (remote, server) = serve(3).await;
    let mut d = Dashboard::open(logged_in()).unwrap();
    d.load(&remote).await.unwrap();

    server.lock().await.set_failing(true);
    d.delete_and_notify(&remote, CommentId(1)).await.unwrap();
    assert_eq!(ids(&d), vec![2, 3]);
    assert!(server.lock().await.test_deletions().is_empty());
}

#[tokio::test]
async fn unreachable_server() {
    // nothing listens on the discard port
    let remote = HttpRemote::new("http://127.0.0.1:9");
    let mut d = Dashboard::open(logged_in()).unwrap();
    assert!(matches!(d.load(&remote).await, Err(Error::Remote(_))));
}
