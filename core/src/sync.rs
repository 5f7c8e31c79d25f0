//! Synchronization flow: load, create, update, and delete against the
//! remote collection, keeping a rendered `ListView` in step.
//!
//! # Design
//! `SyncClient` owns an `ApiClient`, a `Transport`, and the current view.
//! Each operation is one HTTP round trip; mutations re-run `load()` to
//! resynchronize rather than patching the view locally, so after any
//! successful load the view exactly mirrors the server's collection.
//! User-facing notifications come back as `Notice` values instead of
//! being pushed at a UI, which keeps the whole flow testable with a
//! scripted transport.
//!
//! Failures are terminal for their operation: no retry, no backoff, no
//! deduplication of in-flight requests. Update and delete re-run `load()`
//! even when the server rejected the mutation, matching the original
//! front end's behavior of resynchronizing regardless of outcome.

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::Todo;
use crate::view::ListView;

/// Executes one HTTP round trip on behalf of the core.
///
/// Transport-level failures (connection refused, timeout) are reported as
/// [`ApiError::Transport`]; a served error status is a normal
/// `HttpResponse` and is interpreted by the parse methods.
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<F> Transport for F
where
    F: Fn(HttpRequest) -> Result<HttpResponse, ApiError>,
{
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self(request)
    }
}

/// A user-visible notification produced by a sync operation.
///
/// The original front end alerted these; hosts decide how to surface
/// them. Messages for update and delete are fixed strings reported on
/// success and failure alike.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// No session token; the host should route the user to login.
    LoginRequired,
    /// A todo was created; carries the server's copy for diagnostics.
    Created(Todo),
    Updated,
    UpdateFailed,
    Deleted,
    DeleteFailed,
    /// Any other terminal failure, with its display message.
    Error(String),
}

/// Mediates between the rendered list and the remote collection.
#[derive(Debug)]
pub struct SyncClient<T: Transport> {
    api: ApiClient,
    transport: T,
    view: ListView,
}

impl<T: Transport> SyncClient<T> {
    pub fn new(api: ApiClient, transport: T) -> Self {
        Self {
            api,
            transport,
            view: ListView::default(),
        }
    }

    /// The current rendered list.
    pub fn view(&self) -> &ListView {
        &self.view
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Fetch the collection and rebuild the view from scratch.
    ///
    /// A missing session blocks the call before any I/O and leaves the
    /// view untouched; any other failure replaces the view with the
    /// "loading failed" placeholder so stale cards are never shown.
    pub fn load(&mut self) -> Vec<Notice> {
        let result = self
            .api
            .build_list_todos()
            .and_then(|req| self.transport.execute(req))
            .and_then(|resp| self.api.parse_list_todos(resp));
        match result {
            Ok(todos) => {
                self.view = ListView::render(&todos);
                Vec::new()
            }
            Err(ApiError::MissingToken) => vec![Notice::LoginRequired],
            Err(e) => {
                self.view = ListView::Failed;
                vec![Notice::Error(e.to_string())]
            }
        }
    }

    /// Create a todo from `title` and resynchronize.
    ///
    /// An empty (trimmed) title is rejected before any request is built.
    /// On success the view is refreshed via `load()`; on failure the view
    /// is left untouched.
    pub fn create(&mut self, title: &str) -> Vec<Notice> {
        let result = self
            .api
            .build_create_todo(title)
            .and_then(|req| self.transport.execute(req))
            .and_then(|resp| self.api.parse_create_todo(resp));
        match result {
            Ok(created) => {
                let mut notices = vec![Notice::Created(created)];
                notices.extend(self.load());
                notices
            }
            Err(ApiError::MissingToken) => vec![Notice::LoginRequired],
            Err(e @ (ApiError::EmptyTitle | ApiError::Transport(_))) => {
                vec![Notice::Error(e.to_string())]
            }
            Err(_) => vec![Notice::Error("Failed to add todo".to_string())],
        }
    }

    /// PUT `todo` with its completion flag set to `done`, then
    /// resynchronize whether or not the server accepted the change.
    pub fn set_completed(&mut self, todo: &Todo, done: bool) -> Vec<Notice> {
        let mut updated = todo.clone();
        updated.is_completed = done;
        let result = self
            .api
            .build_update_todo(&updated)
            .and_then(|req| self.transport.execute(req))
            .and_then(|resp| self.api.parse_update_todo(resp));
        self.finish_mutation(result.map(drop), Notice::Updated, Notice::UpdateFailed)
    }

    /// DELETE by id, then resynchronize whether or not the server found
    /// the todo.
    pub fn delete(&mut self, id: u64) -> Vec<Notice> {
        let result = self
            .api
            .build_delete_todo(id)
            .and_then(|req| self.transport.execute(req))
            .and_then(|resp| self.api.parse_delete_todo(resp));
        self.finish_mutation(result.map(drop), Notice::Deleted, Notice::DeleteFailed)
    }

    /// Shared tail for update and delete: fixed success/failure notice,
    /// then a full reload. Transport failures skip the reload since the
    /// server was never reached.
    fn finish_mutation(
        &mut self,
        result: Result<(), ApiError>,
        ok: Notice,
        failed: Notice,
    ) -> Vec<Notice> {
        let mut notices = match result {
            Ok(()) => vec![ok],
            Err(ApiError::MissingToken) => return vec![Notice::LoginRequired],
            Err(ApiError::Transport(msg)) => {
                return vec![Notice::Error(format!("transport error: {msg}"))]
            }
            Err(_) => vec![failed],
        };
        notices.extend(self.load());
        notices
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::http::HttpMethod;
    use crate::session::Session;

    const BASE_URL: &str = "http://localhost:8080";

    /// In-memory stand-in for the backend, scripted per test. Shared via
    /// `Rc` so tests can inspect state after the client consumed it.
    #[derive(Debug, Default)]
    struct FakeServer {
        todos: RefCell<Vec<Todo>>,
        next_id: RefCell<u64>,
        requests: RefCell<usize>,
        fail_list: RefCell<bool>,
        reject_mutations: RefCell<bool>,
    }

    impl FakeServer {
        fn seed(&self, title: &str, done: bool) -> u64 {
            let mut next = self.next_id.borrow_mut();
            *next += 1;
            let id = *next;
            self.todos.borrow_mut().push(Todo {
                id,
                title: title.to_string(),
                description: title.to_string(),
                is_completed: done,
            });
            id
        }

        fn respond(&self, status: u16, body: String) -> Result<HttpResponse, ApiError> {
            Ok(HttpResponse {
                status,
                headers: Vec::new(),
                body,
            })
        }
    }

    impl Transport for Rc<FakeServer> {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            *self.requests.borrow_mut() += 1;
            let path = request.url.strip_prefix(BASE_URL).unwrap().to_string();
            match (request.method, path.as_str()) {
                (HttpMethod::Get, "/api/v1/todo") => {
                    if *self.fail_list.borrow() {
                        return self.respond(500, "internal error".to_string());
                    }
                    let body = serde_json::to_string(&*self.todos.borrow()).unwrap();
                    self.respond(200, body)
                }
                (HttpMethod::Post, "/api/v1/todo/create") => {
                    if *self.reject_mutations.borrow() {
                        return self.respond(500, String::new());
                    }
                    let input: crate::types::NewTodo =
                        serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
                    let id = self.seed(&input.title, input.is_completed);
                    let created = self.todos.borrow().last().unwrap().clone();
                    assert_eq!(created.id, id);
                    self.respond(201, serde_json::to_string(&created).unwrap())
                }
                (HttpMethod::Put, "/api/v1/todo") => {
                    if *self.reject_mutations.borrow() {
                        return self.respond(500, String::new());
                    }
                    let input: Todo =
                        serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
                    let mut todos = self.todos.borrow_mut();
                    match todos.iter_mut().find(|t| t.id == input.id) {
                        Some(todo) => {
                            *todo = input;
                            self.respond(200, "Todo updated successfully".to_string())
                        }
                        None => self.respond(404, String::new()),
                    }
                }
                (HttpMethod::Delete, _) => {
                    let id: u64 = path.rsplit('/').next().unwrap().parse().unwrap();
                    let mut todos = self.todos.borrow_mut();
                    let before = todos.len();
                    todos.retain(|t| t.id != id);
                    if todos.len() == before {
                        self.respond(404, String::new())
                    } else {
                        self.respond(200, "Todo deleted successfully".to_string())
                    }
                }
                other => panic!("unexpected request: {other:?}"),
            }
        }
    }

    fn client(server: &Rc<FakeServer>) -> SyncClient<Rc<FakeServer>> {
        SyncClient::new(
            ApiClient::with_session(BASE_URL, Session::new("tok")),
            Rc::clone(server),
        )
    }

    #[test]
    fn load_renders_one_card_per_todo() {
        let server = Rc::new(FakeServer::default());
        server.seed("a", false);
        server.seed("b", true);
        let mut sync = client(&server);

        let notices = sync.load();
        assert!(notices.is_empty());
        assert_eq!(sync.view().cards().len(), 2);
    }

    #[test]
    fn load_empty_collection_shows_placeholder() {
        let server = Rc::new(FakeServer::default());
        let mut sync = client(&server);

        sync.load();
        assert_eq!(sync.view(), &ListView::Empty);
        assert!(sync.view().cards().is_empty());
    }

    #[test]
    fn load_failure_discards_prior_cards() {
        let server = Rc::new(FakeServer::default());
        server.seed("a", false);
        let mut sync = client(&server);
        sync.load();
        assert_eq!(sync.view().cards().len(), 1);

        *server.fail_list.borrow_mut() = true;
        let notices = sync.load();
        assert_eq!(sync.view(), &ListView::Failed);
        assert!(matches!(&notices[..], [Notice::Error(_)]));
    }

    #[test]
    fn load_without_session_is_blocked_before_io() {
        let server = Rc::new(FakeServer::default());
        let mut sync = SyncClient::new(ApiClient::new(BASE_URL), Rc::clone(&server));

        let notices = sync.load();
        assert_eq!(notices, vec![Notice::LoginRequired]);
        assert_eq!(sync.view(), &ListView::Initial);
        assert_eq!(*server.requests.borrow(), 0);
    }

    #[test]
    fn create_blank_title_makes_no_network_call() {
        let server = Rc::new(FakeServer::default());
        let mut sync = client(&server);

        let notices = sync.create("   ");
        assert_eq!(
            notices,
            vec![Notice::Error("Please enter a todo item".to_string())]
        );
        assert_eq!(*server.requests.borrow(), 0);
    }

    #[test]
    fn create_then_reload_shows_unchecked_card() {
        let server = Rc::new(FakeServer::default());
        let mut sync = client(&server);

        let notices = sync.create("Buy milk");
        assert!(matches!(&notices[0], Notice::Created(t) if t.title == "Buy milk"));
        let cards = sync.view().cards();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "Buy milk");
        assert!(!cards[0].checked);
        assert!(!cards[0].struck);
    }

    #[test]
    fn create_failure_leaves_view_untouched() {
        let server = Rc::new(FakeServer::default());
        server.seed("existing", false);
        let mut sync = client(&server);
        sync.load();

        *server.reject_mutations.borrow_mut() = true;
        let notices = sync.create("doomed");
        assert_eq!(
            notices,
            vec![Notice::Error("Failed to add todo".to_string())]
        );
        assert_eq!(sync.view().cards().len(), 1);
    }

    #[test]
    fn set_completed_then_reload_strikes_the_card() {
        let server = Rc::new(FakeServer::default());
        let id = server.seed("Walk dog", false);
        let mut sync = client(&server);
        sync.load();
        let todo = server.todos.borrow().iter().find(|t| t.id == id).cloned().unwrap();

        let notices = sync.set_completed(&todo, true);
        assert_eq!(notices, vec![Notice::Updated]);
        let cards = sync.view().cards();
        assert!(cards[0].checked);
        assert!(cards[0].struck);
    }

    #[test]
    fn update_failure_still_reloads() {
        let server = Rc::new(FakeServer::default());
        let id = server.seed("Walk dog", false);
        let mut sync = client(&server);
        sync.load();
        let todo = server.todos.borrow().iter().find(|t| t.id == id).cloned().unwrap();

        *server.reject_mutations.borrow_mut() = true;
        let requests_before = *server.requests.borrow();
        let notices = sync.set_completed(&todo, true);
        assert_eq!(notices, vec![Notice::UpdateFailed]);
        // PUT plus the resynchronizing GET.
        assert_eq!(*server.requests.borrow(), requests_before + 2);
        assert!(!sync.view().cards()[0].checked);
    }

    #[test]
    fn delete_removes_the_card() {
        let server = Rc::new(FakeServer::default());
        let keep = server.seed("keep", false);
        let gone = server.seed("gone", false);
        let mut sync = client(&server);
        sync.load();

        let notices = sync.delete(gone);
        assert_eq!(notices, vec![Notice::Deleted]);
        let ids: Vec<u64> = sync.view().cards().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![keep]);
    }

    #[test]
    fn delete_unknown_id_reports_failure_and_reloads() {
        let server = Rc::new(FakeServer::default());
        server.seed("only", false);
        let mut sync = client(&server);
        sync.load();

        let notices = sync.delete(999);
        assert_eq!(notices, vec![Notice::DeleteFailed]);
        assert_eq!(sync.view().cards().len(), 1);
    }

    #[test]
    fn transport_failure_skips_the_reload() {
        let flaky = |_req: HttpRequest| -> Result<HttpResponse, ApiError> {
            Err(ApiError::Transport("connection refused".to_string()))
        };
        let mut sync = SyncClient::new(
            ApiClient::with_session(BASE_URL, Session::new("tok")),
            flaky,
        );

        let notices = sync.delete(1);
        assert_eq!(
            notices,
            vec![Notice::Error(
                "transport error: connection refused".to_string()
            )]
        );
        assert_eq!(sync.view(), &ListView::Initial);
    }
}
