//! # Mock Collections
//!
//! `MockClient<T>` hands out a real [`ResourceClient<T>`] whose requests are answered from a
//! queue of scripted expectations instead of a running `ResourceActor`. Code that takes a
//! client as a dependency (an order actor's user lookup, a storefront's product reads) can be
//! tested against exact responses, including failures that are awkward to produce with a
//! real store.
//!
//! | | MockClient | ResourceActor |
//! |---|---|---|
//! | State | none, scripted replies | real documents |
//! | Ordering | strict FIFO of expectations | whatever the caller sends |
//! | Failure injection | `return_err(..)` | needs a document in the right state |
//!
//! Expectations are consumed in order. A request of the wrong kind, or with a different id
//! than scripted, panics the mock task; the caller then sees `FrameworkError::ActorDropped`.
//!
//! ```rust
//! use document_actor::mock::MockClient;
//! use document_actor::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Shopper { id: u32, email: String }
//! #[derive(Debug)] struct ShopperCreate;
//! #[derive(Debug)] struct ShopperUpdate;
//! #[derive(Debug)] enum ShopperAction {}
//! #[derive(Debug, thiserror::Error)] #[error("shopper error")] struct ShopperError;
//!
//! #[async_trait]
//! impl ActorEntity for Shopper {
//!     type Id = u32; type Create = ShopperCreate; type Update = ShopperUpdate;
//!     type Action = ShopperAction; type ActionResult = (); type Context = (); type Error = ShopperError;
//!     fn from_create_params(id: u32, _: ShopperCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, email: String::new() })
//!     }
//!     async fn on_update(&mut self, _: ShopperUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, a: ShopperAction, _: &()) -> Result<(), Self::Error> { match a {} }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Shopper>::new();
//!     mock.expect_get(1).return_ok(Some(Shopper { id: 1, email: "ana@shop.test".into() }));
//!     mock.expect_get(2).return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert_eq!(client.get(1).await.unwrap().unwrap().email, "ana@shop.test");
//!     assert!(matches!(client.get(2).await, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```
//!
//! For tests that need to inspect the payload of a request, use [`create_mock_client`] with
//! the `expect_*` receiver helpers instead.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use crate::subscription;
use std::collections::VecDeque;
use std::marker::PhantomData;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

/// A scripted reply, tagged with the request kind (and id) it answers.
enum Expectation<T: ActorEntity> {
    Get(T::Id, Result<Option<T>, FrameworkError>),
    Create(Result<T::Id, FrameworkError>),
    Update(T::Id, Result<T, FrameworkError>),
    Delete(T::Id, Result<(), FrameworkError>),
    Action(T::Id, Result<T::ActionResult, FrameworkError>),
    Query(Result<Vec<T>, FrameworkError>),
    Subscribe(Result<Vec<T>, FrameworkError>),
}

impl<T: ActorEntity> Expectation<T> {
    fn kind(&self) -> &'static str {
        match self {
            Expectation::Get(..) => "get",
            Expectation::Create(..) => "create",
            Expectation::Update(..) => "update",
            Expectation::Delete(..) => "delete",
            Expectation::Action(..) => "action",
            Expectation::Query(..) => "query",
            Expectation::Subscribe(..) => "subscribe",
        }
    }
}

fn request_kind<T: ActorEntity>(request: &ResourceRequest<T>) -> &'static str {
    match request {
        ResourceRequest::Get { .. } => "get",
        ResourceRequest::Create { .. } => "create",
        ResourceRequest::Update { .. } => "update",
        ResourceRequest::Delete { .. } => "delete",
        ResourceRequest::Action { .. } => "action",
        ResourceRequest::Query { .. } => "query",
        ResourceRequest::Subscribe { .. } => "subscribe",
    }
}

fn check_id<I: PartialEq + std::fmt::Debug>(kind: &str, got: &I, want: &I) {
    if got != want {
        panic!("MockClient: {kind} for {got:?}, expected {want:?}");
    }
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A mock collection with a FIFO of expectations.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = queue.lock().unwrap().pop_front();
                let Some(expectation) = next else {
                    panic!("MockClient: unexpected {} request", request_kind(&request));
                };
                answer(request, expectation);
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client to inject into the code under test.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    fn expect<R>(
        &mut self,
        wrap: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> Expect<T, R> {
        Expect {
            wrap: Box::new(wrap),
            expectations: self.expectations.clone(),
            _reply: PhantomData,
        }
    }

    pub fn expect_get(&mut self, id: T::Id) -> Expect<T, Option<T>> {
        self.expect(move |r| Expectation::Get(id, r))
    }

    pub fn expect_create(&mut self) -> Expect<T, T::Id> {
        self.expect(Expectation::Create)
    }

    pub fn expect_update(&mut self, id: T::Id) -> Expect<T, T> {
        self.expect(move |r| Expectation::Update(id, r))
    }

    pub fn expect_delete(&mut self, id: T::Id) -> Expect<T, ()> {
        self.expect(move |r| Expectation::Delete(id, r))
    }

    pub fn expect_action(&mut self, id: T::Id) -> Expect<T, T::ActionResult> {
        self.expect(move |r| Expectation::Action(id, r))
    }

    pub fn expect_query(&mut self) -> Expect<T, Vec<T>> {
        self.expect(Expectation::Query)
    }

    /// Expects a subscribe. The reply is the one snapshot the subscription yields before it
    /// closes.
    pub fn expect_subscribe(&mut self) -> Expect<T, Vec<T>> {
        self.expect(Expectation::Subscribe)
    }

    /// Panics if any scripted expectation was not consumed.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            let kinds: Vec<&str> = exps.iter().map(Expectation::kind).collect();
            panic!("MockClient: {} expectation(s) not met: {kinds:?}", exps.len());
        }
    }
}

fn answer<T: ActorEntity>(request: ResourceRequest<T>, expectation: Expectation<T>) {
    match (request, expectation) {
        (ResourceRequest::Get { id, respond_to }, Expectation::Get(want, reply)) => {
            check_id("get", &id, &want);
            let _ = respond_to.send(reply);
        }
        (ResourceRequest::Create { respond_to, .. }, Expectation::Create(reply)) => {
            let _ = respond_to.send(reply);
        }
        (ResourceRequest::Update { id, respond_to, .. }, Expectation::Update(want, reply)) => {
            check_id("update", &id, &want);
            let _ = respond_to.send(reply);
        }
        (ResourceRequest::Delete { id, respond_to }, Expectation::Delete(want, reply)) => {
            check_id("delete", &id, &want);
            let _ = respond_to.send(reply);
        }
        (ResourceRequest::Action { id, respond_to, .. }, Expectation::Action(want, reply)) => {
            check_id("action", &id, &want);
            let _ = respond_to.send(reply);
        }
        (ResourceRequest::Query { respond_to, .. }, Expectation::Query(reply)) => {
            let _ = respond_to.send(reply);
        }
        (ResourceRequest::Subscribe { query, respond_to }, Expectation::Subscribe(reply)) => {
            let reply = reply.map(|snapshot| {
                let (subscriber, subscription) = subscription::channel(query);
                let _ = subscriber.sender.send(snapshot);
                subscription
            });
            let _ = respond_to.send(reply);
        }
        (request, expectation) => panic!(
            "MockClient: got {} request, expected {}",
            request_kind(&request),
            expectation.kind()
        ),
    }
}

/// Builder returned by the `expect_*` methods. Finish it with `return_ok` or `return_err`.
pub struct Expect<T: ActorEntity, R> {
    wrap: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
    expectations: Queue<T>,
    _reply: PhantomData<fn(R)>,
}

impl<T: ActorEntity, R> Expect<T, R> {
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, reply: Result<R, FrameworkError>) {
        let expectation = (self.wrap)(reply);
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

// =============================================================================
// RECEIVER HELPERS
// =============================================================================

/// Creates a client plus the raw receiver behind it.
///
/// The test plays the actor: it pulls requests off the receiver with the `expect_*` helpers,
/// asserts on their payloads, and answers through the returned oneshot sender.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Next message must be a Create.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T::Id, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next message must be a Get.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next message must be an Update.
pub async fn expect_update<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Update, oneshot::Sender<Result<T, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update {
            id,
            update,
            respond_to,
        }) => Some((id, update, respond_to)),
        _ => None,
    }
}

/// Next message must be an Action.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}
