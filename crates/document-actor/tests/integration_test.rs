use document_actor::{ActorEntity, FrameworkError, Query, ResourceActor};
use async_trait::async_trait;

// --- Test Document ---

#[derive(Clone, Debug, PartialEq)]
struct Ticket {
    id: u32,
    owner: String,
    priority: u8,
    open: bool,
}

#[derive(Debug)]
struct TicketCreate {
    owner: String,
    priority: u8,
}

#[derive(Debug)]
struct TicketUpdate {
    priority: Option<u8>,
}

#[derive(Debug)]
enum TicketAction {
    Close,
    IsOpen,
}

#[derive(Debug, thiserror::Error, PartialEq)]
enum TicketError {
    #[error("owner is required")]
    MissingOwner,
    #[error("ticket already closed")]
    AlreadyClosed,
}

#[async_trait]
impl ActorEntity for Ticket {
    type Id = u32;
    type Create = TicketCreate;
    type Update = TicketUpdate;
    type Action = TicketAction;
    type ActionResult = bool;
    type Context = ();
    type Error = TicketError;

    fn from_create_params(id: u32, params: TicketCreate) -> Result<Self, Self::Error> {
        if params.owner.trim().is_empty() {
            return Err(TicketError::MissingOwner);
        }
        Ok(Self {
            id,
            owner: params.owner,
            priority: params.priority,
            open: true,
        })
    }

    async fn on_update(
        &mut self,
        update: TicketUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if !self.open {
            return Err(TicketError::AlreadyClosed);
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: TicketAction,
        _ctx: &Self::Context,
    ) -> Result<bool, Self::Error> {
        match action {
            TicketAction::Close => {
                let was_open = self.open;
                self.open = false;
                Ok(was_open)
            }
            TicketAction::IsOpen => Ok(self.open),
        }
    }

    fn is_mutation(action: &TicketAction) -> bool {
        matches!(action, TicketAction::Close)
    }
}

fn ticket(owner: &str, priority: u8) -> TicketCreate {
    TicketCreate {
        owner: owner.into(),
        priority,
    }
}

// --- Tests ---

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let (actor, client) = ResourceActor::new(10);
    tokio::spawn(actor.run(()));

    // 1. Create
    let id: u32 = client.create(ticket("ana", 2)).await.unwrap();
    assert_eq!(id, 1);

    // 2. Update
    let updated: Ticket = client
        .update(id, TicketUpdate { priority: Some(5) })
        .await
        .unwrap();
    assert_eq!(updated.priority, 5);

    // 3. Action
    assert!(client.perform_action(id, TicketAction::Close).await.unwrap());
    assert!(!client.perform_action(id, TicketAction::Close).await.unwrap());

    // 4. Rejected update leaves the document unchanged
    let err = client
        .update(id, TicketUpdate { priority: Some(1) })
        .await
        .unwrap_err();
    assert_eq!(
        err.into_entity_error::<TicketError>().unwrap(),
        TicketError::AlreadyClosed
    );
    assert_eq!(client.get(id).await.unwrap().unwrap().priority, 5);

    // 5. Delete
    client.delete(id).await.unwrap();
    assert!(client.get(id).await.unwrap().is_none());
    assert!(matches!(
        client.delete(id).await,
        Err(FrameworkError::NotFound(_))
    ));
}

#[tokio::test]
async fn failed_create_stores_nothing() {
    let (actor, client) = ResourceActor::<Ticket>::new(10);
    tokio::spawn(actor.run(()));

    let err = client.create(ticket("  ", 1)).await.unwrap_err();
    assert_eq!(
        err.into_entity_error::<TicketError>().unwrap(),
        TicketError::MissingOwner
    );
    assert!(client.query(Query::all()).await.unwrap().is_empty());
}

#[tokio::test]
async fn query_filters_and_orders() {
    let (actor, client) = ResourceActor::<Ticket>::new(10);
    tokio::spawn(actor.run(()));

    client.create(ticket("ana", 3)).await.unwrap();
    client.create(ticket("ben", 9)).await.unwrap();
    client.create(ticket("ana", 7)).await.unwrap();

    let mine = client
        .query(
            Query::all()
                .filter(|t: &Ticket| t.owner == "ana")
                .order_by(|t| t.priority)
                .descending(),
        )
        .await
        .unwrap();
    let priorities: Vec<u8> = mine.iter().map(|t| t.priority).collect();
    assert_eq!(priorities, vec![7, 3]);
}

#[tokio::test]
async fn subscription_sees_every_mutation() {
    let (actor, client) = ResourceActor::<Ticket>::new(10);
    tokio::spawn(actor.run(()));

    client.create(ticket("ana", 1)).await.unwrap();

    let mut live = client
        .subscribe(Query::all().filter(|t: &Ticket| t.open))
        .await
        .unwrap();
    assert_eq!(live.next().await.unwrap().len(), 1);

    let second = client.create(ticket("ben", 2)).await.unwrap();
    assert_eq!(live.next().await.unwrap().len(), 2);

    client
        .perform_action(second, TicketAction::Close)
        .await
        .unwrap();
    let open = live.next().await.unwrap();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].owner, "ana");
}

#[tokio::test]
async fn failed_mutation_publishes_nothing() {
    let (actor, client) = ResourceActor::<Ticket>::new(10);
    tokio::spawn(actor.run(()));

    let mut live = client.subscribe(Query::all()).await.unwrap();
    assert!(live.next().await.unwrap().is_empty());

    assert!(client.create(ticket("", 1)).await.is_err());
    // The reply to a request is sent before any publish, so a successful follow-up
    // request guarantees any snapshot from the failed one would already be queued.
    client.query(Query::all()).await.unwrap();
    assert!(live.latest().is_none());
}

#[tokio::test]
async fn read_only_actions_publish_nothing() {
    let (actor, client) = ResourceActor::<Ticket>::new(10);
    tokio::spawn(actor.run(()));

    let id = client.create(ticket("ana", 1)).await.unwrap();
    let mut live = client.subscribe(Query::all()).await.unwrap();
    assert_eq!(live.next().await.unwrap().len(), 1);

    assert!(client.perform_action(id, TicketAction::IsOpen).await.unwrap());
    client.query(Query::all()).await.unwrap();
    assert!(live.latest().is_none());

    client.perform_action(id, TicketAction::Close).await.unwrap();
    client.query(Query::all()).await.unwrap();
    assert!(!live.latest().unwrap()[0].open);
}

#[tokio::test]
async fn slow_readers_only_see_the_newest_snapshot() {
    let (actor, client) = ResourceActor::<Ticket>::new(10);
    tokio::spawn(actor.run(()));

    let mut live = client.subscribe(Query::all()).await.unwrap();
    for priority in 0..50 {
        client.create(ticket("ana", priority)).await.unwrap();
    }
    client.query(Query::all()).await.unwrap();

    // Fifty writes went by unread; one read catches up and nothing is left behind it.
    assert_eq!(live.next().await.unwrap().len(), 50);
    assert!(live.latest().is_none());
}

#[tokio::test]
async fn released_subscriptions_stop_receiving() {
    let (actor, client) = ResourceActor::<Ticket>::new(10);
    tokio::spawn(actor.run(()));

    let first = client.subscribe(Query::all()).await.unwrap();
    let mut second = client.subscribe(Query::all()).await.unwrap();
    first.unsubscribe();

    client.create(ticket("ana", 1)).await.unwrap();
    client.query(Query::all()).await.unwrap();

    let newest = second.latest().unwrap();
    assert_eq!(newest.len(), 1);
}

#[tokio::test]
async fn closed_actor_reports_unavailable() {
    let (actor, client) = ResourceActor::<Ticket>::new(10);
    drop(actor);

    let err = client.get(1).await.unwrap_err();
    assert!(matches!(err, FrameworkError::ActorClosed));
    assert!(err.is_unavailable());
}
