//! # Order Client
//!
//! Placing orders, reading them back, and moving them through the lifecycle. Validation and
//! the customer check run inside the Order actor (`from_create_params` and `on_create`).
use crate::model::{Order, OrderCreate, OrderId, OrderStatus, OrderUpdate, UserId};
use crate::order_actor::OrderError;
use async_trait::async_trait;
use document_actor::{ActorClient, FrameworkError, Query, ResourceClient, Subscription};
use tracing::{debug, info, instrument};

#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.into()
    }
}

impl OrderClient {
    /// All orders, newest first.
    pub fn queue_query() -> Query<Order> {
        Query::all().order_by(|o: &Order| o.placed_at).descending()
    }

    /// One customer's orders, newest first.
    pub fn customer_query(user_id: UserId) -> Query<Order> {
        Self::queue_query().filter(move |o| o.user_id == user_id)
    }

    /// A single order, as a one-element (or, once deleted, empty) result set.
    pub fn single_query(id: OrderId) -> Query<Order> {
        Query::all().filter(move |o: &Order| o.id == id)
    }

    #[instrument(skip(self))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        debug!("Sending request");
        let id = self.inner.create(params).await.map_err(Self::map_error)?;
        info!(order_id = %id, "Order placed");
        Ok(id)
    }

    /// Moves an order to `status`. Returns the stored order.
    #[instrument(skip(self))]
    pub async fn transition(&self, id: OrderId, status: OrderStatus) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner
            .update(id, OrderUpdate { status })
            .await
            .map_err(Self::map_error)
    }

    pub async fn require(&self, id: OrderId) -> Result<Order, OrderError> {
        self.get(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    pub async fn orders_for(&self, user_id: UserId) -> Result<Vec<Order>, OrderError> {
        self.find(Self::customer_query(user_id)).await
    }

    pub async fn queue(&self) -> Result<Vec<Order>, OrderError> {
        self.find(Self::queue_query()).await
    }

    pub async fn subscribe_queue(&self) -> Result<Subscription<Order>, OrderError> {
        self.subscribe(Self::queue_query()).await
    }

    pub async fn watch(&self, id: OrderId) -> Result<Subscription<Order>, OrderError> {
        self.subscribe(Self::single_query(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use document_actor::mock::{create_mock_client, expect_update, MockClient};

    #[tokio::test]
    async fn transition_sends_status_update() {
        let (client, mut receiver) = create_mock_client::<Order>(10);
        let orders = OrderClient::new(client);

        let task =
            tokio::spawn(async move { orders.transition(OrderId(1), OrderStatus::Ready).await });

        let (id, update, responder) = expect_update(&mut receiver).await.unwrap();
        assert_eq!(id, OrderId(1));
        assert_eq!(update.status, OrderStatus::Ready);
        responder
            .send(Err(FrameworkError::EntityError(Box::new(
                OrderError::InvalidTransition {
                    from: OrderStatus::Pending,
                    to: OrderStatus::Ready,
                },
            ))))
            .unwrap();

        let err = task.await.unwrap().unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::InvalidTransition);
    }

    #[tokio::test]
    async fn missing_order_is_not_found() {
        let mut mock = MockClient::<Order>::new();
        mock.expect_get(OrderId(5)).return_ok(None);

        let orders = OrderClient::new(mock.client());
        assert_eq!(
            orders.require(OrderId(5)).await,
            Err(OrderError::NotFound("order_5".into()))
        );
    }
}
