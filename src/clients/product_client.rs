//! # Product Client
//!
//! Catalog reads for everyone, writes and stock actions for the admin console.
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use async_trait::async_trait;
use document_actor::{ActorClient, FrameworkError, Query, ResourceClient, Subscription};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        e.into()
    }
}

fn unexpected(result: ProductActionResult) -> ProductError {
    ProductError::ActorCommunicationError(format!("unexpected action result {result:?}"))
}

impl ProductClient {
    /// Every product, in the order they were added.
    pub fn catalog_query() -> Query<Product> {
        Query::all()
    }

    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<ProductId, ProductError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Like `get`, but a missing product is an error.
    #[instrument(skip(self))]
    pub async fn require(&self, id: ProductId) -> Result<Product, ProductError> {
        self.get(id)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn catalog(&self) -> Result<Vec<Product>, ProductError> {
        self.find(Self::catalog_query()).await
    }

    pub async fn subscribe_catalog(&self) -> Result<Subscription<Product>, ProductError> {
        self.subscribe(Self::catalog_query()).await
    }

    /// Current stock level.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ProductId) -> Result<u32, ProductError> {
        debug!(%id, "Checking stock");
        match self
            .inner
            .perform_action(id, ProductAction::CheckStock)
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::CheckStock(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }

    /// Adds `delta` to the stock level and returns the new level.
    #[instrument(skip(self))]
    pub async fn adjust_stock(&self, id: ProductId, delta: i64) -> Result<u32, ProductError> {
        debug!(%id, delta, "Adjusting stock");
        match self
            .inner
            .perform_action(id, ProductAction::AdjustStock(delta))
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::AdjustStock(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use document_actor::mock::{create_mock_client, expect_action, MockClient};

    #[tokio::test]
    async fn check_stock_returns_level() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let products = ProductClient::new(client);

        let task = tokio::spawn(async move { products.check_stock(ProductId(1)).await });

        let (id, action, responder) = expect_action(&mut receiver).await.unwrap();
        assert_eq!(id, ProductId(1));
        assert!(matches!(action, ProductAction::CheckStock));
        responder
            .send(Ok(ProductActionResult::CheckStock(42)))
            .unwrap();

        assert_eq!(task.await.unwrap().unwrap(), 42);
    }

    #[tokio::test]
    async fn adjust_stock_forwards_delta() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let products = ProductClient::new(client);

        let task = tokio::spawn(async move { products.adjust_stock(ProductId(3), -2).await });

        let (_, action, responder) = expect_action(&mut receiver).await.unwrap();
        match action {
            ProductAction::AdjustStock(delta) => assert_eq!(delta, -2),
            other => panic!("expected AdjustStock, got {other:?}"),
        }
        responder
            .send(Ok(ProductActionResult::AdjustStock(8)))
            .unwrap();

        assert_eq!(task.await.unwrap().unwrap(), 8);
    }

    #[tokio::test]
    async fn insufficient_stock_comes_back_typed() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_action(ProductId(1))
            .return_err(FrameworkError::EntityError(Box::new(
                ProductError::InsufficientStock {
                    delta: -5,
                    available: 2,
                },
            )));

        let products = ProductClient::new(mock.client());
        let err = products.adjust_stock(ProductId(1), -5).await.unwrap_err();
        assert_eq!(
            err,
            ProductError::InsufficientStock {
                delta: -5,
                available: 2
            }
        );
        mock.verify();
    }

    #[tokio::test]
    async fn missing_product_is_not_found() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_get(ProductId(9)).return_ok(None);

        let products = ProductClient::new(mock.client());
        assert_eq!(
            products.require(ProductId(9)).await,
            Err(ProductError::NotFound("product_9".into()))
        );
    }

    #[tokio::test]
    async fn closed_store_is_unavailable() {
        let mut mock = MockClient::<Product>::new();
        mock.expect_query().return_err(FrameworkError::ActorClosed);

        let products = ProductClient::new(mock.client());
        let err = products.catalog().await.unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::BackendUnavailable);
    }
}
