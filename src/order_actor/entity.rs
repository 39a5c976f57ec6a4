//! [`ActorEntity`] implementation for [`Order`]: creation checks, the customer lookup and
//! the status transition guard.

use crate::clients::UserClient;
use crate::model::{validate_listing, Order, OrderCreate, OrderId, OrderStatus, OrderUpdate};
use crate::order_actor::OrderError;
use crate::user_actor::UserError;
use async_trait::async_trait;
use chrono::Utc;
use document_actor::{ActorClient, ActorEntity};
use std::convert::Infallible;
use tracing::{debug, info};

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Action = Infallible;
    type ActionResult = ();
    type Context = UserClient;
    type Error = OrderError;

    /// Builds a `Pending` order. The total is computed once here and never again.
    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        if params.quantity == 0 {
            return Err(OrderError::ValidationError(
                "quantity must be at least 1".into(),
            ));
        }
        validate_listing(&params.product_name, params.unit_price, &params.image_url)
            .map_err(OrderError::ValidationError)?;

        Ok(Self {
            id,
            user_id: params.user_id,
            user_email: params.user_email,
            product_id: params.product_id,
            product_name: params.product_name,
            unit_price: params.unit_price,
            image_url: params.image_url,
            quantity: params.quantity,
            total_price: params.unit_price * f64::from(params.quantity),
            personalization: params.personalization,
            status: OrderStatus::Pending,
            placed_at: Utc::now(),
        })
    }

    /// The customer placing the order must have a profile.
    async fn on_create(&mut self, users: &UserClient) -> Result<(), OrderError> {
        debug!(user_id = %self.user_id, "Checking customer profile");
        match users.get(self.user_id).await {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(OrderError::NotFound(self.user_id.to_string())),
            Err(UserError::ActorCommunicationError(e)) => {
                Err(OrderError::ActorCommunicationError(e))
            }
            Err(e) => Err(OrderError::ValidationError(e.to_string())),
        }
    }

    /// Applies a status change if the lifecycle table allows it.
    async fn on_update(&mut self, update: OrderUpdate, _: &UserClient) -> Result<(), OrderError> {
        let (from, to) = (self.status, update.status);
        if !from.can_transition_to(to) {
            return Err(OrderError::InvalidTransition { from, to });
        }
        if from != to {
            info!(order_id = %self.id, %from, %to, "Status changed");
            self.status = to;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: Infallible, _: &UserClient) -> Result<(), OrderError> {
        match action {}
    }
}
