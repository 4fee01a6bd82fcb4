//! REST client for the storefront's order backend.
//!
//! Requires the `http` feature. Uses blocking reqwest, so do not call it from
//! inside an async runtime.
//!
//! ## Routes
//!
//! - `POST {base}/api/pedidos`: create an order from [`CustomerDetails`].
//! - `POST {base}/api/pedidos/{id}/productos?productoId=..&cantidad=..`: attach a line.
//! - `PUT {base}/api/pedidos/{id}/confirmar`: confirm.
//! - `GET {base}/api/pedidos/cliente/{email}`: a customer's orders.

use reqwest::blocking::{Client, Response};
use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::cart::ItemId;
use crate::config::StorefrontConfig;

use super::error::OrderServiceError;
use super::service::{CustomerDetails, OrderService, RemoteOrder};

pub struct HttpOrderService {
    client: Client,
    orders_url: Url,
}

impl HttpOrderService {
    pub fn new(config: &StorefrontConfig) -> Result<Self, OrderServiceError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(transport)?;
        let orders_url = Url::parse(&format!(
            "{}/api/pedidos",
            config.api_base.trim_end_matches('/')
        ))
        .map_err(|err| OrderServiceError::Transport(err.to_string()))?;
        Ok(Self { client, orders_url })
    }

    fn url(&self, segments: &[&str]) -> Result<Url, OrderServiceError> {
        let mut url = self.orders_url.clone();
        url.path_segments_mut()
            .map_err(|()| OrderServiceError::Transport("order backend url cannot take a path".into()))?
            .extend(segments);
        Ok(url)
    }
}

fn transport(err: reqwest::Error) -> OrderServiceError {
    OrderServiceError::Transport(err.to_string())
}

fn check(operation: &'static str, response: Response) -> Result<Response, OrderServiceError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(OrderServiceError::Status {
            operation,
            status: status.as_u16(),
        })
    }
}

fn decode<T: DeserializeOwned>(response: Response) -> Result<T, OrderServiceError> {
    response
        .json()
        .map_err(|err| OrderServiceError::Decode(err.to_string()))
}

impl OrderService for HttpOrderService {
    fn create_order(&self, customer: &CustomerDetails) -> Result<RemoteOrder, OrderServiceError> {
        let response = self
            .client
            .post(self.orders_url.clone())
            .json(customer)
            .send()
            .map_err(transport)?;
        decode(check("create order", response)?)
    }

    fn attach_line(
        &self,
        order_id: i64,
        product_id: &ItemId,
        quantity: u32,
    ) -> Result<(), OrderServiceError> {
        let order_id = order_id.to_string();
        let url = self.url(&[order_id.as_str(), "productos"])?;
        let response = self
            .client
            .post(url)
            .query(&[
                ("productoId", product_id.to_string()),
                ("cantidad", quantity.to_string()),
            ])
            .send()
            .map_err(transport)?;
        check("attach line", response)?;
        Ok(())
    }

    fn confirm(&self, order_id: i64) -> Result<RemoteOrder, OrderServiceError> {
        let order_id = order_id.to_string();
        let url = self.url(&[order_id.as_str(), "confirmar"])?;
        let response = self.client.put(url).send().map_err(transport)?;
        decode(check("confirm order", response)?)
    }

    fn orders_for(&self, email: &str) -> Result<Vec<RemoteOrder>, OrderServiceError> {
        let url = self.url(&["cliente", email])?;
        let response = self.client.get(url).send().map_err(transport)?;
        let mut orders: Vec<RemoteOrder> = decode(check("list orders", response)?)?;
        orders.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(orders)
    }
}
