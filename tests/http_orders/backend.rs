//! Mock of the storefront's order backend.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};

#[derive(Default)]
struct Orders {
    next_id: i64,
    orders: BTreeMap<i64, Value>,
    attached: BTreeMap<i64, Vec<(String, u32)>>,
    confirmed: Vec<i64>,
    fail_confirm: bool,
}

#[derive(Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<Orders>>,
}

impl MockBackend {
    pub fn attached(&self, order_id: i64) -> Vec<(String, u32)> {
        self.state
            .lock()
            .unwrap()
            .attached
            .get(&order_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn is_confirmed(&self, order_id: i64) -> bool {
        self.state.lock().unwrap().confirmed.contains(&order_id)
    }

    pub fn fail_confirm(&self) {
        self.state.lock().unwrap().fail_confirm = true;
    }
}

async fn create(State(backend): State<MockBackend>, Json(customer): Json<Value>) -> Json<Value> {
    let mut state = backend.state.lock().unwrap();
    state.next_id += 1;
    let id = state.next_id;
    let mut order = customer;
    if let Some(fields) = order.as_object_mut() {
        for value in fields.values_mut() {
            if *value == "" {
                *value = Value::Null;
            }
        }
    }
    order["id"] = json!(id);
    order["estado"] = json!("PENDIENTE");
    order["detalles"] = json!([]);
    state.orders.insert(id, order.clone());
    Json(order)
}

async fn attach(
    State(backend): State<MockBackend>,
    Path(id): Path<i64>,
    Query(params): Query<HashMap<String, String>>,
) -> StatusCode {
    let mut state = backend.state.lock().unwrap();
    let product = params.get("productoId").cloned().unwrap_or_default();
    let quantity: u32 = params
        .get("cantidad")
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(0);
    let Some(order) = state.orders.get_mut(&id) else {
        return StatusCode::NOT_FOUND;
    };
    let line_id = order["detalles"].as_array().map(Vec::len).unwrap_or(0) + 1;
    if let Some(lines) = order["detalles"].as_array_mut() {
        lines.push(json!({
            "id": line_id,
            "cantidad": quantity,
            "precioUnitario": 0.0,
            "producto": { "id": product, "nombre": "" }
        }));
    }
    state.attached.entry(id).or_default().push((product, quantity));
    StatusCode::CREATED
}

async fn confirm(
    State(backend): State<MockBackend>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, StatusCode> {
    let mut state = backend.state.lock().unwrap();
    if state.fail_confirm {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    let order = state.orders.get(&id).cloned().ok_or(StatusCode::NOT_FOUND)?;
    state.confirmed.push(id);
    Ok(Json(order))
}

async fn by_customer(State(backend): State<MockBackend>, Path(email): Path<String>) -> Json<Value> {
    let state = backend.state.lock().unwrap();
    let orders: Vec<Value> = state
        .orders
        .values()
        .filter(|order| order["emailCliente"] == email.as_str())
        .cloned()
        .collect();
    Json(Value::Array(orders))
}

/// Serve the mock on 127.0.0.1:0 and return its base URL.
pub fn start_backend() -> (String, MockBackend) {
    let backend = MockBackend::default();
    let app = Router::new()
        .route("/api/pedidos", post(create))
        .route("/api/pedidos/:id/productos", post(attach))
        .route("/api/pedidos/:id/confirmar", put(confirm))
        .route("/api/pedidos/cliente/:email", get(by_customer))
        .with_state(backend.clone());

    let (tx, rx) = std::sync::mpsc::channel();
    std::thread::spawn(move || {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        runtime.block_on(async move {
            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            tx.send(listener.local_addr().unwrap()).unwrap();
            axum::serve(listener, app).await.unwrap();
        });
    });
    let addr = rx.recv().unwrap();
    (format!("http://{addr}"), backend)
}
