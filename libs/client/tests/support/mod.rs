//! In-process stub of the PBM backend
//!
//! Serves a small, mutable data set over real HTTP on an ephemeral port so
//! the `reqwest` transport, envelope handling and cache invalidation are
//! exercised end to end. Every handled request is counted per route.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::Context as _;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use rxboard_client::{ApiConfig, CacheConfig, QueryCache, RxClient};
use serde_json::{json, Map, Value};

type Reply = Result<Json<Value>, (StatusCode, Json<Value>)>;

pub const CLAIM_COUNT: i64 = 25;

#[derive(Default)]
pub struct StubState {
    claims: Mutex<Vec<Value>>,
    members: Mutex<Vec<Value>>,
    hits: Mutex<HashMap<&'static str, usize>>,
}

impl StubState {
    fn hit(&self, route: &'static str) {
        *self.hits.lock().unwrap().entry(route).or_default() += 1;
    }
}

pub struct StubBackend {
    pub base_url: String,
    pub state: Arc<StubState>,
}

impl StubBackend {
    pub async fn spawn() -> anyhow::Result<Self> {
        let state = Arc::new(StubState::default());
        state.claims.lock().unwrap().extend((1..=CLAIM_COUNT).map(seed_claim));
        state.members.lock().unwrap().push(json!({
            "id": 1,
            "member_id": "M0001",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "is_active": true,
            "address": {"city": "Boston", "state": "MA"}
        }));

        let app = Router::new()
            .route("/api/claims", get(list_claims))
            .route("/api/claims/:id", get(get_claim).put(update_claim))
            .route("/api/members", get(list_members).post(create_member))
            .route("/api/members/:id", get(get_member))
            .route("/api/members/:id/claims", get(member_claims))
            .route("/api/analytics/dashboard", get(dashboard))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .context("bind stub backend")?;
        let addr = listener.local_addr().context("stub backend address")?;
        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Ok(Self {
            base_url: format!("http://{addr}"),
            state,
        })
    }

    pub fn client(&self) -> anyhow::Result<RxClient> {
        self.client_with_cache(&CacheConfig::default())
    }

    pub fn client_with_cache(&self, cache: &CacheConfig) -> anyhow::Result<RxClient> {
        let api = ApiConfig::with_base_url(&self.base_url);
        Ok(RxClient::with_parts(
            rxboard_client::ApiClient::new(&api)?,
            QueryCache::new(cache),
        ))
    }

    /// Requests served for `route`, e.g. `"GET /api/claims"`
    pub fn hits(&self, route: &str) -> usize {
        self.state
            .hits
            .lock()
            .unwrap()
            .get(route)
            .copied()
            .unwrap_or(0)
    }
}

fn seed_claim(id: i64) -> Value {
    let status = if id % 5 == 0 { "denied" } else { "pending" };
    json!({
        "id": id,
        "claim_number": format!("CLM-{id:04}"),
        "member_id": 1,
        "member_name": "Ada Lovelace",
        "drug_id": 1,
        "drug_name": "Atorvastatin",
        "pharmacy_id": 1,
        "fill_date": "2024-03-01",
        "status": status,
        "pricing": {"total_cost": 10.0 * id as f64}
    })
}

fn not_found(what: &str) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"error": format!("{what} not found")})),
    )
}

fn paginate(key: &str, items: Vec<Value>, params: &HashMap<String, String>) -> Value {
    let page: usize = params.get("page").and_then(|p| p.parse().ok()).unwrap_or(1);
    let per_page: usize = params
        .get("per_page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(20);
    let total = items.len();
    let pages = total.div_ceil(per_page);
    let slice: Vec<Value> = items
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .collect();

    json!({key: slice, "total": total, "pages": pages, "current_page": page})
}

async fn list_claims(
    State(stub): State<Arc<StubState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    stub.hit("GET /api/claims");
    let claims: Vec<Value> = stub
        .claims
        .lock()
        .unwrap()
        .iter()
        .filter(|c| match params.get("status") {
            Some(status) => c["status"] == status.as_str(),
            None => true,
        })
        .cloned()
        .collect();
    Json(paginate("claims", claims, &params))
}

async fn get_claim(State(stub): State<Arc<StubState>>, Path(id): Path<i64>) -> Reply {
    stub.hit("GET /api/claims/:id");
    stub.claims
        .lock()
        .unwrap()
        .iter()
        .find(|c| c["id"] == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("Claim"))
}

async fn update_claim(
    State(stub): State<Arc<StubState>>,
    Path(id): Path<i64>,
    Json(body): Json<Map<String, Value>>,
) -> Reply {
    stub.hit("PUT /api/claims/:id");
    let mut claims = stub.claims.lock().unwrap();
    let claim = claims
        .iter_mut()
        .find(|c| c["id"] == id)
        .ok_or_else(|| not_found("Claim"))?;
    for (field, value) in body {
        claim[field.as_str()] = value;
    }
    Ok(Json(claim.clone()))
}

async fn list_members(
    State(stub): State<Arc<StubState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    stub.hit("GET /api/members");
    let members = stub.members.lock().unwrap().clone();
    Json(paginate("members", members, &params))
}

async fn get_member(State(stub): State<Arc<StubState>>, Path(id): Path<i64>) -> Reply {
    stub.hit("GET /api/members/:id");
    stub.members
        .lock()
        .unwrap()
        .iter()
        .find(|m| m["id"] == id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("Member"))
}

async fn member_claims(
    State(stub): State<Arc<StubState>>,
    Path(id): Path<i64>,
    Query(params): Query<HashMap<String, String>>,
) -> Reply {
    stub.hit("GET /api/members/:id/claims");
    if !stub.members.lock().unwrap().iter().any(|m| m["id"] == id) {
        return Err(not_found("Member"));
    }
    let claims: Vec<Value> = stub
        .claims
        .lock()
        .unwrap()
        .iter()
        .filter(|c| c["member_id"] == id)
        .cloned()
        .collect();

    let mut body = paginate("claims", claims, &params);
    body["member_id"] = json!(id);
    Ok(Json(body))
}

async fn create_member(
    State(stub): State<Arc<StubState>>,
    Json(mut body): Json<Map<String, Value>>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    stub.hit("POST /api/members");
    for required in ["member_id", "first_name", "last_name"] {
        if !body.contains_key(required) {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(json!({"error": format!("Missing required field: {required}")})),
            ));
        }
    }

    let mut members = stub.members.lock().unwrap();
    let id = members.len() as i64 + 1;
    let address = json!({
        "line1": body.remove("address_line1"),
        "city": body.remove("city"),
        "state": body.remove("state"),
        "zip_code": body.remove("zip_code"),
    });
    body.insert("id".into(), json!(id));
    body.insert("address".into(), address);
    body.entry("is_active").or_insert(json!(true));
    body.insert("created_at".into(), json!("2024-05-01T12:00:00"));

    let record = Value::Object(body);
    members.push(record.clone());
    Ok((StatusCode::CREATED, Json(record)))
}

async fn dashboard(
    State(stub): State<Arc<StubState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    stub.hit("GET /api/analytics/dashboard");
    let days: u32 = params.get("days").and_then(|d| d.parse().ok()).unwrap_or(30);

    let claims = stub.claims.lock().unwrap();
    let mut by_status: Vec<(String, u64)> = Vec::new();
    for claim in claims.iter() {
        let status = claim["status"].as_str().unwrap_or_default().to_string();
        match by_status.iter_mut().find(|(s, _)| *s == status) {
            Some((_, count)) => *count += 1,
            None => by_status.push((status, 1)),
        }
    }
    let total_cost: f64 = claims
        .iter()
        .filter_map(|c| c["pricing"]["total_cost"].as_f64())
        .sum();

    Json(json!({
        "period_days": days,
        "summary": {
            "total_claims": claims.len(),
            "total_cost": total_cost,
            "average_cost": total_cost / claims.len().max(1) as f64
        },
        "generic_vs_brand": [],
        "top_drugs": [],
        "status_breakdown": by_status
            .into_iter()
            .map(|(status, count)| json!({"status": status, "count": count}))
            .collect::<Vec<_>>()
    }))
}
