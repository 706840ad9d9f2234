use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

pub const COLLECTION: &str = "/v1/organisation/accounts";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub organisation_id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub version: i64,
    #[serde(default)]
    pub attributes: Value,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Links {
    #[serde(rename = "self")]
    pub self_link: String,
}

/// Response document for a single account.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AccountResponse {
    pub data: Account,
    pub links: Links,
}

#[derive(Deserialize)]
pub struct NewAccount {
    pub id: Uuid,
    pub organisation_id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub attributes: Value,
}

#[derive(Deserialize)]
pub struct CreateAccount {
    pub data: NewAccount,
}

#[derive(Deserialize)]
pub struct DeleteParams {
    pub version: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error_message: String,
}

type Failure = (StatusCode, Json<ErrorBody>);

fn failure(status: StatusCode, message: String) -> Failure {
    (status, Json(ErrorBody { error_message: message }))
}

pub type Db = Arc<RwLock<HashMap<Uuid, Account>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route(COLLECTION, post(create_account))
        .route(&format!("{COLLECTION}/"), post(create_account))
        .route(
            &format!("{COLLECTION}/{{id}}"),
            get(fetch_account).delete(delete_account),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn document(account: Account) -> AccountResponse {
    let links = Links {
        self_link: format!("{COLLECTION}/{}", account.id),
    };
    AccountResponse {
        data: account,
        links,
    }
}

async fn create_account(
    State(db): State<Db>,
    Json(input): Json<CreateAccount>,
) -> Result<(StatusCode, Json<AccountResponse>), Failure> {
    let input = input.data;
    let mut accounts = db.write().await;
    if accounts.contains_key(&input.id) {
        return Err(failure(
            StatusCode::CONFLICT,
            "Account cannot be created as it violates a duplicate constraint".to_string(),
        ));
    }
    let account = Account {
        id: input.id,
        organisation_id: input.organisation_id,
        kind: input.kind,
        version: 0,
        attributes: input.attributes,
    };
    accounts.insert(account.id, account.clone());
    info!(id = %account.id, "account created");
    Ok((StatusCode::CREATED, Json(document(account))))
}

async fn fetch_account(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<AccountResponse>, Failure> {
    let accounts = db.read().await;
    accounts
        .get(&id)
        .cloned()
        .map(|account| Json(document(account)))
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, format!("record {id} does not exist")))
}

async fn delete_account(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Query(params): Query<DeleteParams>,
) -> StatusCode {
    let mut accounts = db.write().await;
    match accounts.get(&id) {
        None => StatusCode::NOT_FOUND,
        Some(account) if account.version != params.version => StatusCode::CONFLICT,
        Some(_) => {
            accounts.remove(&id);
            info!(%id, "account deleted");
            StatusCode::NO_CONTENT
        }
    }
}
