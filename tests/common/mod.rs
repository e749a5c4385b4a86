#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use tempfile::TempDir;

use profissionais_admin::api::ApiClient;
use profissionais_admin::config::AppConfig;
use profissionais_admin::session::{FileCredentialStore, SessionContext};

pub const ADMIN_EMAIL: &str = "admin@sistema.com";
pub const ADMIN_PASSWORD: &str = "admin123";
pub const ADMIN_TOKEN: &str = "token-admin";
pub const EDITOR_EMAIL: &str = "editor@sistema.com";
pub const EDITOR_PASSWORD: &str = "editor123";
pub const EDITOR_TOKEN: &str = "token-editor";
pub const VIEWER_EMAIL: &str = "leitor@sistema.com";
pub const VIEWER_PASSWORD: &str = "leitor123";
pub const VIEWER_TOKEN: &str = "token-leitor";
pub const CITY_ADMIN_EMAIL: &str = "cidade@sistema.com";
pub const CITY_ADMIN_PASSWORD: &str = "cidade123";
pub const CITY_ADMIN_TOKEN: &str = "token-cidade";

/// What the fake backend saw and which tokens it still accepts.
#[derive(Default)]
pub struct Recorded {
    pub valid_tokens: Mutex<HashSet<String>>,
    pub authorization: Mutex<Vec<Option<String>>>,
    pub deactivations: Mutex<Vec<(i64, Value)>>,
    pub list_queries: Mutex<Vec<HashMap<String, String>>>,
    /// `(path, query)` of audit and per-facility reads.
    pub queries: Mutex<Vec<(String, HashMap<String, String>)>>,
    /// `("METHOD /path", body)` of every accepted write on users and facilities.
    pub mutations: Mutex<Vec<(String, Value)>>,
}

impl Recorded {
    /// Make every issued token invalid, as if they all expired.
    pub fn expire_all(&self) {
        self.valid_tokens.lock().unwrap().clear();
    }

    pub fn authorization_headers(&self) -> Vec<Option<String>> {
        self.authorization.lock().unwrap().clone()
    }

    pub fn mutation_labels(&self) -> Vec<String> {
        self.mutations.lock().unwrap().iter().map(|(label, _)| label.clone()).collect()
    }

    /// Queries received on `path`, oldest first.
    pub fn queries_for(&self, path: &str) -> Vec<HashMap<String, String>> {
        self.queries
            .lock()
            .unwrap()
            .iter()
            .filter(|(p, _)| p == path)
            .map(|(_, q)| q.clone())
            .collect()
    }

    fn mutate(&self, label: String, body: Value) {
        self.mutations.lock().unwrap().push((label, body));
    }
}

/// In-process stand-in for the Flask backend, served under `/api`.
pub struct FakeBackend {
    pub port: u16,
    pub api_url: String,
    pub recorded: Arc<Recorded>,
}

impl FakeBackend {
    pub async fn start() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let api_url = format!("http://127.0.0.1:{}/api", port);
        let recorded = Arc::new(Recorded::default());

        let app = Router::new()
            .route("/api/auth/login", post(login))
            .route("/api/auth/me", get(me))
            .route("/api/profissionais", get(list_profissionais))
            .route(
                "/api/profissionais/:id",
                get(get_profissional).delete(deactivate_profissional),
            )
            .route("/api/profissionais/:id/reativar", put(reactivate_profissional))
            .route("/api/cidades", get(list_cidades))
            .route("/api/equipamentos", get(list_equipamentos).post(create_equipamento))
            .route(
                "/api/equipamentos/:id",
                put(update_equipamento).delete(delete_equipamento),
            )
            .route("/api/equipamentos/:id/profissionais", get(equipamento_profissionais))
            .route("/api/usuarios", get(list_usuarios).post(create_usuario))
            .route("/api/usuarios/:id", put(update_usuario).delete(delete_usuario))
            .route("/api/auditoria", get(list_auditoria))
            .route("/api/relatorios/profissionais/pdf", get(report_pdf))
            .with_state(recorded.clone());

        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind fake backend")?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self { port, api_url, recorded })
    }
}

/// A session backed by a file store in a fresh temp dir, plus a client for it.
pub struct Harness {
    pub dir: TempDir,
    pub store: Arc<FileCredentialStore>,
    pub session: SessionContext,
    pub api: ApiClient,
}

impl Harness {
    pub fn new(backend: &FakeBackend) -> Result<Self> {
        let dir = tempfile::tempdir()?;
        Self::in_dir(backend, dir)
    }

    /// Reopen against the same credential directory, like a fresh process start.
    pub fn in_dir(backend: &FakeBackend, dir: TempDir) -> Result<Self> {
        let store = Arc::new(FileCredentialStore::new(dir.path()));
        let session = SessionContext::bootstrap(store.clone());
        let api = ApiClient::new(&AppConfig::with_base_url(&backend.api_url), session.clone())?;
        Ok(Self { dir, store, session, api })
    }
}

fn error(status: StatusCode, key: &str, message: &str) -> Response {
    (status, Json(json!({ key: message }))).into_response()
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Record the header and reject unless it carries a live token.
fn authorize(recorded: &Recorded, headers: &HeaderMap) -> Result<(), Response> {
    let value = bearer(headers);
    recorded.authorization.lock().unwrap().push(value.clone());

    let token = value.as_deref().and_then(|v| v.strip_prefix("Bearer "));
    match token {
        Some(token) if recorded.valid_tokens.lock().unwrap().contains(token) => Ok(()),
        Some(_) => Err(error(StatusCode::UNAUTHORIZED, "msg", "Token has expired")),
        None => Err(error(StatusCode::UNAUTHORIZED, "msg", "Missing Authorization Header")),
    }
}

pub fn user_json(id: i64, email: &str, nivel: u8) -> Value {
    json!({
        "id": id,
        "nome_completo": format!("Usuário {}", id),
        "email": email,
        "nivel_acesso": nivel,
        "cidade_id": null,
        "data_cadastro": "2024-03-01T10:15:30"
    })
}

pub fn profissional_json(id: i64, nome: &str, ativo: bool) -> Value {
    json!({
        "id": id,
        "equipamento_id": 1,
        "nome_completo": nome,
        "data_nascimento": "1985-04-12",
        "cpf": format!("000.000.000-{:02}", id),
        "rg": "MG-1",
        "data_expedicao_rg": "2003-01-01",
        "escolaridade": "Superior completo",
        "profissao": "Psicóloga",
        "cargo": "Técnica",
        "vinculo_institucional": "Efetivo",
        "telefone": "(31) 3333-0000",
        "email": format!("prof{}@cidade.gov.br", id),
        "data_inicio_trabalho": "2019-03-01",
        "endereco_residencial": "Rua B, 10",
        "cidade_id": 1,
        "data_cadastro": "2024-01-01T09:00:00",
        "ativo": ativo,
        "motivo_inativacao": if ativo { Value::Null } else { json!("Transferência") },
        "data_inativacao": null
    })
}

async fn login(State(recorded): State<Arc<Recorded>>, Json(body): Json<Value>) -> Response {
    let email = body["email"].as_str().unwrap_or_default();
    let senha = body["senha"].as_str().unwrap_or_default();

    let (id, nivel, token) = match (email, senha) {
        (ADMIN_EMAIL, ADMIN_PASSWORD) => (1, 4, ADMIN_TOKEN),
        (EDITOR_EMAIL, EDITOR_PASSWORD) => (2, 2, EDITOR_TOKEN),
        (VIEWER_EMAIL, VIEWER_PASSWORD) => (3, 1, VIEWER_TOKEN),
        (CITY_ADMIN_EMAIL, CITY_ADMIN_PASSWORD) => (4, 3, CITY_ADMIN_TOKEN),
        _ => return error(StatusCode::UNAUTHORIZED, "error", "Credenciais inválidas"),
    };

    recorded.valid_tokens.lock().unwrap().insert(token.to_string());
    Json(json!({
        "access_token": token,
        "usuario": user_json(id, email, nivel)
    }))
    .into_response()
}

async fn me(State(recorded): State<Arc<Recorded>>, headers: HeaderMap) -> Response {
    if let Err(rejection) = authorize(&recorded, &headers) {
        return rejection;
    }
    Json(user_json(1, ADMIN_EMAIL, 4)).into_response()
}

async fn list_profissionais(
    State(recorded): State<Arc<Recorded>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Err(rejection) = authorize(&recorded, &headers) {
        return rejection;
    }
    recorded.list_queries.lock().unwrap().push(params.clone());

    // Missing status means active only
    let status = params.get("status").map(String::as_str).unwrap_or("ativo");
    Json(Value::Array(profissionais_with_status(status))).into_response()
}

fn profissionais_with_status(status: &str) -> Vec<Value> {
    let all = vec![
        profissional_json(1, "Ana Ribeiro", true),
        profissional_json(2, "Bruno Costa", true),
        profissional_json(3, "Carla Dias", false),
    ];
    all.into_iter()
        .filter(|p| match status {
            "ativo" => p["ativo"] == json!(true),
            "inativo" => p["ativo"] == json!(false),
            _ => true,
        })
        .collect()
}

async fn get_profissional(
    State(recorded): State<Arc<Recorded>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if let Err(rejection) = authorize(&recorded, &headers) {
        return rejection;
    }
    match id {
        1 => Json(profissional_json(1, "Ana Ribeiro", true)).into_response(),
        _ => error(StatusCode::NOT_FOUND, "error", "Profissional não encontrado"),
    }
}

async fn deactivate_profissional(
    State(recorded): State<Arc<Recorded>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(rejection) = authorize(&recorded, &headers) {
        return rejection;
    }
    if body["motivo_inativacao"].as_str().map_or(true, |m| m.trim().is_empty()) {
        return error(StatusCode::BAD_REQUEST, "error", "Motivo da inativação é obrigatório");
    }
    recorded.deactivations.lock().unwrap().push((id, body));
    Json(json!({ "message": "Profissional inativado com sucesso" })).into_response()
}

async fn reactivate_profissional(
    State(recorded): State<Arc<Recorded>>,
    headers: HeaderMap,
    Path(_id): Path<i64>,
) -> Response {
    if let Err(rejection) = authorize(&recorded, &headers) {
        return rejection;
    }
    Json(json!({ "message": "Profissional reativado com sucesso" })).into_response()
}

async fn list_cidades(State(recorded): State<Arc<Recorded>>, headers: HeaderMap) -> Response {
    if let Err(rejection) = authorize(&recorded, &headers) {
        return rejection;
    }
    Json(json!([
        { "id": 1, "nome": "Belo Horizonte", "status": "ativo", "data_cadastro": null },
        { "id": 2, "nome": "Contagem", "status": "ativo", "data_cadastro": null }
    ]))
    .into_response()
}

async fn list_equipamentos(State(recorded): State<Arc<Recorded>>, headers: HeaderMap) -> Response {
    if let Err(rejection) = authorize(&recorded, &headers) {
        return rejection;
    }
    Json(json!([
        { "id": 1, "nome": "CRAS Centro", "descricao": null, "status": "ativo", "data_cadastro": null }
    ]))
    .into_response()
}

fn equipamento_json(id: i64, body: &Value) -> Value {
    json!({
        "id": id,
        "nome": body["nome"],
        "descricao": body["descricao"],
        "status": body["status"],
        "data_cadastro": null
    })
}

async fn create_equipamento(
    State(recorded): State<Arc<Recorded>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(rejection) = authorize(&recorded, &headers) {
        return rejection;
    }
    let created = equipamento_json(7, &body);
    recorded.mutate("POST /equipamentos".to_string(), body);
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn update_equipamento(
    State(recorded): State<Arc<Recorded>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(rejection) = authorize(&recorded, &headers) {
        return rejection;
    }
    let updated = equipamento_json(id, &body);
    recorded.mutate(format!("PUT /equipamentos/{}", id), body);
    Json(updated).into_response()
}

async fn delete_equipamento(
    State(recorded): State<Arc<Recorded>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if let Err(rejection) = authorize(&recorded, &headers) {
        return rejection;
    }
    recorded.mutate(format!("DELETE /equipamentos/{}", id), Value::Null);
    Json(json!({ "message": "Equipamento inativado com sucesso" })).into_response()
}

async fn equipamento_profissionais(
    State(recorded): State<Arc<Recorded>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Err(rejection) = authorize(&recorded, &headers) {
        return rejection;
    }
    recorded
        .queries
        .lock()
        .unwrap()
        .push((format!("/equipamentos/{}/profissionais", id), params.clone()));

    let status = params.get("status").map(String::as_str).unwrap_or("ativo");
    Json(json!({
        "equipamento": { "id": id, "nome": "CRAS Centro", "descricao": null, "status": "ativo", "data_cadastro": null },
        "profissionais": profissionais_with_status(status)
    }))
    .into_response()
}

fn usuario_json(id: i64, body: &Value) -> Value {
    json!({
        "id": id,
        "nome_completo": body["nome_completo"],
        "email": body["email"],
        "nivel_acesso": body["nivel_acesso"],
        "cidade_id": body["cidade_id"],
        "data_cadastro": null
    })
}

async fn list_usuarios(State(recorded): State<Arc<Recorded>>, headers: HeaderMap) -> Response {
    if let Err(rejection) = authorize(&recorded, &headers) {
        return rejection;
    }
    Json(json!([user_json(1, ADMIN_EMAIL, 4), user_json(2, EDITOR_EMAIL, 2)])).into_response()
}

async fn create_usuario(
    State(recorded): State<Arc<Recorded>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Err(rejection) = authorize(&recorded, &headers) {
        return rejection;
    }
    let created = usuario_json(10, &body);
    recorded.mutate("POST /usuarios".to_string(), body);
    (StatusCode::CREATED, Json(created)).into_response()
}

async fn update_usuario(
    State(recorded): State<Arc<Recorded>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(rejection) = authorize(&recorded, &headers) {
        return rejection;
    }
    let updated = usuario_json(id, &body);
    recorded.mutate(format!("PUT /usuarios/{}", id), body);
    Json(updated).into_response()
}

async fn delete_usuario(
    State(recorded): State<Arc<Recorded>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if let Err(rejection) = authorize(&recorded, &headers) {
        return rejection;
    }
    recorded.mutate(format!("DELETE /usuarios/{}", id), Value::Null);
    Json(json!({ "message": "Usuário excluído com sucesso" })).into_response()
}

async fn list_auditoria(
    State(recorded): State<Arc<Recorded>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if let Err(rejection) = authorize(&recorded, &headers) {
        return rejection;
    }
    recorded.queries.lock().unwrap().push(("/auditoria".to_string(), params));
    Json(json!([{
        "id": 1,
        "usuario_id": 1,
        "acao": "EXPORT",
        "tabela": "profissionais",
        "registro_id": 0,
        "dados_antigos": null,
        "dados_novos": { "formato": "pdf" },
        "data_hora": "2024-05-02T10:00:00",
        "ip_origem": "127.0.0.1"
    }]))
    .into_response()
}

async fn report_pdf(State(recorded): State<Arc<Recorded>>, headers: HeaderMap) -> Response {
    if let Err(rejection) = authorize(&recorded, &headers) {
        return rejection;
    }
    ([(header::CONTENT_TYPE, "application/pdf")], b"%PDF-1.4 fake".to_vec()).into_response()
}
