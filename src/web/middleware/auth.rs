use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use base64::{engine::general_purpose, Engine as _};
use serde::Deserialize;

use crate::database::participante_repo;
use crate::models::TipoParticipante;
use crate::web::AppState;

/// Identidade resolvida do chamador, injetada nas extensions da request.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub username: String,
    pub tipo: TipoParticipante,
}

#[derive(Deserialize)]
struct JwtPayload {
    sub: String,
}

/// Emissao e verificacao de token ficam fora desta aplicacao; aqui so
/// extraimos o `sub` do payload e carregamos o participante para obter o
/// papel. Token ausente ou participante inexistente viram 401.
pub async fn require_auth(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    match resolve_user(&state, request.headers()).await {
        Some(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        None => unauthorized(),
    }
}

/// Leituras passam sem identidade; escritas exigem um chamador valido.
pub async fn require_auth_or_readonly(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let user = resolve_user(&state, request.headers()).await;
    let leitura = matches!(request.method().as_str(), "GET" | "HEAD" | "OPTIONS");

    match user {
        Some(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        None if leitura => next.run(request).await,
        None => unauthorized(),
    }
}

async fn resolve_user(state: &AppState, headers: &HeaderMap) -> Option<AuthenticatedUser> {
    let token = bearer_token(headers).or_else(|| cookie_token(headers))?;
    let id = subject_id(&token)?;
    let row = participante_repo::get(&state.pool, id).await.ok()??;
    let tipo = row.tipo();
    Some(AuthenticatedUser {
        id: row.id,
        username: row.username,
        tipo,
    })
}

fn unauthorized() -> Response {
    Response::builder()
        .status(401)
        .body(axum::body::Body::from("Unauthorized"))
        .unwrap()
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|hv| hv.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.to_string())
}

fn cookie_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::COOKIE)
        .and_then(|hv| hv.to_str().ok())
        .and_then(|cookies| {
            cookies
                .split("; ")
                .find_map(|c| c.strip_prefix("access_token=").map(|t| t.to_string()))
        })
}

/// Decodifica o payload (parte do meio) e le o `sub` como id numerico.
fn subject_id(token: &str) -> Option<i64> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }
    let payload_bytes = general_purpose::URL_SAFE_NO_PAD.decode(parts[1]).ok()?;
    let payload: JwtPayload = serde_json::from_slice(&payload_bytes).ok()?;
    payload.sub.parse().ok()
}
