use axum::{
    middleware,
    routing::{get, get_service, put},
    Router,
};
use dotenvy::dotenv;
use http::header::{HeaderValue, CACHE_CONTROL};
use sqlx::sqlite::SqlitePoolOptions;
use std::env;
use std::net::SocketAddr;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

use gestao_eventos::web::middleware::auth as auth_middleware;
use gestao_eventos::web::routes::{atividades, eventos, inscricoes, pages, participantes};
use gestao_eventos::web::{AppState, CACHE_TTL_PADRAO_SECS};

#[tokio::main]
async fn main() {
    dotenv().ok();

    // 1. Logging
    tracing_subscriber::fmt::init();

    // 2. Banco de dados + migracoes
    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL deve estar no .env");
    tracing::info!("conectando ao banco: {}", db_url);

    let pool = SqlitePoolOptions::new()
        .connect(&db_url)
        .await
        .expect("nao foi possivel conectar ao banco");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("falha ao aplicar migracoes");

    let ttl_secs = env::var("DASHBOARD_CACHE_TTL_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(CACHE_TTL_PADRAO_SECS);
    let state = AppState::new(pool, ttl_secs);

    // 3. Rotas de eventos/atividades: leitura aberta, escrita autenticada
    let eventos_api = Router::new()
        .route("/", get(eventos::list_handler).post(eventos::create_handler))
        .route(
            "/:id",
            get(eventos::get_handler)
                .put(eventos::update_handler)
                .delete(eventos::delete_handler),
        )
        .route(
            "/:id/participantes",
            get(eventos::list_inscritos_handler).post(eventos::inscrever_handler),
        )
        .route(
            "/:id/atividades",
            get(eventos::list_atividades_handler).post(eventos::create_atividade_handler),
        )
        .route("/:id/dashboard", get(eventos::dashboard_handler))
        .route("/:id/relatorio", get(eventos::relatorio_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::require_auth_or_readonly,
        ));

    let atividades_api = Router::new()
        .route(
            "/",
            get(atividades::list_handler).post(atividades::create_handler),
        )
        .route(
            "/:id",
            get(atividades::get_handler)
                .put(atividades::update_handler)
                .delete(atividades::delete_handler),
        )
        .route(
            "/:id/responsavel",
            get(atividades::get_responsavel_handler).put(atividades::set_responsavel_handler),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::require_auth_or_readonly,
        ));

    // 4. Participantes e inscricoes exigem identidade tambem na leitura
    let participantes_api = Router::new()
        .route(
            "/",
            get(participantes::list_handler).post(participantes::create_handler),
        )
        .route(
            "/:id",
            get(participantes::get_handler)
                .put(participantes::update_handler)
                .delete(participantes::delete_handler),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::require_auth,
        ));

    let inscricoes_api = Router::new()
        .route("/", get(inscricoes::list_handler))
        .route(
            "/:id",
            get(inscricoes::get_handler).delete(inscricoes::cancel_handler),
        )
        .route("/:id/status", put(inscricoes::update_status_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware::require_auth,
        ));

    let app = Router::new()
        // Paginas publicas
        .route("/", get(pages::home_handler))
        .route("/eventos/:id", get(pages::evento_handler))
        // API
        .nest("/api/eventos", eventos_api)
        .nest("/api/atividades", atividades_api)
        .nest("/api/participantes", participantes_api)
        .nest("/api/inscricoes", inscricoes_api)
        // Arquivos estaticos
        .nest_service(
            "/assets",
            get_service(ServeDir::new("assets")).layer(SetResponseHeaderLayer::if_not_present(
                CACHE_CONTROL,
                HeaderValue::from_static("no-store"),
            )),
        )
        .layer(CatchPanicLayer::new())
        .with_state(state);

    // 5. Sobe o servidor (com porta de fallback)
    let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(3000);
    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .expect("host/port invalidos");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::warn!("bind em {} falhou ({}); tentando {}:{}", addr, e, host, port + 1);
            let fallback: SocketAddr = format!("{}:{}", host, port + 1)
                .parse()
                .expect("fallback invalido");
            tokio::net::TcpListener::bind(fallback)
                .await
                .expect("nao foi possivel fazer bind na porta de fallback")
        }
    };

    let bound_addr = listener.local_addr().unwrap();
    tracing::info!("servidor em http://{}", bound_addr);

    axum::serve(listener, app)
        .await
        .expect("falha no servidor HTTP");
}
