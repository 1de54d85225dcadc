//! Servidor web Axum com WebSocket para anotação de texto em tempo real

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use clap::Parser;
use nlp_core::{
    corpus::demo_texts, Annotation, AnnotationError, AnnotationEvent, Annotator, AnnotatorConfig,
    EngineKind, LanguageHypothesis, Options, Scheme,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "nlp-web", about = "Servidor de anotação linguística")]
struct Args {
    /// Endereço de escuta
    #[arg(long, env = "NLP_BIND", default_value = "0.0.0.0:3000")]
    bind: SocketAddr,

    /// Motor de tagging (lexicon ou basic); sobrepõe o arquivo de configuração
    #[arg(long, env = "NLP_ENGINE")]
    engine: Option<EngineKind>,

    /// Arquivo TOML com a configuração do anotador
    #[arg(long, env = "NLP_CONFIG")]
    config: Option<PathBuf>,

    /// Filtro de log (ex: "debug", "nlp_core=debug"); na ausência usa RUST_LOG ou "info"
    #[arg(long)]
    log_level: Option<String>,
}

/// Estado compartilhado da aplicação
struct AppState {
    annotator: Annotator,
    default_options: Options,
}

#[derive(Deserialize)]
struct AnnotateRequest {
    text: String,
    scheme: Scheme,
    #[serde(default)]
    options: Option<Options>,
}

#[derive(Serialize)]
struct AnnotateResponse {
    annotations: Vec<Annotation>,
    scheme: Scheme,
    engine: &'static str,
    total: usize,
    processing_ms: u64,
}

#[derive(Deserialize)]
struct LanguageRequest {
    text: String,
    #[serde(default)]
    max: Option<usize>,
}

#[derive(Serialize)]
struct LanguageResponse {
    hypotheses: Vec<LanguageHypothesis>,
    engine: &'static str,
}

/// Mensagem WebSocket recebida do cliente
#[derive(Deserialize)]
struct WsRequest {
    text: String,
    #[serde(default)]
    scheme: Option<Scheme>,
    #[serde(default)]
    options: Option<Options>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = match &args.log_level {
        Some(level) => EnvFilter::try_new(level).context("filtro de log inválido")?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = match &args.config {
        Some(path) => AnnotatorConfig::load(path)
            .with_context(|| format!("carregando {}", path.display()))?,
        None => AnnotatorConfig::default(),
    };
    if let Some(engine) = args.engine {
        config.engine = engine;
    }

    let annotator = Annotator::from_config(&config).context("inicializando o motor de tagging")?;
    let state = Arc::new(AppState {
        annotator,
        default_options: config.default_options.clone(),
    });

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(args.bind)
        .await
        .with_context(|| format!("bind em {}", args.bind))?;
    info!(engine = config.engine.name(), "🚀 Servidor de anotação iniciado em http://{}", args.bind);
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/annotate", post(annotate_handler))
        .route("/language", post(language_handler))
        .route("/demo-texts", get(demo_texts_handler))
        .route("/ws", get(ws_handler))
        .layer(cors)
        .with_state(state)
}

/// Retorna a página principal HTML
async fn index_handler() -> impl IntoResponse {
    Html(include_str!("templates/index.html"))
}

/// 400 para erro de configuração, 503 para falha do motor
fn error_response(err: &AnnotationError) -> Response {
    let status = match err {
        AnnotationError::Configuration(_) => StatusCode::BAD_REQUEST,
        AnnotationError::EngineUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    };
    (
        status,
        Json(serde_json::json!({"error": err.to_string(), "kind": err.kind()})),
    )
        .into_response()
}

fn blank_text() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({"error": "Texto vazio", "kind": "configuration"})),
    )
        .into_response()
}

/// Anotação via HTTP POST (sem streaming)
async fn annotate_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnnotateRequest>,
) -> Response {
    if req.text.trim().is_empty() {
        return blank_text();
    }

    let options = req.options.unwrap_or_else(|| state.default_options.clone());
    let start = Instant::now();
    match state.annotator.annotate(&req.text, req.scheme, &options) {
        Ok(annotations) => Json(AnnotateResponse {
            total: annotations.len(),
            annotations,
            scheme: req.scheme,
            engine: state.annotator.engine_name(),
            processing_ms: start.elapsed().as_millis() as u64,
        })
        .into_response(),
        Err(e) => {
            warn!(scheme = %req.scheme, error = %e, "anotação falhou");
            error_response(&e)
        }
    }
}

/// Hipóteses de idioma para o texto
async fn language_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LanguageRequest>,
) -> Response {
    if req.text.trim().is_empty() {
        return blank_text();
    }
    match state.annotator.language_hypotheses(&req.text, req.max.unwrap_or(3)) {
        Ok(hypotheses) => Json(LanguageResponse {
            hypotheses,
            engine: state.annotator.engine_name(),
        })
        .into_response(),
        Err(e) => error_response(&e),
    }
}

/// Retorna textos de demonstração
async fn demo_texts_handler() -> impl IntoResponse {
    Json(demo_texts())
}

/// Upgrade HTTP → WebSocket
async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_websocket(socket, state))
}

/// Recebe texto, executa a anotação e envia os eventos um a um
async fn handle_websocket(mut socket: WebSocket, state: Arc<AppState>) {
    info!("WebSocket conectado");

    while let Some(Ok(msg)) = socket.recv().await {
        match msg {
            Message::Text(text) => {
                // JSON {text, scheme, options}; senão texto puro anotado por nomes
                let (text_str, scheme, options) = match serde_json::from_str::<WsRequest>(&text) {
                    Ok(req) => (
                        req.text,
                        req.scheme.unwrap_or(Scheme::NameType),
                        req.options.unwrap_or_else(|| state.default_options.clone()),
                    ),
                    Err(_) => (
                        text.to_string(),
                        Scheme::NameType,
                        Options::tagging().join_names(true),
                    ),
                };

                if text_str.trim().is_empty() {
                    continue;
                }

                info!(scheme = %scheme, chars = text_str.len(), "anotando via WebSocket");

                // A anotação é síncrona: roda fora do runtime
                let (tx, rx) = std::sync::mpsc::channel::<AnnotationEvent>();
                let worker = Arc::clone(&state);
                let handle = tokio::task::spawn_blocking(move || {
                    worker.annotator.annotate_streaming(&text_str, scheme, &options, tx);
                });
                if let Err(e) = handle.await {
                    warn!(error = %e, "tarefa de anotação abortada");
                    continue;
                }

                let events: Vec<AnnotationEvent> = rx.try_iter().collect();
                for event in &events {
                    if let Ok(json) = serde_json::to_string(event) {
                        if socket.send(Message::Text(json)).await.is_err() {
                            return; // cliente desconectou
                        }
                        // Pequena pausa para a UI animar passo a passo
                        tokio::time::sleep(tokio::time::Duration::from_millis(35)).await;
                    }
                }
            }
            Message::Close(_) => {
                info!("WebSocket desconectado");
                return;
            }
            Message::Ping(payload) => {
                let _ = socket.send(Message::Pong(payload)).await;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use nlp_core::{LanguageHypothesis, RawTag, TaggingEngine, TokenUnit};
    use tower::ServiceExt;

    struct DownEngine;

    impl TaggingEngine for DownEngine {
        fn name(&self) -> &'static str {
            "down"
        }
        fn supports(&self, _: Scheme, _: TokenUnit) -> bool {
            true
        }
        fn tag(&self, _: &str, _: Scheme, _: TokenUnit) -> nlp_core::Result<Vec<RawTag>> {
            Err(AnnotationError::engine_unavailable("fora do ar"))
        }
        fn language_hypotheses(&self, _: &str, _: usize) -> nlp_core::Result<Vec<LanguageHypothesis>> {
            Err(AnnotationError::engine_unavailable("fora do ar"))
        }
    }

    fn app_with(annotator: Annotator) -> Router {
        build_router(Arc::new(AppState {
            annotator,
            default_options: Options::tagging(),
        }))
    }

    fn app() -> Router {
        app_with(Annotator::default())
    }

    async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_index_page() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_annotate_names() {
        let (status, body) = post_json(
            app(),
            "/annotate",
            serde_json::json!({
                "text": "Steve Jobs was born in California",
                "scheme": "name_type",
                "options": {"omit_whitespace": true, "join_names": true}
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["engine"], "lexicon");
        assert_eq!(body["total"], 2);
        assert_eq!(body["annotations"][0]["text"], "Steve Jobs");
        assert_eq!(body["annotations"][0]["label"]["value"], "PersonalName");
    }

    #[tokio::test]
    async fn test_annotate_uses_default_options() {
        let (status, body) = post_json(
            app(),
            "/annotate",
            serde_json::json!({"text": "Hello, world", "scheme": "token_type"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        // padrão do servidor omite pontuação e espaço
        assert_eq!(body["total"], 2);
    }

    #[tokio::test]
    async fn test_annotate_short_name_kinds() {
        let (status, body) = post_json(
            app(),
            "/annotate",
            serde_json::json!({
                "text": "Steve Jobs was born in California",
                "scheme": "name_type",
                "options": {"omit_whitespace": true, "join_names": true, "name_kinds": ["place"]}
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 1);
        assert_eq!(body["annotations"][0]["text"], "California");
    }

    #[tokio::test]
    async fn test_annotate_blank_text_is_bad_request() {
        let (status, body) = post_json(
            app(),
            "/annotate",
            serde_json::json!({"text": "   ", "scheme": "language"}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Texto vazio");
    }

    #[tokio::test]
    async fn test_annotate_unsupported_unit_is_bad_request() {
        let (status, body) = post_json(
            app(),
            "/annotate",
            serde_json::json!({"text": "Hello there.", "scheme": "lemma", "options": {"unit": "sentence"}}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "configuration");
    }

    #[tokio::test]
    async fn test_engine_failure_is_service_unavailable() {
        let app = app_with(Annotator::new(Arc::new(DownEngine)));
        let (status, body) = post_json(
            app,
            "/annotate",
            serde_json::json!({"text": "Hello", "scheme": "token_type"}),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["kind"], "engine_unavailable");
    }

    #[tokio::test]
    async fn test_language_hypotheses() {
        let (status, body) = post_json(
            app(),
            "/language",
            serde_json::json!({"text": "ಮೈಸೂರು ನಿಮ್ಮನ್ನು ಸ್ವಾಗತಿಸುತ್ತದೆ", "max": 2}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["hypotheses"][0]["language"], "kn");
    }

    #[tokio::test]
    async fn test_demo_texts() {
        let response = app()
            .oneshot(Request::builder().uri("/demo-texts").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.as_array().map(Vec::len), Some(demo_texts().len()));
        assert_eq!(body[0]["name"], "english");
    }
}
