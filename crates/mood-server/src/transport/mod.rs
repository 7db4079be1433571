//! HTTP transport on `tiny_http`.
//!
//! `POST /alexa` carries voice-platform turns; `GET /entries` serves the
//! companion app. Requests are answered one at a time: `recv` blocks, so it
//! runs on `spawn_blocking`, and the handler is awaited on the runtime.

mod entries;
pub mod envelope;

use std::io::Read;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::Context;
use mood_config::ServerConfig;
use mood_core::turn::TurnRequest;
use mood_dialogue::{TurnEngine, TurnError};
use mood_store::JournalGateway;
use tracing::{debug, info, warn};

use envelope::{SkillRequest, SkillResponse};

const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Everything a request handler needs.
pub struct App<G> {
    pub engine: TurnEngine<G>,
    pub server: ServerConfig,
}

/// The parts of an HTTP request the handlers read.
#[derive(Debug, Clone, Default)]
pub struct Inbound {
    pub method: String,
    pub url: String,
    pub authorization: Option<String>,
    pub pin: Option<String>,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    fn json(status: u16, body: String) -> Self {
        Self { status, body }
    }

    fn error(status: u16, message: &str) -> Self {
        Self {
            status,
            body: serde_json::json!({ "error": message }).to_string(),
        }
    }
}

/// Route one request.
pub async fn route<G: JournalGateway>(app: &App<G>, inbound: Inbound) -> HttpReply {
    let path = inbound.url.split('?').next().unwrap_or_default();
    match (inbound.method.as_str(), path) {
        ("POST", "/alexa") => handle_turn(app, &inbound.body).await,
        ("GET", "/entries") => entries::handle(app.engine.gateway(), &inbound).await,
        (_, "/alexa" | "/entries") => HttpReply::error(405, "method not allowed"),
        _ => HttpReply::error(404, "not found"),
    }
}

async fn handle_turn<G: JournalGateway>(app: &App<G>, body: &str) -> HttpReply {
    let request: SkillRequest = match serde_json::from_str(body) {
        Ok(request) => request,
        Err(error) => {
            debug!(%error, "malformed skill request");
            return HttpReply::error(400, "malformed request");
        }
    };

    if app.server.checks_skill_id() && request.application_id() != Some(app.server.skill_id.as_str())
    {
        info!("skill id does not match");
        return HttpReply::error(403, "unknown skill");
    }

    let Some(token) = request.access_token() else {
        return HttpReply::error(401, "account not linked");
    };

    let turn = TurnRequest {
        kind: request.turn_kind(),
        attributes: request.attributes(),
        identity_token: token.to_string(),
    };

    let response = match app.engine.handle(turn).await {
        Ok(response) => response,
        Err(TurnError::Unauthorized) => return HttpReply::error(401, "unknown participant"),
        Err(TurnError::Store(error)) => {
            warn!(%error, "participant lookup failed");
            return HttpReply::error(500, "storage unavailable");
        }
    };

    let encoded = SkillResponse::from_turn(response)
        .map_err(anyhow::Error::from)
        .and_then(|envelope| serde_json::to_string(&envelope).map_err(anyhow::Error::from));
    match encoded {
        Ok(body) => HttpReply::json(200, body),
        Err(error) => {
            warn!(%error, "failed to encode skill response");
            HttpReply::error(500, "response encoding failed")
        }
    }
}

/// Serve until Ctrl-C.
pub async fn serve<G: JournalGateway>(app: &App<G>, bind: &str) -> anyhow::Result<()> {
    let server = Arc::new(
        tiny_http::Server::http(bind)
            .map_err(|error| anyhow::anyhow!("failed to bind {bind}: {error}"))?,
    );
    info!(%bind, "listening");

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = Arc::clone(&shutdown);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                shutdown.store(true, Ordering::SeqCst);
            }
        });
    }

    while !shutdown.load(Ordering::SeqCst) {
        let listener = Arc::clone(&server);
        let next = tokio::task::spawn_blocking(move || listener.recv_timeout(POLL_INTERVAL))
            .await
            .context("recv task panicked")?
            .context("failed to receive request")?;
        let Some(mut request) = next else {
            continue;
        };

        let inbound = match read_inbound(&mut request) {
            Ok(inbound) => inbound,
            Err(error) => {
                warn!(%error, "unreadable request body");
                respond(request, &HttpReply::error(400, "unreadable body"));
                continue;
            }
        };
        debug!(method = %inbound.method, url = %inbound.url, "request");
        let reply = route(app, inbound).await;
        respond(request, &reply);
    }

    info!("shutting down");
    Ok(())
}

fn read_inbound(request: &mut tiny_http::Request) -> std::io::Result<Inbound> {
    let header = |name: &'static str| {
        request
            .headers()
            .iter()
            .find(|h| h.field.equiv(name))
            .map(|h| h.value.as_str().to_string())
    };
    let mut inbound = Inbound {
        method: request.method().as_str().to_string(),
        url: request.url().to_string(),
        authorization: header("Authorization"),
        pin: header("Pin"),
        body: String::new(),
    };
    request.as_reader().read_to_string(&mut inbound.body)?;
    Ok(inbound)
}

fn respond(request: tiny_http::Request, reply: &HttpReply) {
    let mut response =
        tiny_http::Response::from_string(reply.body.as_str()).with_status_code(reply.status);
    if let Ok(header) = tiny_http::Header::from_bytes("Content-Type", "application/json") {
        response = response.with_header(header);
    }
    if let Err(error) = request.respond(response) {
        debug!(%error, "client went away before the response");
    }
}
