//! # Ventboard Binary
//!
//! Assembles the moderation pipeline from the selected plugins and
//! drives it from stdin: each line is `<user_id> <input>`, where input
//! is a command (`/start`, `/vent`, `/pending`), a callback payload
//! (`approve_<id>`, `browse_<id>`, ...) or plain text interpreted
//! through the sender's pending intent. The console transport stands in
//! for the real messenger.

use anyhow::Context;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;
use vb_configs::Settings;
use vb_core::error::AppError;
use vb_core::models::{Author, ButtonAction};
use vb_core::traits::{CommentRepo, SequenceStore, Transport, VentRepo};
use vb_services::{
    CommentService, IntentTracker, ModerationConfig, ModerationService, Reply, Router,
};
use vb_transport_console::ConsoleTransport;

// Feature-gated imports: pick the store plugin at compile time
#[cfg(feature = "store-sqlite")]
use vb_store_sqlite::SqliteStore;

#[cfg(all(feature = "store-memory", not(feature = "store-sqlite")))]
use vb_store_memory::MemoryStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::load().context("failed to load settings")?;

    // 1. Initialize the store implementation (serves all three ports)
    #[cfg(feature = "store-sqlite")]
    let store = Arc::new(
        SqliteStore::new(&settings.database_url)
            .await
            .context("failed to init SQLite store")?,
    );

    #[cfg(all(feature = "store-memory", not(feature = "store-sqlite")))]
    let store = Arc::new(MemoryStore::new());

    // 2. Initialize the transport implementation
    let transport: Arc<dyn Transport> = Arc::new(ConsoleTransport::new());

    // 3. Wire the services
    let vents: Arc<dyn VentRepo> = store.clone();
    let comments_repo: Arc<dyn CommentRepo> = store.clone();
    let sequence: Arc<dyn SequenceStore> = store.clone();

    let moderation = Arc::new(ModerationService::new(
        vents.clone(),
        sequence,
        transport.clone(),
        ModerationConfig {
            admin_id: settings.admin_id.clone(),
            channel_id: settings.channel_id.clone(),
            start_number: settings.start_vent_number,
            deep_link_base: settings.deep_link_base.clone(),
        },
    ));
    let comments = Arc::new(CommentService::new(
        vents,
        comments_repo,
        transport,
        settings.deep_link_base.clone(),
    ));
    let router = Router::new(Arc::new(IntentTracker::new()), moderation, comments);

    tracing::info!("🚀 Ventboard is live; type `<user_id> <input>` (Ctrl-D to quit)");

    run_console(router).await
}

async fn run_console(router: Router) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((user_id, input)) = line.split_once(char::is_whitespace) else {
            println!("usage: <user_id> <input>");
            continue;
        };
        let actor = Author {
            user_id: user_id.to_string(),
            username: None,
            display_name: None,
        };

        match dispatch(&router, &actor, input.trim()).await {
            Ok(replies) => {
                for reply in replies {
                    print_reply(&actor.user_id, &reply);
                }
            }
            Err(err) => println!("-> {}: {}", actor.user_id, render_error(&err)),
        }
    }
    Ok(())
}

async fn dispatch(
    router: &Router,
    actor: &Author,
    input: &str,
) -> vb_core::error::Result<Vec<Reply>> {
    if let Some(rest) = input.strip_prefix("/start") {
        let payload = rest.trim();
        let payload = (!payload.is_empty()).then_some(payload);
        return router.handle_start(actor, payload).await;
    }
    if input == "/vent" {
        return Ok(vec![router.begin_vent(&actor.user_id)]);
    }
    if input == "/pending" {
        return router.pending_review(actor).await;
    }
    if ["approve_", "reject_", "browse_", "addcomment_"]
        .iter()
        .any(|prefix| input.starts_with(prefix))
    {
        return Ok(vec![router.handle_callback(actor, input).await?]);
    }
    Ok(vec![router.handle_text(actor, input).await?])
}

fn print_reply(user_id: &str, reply: &Reply) {
    println!("-> {user_id}: {}", reply.text);
    for button in &reply.buttons {
        match &button.action {
            ButtonAction::Callback(payload) => println!("   [{}] send: {payload}", button.label),
            ButtonAction::Url(url) => println!("   [{}] open: {url}", button.label),
        }
    }
}

/// User-facing rendering of the error taxonomy. Storage problems stay
/// generic; unauthorized replies leak nothing about the target.
fn render_error(err: &AppError) -> String {
    match err {
        AppError::Validation(msg) => format!("❌ {msg}"),
        AppError::NotFound(kind, _) => format!("{kind} not found."),
        AppError::Unauthorized(_) => "🚫 Unauthorized".to_string(),
        AppError::Storage(_) | AppError::Transport(_) => {
            "Something went wrong. Try again later.".to_string()
        }
    }
}
