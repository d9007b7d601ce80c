//! Shared wiring for the end-to-end scenarios. Every scenario runs
//! against both store adapters; the console transport stands in for the
//! messenger (state assertions go through the repos, which are the
//! source of truth).

use std::sync::Arc;
use vb_core::models::Author;
use vb_core::traits::{CommentRepo, SequenceStore, Transport, VentRepo};
use vb_services::{
    CommentService, IntentTracker, ModerationConfig, ModerationService, Router,
};
use vb_store_memory::MemoryStore;
use vb_store_sqlite::SqliteStore;
use vb_transport_console::ConsoleTransport;

pub const ADMIN: &str = "admin";

#[derive(Clone, Copy, Debug)]
pub enum StoreKind {
    Memory,
    Sqlite,
}

pub const ALL_STORES: [StoreKind; 2] = [StoreKind::Memory, StoreKind::Sqlite];

pub struct Pipeline {
    pub vents: Arc<dyn VentRepo>,
    pub moderation: Arc<ModerationService>,
    pub comments: Arc<CommentService>,
    pub router: Router,
}

pub async fn pipeline(kind: StoreKind, start_number: i64) -> Pipeline {
    let (vents, comment_repo, sequence): (
        Arc<dyn VentRepo>,
        Arc<dyn CommentRepo>,
        Arc<dyn SequenceStore>,
    ) = match kind {
        StoreKind::Memory => {
            let store = Arc::new(MemoryStore::new());
            (store.clone(), store.clone(), store)
        }
        StoreKind::Sqlite => {
            let store = Arc::new(SqliteStore::new("sqlite::memory:").await.unwrap());
            (store.clone(), store.clone(), store)
        }
    };

    let transport: Arc<dyn Transport> = Arc::new(ConsoleTransport::new());
    let deep_link_base = "https://t.me/ventboard_bot";

    let moderation = Arc::new(ModerationService::new(
        vents.clone(),
        sequence,
        transport.clone(),
        ModerationConfig {
            admin_id: ADMIN.into(),
            channel_id: "@ventboard".into(),
            start_number,
            deep_link_base: deep_link_base.into(),
        },
    ));
    let comments = Arc::new(CommentService::new(
        vents.clone(),
        comment_repo,
        transport,
        deep_link_base,
    ));
    let router = Router::new(
        Arc::new(IntentTracker::new()),
        moderation.clone(),
        comments.clone(),
    );

    Pipeline {
        vents,
        moderation,
        comments,
        router,
    }
}

pub fn author(user_id: &str) -> Author {
    Author {
        user_id: user_id.to_string(),
        username: Some(user_id.to_string()),
        display_name: Some(user_id.to_string()),
    }
}
