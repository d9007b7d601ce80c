//! Inline-button builders shared by the moderation and comment flows.

use uuid::Uuid;
use vb_core::models::Button;

/// The approve/reject pair attached to an admin review card, keyed by the
/// pending vent's id.
pub(crate) fn decision_buttons(vent_id: Uuid) -> [Button; 2] {
    [
        Button::callback("✅ Approve", format!("approve_{vent_id}")),
        Button::callback("❌ Reject", format!("reject_{vent_id}")),
    ]
}

/// The deep-link button on a published vent showing the live comment
/// count, e.g. `💬 Comments (3)`.
pub(crate) fn comments_button(deep_link_base: &str, vent_id: Uuid, count: i64) -> Button {
    Button::url(
        format!("💬 Comments ({count})"),
        format!("{deep_link_base}?start=comments_{vent_id}"),
    )
}
