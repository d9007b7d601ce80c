//! ventboard/crates/vb-core/src/lib.rs
//!
//! The central domain logic and interface definitions for Ventboard.

pub mod error;
pub mod models;
pub mod traits;

// Re-exporting for easier access in other crates
pub use error::*;
pub use models::*;
pub use traits::*;

#[cfg(test)]
mod tests {
    use super::models::*;
    use uuid::Uuid;

    #[test]
    fn test_vent_creation_v7() {
        let vent = Vent::new_pending(
            Author {
                user_id: "12345".to_string(),
                username: Some("alice".to_string()),
                display_name: Some("Alice".to_string()),
            },
            "stressed about exams",
        );
        assert_eq!(vent.state, VentState::Pending);
        assert!(vent.public_number.is_none());
        assert!(vent.channel_message.is_none());
        assert_eq!(vent.comment_count, 0);
        assert!(!vent.is_terminal());
    }

    #[test]
    fn test_comment_references_parent() {
        let parent_id = Uuid::now_v7();
        let comment = Comment::new(
            parent_id,
            Author {
                user_id: "67890".to_string(),
                username: None,
                display_name: None,
            },
            "hang in there",
        );
        assert_eq!(comment.vent_id, parent_id);
    }

    #[test]
    fn test_author_label() {
        let with_handle = Author {
            user_id: "1".into(),
            username: Some("bob".into()),
            display_name: Some("Bob".into()),
        };
        assert_eq!(with_handle.label(), "Bob (@bob)");

        let bare = Author {
            user_id: "2".into(),
            username: None,
            display_name: None,
        };
        assert_eq!(bare.label(), "Anonymous (no_username)");
    }
}
