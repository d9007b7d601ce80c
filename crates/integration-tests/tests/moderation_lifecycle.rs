//! End-to-end moderation lifecycle scenarios, run against both store
//! adapters.

mod common;

use common::{author, pipeline, ADMIN, ALL_STORES};
use uuid::Uuid;
use vb_core::error::AppError;
use vb_core::models::{Decision, DecisionOutcome, VentState};

#[tokio::test]
async fn submit_then_approve_assigns_the_starting_number() {
    for kind in ALL_STORES {
        let pipe = pipeline(kind, 5).await;

        let vent = pipe
            .moderation
            .submit(author("alice"), "stressed about exams")
            .await
            .unwrap();
        assert_eq!(vent.state, VentState::Pending);

        let outcome = pipe
            .moderation
            .decide(vent.id, ADMIN, Decision::Approve)
            .await
            .unwrap();
        assert_eq!(outcome, DecisionOutcome::Approved { public_number: 5 });

        let stored = pipe.vents.get_vent(vent.id).await.unwrap().unwrap();
        assert_eq!(stored.state, VentState::Approved, "{kind:?}");
        assert_eq!(stored.public_number, Some(5));
        assert_eq!(stored.comment_count, 0);
        assert!(stored.channel_message.is_some());

        // Re-pressing the button is a safe no-op, not an error.
        let again = pipe
            .moderation
            .decide(vent.id, ADMIN, Decision::Approve)
            .await
            .unwrap();
        assert_eq!(again, DecisionOutcome::AlreadyDecided);
        let after = pipe.vents.get_vent(vent.id).await.unwrap().unwrap();
        assert_eq!(after.public_number, Some(5));
    }
}

#[tokio::test]
async fn concurrent_approvals_split_the_counter() {
    for kind in ALL_STORES {
        let pipe = pipeline(kind, 10).await;
        let a = pipe.moderation.submit(author("alice"), "first").await.unwrap();
        let b = pipe.moderation.submit(author("bob"), "second").await.unwrap();

        let (ra, rb) = tokio::join!(
            pipe.moderation.decide(a.id, ADMIN, Decision::Approve),
            pipe.moderation.decide(b.id, ADMIN, Decision::Approve),
        );
        ra.unwrap();
        rb.unwrap();

        let na = pipe.vents.get_vent(a.id).await.unwrap().unwrap().public_number.unwrap();
        let nb = pipe.vents.get_vent(b.id).await.unwrap().unwrap().public_number.unwrap();
        let mut numbers = [na, nb];
        numbers.sort_unstable();
        assert_eq!(numbers, [10, 11], "{kind:?}");
    }
}

#[tokio::test]
async fn numbers_increase_in_approval_order() {
    for kind in ALL_STORES {
        let pipe = pipeline(kind, 100).await;

        let mut assigned = Vec::new();
        for i in 0..5 {
            let vent = pipe
                .moderation
                .submit(author("alice"), &format!("vent {i}"))
                .await
                .unwrap();
            let outcome = pipe
                .moderation
                .decide(vent.id, ADMIN, Decision::Approve)
                .await
                .unwrap();
            let DecisionOutcome::Approved { public_number } = outcome else {
                panic!("expected approval");
            };
            assigned.push(public_number);
        }
        assert_eq!(assigned, [100, 101, 102, 103, 104], "{kind:?}");
    }
}

#[tokio::test]
async fn rejection_is_terminal_and_unnumbered() {
    for kind in ALL_STORES {
        let pipe = pipeline(kind, 1).await;
        let vent = pipe.moderation.submit(author("alice"), "nope").await.unwrap();

        let outcome = pipe
            .moderation
            .decide(vent.id, ADMIN, Decision::Reject)
            .await
            .unwrap();
        assert_eq!(outcome, DecisionOutcome::Rejected);

        // A later approval attempt cannot resurrect it.
        let again = pipe
            .moderation
            .decide(vent.id, ADMIN, Decision::Approve)
            .await
            .unwrap();
        assert_eq!(again, DecisionOutcome::AlreadyDecided);

        let stored = pipe.vents.get_vent(vent.id).await.unwrap().unwrap();
        assert_eq!(stored.state, VentState::Rejected, "{kind:?}");
        assert!(stored.public_number.is_none());
        assert!(stored.channel_message.is_none());
    }
}

#[tokio::test]
async fn non_admin_cannot_decide() {
    for kind in ALL_STORES {
        let pipe = pipeline(kind, 1).await;
        let vent = pipe.moderation.submit(author("alice"), "target").await.unwrap();

        let err = pipe
            .moderation
            .decide(vent.id, "mallory", Decision::Approve)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)), "{kind:?}");

        let stored = pipe.vents.get_vent(vent.id).await.unwrap().unwrap();
        assert_eq!(stored.state, VentState::Pending);
    }
}

#[tokio::test]
async fn deciding_an_unknown_id_is_not_found() {
    for kind in ALL_STORES {
        let pipe = pipeline(kind, 1).await;
        let err = pipe
            .moderation
            .decide(Uuid::now_v7(), ADMIN, Decision::Approve)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_, _)), "{kind:?}");
    }
}

#[tokio::test]
async fn pending_queue_shrinks_as_decisions_land() {
    for kind in ALL_STORES {
        let pipe = pipeline(kind, 1).await;
        let a = pipe.moderation.submit(author("alice"), "one").await.unwrap();
        let b = pipe.moderation.submit(author("bob"), "two").await.unwrap();

        assert_eq!(pipe.moderation.list_pending(ADMIN).await.unwrap().len(), 2);

        pipe.moderation.decide(a.id, ADMIN, Decision::Approve).await.unwrap();
        let pending = pipe.moderation.list_pending(ADMIN).await.unwrap();
        assert_eq!(pending.len(), 1, "{kind:?}");
        assert_eq!(pending[0].id, b.id);
    }
}
