//! Tests for the async session host.
#![cfg(feature = "actor")]
mod common;
use common::*;
use spinverse::actor::{self, SessionHandle};
use spinverse::prelude::*;

#[cfg(test)]
mod actor_tests {
    use super::*;

    async fn spin(handle: &SessionHandle, id: EventId, step: &Step, segment_id: &str) -> Vec<Effect> {
        handle
            .dispatch(RunEvent::Spin(SpinEvent {
                event_id: id,
                step_id: step.id.clone(),
                outcome: outcome(step, segment_id),
                timestamp: fixed_time(),
            }))
            .await
            .unwrap()
    }

    #[test]
    fn test_actor_runs_a_sequence() {
        tokio_test::block_on(async {
            let sequence = create_dynamic_sequence(true);
            let determiner = sequence.step("D").unwrap().clone();
            let target = sequence.step("T").unwrap().clone();
            let handle = actor::spawn(SpinSession::new(sequence));

            handle.dispatch(RunEvent::Start).await.unwrap();
            handle.record_spin(determiner.id.as_str(), outcome(&determiner, "2-spins")).await.unwrap();
            handle.record_spin(target.id.as_str(), outcome(&target, "P")).await.unwrap();
            let effects = handle.record_spin(target.id.as_str(), outcome(&target, "Q")).await.unwrap();
            assert_eq!(effects.last(), Some(&Effect::SequenceCompleted));

            let snapshot = handle.snapshot().await.unwrap();
            assert!(snapshot.completed);
            assert_eq!(snapshot.results.len(), 2);
        });
    }

    #[test]
    fn test_actor_drops_repeated_deliveries() {
        tokio_test::block_on(async {
            let sequence = create_branching_sequence();
            let first = sequence.step("S1").unwrap().clone();
            let handle = actor::spawn(SpinSession::new(sequence));
            handle.dispatch(RunEvent::Start).await.unwrap();

            let id = handle.issue_event_id().await.unwrap();
            let clone = handle.clone();
            let (a, b) = tokio::join!(spin(&handle, id, &first, "X"), spin(&clone, id, &first, "X"));

            let discarded = [a, b]
                .iter()
                .filter(|effects| matches!(effects[..], [Effect::Discarded(_)]))
                .count();
            assert_eq!(discarded, 1);
            assert_eq!(handle.snapshot().await.unwrap().results.len(), 1);
        });
    }

    #[test]
    fn test_actor_record_spin_ignores_repeated_outcome() {
        tokio_test::block_on(async {
            let sequence = Sequence::new(
                "S1",
                vec![
                    Step::new("S1", coin("X", "Y")).with_default_next("S2"),
                    Step::new("S2", coin("P", "Q")),
                ],
            );
            let first = sequence.step("S1").unwrap().clone();
            let handle = actor::spawn(SpinSession::new(sequence));
            handle.dispatch(RunEvent::Start).await.unwrap();

            let clone = handle.clone();
            let (a, b) = tokio::join!(
                handle.record_spin("S1", outcome(&first, "X")),
                clone.record_spin("S1", outcome(&first, "X"))
            );

            let discarded = [a.unwrap(), b.unwrap()]
                .iter()
                .filter(|effects| {
                    matches!(
                        effects[..],
                        [Effect::Discarded(DiscardReason::WrongStep { .. })]
                    )
                })
                .count();
            assert_eq!(discarded, 1);
            let snapshot = handle.snapshot().await.unwrap();
            assert_eq!(snapshot.results.len(), 1);
            assert_eq!(snapshot.results[0].step_id, "S1");
        });
    }

    #[test]
    fn test_issued_ids_increase() {
        tokio_test::block_on(async {
            let handle = actor::spawn(SpinSession::new(create_branching_sequence()));
            let first = handle.issue_event_id().await.unwrap();
            let second = handle.issue_event_id().await.unwrap();
            assert!(second > first);
        });
    }
}
