//! Common test utilities for building sequences and spin outcomes.
use chrono::{DateTime, TimeZone, Utc};
use spinverse::prelude::*;

/// Two-segment wheel with equal weights.
#[allow(dead_code)]
pub fn coin(heads: &str, tails: &str) -> Vec<Segment> {
    vec![Segment::new(heads, 50.0), Segment::new(tails, 50.0)]
}

/// Determiner wheel whose segment ids encode spin counts.
#[allow(dead_code)]
pub fn determiner_segments() -> Vec<Segment> {
    vec![
        Segment::new("1-spin", 20.0),
        Segment::new("2-spins", 20.0),
        Segment::new("3-spins", 20.0),
        Segment::new("4-spins", 20.0),
        Segment::new("5-spins", 20.0),
    ]
}

/// A landed outcome for the segment with `id` on `step`.
#[allow(dead_code)]
pub fn outcome(step: &Step, id: &str) -> SpinResult {
    let index = step
        .wheel
        .segments
        .iter()
        .position(|s| s.id == id)
        .expect("segment exists on the step's wheel");
    SpinResult::new(index, step.wheel.segments[index].clone())
}

/// A segment that is not on any wheel, for result-only fixtures.
#[allow(dead_code)]
pub fn loose_outcome(id: &str) -> SpinResult {
    SpinResult::new(0, Segment::new(id, 1.0))
}

#[allow(dead_code)]
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

/// History containing one result per `(step_id, segment_id)` pair, in order.
#[allow(dead_code)]
pub fn history_of(entries: &[(&str, &str)]) -> RunHistory {
    RunHistory::from(
        entries
            .iter()
            .map(|(step_id, segment_id)| SequenceResult {
                step_id: step_id.to_string(),
                spin_result: loose_outcome(segment_id),
                timestamp: fixed_time(),
                multi_spin_results: None,
            })
            .collect::<Vec<_>>(),
    )
}

/// `S1 (X|Y) -> S2`, with a branch on `S1 == X` to `S3`.
///
/// The branch writes `value` explicitly, the way the editor does.
#[allow(dead_code)]
pub fn create_branching_sequence() -> Sequence {
    let mut condition = Condition::equals("S1", "X");
    condition.value = Some("X".to_string());
    Sequence::new(
        "S1",
        vec![
            Step::new("S1", coin("X", "Y"))
                .with_default_next("S2")
                .with_branch(Branch::new(BranchOperator::And, vec![condition], "S3")),
            Step::new("S2", coin("P", "Q")),
            Step::new("S3", coin("P", "Q")),
        ],
    )
}

/// `D` (determiner) -> `T` (dynamic multi-spin over `D`, aggregate) -> end.
#[allow(dead_code)]
pub fn create_dynamic_sequence(aggregate_results: bool) -> Sequence {
    Sequence::new(
        "D",
        vec![
            Step::new("D", determiner_segments())
                .with_kind(StepKind::Determiner)
                .with_default_next("T"),
            Step::new("T", coin("P", "Q")).with_kind(StepKind::MultiSpinDynamic {
                determiner_step_id: "D".to_string(),
                aggregate_results,
            }),
        ],
    )
}

/// A step that spins `count` times with the given fold mode.
#[allow(dead_code)]
pub fn fixed_multi_spin_step(count: u8, aggregate_results: bool) -> Step {
    Step::new(
        "M",
        vec![
            Segment::new("A", 25.0),
            Segment::new("B", 25.0),
            Segment::new("C", 50.0),
        ],
    )
    .with_kind(StepKind::MultiSpinFixed {
        count,
        aggregate_results,
    })
}

/// Spins a scripted list of segment ids in order, then repeats the last one.
#[allow(dead_code)]
pub struct ScriptedSource {
    ids: Vec<String>,
    position: usize,
}

#[allow(dead_code)]
impl ScriptedSource {
    pub fn new(ids: &[&str]) -> Self {
        Self {
            ids: ids.iter().map(|id| id.to_string()).collect(),
            position: 0,
        }
    }
}

impl SpinSource for ScriptedSource {
    fn spin(&mut self, wheel: &Wheel) -> std::result::Result<SpinResult, SelectionError> {
        if wheel.segments.is_empty() {
            return Err(SelectionError::EmptySegmentSet);
        }
        let id = &self.ids[self.position.min(self.ids.len() - 1)];
        self.position += 1;
        let index = wheel
            .segments
            .iter()
            .position(|s| &s.id == id)
            .unwrap_or(0);
        Ok(SpinResult::new(index, wheel.segments[index].clone()))
    }
}

/// The editor's JSON for a small adventure with a dynamic multi-spin step.
#[allow(dead_code)]
pub const ADVENTURE_JSON: &str = r##"{
  "startStepId": "weather",
  "steps": [
    {
      "id": "weather",
      "title": "What is the weather?",
      "wheelConfig": {
        "segments": [
          { "id": "storm", "text": "Storm", "color": "#334455", "weight": 30 },
          { "id": "sun", "text": "Sunshine", "color": "#ffcc00", "weight": 70, "rarity": "uncommon" }
        ],
        "size": 400,
        "spinDuration": 3000
      },
      "defaultNextStep": "count",
      "branches": [
        {
          "conditions": [
            { "stepId": "weather", "segmentId": "storm", "operator": "equals", "value": "storm" }
          ],
          "operator": "and",
          "nextStepId": "shelter",
          "weightOverrides": [ { "segmentId": "cave", "newWeight": 80 } ]
        }
      ]
    },
    {
      "id": "shelter",
      "wheelConfig": {
        "segments": [
          { "id": "cave", "text": "", "color": "#222222", "weight": 50 },
          { "id": "inn", "text": "Inn", "color": "#aa7744", "weight": 50 }
        ]
      },
      "defaultNextStep": ""
    },
    {
      "id": "count",
      "isDeterminer": true,
      "wheelConfig": {
        "segments": [
          { "id": "2-spins", "text": "Two", "color": "#111111", "weight": 50 },
          { "id": "3-spins", "text": "Three", "color": "#222222", "weight": 50 }
        ]
      },
      "defaultNextStep": "loot"
    },
    {
      "id": "loot",
      "wheelConfig": {
        "segments": [
          { "id": "gold", "text": "Gold", "color": "#ffd700", "weight": 10, "rarity": "legendary" },
          { "id": "bread", "text": "Bread", "color": "#deb887", "weight": 90 }
        ]
      },
      "multiSpin": {
        "enabled": true,
        "mode": "dynamic",
        "determinerStepId": "count",
        "aggregateResults": true
      }
    }
  ]
}"##;
