use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a step, unique within a `Sequence`.
pub type StepId = String;

/// Identifier of a segment, unique within its step's wheel.
pub type SegmentId = String;

/// Cosmetic/scoring metadata on a segment. The engine never branches on it.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Legendary,
}

/// One pie-slice option on a wheel.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Segment {
    pub id: SegmentId,
    pub text: String,
    pub color: String,
    /// Relative probability mass. Does not need to sum to 100 across the wheel.
    pub weight: f64,
    pub rarity: Rarity,
}

impl Segment {
    /// Creates a common segment whose label and color are derived from its id.
    pub fn new(id: impl Into<SegmentId>, weight: f64) -> Self {
        let id = id.into();
        Self {
            text: id.clone(),
            color: String::from("#888888"),
            id,
            weight,
            rarity: Rarity::Common,
        }
    }
}

/// The set of segments a step spins over.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Wheel {
    pub segments: Vec<Segment>,
}

impl Wheel {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn segment(&self, segment_id: &str) -> Option<&Segment> {
        self.segments.iter().find(|s| s.id == segment_id)
    }
}

/// How a step consumes spins. Replaces the `isDeterminer` / `multiSpin` flag combination.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub enum StepKind {
    #[default]
    Normal,
    /// Produces a spin count for another step's dynamic multi-spin.
    Determiner,
    /// Spins a fixed number of times (2..=5) before producing one result.
    MultiSpinFixed { count: u8, aggregate_results: bool },
    /// Spins as many times as the determiner step's latest result encodes.
    MultiSpinDynamic {
        determiner_step_id: StepId,
        aggregate_results: bool,
    },
}

impl StepKind {
    pub fn is_multi_spin(&self) -> bool {
        matches!(
            self,
            StepKind::MultiSpinFixed { .. } | StepKind::MultiSpinDynamic { .. }
        )
    }
}

/// Comparison applied by a single branch condition.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    Equals,
    NotEquals,
}

impl ConditionOperator {
    pub fn symbol(&self) -> &'static str {
        match self {
            ConditionOperator::Equals => "==",
            ConditionOperator::NotEquals => "!=",
        }
    }
}

/// Combinator across a branch's conditions.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum BranchOperator {
    #[default]
    And,
    Or,
}

impl fmt::Display for BranchOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BranchOperator::And => write!(f, "AND"),
            BranchOperator::Or => write!(f, "OR"),
        }
    }
}

/// Compares a prior step's selected segment id against an expected value.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Condition {
    pub step_id: StepId,
    pub segment_id: SegmentId,
    pub operator: ConditionOperator,
    /// Overrides `segment_id` as the compared value when present.
    pub value: Option<String>,
}

impl Condition {
    pub fn equals(step_id: impl Into<StepId>, segment_id: impl Into<SegmentId>) -> Self {
        Self {
            step_id: step_id.into(),
            segment_id: segment_id.into(),
            operator: ConditionOperator::Equals,
            value: None,
        }
    }

    pub fn not_equals(step_id: impl Into<StepId>, segment_id: impl Into<SegmentId>) -> Self {
        Self {
            operator: ConditionOperator::NotEquals,
            ..Self::equals(step_id, segment_id)
        }
    }

    /// The segment id the recorded result is compared against.
    pub fn expected(&self) -> &str {
        self.value.as_deref().unwrap_or(&self.segment_id)
    }
}

/// Replaces one segment's weight on the step a branch transitions into.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WeightOverride {
    pub segment_id: SegmentId,
    pub new_weight: f64,
}

/// A conditional edge from a step to another step.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Branch {
    pub conditions: Vec<Condition>,
    pub operator: BranchOperator,
    pub next_step_id: StepId,
    pub weight_overrides: Vec<WeightOverride>,
}

impl Branch {
    pub fn new(operator: BranchOperator, conditions: Vec<Condition>, next: impl Into<StepId>) -> Self {
        Self {
            conditions,
            operator,
            next_step_id: next.into(),
            weight_overrides: Vec::new(),
        }
    }

    pub fn with_override(mut self, segment_id: impl Into<SegmentId>, new_weight: f64) -> Self {
        self.weight_overrides.push(WeightOverride {
            segment_id: segment_id.into(),
            new_weight,
        });
        self
    }
}

/// One node in the authored sequence graph.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Step {
    pub id: StepId,
    pub title: String,
    pub description: String,
    pub wheel: Wheel,
    pub default_next_step: Option<StepId>,
    /// Evaluated in order, first match wins.
    pub branches: Vec<Branch>,
    pub kind: StepKind,
}

impl Step {
    pub fn new(id: impl Into<StepId>, segments: Vec<Segment>) -> Self {
        let id = id.into();
        Self {
            title: id.clone(),
            id,
            description: String::new(),
            wheel: Wheel::new(segments),
            default_next_step: None,
            branches: Vec::new(),
            kind: StepKind::Normal,
        }
    }

    pub fn with_default_next(mut self, next: impl Into<StepId>) -> Self {
        self.default_next_step = Some(next.into());
        self
    }

    pub fn with_branch(mut self, branch: Branch) -> Self {
        self.branches.push(branch);
        self
    }

    pub fn with_kind(mut self, kind: StepKind) -> Self {
        self.kind = kind;
        self
    }
}

/// The complete authored graph a run executes over.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Sequence {
    pub steps: Vec<Step>,
    pub start_step_id: StepId,
}

impl Sequence {
    pub fn new(start_step_id: impl Into<StepId>, steps: Vec<Step>) -> Self {
        Self {
            steps,
            start_step_id: start_step_id.into(),
        }
    }

    pub fn step(&self, step_id: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.id == step_id)
    }

    pub fn contains(&self, step_id: &str) -> bool {
        self.step(step_id).is_some()
    }

    pub fn start_step(&self) -> Option<&Step> {
        self.step(&self.start_step_id)
    }
}
