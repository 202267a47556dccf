use crate::error::ConversionError;
use crate::orchestrator::MAX_SPIN_COUNT;
use crate::sequence::{
    Branch, BranchOperator, Condition, ConditionOperator, IntoSequence, Rarity, Segment,
    Sequence, Step, StepKind, WeightOverride, Wheel,
};
use serde::{Deserialize, Serialize};
use std::fs;

/// Smallest count a fixed multi-spin may use. Lower counts are not multi-spin.
const MIN_FIXED_COUNT: u8 = 2;

/// The JSON authoring format written by the sequence editor.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SequenceDocument {
    pub start_step_id: String,
    pub steps: Vec<StepDocument>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StepDocument {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub wheel_config: WheelDocument,
    #[serde(default)]
    pub default_next_step: Option<String>,
    #[serde(default)]
    pub branches: Vec<BranchDocument>,
    #[serde(default)]
    pub multi_spin: Option<MultiSpinDocument>,
    #[serde(default)]
    pub is_determiner: bool,
}

/// Rendering fields (size, spin duration, friction) are accepted and ignored.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WheelDocument {
    pub segments: Vec<SegmentDocument>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SegmentDocument {
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub color: String,
    pub weight: f64,
    #[serde(default)]
    pub rarity: Rarity,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BranchDocument {
    pub conditions: Vec<ConditionDocument>,
    #[serde(default)]
    pub operator: BranchOperator,
    pub next_step_id: String,
    #[serde(default)]
    pub weight_overrides: Vec<WeightOverrideDocument>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ConditionDocument {
    pub step_id: String,
    pub segment_id: String,
    pub operator: ConditionOperator,
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WeightOverrideDocument {
    pub segment_id: String,
    pub new_weight: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MultiSpinMode {
    Fixed,
    Dynamic,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MultiSpinDocument {
    pub enabled: bool,
    pub mode: MultiSpinMode,
    #[serde(default)]
    pub fixed_count: Option<u8>,
    #[serde(default)]
    pub determiner_step_id: Option<String>,
    #[serde(default)]
    pub aggregate_results: bool,
}

impl SequenceDocument {
    pub fn from_json(json: &str) -> Result<Self, ConversionError> {
        serde_json::from_str(json).map_err(|e| ConversionError::JsonParseError(e.to_string()))
    }

    /// Load a sequence document from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, ConversionError> {
        let content = fs::read_to_string(path).map_err(|source| ConversionError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&content)
    }
}

impl IntoSequence for SequenceDocument {
    fn into_sequence(self) -> Result<Sequence, ConversionError> {
        if self.steps.is_empty() {
            return Err(ConversionError::ValidationError(
                "sequence has no steps".to_string(),
            ));
        }
        let steps = self
            .steps
            .into_iter()
            .map(StepDocument::into_step)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Sequence::new(self.start_step_id, steps))
    }
}

impl StepDocument {
    fn into_step(self) -> Result<Step, ConversionError> {
        if self.wheel_config.segments.is_empty() {
            return Err(ConversionError::ValidationError(format!(
                "step '{}' has no segments",
                self.id
            )));
        }
        let kind = step_kind(&self.id, self.is_determiner, self.multi_spin);
        let segments = self
            .wheel_config
            .segments
            .into_iter()
            .map(|s| Segment {
                text: if s.text.is_empty() { s.id.clone() } else { s.text },
                id: s.id,
                color: s.color,
                weight: s.weight,
                rarity: s.rarity,
            })
            .collect();
        let branches = self
            .branches
            .into_iter()
            .map(|b| Branch {
                conditions: b
                    .conditions
                    .into_iter()
                    .map(|c| Condition {
                        step_id: c.step_id,
                        segment_id: c.segment_id,
                        operator: c.operator,
                        value: c.value.filter(|v| !v.is_empty()),
                    })
                    .collect(),
                operator: b.operator,
                next_step_id: b.next_step_id,
                weight_overrides: b
                    .weight_overrides
                    .into_iter()
                    .map(|o| WeightOverride {
                        segment_id: o.segment_id,
                        new_weight: o.new_weight,
                    })
                    .collect(),
            })
            .collect();

        Ok(Step {
            title: if self.title.is_empty() { self.id.clone() } else { self.title },
            id: self.id,
            description: self.description,
            wheel: Wheel::new(segments),
            default_next_step: self.default_next_step.filter(|id| !id.is_empty()),
            branches,
            kind,
        })
    }
}

/// Collapses the editor's flags into one step kind.
fn step_kind(step_id: &str, is_determiner: bool, multi_spin: Option<MultiSpinDocument>) -> StepKind {
    let Some(config) = multi_spin.filter(|m| m.enabled) else {
        return if is_determiner {
            StepKind::Determiner
        } else {
            StepKind::Normal
        };
    };
    if is_determiner {
        log::warn!(
            "Step '{}' is a determiner with multi-spin enabled, ignoring multi-spin",
            step_id
        );
        return StepKind::Determiner;
    }

    match config.mode {
        MultiSpinMode::Fixed => StepKind::MultiSpinFixed {
            count: config
                .fixed_count
                .unwrap_or(MIN_FIXED_COUNT)
                .clamp(MIN_FIXED_COUNT, MAX_SPIN_COUNT),
            aggregate_results: config.aggregate_results,
        },
        MultiSpinMode::Dynamic => match config.determiner_step_id.filter(|id| !id.is_empty()) {
            Some(determiner_step_id) => StepKind::MultiSpinDynamic {
                determiner_step_id,
                aggregate_results: config.aggregate_results,
            },
            None => {
                log::warn!(
                    "Step '{}' uses dynamic multi-spin without a determiner, spinning once",
                    step_id
                );
                StepKind::Normal
            }
        },
    }
}
