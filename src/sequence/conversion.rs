use super::definition::Sequence;
use crate::error::ConversionError;

/// A trait for custom authoring models that can be converted into a `Sequence`.
///
/// Editors, generators and storage layers each have their own shape for a sequence.
/// Implementing this trait gives the engine a single canonical model to run.
///
/// # Example
///
/// ```rust,no_run
/// use spinverse::prelude::*;
/// use spinverse::error::ConversionError;
///
/// struct Quiz { questions: Vec<(String, Vec<String>)> }
///
/// impl IntoSequence for Quiz {
///     fn into_sequence(self) -> std::result::Result<Sequence, ConversionError> {
///         let ids: Vec<String> = self.questions.iter().map(|(id, _)| id.clone()).collect();
///         let steps = self
///             .questions
///             .into_iter()
///             .enumerate()
///             .map(|(i, (id, answers))| {
///                 let segments = answers.into_iter().map(|a| Segment::new(a, 1.0)).collect();
///                 let step = Step::new(id, segments);
///                 match ids.get(i + 1) {
///                     Some(next) => step.with_default_next(next.clone()),
///                     None => step,
///                 }
///             })
///             .collect();
///         let start = ids.first().cloned().ok_or_else(|| {
///             ConversionError::ValidationError("quiz has no questions".to_string())
///         })?;
///         Ok(Sequence::new(start, steps))
///     }
/// }
/// ```
pub trait IntoSequence {
    /// Consumes the object and converts it into a runnable sequence.
    fn into_sequence(self) -> Result<Sequence, ConversionError>;
}

impl IntoSequence for Sequence {
    fn into_sequence(self) -> Result<Sequence, ConversionError> {
        Ok(self)
    }
}
