//! Error types for the flow orchestrator
//!
//! Three layers:
//! - [`FlowError`]: configuration defects and illegal transitions; these
//!   propagate to the caller and are never converted to an Interaction.
//! - [`DispatchError`]: failures while executing a terminal dispatch; always
//!   converted to an error Interaction and delivered through the normal path.
//! - [`GenerationError`]: rejection from the external generation layer,
//!   wrapped into [`DispatchError::Generation`].

use crate::context::FieldKey;
use crate::types::FlowId;

/// Errors in flow setup and state transitions
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    /// Flow has no step table or dispatch entry
    #[error("unsupported flow: {0}")]
    UnsupportedFlow(FlowId),

    /// Step table never reaches a terminal step
    #[error("no terminal step declared for flow: {0}")]
    NoTerminalStep(FlowId),

    /// `advance` called outside `AwaitingInput`
    #[error("flow not awaiting input (state: {state})")]
    NotAwaitingInput { state: &'static str },

    /// Step bound exceeded; the step table is circular
    #[error("step limit exceeded for flow {flow} ({limit} steps)")]
    StepLimitExceeded { flow: FlowId, limit: u32 },
}

impl FlowError {
    /// Whether this error indicates a defective flow table rather than a
    /// runtime condition
    #[inline]
    #[must_use]
    pub fn is_configuration_defect(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFlow(_) | Self::NoTerminalStep(_) | Self::StepLimitExceeded { .. }
        )
    }
}

/// Errors while executing a terminal dispatch
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// Terminal step reached but a required context field is absent.
    /// Indicates resolver/dispatch-table drift.
    #[error("missing required field: {0}")]
    MissingField(FieldKey),

    /// A context field holds a value of an unexpected shape
    #[error("field {key} has wrong type (expected {expected})")]
    WrongFieldType {
        key: FieldKey,
        expected: &'static str,
    },

    /// The generation layer rejected the request
    #[error("generation failed: {0}")]
    Generation(#[from] GenerationError),
}

impl DispatchError {
    /// Whether this is a context-validation failure rather than an upstream
    /// rejection
    #[inline]
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::MissingField(_) | Self::WrongFieldType { .. })
    }
}

/// Rejection from the external generation layer, treated opaquely
#[derive(Debug, Clone, thiserror::Error)]
pub enum GenerationError {
    /// Upstream service error with its message
    #[error("{0}")]
    Upstream(String),

    /// Upstream quota exhausted
    #[error("rate limited")]
    RateLimited,

    /// Submitted image could not be processed
    #[error("image could not be processed: {0}")]
    InvalidImage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flow_error_display() {
        let err = FlowError::UnsupportedFlow(FlowId::WeeklyMenu);
        assert!(err.to_string().contains("unsupported flow"));
        assert!(err.is_configuration_defect());
    }

    #[test]
    fn not_awaiting_input_is_not_configuration_defect() {
        let err = FlowError::NotAwaitingInput { state: "idle" };
        assert!(!err.is_configuration_defect());
    }

    #[test]
    fn dispatch_error_validation_predicate() {
        assert!(DispatchError::MissingField(FieldKey::Month).is_validation());
        assert!(!DispatchError::Generation(GenerationError::RateLimited).is_validation());
    }

    #[test]
    fn generation_error_message_passthrough() {
        let err = DispatchError::from(GenerationError::Upstream("rate limited".into()));
        assert!(err.to_string().contains("rate limited"));
    }
}
