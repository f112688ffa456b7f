//! NutriFlow Core
//!
//! The multi-step assistant-flow orchestrator: given a chosen flow, walk the
//! user through a variable-length sequence of data-collection steps,
//! accumulate the answers, dispatch to the generation layer at the terminal
//! step, and deliver exactly one Interaction per completed run.
//!
//! # Core Concepts
//!
//! - [`FlowTable`]: declarative per-flow step tables with presence/content
//!   predicates; one resolver answers "next step" and "finished"
//! - [`FlowController`]: the Idle / AwaitingInput / Dispatching state
//!   machine; single active flow, explicit cancel
//! - [`DispatchTable`]: flow-to-operation lookup with required-field checks
//! - [`MealGenerator`]: the async seam to the external generation layer
//! - [`AssistantEngine`]: the async façade; dispatches without holding the
//!   controller lock and discards superseded results
//!
//! # Example
//!
//! ```rust,ignore
//! use nutriflow_core::prelude::*;
//!
//! let engine = AssistantEngine::new(generator, surface);
//! engine.start(FlowId::BudgetPlanning).await?;
//! engine.advance(StepOutput::single(FieldKey::BudgetLimit, FieldValue::Amount(200.0))).await?;
//! engine.advance(StepOutput::single(FieldKey::Month, FieldValue::Text("2025-07".into()))).await?;
//! ```

#![warn(unreachable_pub)]

pub mod context;
pub mod controller;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod interaction;
pub mod resolver;
pub mod router;
pub mod types;

pub use context::{FieldKey, FieldValue, FlowContext, StepOutput};
pub use controller::{DispatchTicket, FlowController, FlowProgress};
pub use dispatch::{
    AvailabilityReport, DispatchEntry, DispatchTable, MealGenerator, MenuProposal,
    ShoppingProposal, StoreAdvice,
};
pub use engine::{AssistantEngine, EngineProgress};
pub use error::{DispatchError, FlowError, GenerationError};
pub use interaction::{Interaction, InteractionContent, InteractionFormatter};
pub use resolver::{FlowTable, StepDescriptor, StepResolution, StepSpec};
pub use router::{ChatSurface, ResultRouter};
pub use types::{ConversationId, EngineConfig, FlowId, FlowRunId, InteractionId, StepKind};

/// Commonly used items
pub mod prelude {
    pub use crate::context::{FieldKey, FieldValue, FlowContext, StepOutput};
    pub use crate::engine::{AssistantEngine, EngineProgress};
    pub use crate::error::{DispatchError, FlowError, GenerationError};
    pub use crate::interaction::{Interaction, InteractionContent};
    pub use crate::router::ChatSurface;
    pub use crate::types::{EngineConfig, FlowId, StepKind};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
