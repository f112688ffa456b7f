//! The stateful flow driver.
//!
//! [`FlowController`] owns the active flow, its context, and the current
//! step. It is a plain synchronous state machine:
//!
//! ```text
//! Idle -> AwaitingInput -> ... -> Dispatching -> Idle
//! ```
//!
//! Exactly one flow is active per controller. Starting a flow while another
//! is active implicitly cancels the active one. The controller never awaits;
//! the async dispatch happens outside it against a [`DispatchTicket`]
//! snapshot, and [`FlowController::finish`] decides whether the completed
//! dispatch is still current.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::context::{FlowContext, StepOutput};
use crate::error::FlowError;
use crate::resolver::{FlowTable, StepDescriptor, StepResolution};
use crate::types::{ConversationId, EngineConfig, FlowId, FlowRunId};

/// Where the controller currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ControllerState {
    Idle,
    AwaitingInput {
        flow: FlowId,
        run: FlowRunId,
        conversation: ConversationId,
        step: StepDescriptor,
    },
    Dispatching {
        flow: FlowId,
        run: FlowRunId,
    },
}

impl ControllerState {
    fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::AwaitingInput { .. } => "awaiting_input",
            Self::Dispatching { .. } => "dispatching",
        }
    }
}

/// Everything a dispatch needs, snapshotted at the terminal step.
///
/// The context is a snapshot: the controller may be cancelled or restarted
/// while the dispatch is in flight without affecting it.
#[derive(Debug, Clone)]
pub struct DispatchTicket {
    pub flow: FlowId,
    pub run: FlowRunId,
    pub conversation: ConversationId,
    pub context: FlowContext,
}

/// What a successful `start` or `advance` produced
#[derive(Debug, Clone)]
pub enum FlowProgress {
    /// Present this step next
    Awaiting(StepDescriptor),
    /// The flow is terminal; execute this dispatch
    Dispatch(DispatchTicket),
}

/// The single-writer state machine driving one wizard at a time
#[derive(Debug)]
pub struct FlowController {
    table: Arc<FlowTable>,
    config: EngineConfig,
    state: ControllerState,
    context: FlowContext,
    steps_taken: u32,
}

impl FlowController {
    /// Create an idle controller over a flow table
    #[must_use]
    pub fn new(table: Arc<FlowTable>, config: EngineConfig) -> Self {
        Self {
            table,
            config,
            state: ControllerState::Idle,
            context: FlowContext::new(),
            steps_taken: 0,
        }
    }

    /// Name of the current state, for diagnostics and tests
    #[inline]
    #[must_use]
    pub fn state_name(&self) -> &'static str {
        self.state.name()
    }

    /// Whether no flow is active
    #[inline]
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self.state, ControllerState::Idle)
    }

    /// The accumulated context of the active flow
    #[inline]
    #[must_use]
    pub fn context(&self) -> &FlowContext {
        &self.context
    }

    /// Whether `run` is the currently active run
    #[inline]
    #[must_use]
    pub fn is_current(&self, run: FlowRunId) -> bool {
        match self.state {
            ControllerState::AwaitingInput { run: active, .. }
            | ControllerState::Dispatching { run: active, .. } => active == run,
            ControllerState::Idle => false,
        }
    }

    /// Begin a flow with an empty context
    pub fn start(&mut self, flow: FlowId) -> Result<FlowProgress, FlowError> {
        self.start_seeded(flow, StepOutput::empty())
    }

    /// Begin a flow with caller-provided fields already in context.
    ///
    /// Any active flow is implicitly cancelled first. A seed that already
    /// satisfies every step goes straight to dispatch.
    pub fn start_seeded(
        &mut self,
        flow: FlowId,
        seed: StepOutput,
    ) -> Result<FlowProgress, FlowError> {
        if !self.is_idle() {
            info!(
                state = self.state.name(),
                new_flow = %flow,
                "implicitly cancelling active flow"
            );
            self.reset();
        }

        let run = FlowRunId::new();
        let conversation = ConversationId::new();
        self.context.merge(seed);

        debug!(%flow, %run, "starting flow");
        match self.table.resolve(flow, &self.context) {
            Ok(StepResolution::Step(step)) => {
                self.state = ControllerState::AwaitingInput {
                    flow,
                    run,
                    conversation,
                    step,
                };
                Ok(FlowProgress::Awaiting(step))
            }
            Ok(StepResolution::Terminal) => {
                self.state = ControllerState::Dispatching { flow, run };
                Ok(FlowProgress::Dispatch(DispatchTicket {
                    flow,
                    run,
                    conversation,
                    context: self.context.clone(),
                }))
            }
            Err(err) => {
                self.reset();
                Err(err)
            }
        }
    }

    /// Merge a submitted step's output and move to the next step or to
    /// dispatch.
    ///
    /// Legal only in `AwaitingInput`; a call while idle or while a dispatch
    /// is in flight is rejected, not queued.
    pub fn advance(&mut self, output: StepOutput) -> Result<FlowProgress, FlowError> {
        let ControllerState::AwaitingInput {
            flow,
            run,
            conversation,
            step,
        } = self.state
        else {
            return Err(FlowError::NotAwaitingInput {
                state: self.state.name(),
            });
        };

        self.context.merge(output);
        self.steps_taken += 1;
        if self.steps_taken > self.config.max_steps {
            warn!(%flow, steps = self.steps_taken, "step table appears circular");
            let limit = self.config.max_steps;
            self.reset();
            return Err(FlowError::StepLimitExceeded { flow, limit });
        }

        if step.terminal {
            debug!(%flow, %run, "terminal step submitted, moving to dispatch");
            self.state = ControllerState::Dispatching { flow, run };
            return Ok(FlowProgress::Dispatch(DispatchTicket {
                flow,
                run,
                conversation,
                context: self.context.clone(),
            }));
        }

        match self.table.resolve(flow, &self.context) {
            Ok(StepResolution::Step(next)) => {
                debug!(%flow, %run, key = %next.key, "awaiting next step");
                self.state = ControllerState::AwaitingInput {
                    flow,
                    run,
                    conversation,
                    step: next,
                };
                Ok(FlowProgress::Awaiting(next))
            }
            Ok(StepResolution::Terminal) => {
                // A non-terminal step satisfied the remaining predicates
                // (e.g. a seeded field made later steps unnecessary).
                debug!(%flow, %run, "context complete, moving to dispatch");
                self.state = ControllerState::Dispatching { flow, run };
                Ok(FlowProgress::Dispatch(DispatchTicket {
                    flow,
                    run,
                    conversation,
                    context: self.context.clone(),
                }))
            }
            Err(err) => {
                self.reset();
                Err(err)
            }
        }
    }

    /// Abandon the active flow, discarding its context in full.
    ///
    /// No Interaction is produced. A dispatch already in flight keeps
    /// running; its completion will be discarded by [`Self::finish`].
    pub fn cancel(&mut self) {
        if !self.is_idle() {
            info!(state = self.state.name(), "flow cancelled");
        }
        self.reset();
    }

    /// Mark the dispatch for `run` as finished and reset to idle.
    ///
    /// Returns `false` when `run` is no longer current (the flow was
    /// cancelled or superseded while the dispatch was in flight); the caller
    /// must then discard the dispatch result.
    #[must_use]
    pub fn finish(&mut self, run: FlowRunId) -> bool {
        match self.state {
            ControllerState::Dispatching { run: active, .. } if active == run => {
                self.reset();
                true
            }
            _ => false,
        }
    }

    fn reset(&mut self) {
        self.state = ControllerState::Idle;
        self.context = FlowContext::new();
        self.steps_taken = 0;
    }
}
