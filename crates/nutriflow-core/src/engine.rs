//! The assistant engine: the async façade over the flow machinery.
//!
//! Owns the flow controller behind a mutex and performs the terminal
//! dispatch without holding it, so the controller stays responsive to
//! `cancel` and `start` while a generation call is in flight. Each dispatch
//! carries its run identity; a completed dispatch whose run is no longer
//! current is discarded without producing an Interaction.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{error, info, warn};

use crate::context::StepOutput;
use crate::controller::{DispatchTicket, FlowController, FlowProgress};
use crate::dispatch::{DispatchTable, MealGenerator};
use crate::error::FlowError;
use crate::interaction::InteractionFormatter;
use crate::resolver::{FlowTable, StepDescriptor};
use crate::router::{ChatSurface, ResultRouter};
use crate::types::{EngineConfig, FlowId};

/// Caller-visible outcome of `start` or `advance`
#[derive(Debug, Clone)]
pub enum EngineProgress {
    /// Present this collection step next
    Awaiting(StepDescriptor),
    /// The flow ran to completion; its Interaction was delivered
    Completed,
    /// The flow's dispatch finished after being superseded; nothing was
    /// delivered
    Discarded,
}

/// Drives flows end to end: step resolution, context accumulation,
/// terminal dispatch, and Interaction delivery
pub struct AssistantEngine {
    dispatch: DispatchTable,
    generator: Arc<dyn MealGenerator>,
    router: ResultRouter,
    controller: Mutex<FlowController>,
}

impl AssistantEngine {
    /// Create an engine over the standard flow catalog
    #[must_use]
    pub fn new(generator: Arc<dyn MealGenerator>, surface: Arc<dyn ChatSurface>) -> Self {
        Self::with_config(generator, surface, EngineConfig::default())
    }

    /// Create an engine with explicit configuration
    #[must_use]
    pub fn with_config(
        generator: Arc<dyn MealGenerator>,
        surface: Arc<dyn ChatSurface>,
        config: EngineConfig,
    ) -> Self {
        let table = Arc::new(FlowTable::standard());
        Self {
            dispatch: DispatchTable::standard(),
            generator,
            router: ResultRouter::new(surface),
            controller: Mutex::new(FlowController::new(table, config)),
        }
    }

    /// Whether no flow is active
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.controller.lock().is_idle()
    }

    /// Name of the controller's current state, for diagnostics and tests
    #[must_use]
    pub fn state_name(&self) -> &'static str {
        self.controller.lock().state_name()
    }

    /// Begin a flow with an empty context.
    ///
    /// Implicitly cancels any active flow first.
    pub async fn start(&self, flow: FlowId) -> Result<EngineProgress, FlowError> {
        self.start_seeded(flow, StepOutput::empty()).await
    }

    /// Begin a flow with caller-provided fields already collected.
    ///
    /// A seed satisfying every step dispatches immediately.
    pub async fn start_seeded(
        &self,
        flow: FlowId,
        seed: StepOutput,
    ) -> Result<EngineProgress, FlowError> {
        let progress = self.controller.lock().start_seeded(flow, seed)?;
        match progress {
            FlowProgress::Awaiting(step) => Ok(EngineProgress::Awaiting(step)),
            FlowProgress::Dispatch(ticket) => self.run_dispatch(ticket).await,
        }
    }

    /// Submit the active step's output.
    ///
    /// Returns the next step, or completes the flow when the submitted step
    /// was terminal. Rejected while idle or while a dispatch is in flight.
    pub async fn advance(&self, output: StepOutput) -> Result<EngineProgress, FlowError> {
        let progress = self.controller.lock().advance(output)?;
        match progress {
            FlowProgress::Awaiting(step) => Ok(EngineProgress::Awaiting(step)),
            FlowProgress::Dispatch(ticket) => self.run_dispatch(ticket).await,
        }
    }

    /// Abandon the active flow. No Interaction is produced; an in-flight
    /// dispatch will be discarded on completion.
    pub fn cancel(&self) {
        self.controller.lock().cancel();
    }

    async fn run_dispatch(&self, ticket: DispatchTicket) -> Result<EngineProgress, FlowError> {
        let Some(entry) = self.dispatch.entry(ticket.flow) else {
            error!(flow = %ticket.flow, "flow has a step table but no dispatch entry");
            let _ = self.controller.lock().finish(ticket.run);
            return Err(FlowError::UnsupportedFlow(ticket.flow));
        };

        info!(flow = %ticket.flow, run = %ticket.run, "dispatching");
        let outcome = entry
            .invoke(self.generator.clone(), ticket.context.clone())
            .await;

        // The lock is only re-taken after the await; a cancel or restart in
        // the meantime makes this run stale.
        if !self.controller.lock().finish(ticket.run) {
            warn!(
                flow = %ticket.flow,
                run = %ticket.run,
                "discarding result of superseded dispatch"
            );
            return Ok(EngineProgress::Discarded);
        }

        let interaction = InteractionFormatter::format(outcome, ticket.conversation);
        self.router.deliver(interaction, ticket.flow);
        Ok(EngineProgress::Completed)
    }
}

impl std::fmt::Debug for AssistantEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistantEngine").finish_non_exhaustive()
    }
}
