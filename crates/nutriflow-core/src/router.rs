//! Delivery of finished Interactions to the display surface.

use std::sync::Arc;

use tracing::info;

use crate::interaction::Interaction;
use crate::types::FlowId;

/// The consuming display surface, implemented by the embedding application.
///
/// Delivery is fire-and-forget: the orchestrator neither awaits nor
/// inspects its effect.
pub trait ChatSurface: Send + Sync {
    /// Receive the single Interaction of a completed flow run
    fn deliver(&self, interaction: Interaction, flow: FlowId);
}

/// Forwards finished Interactions to the surface
#[derive(Clone)]
pub struct ResultRouter {
    surface: Arc<dyn ChatSurface>,
}

impl ResultRouter {
    /// Create a router over a surface
    #[must_use]
    pub fn new(surface: Arc<dyn ChatSurface>) -> Self {
        Self { surface }
    }

    /// Hand the Interaction to the surface
    pub fn deliver(&self, interaction: Interaction, flow: FlowId) {
        info!(
            %flow,
            kind = %interaction.kind,
            conversation = %interaction.conversation_id,
            "delivering interaction"
        );
        self.surface.deliver(interaction, flow);
    }
}

impl std::fmt::Debug for ResultRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultRouter").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::{InteractionContent, InteractionFormatter};
    use crate::types::ConversationId;
    use parking_lot::Mutex;

    struct Recording {
        delivered: Mutex<Vec<(Interaction, FlowId)>>,
    }

    impl ChatSurface for Recording {
        fn deliver(&self, interaction: Interaction, flow: FlowId) {
            self.delivered.lock().push((interaction, flow));
        }
    }

    #[test]
    fn delivers_to_the_surface() {
        let surface = Arc::new(Recording {
            delivered: Mutex::new(Vec::new()),
        });
        let router = ResultRouter::new(surface.clone());

        let interaction = InteractionFormatter::format(
            Ok(InteractionContent::TroubleshootProblem {
                question: "why is my bread dense".into(),
                solution: "knead longer".into(),
            }),
            ConversationId::new(),
        );
        router.deliver(interaction, FlowId::TroubleshootProblem);

        let delivered = surface.delivered.lock();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].1, FlowId::TroubleshootProblem);
    }
}
