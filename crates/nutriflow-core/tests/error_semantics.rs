//! Functional tests for the end-to-end error model.
//!
//! - Generation rejections travel the same delivery channel as success, as
//!   an error-kind Interaction, and the controller resets.
//! - Validation failures (resolver/dispatch drift) take the same channel.
//! - Illegal transitions and unregistered flows surface as errors to the
//!   caller, never as Interactions.

mod common;

use std::sync::Arc;

use common::{sample_value, RecordingSurface, StubGenerator};
use nutriflow_core::{
    AssistantEngine, ConversationId, DispatchTable, FieldKey, FlowContext, FlowError, FlowId,
    GenerationError, InteractionContent, InteractionFormatter, MealGenerator, StepOutput,
};

/// Tenet: a rejecting generator yields exactly one error Interaction with
/// the upstream message, and the engine is immediately ready for a new flow.
#[tokio::test]
async fn generator_rejection_surfaces_as_error_interaction() {
    let surface = RecordingSurface::new();
    let generator = StubGenerator::failing(GenerationError::Upstream("rate limited".into()));
    let engine = AssistantEngine::new(Arc::new(generator), surface.clone());

    engine.start(FlowId::RecipeCompatibility).await.unwrap();
    engine
        .advance(StepOutput::single(
            FieldKey::Members,
            sample_value(FieldKey::Members),
        ))
        .await
        .unwrap();
    engine
        .advance(StepOutput::single(
            FieldKey::Recipe,
            sample_value(FieldKey::Recipe),
        ))
        .await
        .unwrap();

    assert!(engine.is_idle());
    let delivered = surface.delivered.lock();
    assert_eq!(delivered.len(), 1);
    let interaction = &delivered[0].0;
    assert_eq!(interaction.kind, "error");
    match &interaction.content {
        InteractionContent::Error { message, .. } => assert!(message.contains("rate limited")),
        other => panic!("expected error content, got {other:?}"),
    }

    // The engine accepts a fresh flow right away.
    engine.start(FlowId::QuickRecipe).await.unwrap();
    assert!(!engine.is_idle());
}

/// Tenet: a terminal context missing a required field is a validation
/// failure formatted through the same uniform channel as success.
#[tokio::test]
async fn missing_required_field_formats_as_error_interaction() {
    let table = DispatchTable::standard();
    let generator: Arc<dyn MealGenerator> = Arc::new(StubGenerator::answering());

    // Month never collected.
    let mut context = FlowContext::new();
    context.merge(StepOutput::single(
        FieldKey::BudgetLimit,
        sample_value(FieldKey::BudgetLimit),
    ));

    let outcome = table
        .entry(FlowId::BudgetPlanning)
        .unwrap()
        .invoke(generator, context)
        .await;
    assert!(outcome.as_ref().is_err_and(|e| e.is_validation()));

    let interaction = InteractionFormatter::format(outcome, ConversationId::new());
    assert_eq!(interaction.kind, "error");
    match &interaction.content {
        InteractionContent::Error { message, .. } => assert!(message.contains("month")),
        other => panic!("expected error content, got {other:?}"),
    }
}

/// Tenet: advancing an idle engine is rejected with NotAwaitingInput, not
/// queued and not delivered.
#[tokio::test]
async fn advance_while_idle_is_rejected() {
    let surface = RecordingSurface::new();
    let engine = AssistantEngine::new(Arc::new(StubGenerator::answering()), surface.clone());

    let result = engine.advance(StepOutput::empty()).await;
    match result {
        Err(FlowError::NotAwaitingInput { state: "idle" }) => {}
        other => panic!("expected NotAwaitingInput, got {other:?}"),
    }
    assert_eq!(surface.count(), 0);
}

/// Tenet: configuration defects are distinguishable from runtime errors.
#[test]
fn configuration_defects_are_classified() {
    assert!(FlowError::UnsupportedFlow(FlowId::WeeklyMenu).is_configuration_defect());
    assert!(FlowError::NoTerminalStep(FlowId::WeeklyMenu).is_configuration_defect());
    assert!(!FlowError::NotAwaitingInput { state: "idle" }.is_configuration_defect());
}
