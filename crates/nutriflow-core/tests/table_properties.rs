//! Structural properties of the flow and dispatch tables.
//!
//! These hold for every supported flow, so new flows are checked the moment
//! they are added to the catalogs:
//! - step resolution terminates within a small bound
//! - a terminal resolution implies every dispatch-required field is present
//! - resolution is deterministic

mod common;

use common::sample_value;
use nutriflow_core::{DispatchTable, FlowContext, FlowId, FlowTable, StepResolution};

/// Drive a flow's resolver with well-formed values until terminal,
/// returning the accumulated context.
fn drive_to_terminal(table: &FlowTable, flow: FlowId) -> FlowContext {
    let mut context = FlowContext::new();
    for _ in 0..16 {
        match table.resolve(flow, &context).unwrap() {
            StepResolution::Step(step) => {
                context.insert(step.key, sample_value(step.key));
            }
            StepResolution::Terminal => return context,
        }
    }
    panic!("flow {flow} did not reach terminal within 16 steps");
}

/// Tenet: no flow's predicate list is circular.
#[test]
fn every_flow_terminates() {
    let table = FlowTable::standard();
    for flow in FlowId::ALL {
        drive_to_terminal(&table, flow);
    }
}

/// Tenet: when the resolver reports terminal, the context satisfies the
/// dispatch table's required fields; the two tables cannot drift apart.
#[test]
fn terminal_context_satisfies_dispatch_requirements() {
    let flow_table = FlowTable::standard();
    let dispatch_table = DispatchTable::standard();

    for flow in FlowId::ALL {
        let context = drive_to_terminal(&flow_table, flow);
        let entry = dispatch_table
            .entry(flow)
            .unwrap_or_else(|| panic!("no dispatch entry for {flow}"));
        for key in entry.required() {
            assert!(
                context.contains(*key),
                "flow {flow} reached terminal without required field {key}"
            );
        }
    }
}

/// Tenet: resolution is a pure function of `(flow, context)`.
#[test]
fn resolution_is_deterministic_at_every_prefix() {
    let table = FlowTable::standard();
    for flow in FlowId::ALL {
        let mut context = FlowContext::new();
        for _ in 0..16 {
            let first = table.resolve(flow, &context).unwrap();
            let second = table.resolve(flow, &context).unwrap();
            assert_eq!(first, second, "unstable resolution for {flow}");
            match first {
                StepResolution::Step(step) => {
                    context.insert(step.key, sample_value(step.key));
                }
                StepResolution::Terminal => break,
            }
        }
    }
}
