// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;
use std::sync::Arc;

use crate::engine::{Evaluation, Flow, Invocation, Outcome, Transformer};
use crate::errors::Error;
use crate::traits::Evaluate;

/// One active processor of a plan.
#[derive(Debug, Clone)]
pub struct Step {
    pub keyword: String,
    pub catcher: bool,
    pub transformer: Transformer,
}

/// Compiled steps of one single-way schema, in registration order.
///
/// Values flow through the non-catching steps until one raises an expectation
/// error; from then on only catching steps see the flow, and may recover it.
/// The flow stays synchronous until a step returns a pending evaluation, after
/// which the remaining steps run as a continuation.
#[derive(Debug, Clone)]
pub struct ProcessingPlan {
    namespace: Arc<str>,
    steps: Arc<[Step]>,
}

impl ProcessingPlan {
    pub fn new(namespace: &str, steps: Vec<Step>) -> Self {
        Self {
            namespace: Arc::from(namespace),
            steps: Arc::from(steps),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn keywords(&self) -> Vec<&str> {
        self.steps.iter().map(|step| step.keyword.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Evaluate for ProcessingPlan {
    fn evaluate(&self, value: Option<Value>, invocation: &Invocation) -> Evaluation {
        run(
            self.steps.clone(),
            self.namespace.clone(),
            0,
            Ok(value),
            invocation,
        )
    }
}

fn run(
    steps: Arc<[Step]>,
    namespace: Arc<str>,
    start: usize,
    mut flow: Flow,
    invocation: &Invocation,
) -> Evaluation {
    for index in start..steps.len() {
        let step = &steps[index];
        if step.catcher != flow.is_err() {
            continue;
        }

        match step.transformer.apply(flow, invocation) {
            Evaluation::Settled(outcome) => match absorb(outcome, &namespace, &step.keyword) {
                Ok(next) => flow = next,
                Err(error) => return Evaluation::fail(error),
            },
            Evaluation::Pending(future) => {
                let invocation = invocation.clone();
                return Evaluation::pending(async move {
                    let flow = absorb(future.await, &namespace, &steps[index].keyword)?;
                    run(steps.clone(), namespace.clone(), index + 1, flow, &invocation)
                        .resolve()
                        .await
                });
            }
        }
    }

    match flow {
        Ok(value) => Evaluation::ready(value),
        Err(error) => Evaluation::fail(error),
    }
}

/// Turn a step outcome back into a flow. Expectation errors become the
/// sentinel carried to the next steps; anything else aborts the plan.
fn absorb(outcome: Outcome, namespace: &str, keyword: &str) -> Result<Flow, Error> {
    match outcome {
        Ok(value) => Ok(Ok(value)),
        Err(Error::Expectation(error)) => Ok(Err(error.backfilled(Some(namespace), Some(keyword)))),
        Err(other) => Err(other),
    }
}
