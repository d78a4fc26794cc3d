//! Views over the memoized flow document.

use super::StaticFlow;
use crate::error::JanrainResult;
use janrain_types::{ErrorDetails, FormFields, Outcome, Translation};
use std::sync::Arc;

const FLOW_UNAVAILABLE: &str = "flow_unavailable";

fn flow_unavailable() -> ErrorDetails {
    ErrorDetails::local(FLOW_UNAVAILABLE, "the flow asset could not be loaded")
}

/// Field descriptors of a form, in the order the form lists them.
#[derive(Debug, Clone)]
pub struct FormConfiguration {
    flow: Arc<StaticFlow>,
}

impl FormConfiguration {
    pub fn new(flow: Arc<StaticFlow>) -> Self {
        Self { flow }
    }

    pub async fn load(&self, form_name: &str) -> JanrainResult<Outcome<FormFields>> {
        let Some(document) = self.flow.flow_content().await? else {
            return Ok(Outcome::Failure(flow_unavailable()));
        };
        Ok(match document.form_fields(form_name) {
            Some(results) => Outcome::Success(FormFields { results }),
            None => Outcome::Failure(ErrorDetails::local(
                "form_not_found",
                format!("form {form_name} is not defined or has no fields"),
            )),
        })
    }
}

/// String values of the flow, looked up by field name.
#[derive(Debug, Clone)]
pub struct Translations {
    flow: Arc<StaticFlow>,
}

impl Translations {
    pub fn new(flow: Arc<StaticFlow>) -> Self {
        Self { flow }
    }

    pub async fn load(&self, name: &str) -> JanrainResult<Outcome<Translation>> {
        let Some(document) = self.flow.flow_content().await? else {
            return Ok(Outcome::Failure(flow_unavailable()));
        };
        Ok(match document.translation(name) {
            Some(value) => Outcome::Success(Translation { result: value.clone() }),
            None => Outcome::Failure(ErrorDetails::local(
                "translation_not_found",
                format!("{name} is not a string field of the flow"),
            )),
        })
    }
}
