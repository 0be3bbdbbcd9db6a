//! Stateful onboarding session
//!
//! Wraps a `WizardSession` so the page never holds form state itself.
//! Every JS-facing method delegates to an `*_internal` method that returns
//! plain Rust types, which keeps the logic testable off the browser.

use std::collections::BTreeMap;

use js_sys::Function;
use onboarding_core::{
    FormError, Navigation, OptionsCatalog, Step, SubmitSink, Submission, SubmittedApplication,
    WizardSession,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::to_js;

/// Result of `next` / `goTo`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepOutcome {
    pub step: u8,
    pub moved: bool,
    /// First message per failing path; empty when the step was left
    pub errors: BTreeMap<String, String>,
}

impl From<Navigation> for StepOutcome {
    fn from(navigation: Navigation) -> Self {
        match navigation {
            Navigation::Moved(step) => Self {
                step: step.number(),
                moved: true,
                errors: BTreeMap::new(),
            },
            Navigation::Blocked { step, report } => Self {
                step: step.number(),
                moved: false,
                errors: report.messages(),
            },
        }
    }
}

/// Result of `submit`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOutcome {
    pub accepted: bool,
    pub application_id: Option<String>,
    pub errors: BTreeMap<String, String>,
}

impl From<Submission> for SubmitOutcome {
    fn from(submission: Submission) -> Self {
        match submission {
            Submission::Accepted { application_id } => Self {
                accepted: true,
                application_id: Some(application_id.to_string()),
                errors: BTreeMap::new(),
            },
            Submission::Rejected(report) => Self {
                accepted: false,
                application_id: None,
                errors: report.messages(),
            },
        }
    }
}

/// Hands the application to a JavaScript callback as a plain object
struct CallbackSink<'a> {
    callback: &'a Function,
}

impl SubmitSink for CallbackSink<'_> {
    fn submit(&mut self, application: SubmittedApplication) -> anyhow::Result<()> {
        let payload = to_js(&application)
            .map_err(|e| anyhow::anyhow!("{}", e.as_string().unwrap_or_default()))?;
        self.callback
            .call1(&JsValue::NULL, &payload)
            .map_err(|e| anyhow::anyhow!("submit callback threw: {}", js_error_message(&e)))?;
        Ok(())
    }
}

/// Message of a thrown value: `Error.message` for errors, the string itself
/// for thrown strings
fn js_error_message(thrown: &JsValue) -> String {
    match thrown.dyn_ref::<js_sys::Error>() {
        Some(error) => String::from(error.message()),
        None => thrown
            .as_string()
            .unwrap_or_else(|| "unknown error".to_string()),
    }
}

fn js_err(e: FormError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// One onboarding form held in Rust memory
#[wasm_bindgen]
pub struct OnboardingSession {
    inner: WizardSession,
}

impl OnboardingSession {
    /// Build from an optional options-catalog JSON document
    fn new_internal(catalog_json: Option<&str>) -> Result<Self, String> {
        let catalog = match catalog_json {
            Some(json) => OptionsCatalog::from_json_str(json).map_err(|e| format!("{:#}", e))?,
            None => OptionsCatalog::default(),
        };
        Ok(Self {
            inner: WizardSession::new(catalog),
        })
    }

    fn set_field_internal(&mut self, path: &str, value: serde_json::Value) -> Result<(), String> {
        self.inner.set_field(path, value).map_err(|e| e.to_string())
    }

    fn next_internal(&mut self) -> Result<StepOutcome, String> {
        self.inner
            .next()
            .map(StepOutcome::from)
            .map_err(|e| e.to_string())
    }

    fn go_to_internal(&mut self, step: u8) -> Result<StepOutcome, String> {
        let target = Step::from_number(step).map_err(|e| e.to_string())?;
        Ok(self.inner.go_to(target).into())
    }

    fn submit_internal<S: SubmitSink + ?Sized>(
        &mut self,
        sink: &mut S,
    ) -> Result<SubmitOutcome, String> {
        self.inner
            .submit(sink)
            .map(SubmitOutcome::from)
            .map_err(|e| e.to_string())
    }

    fn validate_step_internal(&self, step: u8) -> Result<BTreeMap<String, String>, String> {
        let step = Step::from_number(step).map_err(|e| e.to_string())?;
        Ok(self.inner.validate_step(step).messages())
    }
}

#[wasm_bindgen]
impl OnboardingSession {
    /// Create a session, optionally with a custom options catalog (JSON)
    #[wasm_bindgen(constructor)]
    pub fn new(catalog_json: Option<String>) -> Result<OnboardingSession, JsValue> {
        Self::new_internal(catalog_json.as_deref()).map_err(|e| JsValue::from_str(&e))
    }

    /// Session id, a UUID v4 string
    #[wasm_bindgen(getter)]
    pub fn id(&self) -> String {
        self.inner.id().to_string()
    }

    #[wasm_bindgen(js_name = setField)]
    pub fn set_field(&mut self, path: &str, value: JsValue) -> Result<(), JsValue> {
        let value: serde_json::Value = serde_wasm_bindgen::from_value(value)
            .map_err(|e| JsValue::from_str(&format!("Invalid value for {}: {}", path, e)))?;
        self.set_field_internal(path, value)
            .map_err(|e| JsValue::from_str(&e))
    }

    #[wasm_bindgen(js_name = getField)]
    pub fn get_field(&self, path: &str) -> Result<JsValue, JsValue> {
        let value = self.inner.field_value(path).map_err(js_err)?;
        to_js(&value)
    }

    /// Select or deselect a skill; returns whether it is now selected
    #[wasm_bindgen(js_name = toggleSkill)]
    pub fn toggle_skill(&mut self, skill: &str) -> Result<bool, JsValue> {
        self.inner.toggle_skill(skill).map_err(js_err)
    }

    pub fn next(&mut self) -> Result<JsValue, JsValue> {
        let outcome = self.next_internal().map_err(|e| JsValue::from_str(&e))?;
        to_js(&outcome)
    }

    /// Go back one step; returns the new step number
    pub fn prev(&mut self) -> u8 {
        self.inner.prev().number()
    }

    #[wasm_bindgen(js_name = goTo)]
    pub fn go_to(&mut self, step: u8) -> Result<JsValue, JsValue> {
        let outcome = self.go_to_internal(step).map_err(|e| JsValue::from_str(&e))?;
        to_js(&outcome)
    }

    /// Submit from the review step.
    /// Callback signature: (application: object) => void
    pub fn submit(&mut self, callback: &Function) -> Result<JsValue, JsValue> {
        let mut sink = CallbackSink { callback };
        let outcome = self
            .submit_internal(&mut sink)
            .map_err(|e| JsValue::from_str(&e))?;
        to_js(&outcome)
    }

    /// All current failures as `{ path: message }`
    pub fn validate(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.validate().messages())
    }

    #[wasm_bindgen(js_name = validateStep)]
    pub fn validate_step(&self, step: u8) -> Result<JsValue, JsValue> {
        let messages = self
            .validate_step_internal(step)
            .map_err(|e| JsValue::from_str(&e))?;
        to_js(&messages)
    }

    #[wasm_bindgen(js_name = fieldState)]
    pub fn field_state(&self, path: &str) -> Result<JsValue, JsValue> {
        let state = self.inner.field_state(path).map_err(js_err)?;
        to_js(&state)
    }

    #[wasm_bindgen(js_name = managerOptions)]
    pub fn manager_options(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.manager_options())
    }

    #[wasm_bindgen(js_name = skillOptions)]
    pub fn skill_options(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.skill_options())
    }

    #[wasm_bindgen(js_name = relationOptions)]
    pub fn relation_options(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.relation_options())
    }

    #[wasm_bindgen(js_name = departmentOptions)]
    pub fn department_options(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.department_options())
    }

    #[wasm_bindgen(js_name = jobTypeOptions)]
    pub fn job_type_options(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.job_type_options())
    }

    pub fn summary(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.summary())
    }

    /// Step indicator entries with completion status
    pub fn steps(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.steps())
    }

    #[wasm_bindgen(getter, js_name = currentStep)]
    pub fn current_step(&self) -> u8 {
        self.inner.current_step().number()
    }

    /// Progress bar fill, 0-100
    #[wasm_bindgen(getter)]
    pub fn progress(&self) -> f64 {
        self.inner.progress()
    }

    /// Age derived from the entered date of birth
    pub fn age(&self) -> Option<i32> {
        self.inner.age()
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }
}


#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_set_and_get_field_through_js_values() {
        let mut session = OnboardingSession::new(None).unwrap();
        session
            .set_field("fullName", JsValue::from_str("Jane Doe"))
            .unwrap();
        let value = session.get_field("fullName").unwrap();
        assert_eq!(value.as_string().as_deref(), Some("Jane Doe"));
    }

    #[wasm_bindgen_test]
    fn test_unknown_field_is_rejected() {
        let mut session = OnboardingSession::new(None).unwrap();
        let err = session
            .set_field("nickname", JsValue::from_str("JD"))
            .unwrap_err();
        assert_eq!(err.as_string().as_deref(), Some("Unknown field: nickname"));
    }

    #[wasm_bindgen_test]
    fn test_thrown_error_message_is_kept() {
        let error: JsValue = js_sys::Error::new("backend down").into();
        assert_eq!(js_error_message(&error), "backend down");
        assert_eq!(js_error_message(&JsValue::from_str("nope")), "nope");
        assert_eq!(js_error_message(&JsValue::from(42)), "unknown error");
    }

    #[wasm_bindgen_test]
    fn test_sink_reports_callback_error_message() {
        let callback = Function::new_with_args("application", "throw new Error('backend down');");
        let mut sink = CallbackSink {
            callback: &callback,
        };
        let application = SubmittedApplication {
            application_id: WizardSession::default().id(),
            submitted_at: chrono::Utc::now(),
            age: None,
            record: onboarding_core::ApplicationRecord::default(),
        };
        let err = sink.submit(application).unwrap_err();
        assert_eq!(err.to_string(), "submit callback threw: backend down");
    }

    #[wasm_bindgen_test]
    fn test_submit_outside_review_never_calls_back() {
        let mut session = OnboardingSession::new(None).unwrap();
        let callback = Function::new_with_args("application", "throw new Error('called');");
        assert!(session.submit(&callback).is_err());
        assert_eq!(session.current_step(), 1);
    }
}
