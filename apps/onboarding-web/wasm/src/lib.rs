//! WASM bindings for the employee onboarding wizard
//!
//! All form state lives in Rust inside an `OnboardingSession`. JavaScript
//! renders inputs, forwards edits and shows whatever the session reports.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { OnboardingSession, fieldsForStep } from './pkg/onboarding_wasm.js';
//!
//! await init();
//!
//! const session = new OnboardingSession();
//! session.setField("fullName", "Jane Doe");
//! session.setField("department", "Engineering");
//! const managers = session.managerOptions();
//!
//! const outcome = session.next();
//! if (!outcome.moved) showErrors(outcome.errors);
//!
//! // On the review step
//! session.submit((application) => fetch("/api/onboarding", {
//!     method: "POST",
//!     body: JSON.stringify(application),
//! }));
//! ```

pub mod session;

use onboarding_core::{fields_for_step, FormCalendar};
use serde::Serialize;
use wasm_bindgen::prelude::*;

pub use session::OnboardingSession;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&"Onboarding WASM initialized".into());
}

/// Get the library version
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    onboarding_core::VERSION.to_string()
}

/// Top-level field names validated on `step` (1-5)
#[wasm_bindgen(js_name = fieldsForStep)]
pub fn fields_for_step_js(step: u8) -> Result<JsValue, JsValue> {
    let names = step_field_names(step)?;
    to_js(&names)
}

fn step_field_names(step: u8) -> Result<Vec<&'static str>, String> {
    let fields = fields_for_step(step).map_err(|e| e.to_string())?;
    Ok(fields.iter().map(|f| f.as_str()).collect())
}

/// Whole years since `dob` (YYYY-MM-DD) as of today, or undefined
#[wasm_bindgen(js_name = calculateAge)]
pub fn calculate_age(dob: &str) -> Option<i32> {
    FormCalendar::age_from_input(dob, FormCalendar::today())
}

/// Serialize to plain JS objects rather than `Map`s
pub(crate) fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}
