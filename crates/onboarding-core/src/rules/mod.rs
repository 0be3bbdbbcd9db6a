//! Validation rules
//!
//! Per-field rules are grouped by the step that shows the field:
//! 1. Personal - name, email, phone, date of birth, picture
//! 2. Job - department, position, start date, job type, salary inputs, manager
//! 3. Skills - skills, experience, working hours, remote preference, notes
//! 4. Emergency - contact and phone
//! 5. Confirmation - the confirm checkbox
//!
//! Cross-field rules look at several fields at once and run after all of the above.

pub mod confirmation;
pub mod cross_field;
pub mod emergency;
pub mod job;
pub mod personal;
pub mod skills;
