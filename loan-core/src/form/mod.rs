pub mod fields;
pub mod rules;
pub mod state;
pub mod validator;

pub use fields::{FIELDS, FieldId, FieldKind, FieldSpec, fields_for_step, group_fields};
pub use rules::{apply_category, apply_category_value};
pub use state::FormState;
pub use validator::{FailureReason, ValidationFailure, validate_step, validate_step_on};
