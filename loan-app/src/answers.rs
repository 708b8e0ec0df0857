//! Answers file: one TOML document holding everything an applicant would
//! type into the wizard.
//!
//! Keys are the form control ids (`nombre`, `cedula`, `estatus`, ...).
//! Three keys are reserved:
//!
//! | key              | meaning                                   |
//! |------------------|-------------------------------------------|
//! | `monto`          | requested amount, as text or integer      |
//! | `plazo`          | term in months, as text or integer        |
//! | `consentimiento` | data-verification consent, boolean        |
//!
//! ```toml
//! nombre = "María Fernanda Solís"
//! estatus = "empleado"
//! antiguedad = 38
//! monto = "₡2.500.000"
//! plazo = 36
//! consentimiento = true
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use loan_core::form::FieldId;
use loan_core::wizard::Wizard;
use thiserror::Error;
use toml::Value;
use tracing::debug;

const AMOUNT_KEY: &str = "monto";
const TERM_KEY: &str = "plazo";
const CONSENT_KEY: &str = "consentimiento";

#[derive(Debug, Error)]
pub enum AnswersError {
    #[error("cannot read answers file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("answers file is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("unknown form field '{0}'")]
    UnknownField(String),

    #[error("value for '{key}' must be {expected}")]
    InvalidValue { key: String, expected: &'static str },
}

/// Parsed answers, ready to feed into a [`Wizard`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers {
    pub fields: BTreeMap<FieldId, String>,
    pub amount: Option<String>,
    pub term: Option<String>,
    pub consent: bool,
}

impl Answers {
    pub fn from_toml_str(text: &str) -> Result<Self, AnswersError> {
        let table: toml::Table = toml::from_str(text)?;
        let mut answers = Self::default();

        for (key, value) in table {
            match key.as_str() {
                AMOUNT_KEY => answers.amount = Some(scalar_text(&key, &value)?),
                TERM_KEY => answers.term = Some(scalar_text(&key, &value)?),
                CONSENT_KEY => {
                    answers.consent = value.as_bool().ok_or(AnswersError::InvalidValue {
                        key: key.clone(),
                        expected: "true or false",
                    })?;
                }
                other => {
                    let field = FieldId::from_dom_id(other)
                        .ok_or_else(|| AnswersError::UnknownField(other.to_string()))?;
                    answers.fields.insert(field, scalar_text(&key, &value)?);
                }
            }
        }
        Ok(answers)
    }

    pub fn load(path: &Path) -> Result<Self, AnswersError> {
        let text = std::fs::read_to_string(path).map_err(|source| AnswersError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Types every answer into `wizard`, as an applicant filling all
    /// three panels would. Navigation is left to the caller.
    pub fn fill(
        &self,
        wizard: &mut Wizard,
    ) {
        for (field, value) in &self.fields {
            wizard.set_field(*field, value.as_str());
        }
        if let Some(amount) = &self.amount {
            wizard.set_amount_text(amount);
        }
        if let Some(term) = &self.term {
            wizard.set_term_text(term);
        }
        wizard.set_consent(self.consent);
        debug!(fields = self.fields.len(), "answers applied to wizard");
    }
}

fn scalar_text(
    key: &str,
    value: &Value,
) -> Result<String, AnswersError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Integer(n) => Ok(n.to_string()),
        Value::Float(f) => Ok(f.to_string()),
        Value::Datetime(d) => Ok(d.to_string()),
        _ => Err(AnswersError::InvalidValue {
            key: key.to_string(),
            expected: "a string or number",
        }),
    }
}
