use std::fmt;

use serde::{Deserialize, Serialize};

/// Employment category of the applicant.
///
/// The category decides which group of income fields is shown and
/// required on the second wizard step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ApplicantCategory {
    #[default]
    #[serde(rename = "empleado")]
    Employee,
    #[serde(rename = "pensionado")]
    Pensioner,
    #[serde(rename = "independiente")]
    Independent,
    #[serde(rename = "empresario")]
    BusinessOwner,
}

impl ApplicantCategory {
    pub fn all() -> &'static [ApplicantCategory] {
        &[
            ApplicantCategory::Employee,
            ApplicantCategory::Pensioner,
            ApplicantCategory::Independent,
            ApplicantCategory::BusinessOwner,
        ]
    }

    /// Form value used for the category select and the stored document.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "empleado",
            Self::Pensioner => "pensionado",
            Self::Independent => "independiente",
            Self::BusinessOwner => "empresario",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Employee => "Asalariado",
            Self::Pensioner => "Pensionado",
            Self::Independent => "Independiente",
            Self::BusinessOwner => "Empresario",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "empleado" => Some(Self::Employee),
            "pensionado" => Some(Self::Pensioner),
            "independiente" => Some(Self::Independent),
            "empresario" => Some(Self::BusinessOwner),
            _ => None,
        }
    }

    /// Like [`ApplicantCategory::parse`], but unknown values fall back to
    /// [`ApplicantCategory::Employee`].
    pub fn parse_or_default(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }
}

impl fmt::Display for ApplicantCategory {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
