use std::fmt;

use serde::{Deserialize, Serialize};

/// One panel of the wizard. The order is fixed and linear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Step {
    #[default]
    Step1,
    Step2,
    Step3,
}

impl Step {
    pub fn all() -> &'static [Step] {
        &[Step::Step1, Step::Step2, Step::Step3]
    }

    /// Zero-based panel index.
    pub fn index(&self) -> usize {
        match self {
            Self::Step1 => 0,
            Self::Step2 => 1,
            Self::Step3 => 2,
        }
    }

    pub fn next(&self) -> Option<Step> {
        match self {
            Self::Step1 => Some(Self::Step2),
            Self::Step2 => Some(Self::Step3),
            Self::Step3 => None,
        }
    }

    pub fn previous(&self) -> Option<Step> {
        match self {
            Self::Step1 => None,
            Self::Step2 => Some(Self::Step1),
            Self::Step3 => Some(Self::Step2),
        }
    }

    /// Nav label text.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Step1 => "Datos personales",
            Self::Step2 => "Ingresos y préstamo",
            Self::Step3 => "Confirmación",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}. {}", self.index() + 1, self.title())
    }
}
