use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaritalStatus {
    #[serde(rename = "soltero")]
    Single,
    #[serde(rename = "casado")]
    Married,
    #[serde(rename = "divorciado")]
    Divorced,
    #[serde(rename = "viudo")]
    Widowed,
    #[serde(rename = "union_libre")]
    CivilUnion,
}

impl MaritalStatus {
    pub fn all() -> &'static [MaritalStatus] {
        &[
            MaritalStatus::Single,
            MaritalStatus::Married,
            MaritalStatus::Divorced,
            MaritalStatus::Widowed,
            MaritalStatus::CivilUnion,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "soltero",
            Self::Married => "casado",
            Self::Divorced => "divorciado",
            Self::Widowed => "viudo",
            Self::CivilUnion => "union_libre",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "soltero" => Some(Self::Single),
            "casado" => Some(Self::Married),
            "divorciado" => Some(Self::Divorced),
            "viudo" => Some(Self::Widowed),
            "union_libre" => Some(Self::CivilUnion),
            _ => None,
        }
    }
}
