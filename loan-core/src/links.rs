//! Pre-filled hand-off links shown on the confirmation surface.

use serde::{Deserialize, Serialize};

use crate::models::LoanId;

pub const DEFAULT_WHATSAPP_NUMBER: &str = "573244674918";
pub const DEFAULT_SUPPORT_EMAIL: &str = "support@instant-prestamos.online";

const MAIL_LINE_BREAK: &str = "%0D%0A";

/// Where applicants are sent to continue with an agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    /// International number without `+`, as used by `wa.me`.
    pub whatsapp_number: String,
    pub support_email: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            whatsapp_number: DEFAULT_WHATSAPP_NUMBER.to_string(),
            support_email: DEFAULT_SUPPORT_EMAIL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactLinks {
    pub whatsapp: String,
    pub messenger: String,
    pub email: String,
}

impl ContactLinks {
    pub fn for_loan(
        id: &LoanId,
        contact: &ContactConfig,
    ) -> Self {
        Self {
            whatsapp: whatsapp_link(id, &contact.whatsapp_number),
            messenger: messenger_link(id),
            email: email_link(id, &contact.support_email),
        }
    }
}

pub fn whatsapp_link(
    id: &LoanId,
    number: &str,
) -> String {
    let text = format!(
        "Hola, mi código de solicitud es {id}. ¿Podemos continuar con el siguiente paso?"
    );
    format!("https://wa.me/{number}?text={}", urlencoding::encode(&text))
}

pub fn messenger_link(id: &LoanId) -> String {
    format!("https://m.me/?ref={}", urlencoding::encode(id.as_str()))
}

pub fn email_link(
    id: &LoanId,
    support: &str,
) -> String {
    let subject = format!("Mi código de solicitud {id}");
    let lines = [
        "Hola,".to_string(),
        String::new(),
        format!("Mi código de solicitud es {id}."),
        "Quisiera continuar con el siguiente paso de mi préstamo.".to_string(),
        String::new(),
        "Gracias.".to_string(),
    ];
    let body = lines
        .iter()
        .map(|line| urlencoding::encode(line).into_owned())
        .collect::<Vec<_>>()
        .join(MAIL_LINE_BREAK);

    format!(
        "mailto:{support}?subject={}&body={body}",
        urlencoding::encode(&subject)
    )
}
