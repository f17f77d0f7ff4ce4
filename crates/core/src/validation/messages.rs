//! Localized violation messages.

use serde::{Deserialize, Serialize};

use super::rules::ViolationKind;

/// Language used for engine-generated error messages.
///
/// Custom rule messages are passed through verbatim and are not localized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "pt-BR", alias = "pt-br", alias = "pt")]
    PtBr,
    #[serde(rename = "en", alias = "en-US", alias = "en-us")]
    En,
}

impl Locale {
    /// Parse a locale tag such as `pt-BR` or `en`, case-insensitively.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "pt-br" | "pt" => Some(Self::PtBr),
            "en" | "en-us" => Some(Self::En),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::PtBr => "pt-BR",
            Self::En => "en",
        }
    }

    /// Render the message for a violation in this locale.
    pub fn message(self, kind: &ViolationKind) -> String {
        match (self, kind) {
            (_, ViolationKind::Custom(msg)) => msg.clone(),

            (Self::PtBr, ViolationKind::Required) => "Este campo é obrigatório".to_string(),
            (Self::PtBr, ViolationKind::InvalidEmail) => "E-mail inválido".to_string(),
            (Self::PtBr, ViolationKind::InvalidPhone) => "Telefone inválido".to_string(),
            (Self::PtBr, ViolationKind::InvalidUrl) => "URL inválida".to_string(),
            (Self::PtBr, ViolationKind::NotANumber) => "Deve ser um número".to_string(),
            (Self::PtBr, ViolationKind::TooShort { min }) => {
                format!("Deve ter no mínimo {min} caracteres")
            }
            (Self::PtBr, ViolationKind::TooLong { max }) => {
                format!("Deve ter no máximo {max} caracteres")
            }
            (Self::PtBr, ViolationKind::InvalidFormat) => "Formato inválido".to_string(),
            (Self::PtBr, ViolationKind::Invalid) => "Campo inválido".to_string(),

            (Self::En, ViolationKind::Required) => "This field is required".to_string(),
            (Self::En, ViolationKind::InvalidEmail) => "Invalid email address".to_string(),
            (Self::En, ViolationKind::InvalidPhone) => "Invalid phone number".to_string(),
            (Self::En, ViolationKind::InvalidUrl) => "Invalid URL".to_string(),
            (Self::En, ViolationKind::NotANumber) => "Must be a number".to_string(),
            (Self::En, ViolationKind::TooShort { min }) => {
                format!("Must be at least {min} characters")
            }
            (Self::En, ViolationKind::TooLong { max }) => {
                format!("Must be at most {max} characters")
            }
            (Self::En, ViolationKind::InvalidFormat) => "Invalid format".to_string(),
            (Self::En, ViolationKind::Invalid) => "Invalid field".to_string(),
        }
    }
}
