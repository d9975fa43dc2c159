//! Display labels for backend field identifiers.

use nutrilink_core::Locale;

/// `(identifier, English, Brazilian Portuguese)`.
///
/// Identifiers are stored normalized: lowercase with `_` and `-` removed, so
/// `confirm_password` and `confirmPassword` share one entry.
const FIELD_LABELS: &[(&str, &str, &str)] = &[
    ("email", "Email", "E-mail"),
    ("password", "Password", "Senha"),
    ("confirmpassword", "Confirm Password", "Confirmar Senha"),
    ("currentpassword", "Current Password", "Senha Atual"),
    ("newpassword", "New Password", "Nova Senha"),
    ("name", "Name", "Nome"),
    ("username", "Username", "Nome de Usuário"),
    ("phone", "Phone", "Telefone"),
    ("url", "URL", "URL"),
    ("title", "Title", "Título"),
    ("bio", "Bio", "Biografia"),
    ("description", "Description", "Descrição"),
    ("slug", "Page Address", "Endereço da Página"),
    ("avatar", "Profile Photo", "Foto de Perfil"),
    ("specialty", "Specialty", "Especialidade"),
    ("crn", "CRN", "CRN"),
    ("city", "City", "Cidade"),
    ("state", "State", "Estado"),
    ("birthdate", "Date of Birth", "Data de Nascimento"),
    ("instagram", "Instagram", "Instagram"),
    ("whatsapp", "WhatsApp", "WhatsApp"),
];

/// Translates field identifiers to labels in one locale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldNameTranslator {
    locale: Locale,
}

impl FieldNameTranslator {
    /// Create a translator for a locale.
    #[must_use]
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// Label for a field. Unknown identifiers come back with their first
    /// character upper-cased.
    #[must_use]
    pub fn label(&self, field: &str) -> String {
        let key = normalize(field);
        FIELD_LABELS
            .iter()
            .find(|(id, _, _)| *id == key)
            .map_or_else(
                || capitalize(field),
                |(_, en, pt)| match self.locale {
                    Locale::En => (*en).to_string(),
                    Locale::PtBr => (*pt).to_string(),
                },
            )
    }
}

fn normalize(field: &str) -> String {
    field
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

fn capitalize(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
