//! Localized titles and fixed messages used by the classifier and presenter.

use nutrilink_core::Locale;

/// User-facing strings for one locale.
#[derive(Debug)]
pub struct Catalog {
    pub network_title: &'static str,
    pub network_message: &'static str,
    pub unauthorized_title: &'static str,
    pub unauthorized_message: &'static str,
    pub forbidden_title: &'static str,
    pub forbidden_message: &'static str,
    pub validation_title: &'static str,
    pub validation_message: &'static str,
    pub bad_request_title: &'static str,
    pub bad_request_message: &'static str,
    pub server_title: &'static str,
    pub server_message: &'static str,
    pub request_title: &'static str,
    pub exception_title: &'static str,
    pub unknown_title: &'static str,
    pub unknown_message: &'static str,
    status_prefix: &'static str,
}

impl Catalog {
    /// Fallback message for statuses without a server message.
    #[must_use]
    pub fn status_fallback(&self, status: u16) -> String {
        format!("{} {status}", self.status_prefix)
    }
}

const EN: Catalog = Catalog {
    network_title: "Connection Error",
    network_message: "Unable to reach the server. Check your internet connection and try again.",
    unauthorized_title: "Authentication Error",
    unauthorized_message: "Invalid credentials or expired session. Please sign in again.",
    forbidden_title: "Access Denied",
    forbidden_message: "You do not have permission to perform this action.",
    validation_title: "Invalid Data",
    validation_message: "Please correct the highlighted fields.",
    bad_request_title: "Operation Error",
    bad_request_message: "Invalid input data.",
    server_title: "Internal Error",
    server_message: "An internal server error occurred. Please try again later.",
    request_title: "Request Error",
    exception_title: "Error",
    unknown_title: "Unknown Error",
    unknown_message: "An unexpected error occurred.",
    status_prefix: "Error",
};

const PT_BR: Catalog = Catalog {
    network_title: "Erro de Conexão",
    network_message:
        "Não foi possível conectar ao servidor. Verifique sua conexão com a internet e tente novamente.",
    unauthorized_title: "Erro de Autenticação",
    unauthorized_message: "Credenciais inválidas ou sessão expirada. Faça login novamente.",
    forbidden_title: "Acesso Negado",
    forbidden_message: "Você não tem permissão para realizar esta ação.",
    validation_title: "Dados Inválidos",
    validation_message: "Por favor, corrija os campos destacados.",
    bad_request_title: "Erro na Operação",
    bad_request_message: "Dados de entrada inválidos.",
    server_title: "Erro Interno",
    server_message: "Ocorreu um erro interno no servidor. Tente novamente mais tarde.",
    request_title: "Erro na Requisição",
    exception_title: "Erro",
    unknown_title: "Erro Desconhecido",
    unknown_message: "Ocorreu um erro inesperado.",
    status_prefix: "Erro",
};

/// Catalog for a locale.
#[must_use]
pub fn catalog(locale: Locale) -> &'static Catalog {
    match locale {
        Locale::En => &EN,
        Locale::PtBr => &PT_BR,
    }
}
