// src/error.rs

/// Fallos de conexión con el servicio de diagnóstico.
/// Un resultado vacío (sin diagnóstico, historial vacío) NO es un error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ServiceError {
    /// El request no llegó a completarse
    #[error("error de conexión: {0}")]
    Transport(String),

    /// Respuesta HTTP no exitosa
    #[error("el servidor devolvió HTTP {0}")]
    Status(u16),

    /// Cuerpo con forma inesperada
    #[error("respuesta JSON inválida: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for ServiceError {
    fn from(err: serde_json::Error) -> Self {
        ServiceError::Decode(err.to_string())
    }
}
