use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Respuestas registradas: id de pregunta -> sí/no
pub type AnswerMap = HashMap<String, bool>;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: String,   // Clave del hecho
    pub text: String, // Texto mostrado
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum RiskLevel {
    Alto,
    Medio,
    Bajo,
}

impl RiskLevel {
    /// Cualquier valor desconocido o ausente cae en BAJO
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(str::trim) {
            Some("ALTO") => RiskLevel::Alto,
            Some("MEDIO") => RiskLevel::Medio,
            _ => RiskLevel::Bajo,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskLevel::Alto => "ALTO",
            RiskLevel::Medio => "MEDIO",
            RiskLevel::Bajo => "BAJO",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Diagnosis {
    #[serde(default)]
    pub id: Option<String>, // Identificador de la regla (R-AMB-01...)
    #[serde(default)]
    pub riesgo: Option<String>,
    #[serde(default)]
    pub titulo: Option<String>,
    #[serde(default)]
    pub categoria: Option<String>,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub justificacion: Option<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub acciones: Vec<String>,
    // Id de la fila guardada por el servicio, sirve para el PDF
    #[serde(default)]
    pub diagnostico_id: Option<i64>,
}

impl Diagnosis {
    /// El servicio devuelve `{ diagnostico_id }` a secas cuando ninguna regla aplica
    pub fn is_empty_marker(&self) -> bool {
        self.titulo.is_none() && self.riesgo.is_none()
    }

    pub fn risk_level(&self) -> RiskLevel {
        RiskLevel::from_label(self.riesgo.as_deref())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct DiagnosisList {
    #[serde(default, deserialize_with = "nullable_list")]
    pub diagnosticos: Vec<Diagnosis>,
    #[serde(default)]
    pub total: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub id: i64,
    #[serde(default)]
    pub fecha: Option<String>,
    #[serde(default)]
    pub regla_id: Option<String>,
    #[serde(default)]
    pub riesgo: Option<String>,
    #[serde(default)]
    pub titulo: Option<String>,
    #[serde(default)]
    pub categoria: Option<String>,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub justificacion: Option<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub acciones: Vec<String>,
    #[serde(default)]
    pub hechos: AnswerMap,
}

impl HistoryEntry {
    /// (hechos verdaderos, hechos registrados)
    pub fn indicators(&self) -> (usize, usize) {
        let positives = self.hechos.values().filter(|v| **v).count();
        (positives, self.hechos.len())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Stats {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub por_riesgo: HashMap<String, u64>,
    #[serde(default)]
    pub por_categoria: HashMap<String, u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Start,
    Quiz,
    Result,
    MultiResult,
    History,
}

impl Default for Screen {
    fn default() -> Self {
        Screen::Start
    }
}

// Las columnas nulas del historial llegan como `null` en lugar de lista
fn nullable_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
