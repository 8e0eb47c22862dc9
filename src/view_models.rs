// src/view_models.rs

use crate::model::{AnswerMap, Diagnosis, DiagnosisList, HistoryEntry, Question, RiskLevel, Stats};
use chrono::NaiveDateTime;

pub const MINISTERIO_URL: &str =
    "https://prodyambiente.tierradelfuego.gob.ar/informacion-geografica";
pub const MINISTERIO_LABEL: &str = "🌿 Ministerio de Producción y Ambiente - Información Geográfica";

const NO_DIAGNOSIS_TITLE: &str = "Sin diagnóstico aplicable";
const NO_DIAGNOSIS_TEXT: &str =
    "No se encontraron condiciones críticas. La zona parece estar en buen estado.";
const GENERAL_ACTIONS: [&str; 3] = [
    "Mantener monitoreo periódico",
    "Continuar con buenas prácticas ambientales",
    "Reportar cualquier cambio significativo",
];
const NO_PROBLEMS_TEXT: &str =
    "No se encontraron problemas específicos. La zona parece estar en condiciones aceptables.";

#[derive(Clone, Debug, PartialEq)]
pub struct RiskBadge {
    pub level: RiskLevel, // clase visual
    pub text: String,     // texto tal cual vino del servicio
}

impl RiskBadge {
    pub fn from_label(label: Option<&str>) -> Self {
        let level = RiskLevel::from_label(label);
        let text = label
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(level.label())
            .to_string();
        Self { level, text }
    }

    pub fn label(&self) -> String {
        format!("RIESGO {}", self.text)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SummaryLine {
    pub question: String,
    pub answer: bool,
}

impl SummaryLine {
    pub fn answer_label(&self) -> &'static str {
        if self.answer { "SÍ" } else { "NO" }
    }

    pub fn label(&self) -> String {
        format!("{} → {}", self.question, self.answer_label())
    }
}

/// Tarjeta del resultado individual
#[derive(Clone, Debug, PartialEq)]
pub struct ResultCard {
    pub badge: RiskBadge,
    pub title: String,
    pub categoria: String,
    pub descripcion: String,
    pub justificacion: Option<String>,
    pub acciones_title: &'static str,
    pub acciones: Vec<String>,
    pub summary: Vec<SummaryLine>,
    /// true = plantilla "sin diagnóstico"
    pub no_diagnosis: bool,
}

impl ResultCard {
    pub fn from_diagnosis(
        diagnosis: Option<&Diagnosis>,
        answers: &AnswerMap,
        questions: &[Question],
    ) -> Self {
        let Some(d) = diagnosis.filter(|d| !d.is_empty_marker()) else {
            return Self::no_diagnosis();
        };

        let summary = questions
            .iter()
            .map(|q| SummaryLine {
                question: q.text.clone(),
                answer: answers.get(&q.id).copied().unwrap_or(false),
            })
            .collect();

        Self {
            badge: RiskBadge::from_label(d.riesgo.as_deref()),
            title: d.titulo.clone().unwrap_or_default(),
            categoria: d.categoria.clone().unwrap_or_default(),
            descripcion: d.descripcion.clone().unwrap_or_default(),
            justificacion: Some(d.justificacion.clone().unwrap_or_default()),
            acciones_title: "Acciones Inmediatas Recomendadas:",
            acciones: d.acciones.clone(),
            summary,
            no_diagnosis: false,
        }
    }

    fn no_diagnosis() -> Self {
        Self {
            badge: RiskBadge::from_label(Some(RiskLevel::Bajo.label())),
            title: NO_DIAGNOSIS_TITLE.to_string(),
            categoria: String::new(),
            descripcion: NO_DIAGNOSIS_TEXT.to_string(),
            justificacion: None,
            acciones_title: "Recomendaciones generales:",
            acciones: GENERAL_ACTIONS.iter().map(|s| s.to_string()).collect(),
            summary: Vec::new(),
            no_diagnosis: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MultiCard {
    pub number: usize, // 1-based
    pub badge: RiskBadge,
    pub title: String,
    pub categoria: String,
    pub descripcion: String,
    pub justificacion: String,
    pub acciones: Vec<String>,
}

impl MultiCard {
    pub fn acciones_label(&self) -> String {
        format!("Ver acciones recomendadas ({})", self.acciones.len())
    }
}

/// Vista de "todos los diagnósticos", en el orden del servicio
#[derive(Clone, Debug, PartialEq)]
pub struct MultiResultView {
    pub total: usize,
    pub cards: Vec<MultiCard>,
}

impl MultiResultView {
    pub fn from_list(list: &DiagnosisList) -> Self {
        let cards = list
            .diagnosticos
            .iter()
            .enumerate()
            .map(|(i, d)| MultiCard {
                number: i + 1,
                badge: RiskBadge::from_label(d.riesgo.as_deref()),
                title: d.titulo.clone().unwrap_or_default(),
                categoria: d.categoria.clone().unwrap_or_default(),
                descripcion: d.descripcion.clone().unwrap_or_default(),
                justificacion: d.justificacion.clone().unwrap_or_default(),
                acciones: d.acciones.clone(),
            })
            .collect();
        Self {
            total: list.total,
            cards,
        }
    }

    pub fn header(&self) -> String {
        format!("Se detectaron {} problema(s) ambiental(es)", self.total)
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        self.cards.is_empty().then_some(NO_PROBLEMS_TEXT)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HistoryEntryView {
    pub id: i64,
    pub badge: RiskBadge,
    pub fecha: String,
    pub title: String,
    pub categoria: String,
    pub positives: usize,
    pub total_facts: usize,
    pub descripcion: String,
    pub justificacion: String,
    pub acciones: Vec<String>,
}

impl HistoryEntryView {
    pub fn from_entry(entry: &HistoryEntry) -> Self {
        let (positives, total_facts) = entry.indicators();
        Self {
            id: entry.id,
            badge: RiskBadge::from_label(entry.riesgo.as_deref()),
            fecha: entry.fecha.as_deref().map(format_fecha).unwrap_or_default(),
            title: entry.titulo.clone().unwrap_or_default(),
            categoria: entry.categoria.clone().unwrap_or_default(),
            positives,
            total_facts,
            descripcion: entry.descripcion.clone().unwrap_or_default(),
            justificacion: entry.justificacion.clone().unwrap_or_default(),
            acciones: entry.acciones.clone(),
        }
    }

    pub fn indicators_label(&self) -> String {
        format!(
            "📊 Indicadores detectados: {}/{}",
            self.positives, self.total_facts
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StatsView {
    pub total: u64,
    pub por_riesgo: Vec<(RiskBadge, u64)>,
    pub por_categoria: Vec<(String, u64)>,
}

impl StatsView {
    pub fn from_stats(stats: &Stats) -> Self {
        let mut por_riesgo: Vec<(RiskBadge, u64)> = stats
            .por_riesgo
            .iter()
            .map(|(r, n)| (RiskBadge::from_label(Some(r.as_str())), *n))
            .collect();
        // ALTO > MEDIO > BAJO, y dentro del mismo nivel por texto
        por_riesgo.sort_by(|a, b| a.0.level.cmp(&b.0.level).then(a.0.text.cmp(&b.0.text)));

        let mut por_categoria: Vec<(String, u64)> = stats
            .por_categoria
            .iter()
            .map(|(c, n)| (c.clone(), *n))
            .collect();
        por_categoria.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        Self {
            total: stats.total,
            por_riesgo,
            por_categoria,
        }
    }
}

/// `2025-03-01 14:05:09` -> `01/03/2025 14:05`. Si no se reconoce, se deja igual.
pub fn format_fecha(raw: &str) -> String {
    let raw = raw.trim();
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}
