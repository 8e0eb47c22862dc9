// src/service/mod.rs

use crate::error::ServiceError;
use crate::model::{AnswerMap, Diagnosis, DiagnosisList, HistoryEntry, Stats};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::mpsc::Receiver;

pub mod http;

pub use http::HttpDispatcher;

pub type ServiceResult = Result<ServiceReply, ServiceError>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Llamadas al servicio de diagnóstico
#[derive(Clone, Debug, PartialEq)]
pub enum ServiceRequest {
    Questions,
    Diagnose(AnswerMap),
    DiagnoseMultiple(AnswerMap),
    History { limit: u32, offset: u32 },
    Stats,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ServiceReply {
    Questions(Vec<Value>),
    /// Tal cual llega en `diagnostico` (puede ser sólo `{diagnostico_id}`)
    Diagnosis(Option<Diagnosis>),
    Multiple(DiagnosisList),
    History(Vec<HistoryEntry>),
    Stats(Stats),
}

/// Quién despacha los requests y entrega la respuesta por canal.
/// La UI hace polling del `Receiver` en cada frame.
pub trait Dispatcher {
    fn dispatch(&self, request: ServiceRequest) -> Receiver<ServiceResult>;
}

#[derive(Serialize)]
struct HechosBody<'a> {
    hechos: &'a AnswerMap,
}

#[derive(Deserialize)]
struct DiagnosisEnvelope {
    #[serde(default)]
    diagnostico: Option<Diagnosis>,
}

#[derive(Deserialize)]
struct HistoryEnvelope {
    #[serde(default)]
    historial: Option<Vec<HistoryEntry>>,
}

/// Ruta de descarga del PDF de un diagnóstico
pub fn diagnosis_pdf_path(diagnostico_id: i64) -> String {
    format!("/descargar-pdf/{diagnostico_id}")
}

pub fn history_pdf_path(limit: u32) -> String {
    format!("/descargar-historial-pdf?limite={limit}")
}

impl ServiceRequest {
    pub fn method(&self) -> Method {
        match self {
            ServiceRequest::Diagnose(_) | ServiceRequest::DiagnoseMultiple(_) => Method::Post,
            _ => Method::Get,
        }
    }

    pub fn path(&self) -> String {
        match self {
            ServiceRequest::Questions => "/hechos".to_string(),
            ServiceRequest::Diagnose(_) => "/diagnosticar".to_string(),
            ServiceRequest::DiagnoseMultiple(_) => "/diagnosticar-multiple".to_string(),
            ServiceRequest::History { limit, offset: 0 } => format!("/historial?limite={limit}"),
            ServiceRequest::History { limit, offset } => {
                format!("/historial?limite={limit}&offset={offset}")
            }
            ServiceRequest::Stats => "/estadisticas".to_string(),
        }
    }

    fn payload(&self) -> Option<HechosBody<'_>> {
        match self {
            ServiceRequest::Diagnose(hechos) | ServiceRequest::DiagnoseMultiple(hechos) => {
                Some(HechosBody { hechos })
            }
            _ => None,
        }
    }

    /// Cuerpo JSON de los POST: `{ "hechos": {...} }`
    pub fn body(&self) -> Result<Option<String>, ServiceError> {
        match self.payload() {
            Some(payload) => Ok(Some(serde_json::to_string(&payload)?)),
            None => Ok(None),
        }
    }

    /// Interpreta el cuerpo de una respuesta 2xx
    pub fn decode(&self, body: &str) -> ServiceResult {
        let reply = match self {
            ServiceRequest::Questions => ServiceReply::Questions(serde_json::from_str(body)?),
            ServiceRequest::Diagnose(_) => {
                let env: DiagnosisEnvelope = serde_json::from_str(body)?;
                ServiceReply::Diagnosis(env.diagnostico)
            }
            ServiceRequest::DiagnoseMultiple(_) => {
                ServiceReply::Multiple(serde_json::from_str(body)?)
            }
            ServiceRequest::History { .. } => {
                let env: HistoryEnvelope = serde_json::from_str(body)?;
                ServiceReply::History(env.historial.unwrap_or_default())
            }
            ServiceRequest::Stats => ServiceReply::Stats(serde_json::from_str(body)?),
        };
        Ok(reply)
    }
}
