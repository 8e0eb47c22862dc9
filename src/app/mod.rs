use crate::catalog::QuestionCatalog;
use crate::config::ServiceConfig;
use crate::history::HistoryPanel;
use crate::model::{Diagnosis, Screen};
use crate::quiz::QuizSession;
use crate::service::{Dispatcher, HttpDispatcher, ServiceRequest, ServiceResult};
use crate::view_models::{MultiResultView, ResultCard};
use std::sync::mpsc::Receiver;

// Submódulos
pub mod actions;
pub mod navigation;
pub mod replies;

#[cfg(test)]
mod tests;

/// Qué espera cada request en vuelo
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestKind {
    Catalog,
    Single,
    Multiple,
    Stats,
    /// Página pedida; sólo vale si sigue siendo la actual
    History { offset: u32 },
}

impl RequestKind {
    pub fn of(request: &ServiceRequest) -> Self {
        match request {
            ServiceRequest::Questions => RequestKind::Catalog,
            ServiceRequest::Diagnose(_) => RequestKind::Single,
            ServiceRequest::DiagnoseMultiple(_) => RequestKind::Multiple,
            ServiceRequest::Stats => RequestKind::Stats,
            ServiceRequest::History { offset, .. } => RequestKind::History { offset: *offset },
        }
    }

    /// Respuestas que dependen de las respuestas de una sesión concreta
    pub fn is_session_bound(self) -> bool {
        matches!(self, RequestKind::Single | RequestKind::Multiple)
    }
}

/// Request despachado; `origin` es la pantalla que lo pidió y
/// `generation` la sesión de preguntas vigente en ese momento
pub struct PendingRequest {
    pub kind: RequestKind,
    pub origin: Screen,
    pub generation: u64,
    pub rx: Receiver<ServiceResult>,
}

pub struct QuizApp {
    pub state: Screen,
    pub catalog: QuestionCatalog,
    pub session: QuizSession,
    pub diagnosis: Option<Diagnosis>,
    pub result_card: Option<ResultCard>,
    pub multi_view: Option<MultiResultView>,
    pub history: HistoryPanel,
    /// Id del diagnóstico mostrado, para el PDF
    pub diagnostico_actual_id: Option<i64>,
    pub message: String,
    /// URL a abrir en una pestaña nueva (descargas PDF)
    pub open_url: Option<String>,
    pending: Vec<PendingRequest>,
    config: ServiceConfig,
    dispatcher: Box<dyn Dispatcher>,
}

impl QuizApp {
    pub fn new(config: ServiceConfig) -> Self {
        let dispatcher = HttpDispatcher::new(config.clone());
        Self::with_dispatcher(config, Box::new(dispatcher))
    }

    pub fn with_dispatcher(config: ServiceConfig, dispatcher: Box<dyn Dispatcher>) -> Self {
        Self {
            state: Screen::Start,
            catalog: QuestionCatalog::default(),
            session: QuizSession::default(),
            diagnosis: None,
            result_card: None,
            multi_view: None,
            history: HistoryPanel::new(config.history_limit),
            diagnostico_actual_id: None,
            message: String::new(),
            open_url: None,
            pending: Vec::new(),
            config,
            dispatcher,
        }
    }

    /// Despacha un request y lo apunta como pendiente de la pantalla actual
    fn dispatch(&mut self, request: ServiceRequest) {
        let kind = RequestKind::of(&request);
        let rx = self.dispatcher.dispatch(request);
        self.pending.push(PendingRequest {
            kind,
            origin: self.state,
            generation: self.session.generation(),
            rx,
        });
    }

    /// Olvida los envíos de la sesión anterior; sus respuestas ya no se leen
    fn drop_session_requests(&mut self) {
        let before = self.pending.len();
        self.pending.retain(|p| !p.kind.is_session_bound());
        if self.pending.len() != before {
            log::debug!("{} envío(s) de la sesión anterior descartados", before - self.pending.len());
        }
    }

    pub fn is_pending(&self, kind: RequestKind) -> bool {
        self.pending.iter().any(|p| p.kind == kind)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Texto de espera mientras haya algo en vuelo
    pub fn loading_label(&self) -> Option<&'static str> {
        let first = self.pending.iter().find(|p| p.origin == self.state)?;
        Some(match first.kind {
            RequestKind::Catalog => "⏳ Cargando preguntas...",
            RequestKind::Single => "⏳ Procesando diagnóstico...",
            RequestKind::Multiple => "⏳ Buscando todos los diagnósticos...",
            RequestKind::Stats | RequestKind::History { .. } => "⏳ Cargando historial...",
        })
    }
}
