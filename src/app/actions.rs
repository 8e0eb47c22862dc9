use super::*;
use crate::quiz::AnswerOutcome;
use crate::service::{diagnosis_pdf_path, history_pdf_path};

pub const NO_FACTS_MESSAGE: &str = "No hay hechos disponibles para analizar.";
pub const NO_PDF_MESSAGE: &str = "No hay diagnóstico disponible para descargar.";

impl QuizApp {
    /// Pide el catálogo; la sesión arranca cuando llega la respuesta.
    /// También sirve para "Nueva evaluación" desde el resultado.
    pub fn empezar_diagnostico(&mut self) {
        if self.is_pending(RequestKind::Catalog) {
            return;
        }
        self.message.clear();
        self.dispatch(ServiceRequest::Questions);
    }

    pub fn nuevo_diagnostico(&mut self) {
        self.empezar_diagnostico();
    }

    /// Arranque de sesión con el catálogo ya cargado (o vacío)
    pub(crate) fn iniciar_sesion(&mut self) {
        self.drop_session_requests();
        self.session.start(self.catalog.questions().to_vec());
        self.diagnosis = None;
        self.result_card = None;
        self.multi_view = None;
        self.diagnostico_actual_id = None;
        self.show(Screen::Quiz);
    }

    /// Botones Sí / No
    pub fn responder(&mut self, value: bool) {
        match self.session.answer(value) {
            AnswerOutcome::Ignored | AnswerOutcome::Next => {}
            AnswerOutcome::Completed(hechos) => self.submit_single(hechos),
        }
    }

    pub fn anterior_pregunta(&mut self) {
        self.session.back();
    }

    /// Reintento tras un envío fallido con el cuestionario ya completo
    pub fn reintentar_envio(&mut self) {
        if self.session.is_empty() || self.session.position() < self.session.len() {
            return;
        }
        let hechos = self.session.answers().clone();
        self.submit_single(hechos);
    }

    fn submit_single(&mut self, hechos: crate::model::AnswerMap) {
        if self.is_pending(RequestKind::Single) {
            return;
        }
        self.dispatch(ServiceRequest::Diagnose(hechos));
    }

    /// "Ver todos los diagnósticos": requiere al menos una respuesta
    pub fn ver_todos_diagnosticos(&mut self) {
        if self.session.answers().is_empty() {
            self.message = NO_FACTS_MESSAGE.into();
            return;
        }
        if self.is_pending(RequestKind::Multiple) {
            return;
        }
        let hechos = self.session.answers().clone();
        self.dispatch(ServiceRequest::DiagnoseMultiple(hechos));
    }

    pub fn descargar_pdf(&mut self) {
        match self.diagnostico_actual_id {
            Some(id) => self.open_url = Some(self.config.url_for(&diagnosis_pdf_path(id))),
            None => self.message = NO_PDF_MESSAGE.into(),
        }
    }

    pub fn descargar_historial_pdf(&mut self) {
        let path = history_pdf_path(self.history.limit());
        self.open_url = Some(self.config.url_for(&path));
    }
}
