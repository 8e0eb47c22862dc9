use super::*;
use crate::error::ServiceError;
use crate::service::ServiceReply;
use std::sync::mpsc::TryRecvError;

pub const CONNECTION_ERROR: &str =
    "No se pudo conectar con el servidor. Asegúrate de que el servicio esté corriendo.";
pub const DIAGNOSIS_ERROR: &str = "Hubo un error al procesar el diagnóstico.";
pub const MULTIPLE_ERROR: &str = "Error al obtener todos los diagnósticos.";

impl QuizApp {
    /// Recoge las respuestas que ya llegaron. Se llama en cada frame.
    pub fn poll_replies(&mut self) {
        let mut finished = Vec::new();
        self.pending.retain(|p| match p.rx.try_recv() {
            Ok(result) => {
                finished.push((p.kind, p.origin, p.generation, result));
                false
            }
            Err(TryRecvError::Empty) => true,
            Err(TryRecvError::Disconnected) => {
                let err = ServiceError::Transport("el canal se cerró sin respuesta".into());
                finished.push((p.kind, p.origin, p.generation, Err(err)));
                false
            }
        });

        for (kind, origin, generation, result) in finished {
            if origin != self.state {
                log::debug!("respuesta {kind:?} descartada: la pantalla {origin:?} ya no está activa");
                continue;
            }
            if kind.is_session_bound() && generation != self.session.generation() {
                log::debug!("respuesta {kind:?} descartada: es de una sesión anterior");
                continue;
            }
            self.apply_reply(kind, result);
        }
    }

    fn apply_reply(&mut self, kind: RequestKind, result: ServiceResult) {
        match (kind, result) {
            (RequestKind::Catalog, Ok(ServiceReply::Questions(raw))) => {
                self.catalog.replace(&raw);
                self.iniciar_sesion();
            }
            (RequestKind::Catalog, Err(err)) => {
                log::error!("Error al cargar preguntas: {err}");
                self.catalog.clear();
                self.iniciar_sesion();
                self.message = CONNECTION_ERROR.into();
            }
            (RequestKind::Single, Ok(ServiceReply::Diagnosis(diagnosis))) => {
                self.recibir_diagnostico(diagnosis);
            }
            (RequestKind::Single, Err(err)) => {
                log::error!("Error al enviar diagnóstico: {err}");
                self.message = DIAGNOSIS_ERROR.into();
            }
            (RequestKind::Multiple, Ok(ServiceReply::Multiple(list))) => {
                self.multi_view = Some(MultiResultView::from_list(&list));
                self.show(Screen::MultiResult);
            }
            (RequestKind::Multiple, Err(err)) => {
                log::error!("Error al obtener diagnósticos múltiples: {err}");
                self.message = MULTIPLE_ERROR.into();
            }
            (RequestKind::Stats, Ok(ServiceReply::Stats(stats))) => {
                self.history.apply_stats(Ok(stats));
            }
            (RequestKind::Stats, Err(err)) => self.history.apply_stats(Err(err)),
            (RequestKind::History { offset }, Ok(ServiceReply::History(entries))) => {
                self.history.apply_entries(offset, Ok(entries));
            }
            (RequestKind::History { offset }, Err(err)) => {
                self.history.apply_entries(offset, Err(err));
            }
            (kind, Ok(reply)) => {
                log::warn!("respuesta inesperada para {kind:?}: {reply:?}");
            }
        }
    }

    fn recibir_diagnostico(&mut self, diagnosis: Option<Diagnosis>) {
        if let Some(id) = diagnosis.as_ref().and_then(|d| d.diagnostico_id) {
            self.diagnostico_actual_id = Some(id);
        }
        let card = ResultCard::from_diagnosis(
            diagnosis.as_ref(),
            self.session.answers(),
            self.session.questions(),
        );
        log::info!("diagnóstico recibido: {}", card.title);
        self.diagnosis = diagnosis;
        self.result_card = Some(card);
        self.multi_view = None;
        self.show(Screen::Result);
    }
}
