use super::*;
use crate::app::actions::{NO_FACTS_MESSAGE, NO_PDF_MESSAGE};
use crate::app::replies::{CONNECTION_ERROR, DIAGNOSIS_ERROR};
use crate::error::ServiceError;
use crate::history::{EMPTY_HISTORY, HISTORY_ERROR, Section};
use crate::model::{AnswerMap, DiagnosisList, HistoryEntry, RiskLevel, Stats};
use crate::quiz::QuizPhase;
use crate::service::ServiceReply;
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::mpsc::{self, Sender};

type Script = Box<dyn Fn(&ServiceRequest) -> ServiceResult>;

/// Servicio falso: apunta cada request y contesta al momento
struct FakeService {
    log: Rc<RefCell<Vec<ServiceRequest>>>,
    script: Script,
}

impl Dispatcher for FakeService {
    fn dispatch(&self, request: ServiceRequest) -> Receiver<ServiceResult> {
        let (tx, rx) = mpsc::channel();
        let _ = tx.send((self.script)(&request));
        self.log.borrow_mut().push(request);
        rx
    }
}

fn app_with(script: Script) -> (QuizApp, Rc<RefCell<Vec<ServiceRequest>>>) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let fake = FakeService {
        log: Rc::clone(&log),
        script,
    };
    let app = QuizApp::with_dispatcher(ServiceConfig::new("http://eco.test", 50), Box::new(fake));
    (app, log)
}

fn noise_service() -> Script {
    Box::new(|req: &ServiceRequest| -> ServiceResult {
        match req {
        ServiceRequest::Questions => Ok(ServiceReply::Questions(vec![
            json!({"id": "q1", "text": "ignorado", "pregunta": "¿Hay ruido?"}),
        ])),
        ServiceRequest::Diagnose(_) => Ok(ServiceReply::Diagnosis(Some(Diagnosis {
            riesgo: Some("ALTO".into()),
            titulo: Some("Contaminación sonora".into()),
            acciones: vec!["Medir decibeles".into()],
            diagnostico_id: Some(17),
            ..Diagnosis::default()
        }))),
        ServiceRequest::DiagnoseMultiple(_) => Ok(ServiceReply::Multiple(DiagnosisList {
            diagnosticos: vec![Diagnosis {
                titulo: Some("Contaminación sonora".into()),
                ..Diagnosis::default()
            }],
            total: 1,
        })),
        ServiceRequest::Stats => Ok(ServiceReply::Stats(Stats::default())),
        ServiceRequest::History { .. } => Ok(ServiceReply::History(Vec::new())),
        }
    })
}

fn questions_service(n: usize) -> Script {
    Box::new(move |req: &ServiceRequest| match req {
        ServiceRequest::Questions => Ok(ServiceReply::Questions(
            (0..n).map(|i| json!(format!("hecho_{i}"))).collect(),
        )),
        ServiceRequest::Diagnose(_) => Ok(ServiceReply::Diagnosis(None)),
        _ => Err(ServiceError::Status(500)),
    })
}

/// Servicio que retiene las respuestas hasta que el test las suelta
#[derive(Default)]
struct DeferredService {
    held: Rc<RefCell<Vec<(ServiceRequest, Sender<ServiceResult>)>>>,
}

impl Dispatcher for DeferredService {
    fn dispatch(&self, request: ServiceRequest) -> Receiver<ServiceResult> {
        let (tx, rx) = mpsc::channel();
        self.held.borrow_mut().push((request, tx));
        rx
    }
}

type Held = Rc<RefCell<Vec<(ServiceRequest, Sender<ServiceResult>)>>>;

fn deferred_app() -> (QuizApp, Held) {
    let service = DeferredService::default();
    let held = Rc::clone(&service.held);
    let app = QuizApp::with_dispatcher(ServiceConfig::new("http://eco.test", 50), Box::new(service));
    (app, held)
}

/// Contesta el request retenido número `index`; si ya nadie escucha no pasa nada
fn release(held: &Held, index: usize, result: ServiceResult) {
    let _ = held.borrow()[index].1.send(result);
}

fn diagnosis_titled(titulo: &str, id: i64) -> ServiceResult {
    Ok(ServiceReply::Diagnosis(Some(Diagnosis {
        riesgo: Some("MEDIO".into()),
        titulo: Some(titulo.into()),
        diagnostico_id: Some(id),
        ..Diagnosis::default()
    })))
}

fn diagnose_calls(log: &Rc<RefCell<Vec<ServiceRequest>>>) -> Vec<AnswerMap> {
    log.borrow()
        .iter()
        .filter_map(|r| match r {
            ServiceRequest::Diagnose(h) => Some(h.clone()),
            _ => None,
        })
        .collect()
}

fn started(script: Script) -> (QuizApp, Rc<RefCell<Vec<ServiceRequest>>>) {
    let (mut app, log) = app_with(script);
    app.empezar_diagnostico();
    app.poll_replies();
    (app, log)
}

#[test]
fn noise_scenario_end_to_end() {
    let (mut app, log) = started(noise_service());
    assert_eq!(app.state, Screen::Quiz);
    assert_eq!(app.session.current_question().map(|q| q.text.as_str()), Some("¿Hay ruido?"));

    app.responder(true);
    app.poll_replies();

    let calls = diagnose_calls(&log);
    assert_eq!(calls, vec![AnswerMap::from([("q1".to_string(), true)])]);
    assert_eq!(app.state, Screen::Result);
    assert_eq!(app.diagnostico_actual_id, Some(17));

    let card = app.result_card.as_ref().unwrap();
    assert_eq!(card.badge.text, "ALTO");
    assert_eq!(card.badge.level, RiskLevel::Alto);
    assert_eq!(card.title, "Contaminación sonora");
    assert_eq!(card.acciones.len(), 1);
    assert_eq!(card.summary[0].label(), "¿Hay ruido? → SÍ");
}

#[test]
fn completing_quiz_submits_exactly_once() {
    let (mut app, log) = started(questions_service(3));
    app.responder(true);
    app.responder(false);
    app.anterior_pregunta();
    app.responder(true);
    app.responder(false);
    // respuestas extra tras completar no hacen nada
    app.responder(true);
    app.poll_replies();

    let calls = diagnose_calls(&log);
    assert_eq!(calls.len(), 1);
    let keys: std::collections::HashSet<_> = calls[0].keys().cloned().collect();
    let expected: std::collections::HashSet<_> =
        (0..3).map(|i| format!("hecho_{i}")).collect();
    assert_eq!(keys, expected);
    assert_eq!(calls[0].get("hecho_1"), Some(&true));
    assert_eq!(app.session.phase(), QuizPhase::Completed);
}

#[test]
fn empty_catalog_shows_placeholder_and_ignores_input() {
    let (mut app, log) = started(questions_service(0));
    assert_eq!(app.state, Screen::Quiz);
    assert!(app.catalog.is_empty());
    assert_eq!(app.session.progress(), 0.0);
    app.responder(true);
    app.responder(false);
    app.anterior_pregunta();
    app.poll_replies();
    assert!(diagnose_calls(&log).is_empty());
    assert_eq!(app.session.phase(), QuizPhase::Asking(0));
    assert_eq!(app.state, Screen::Quiz);
}

#[test]
fn catalog_failure_leaves_empty_catalog_and_message() {
    let (app, _) = started(Box::new(|_: &ServiceRequest| Err(ServiceError::Transport("refused".into()))));
    assert_eq!(app.state, Screen::Quiz);
    assert!(app.catalog.is_empty());
    assert_eq!(app.message, CONNECTION_ERROR);
}

#[test]
fn failed_submission_keeps_quiz_screen() {
    let (mut app, _) = started(Box::new(|req: &ServiceRequest| match req {
        ServiceRequest::Questions => Ok(ServiceReply::Questions(vec![json!("a")])),
        _ => Err(ServiceError::Status(502)),
    }));
    app.responder(false);
    app.poll_replies();
    assert_eq!(app.state, Screen::Quiz);
    assert_eq!(app.message, DIAGNOSIS_ERROR);
    assert!(app.result_card.is_none());
    assert_eq!(app.diagnostico_actual_id, None);
}

#[test]
fn no_diagnosis_renders_low_risk_and_keeps_id() {
    let (mut app, _) = started(Box::new(|req: &ServiceRequest| -> ServiceResult {
        match req {
            ServiceRequest::Questions => Ok(ServiceReply::Questions(vec![json!("a")])),
            _ => Ok(ServiceReply::Diagnosis(Some(Diagnosis {
                diagnostico_id: Some(3),
                ..Diagnosis::default()
            }))),
        }
    }));
    app.responder(true);
    app.poll_replies();
    let card = app.result_card.as_ref().unwrap();
    assert!(card.no_diagnosis);
    assert_eq!(card.badge.level, RiskLevel::Bajo);
    assert_eq!(app.diagnostico_actual_id, Some(3));
}

#[test]
fn multiple_requires_answers_and_skips_network() {
    let (mut app, log) = app_with(noise_service());
    app.ver_todos_diagnosticos();
    assert_eq!(app.message, NO_FACTS_MESSAGE);
    assert!(log.borrow().is_empty());
}

#[test]
fn multiple_diagnoses_flow_and_back_to_result() {
    let (mut app, log) = started(noise_service());
    app.responder(true);
    app.poll_replies();
    app.ver_todos_diagnosticos();
    app.poll_replies();
    assert!(matches!(
        log.borrow().last(),
        Some(ServiceRequest::DiagnoseMultiple(h)) if h.len() == 1
    ));
    assert_eq!(app.state, Screen::MultiResult);
    assert_eq!(app.multi_view.as_ref().map(|v| v.total), Some(1));
    app.volver_al_resultado();
    assert_eq!(app.state, Screen::Result);
}

#[test]
fn pdf_download_needs_active_id() {
    let (mut app, _) = app_with(noise_service());
    app.descargar_pdf();
    assert_eq!(app.message, NO_PDF_MESSAGE);
    assert_eq!(app.open_url, None);

    app.diagnostico_actual_id = Some(5);
    app.descargar_pdf();
    assert_eq!(app.open_url.as_deref(), Some("http://eco.test/descargar-pdf/5"));

    app.descargar_historial_pdf();
    assert_eq!(
        app.open_url.as_deref(),
        Some("http://eco.test/descargar-historial-pdf?limite=50")
    );
}

#[test]
fn empty_history_is_loaded_not_failed() {
    let (mut app, log) = app_with(noise_service());
    app.ver_historial();
    app.poll_replies();
    assert_eq!(app.state, Screen::History);
    assert_eq!(log.borrow().len(), 2);
    assert_eq!(app.history.entries(), &Section::Loaded(Vec::new()));
    assert!(matches!(app.history.stats(), Section::Loaded(_)));
    assert_eq!(app.history.empty_message(), Some(EMPTY_HISTORY));
}

#[test]
fn failed_history_has_no_empty_message() {
    let (mut app, _) = app_with(Box::new(|_: &ServiceRequest| Err(ServiceError::Status(503))));
    app.ver_historial();
    assert_eq!(app.history.empty_message(), None);
    app.poll_replies();
    assert_eq!(app.history.entries(), &Section::Failed(HISTORY_ERROR));
    assert_eq!(app.history.empty_message(), None);
}

#[test]
fn stale_reply_is_discarded_after_navigation() {
    let (mut app, _) = app_with(noise_service());
    app.ver_historial();
    app.volver_inicio();
    app.poll_replies();
    assert_eq!(app.state, Screen::Start);
    assert_eq!(app.history.entries(), &Section::Loading);
}

#[test]
fn new_diagnosis_resets_session() {
    let (mut app, log) = started(noise_service());
    app.responder(true);
    app.poll_replies();
    assert_eq!(app.state, Screen::Result);

    app.nuevo_diagnostico();
    app.poll_replies();
    assert_eq!(app.state, Screen::Quiz);
    assert!(app.session.answers().is_empty());
    assert_eq!(app.diagnostico_actual_id, None);
    let catalog_calls = log
        .borrow()
        .iter()
        .filter(|r| **r == ServiceRequest::Questions)
        .count();
    assert_eq!(catalog_calls, 2);
}

#[test]
fn back_to_start_discards_progress() {
    let (mut app, _) = started(questions_service(3));
    app.responder(true);
    app.volver_inicio();
    assert_eq!(app.state, Screen::Start);
    assert_eq!(app.session.phase(), QuizPhase::NotStarted);
    assert!(app.session.answers().is_empty());
}

#[test]
fn late_reply_from_abandoned_session_is_not_applied() {
    let (mut app, held) = deferred_app();
    let catalog = || Ok(ServiceReply::Questions(vec![json!("a")]));

    // sesión 1: se completa y el envío queda en vuelo
    app.empezar_diagnostico();
    release(&held, 0, catalog());
    app.poll_replies();
    app.responder(true);
    assert!(matches!(held.borrow()[1].0, ServiceRequest::Diagnose(_)));

    // sesión 2: vuelta al inicio y cuestionario completo otra vez
    app.volver_inicio();
    app.empezar_diagnostico();
    release(&held, 2, catalog());
    app.poll_replies();
    assert_eq!(app.state, Screen::Quiz);
    app.responder(false);

    assert_eq!(
        held.borrow()[3].0,
        ServiceRequest::Diagnose(AnswerMap::from([("a".to_string(), false)]))
    );

    // llega tarde la respuesta de la sesión 1
    release(&held, 1, diagnosis_titled("De la sesión 1", 99));
    app.poll_replies();
    assert_eq!(app.state, Screen::Quiz);
    assert_eq!(app.diagnostico_actual_id, None);
    assert!(app.result_card.is_none());

    release(&held, 3, diagnosis_titled("De la sesión 2", 7));
    app.poll_replies();
    assert_eq!(app.state, Screen::Result);
    assert_eq!(app.diagnostico_actual_id, Some(7));
    let card = app.result_card.as_ref().unwrap();
    assert_eq!(card.title, "De la sesión 2");
    assert_eq!(card.summary[0].label(), "a → NO");
}

#[test]
fn stale_multiple_reply_is_dropped_on_new_session() {
    let (mut app, held) = deferred_app();
    let catalog = || Ok(ServiceReply::Questions(vec![json!("a")]));

    app.empezar_diagnostico();
    release(&held, 0, catalog());
    app.poll_replies();
    app.responder(true);
    release(&held, 1, diagnosis_titled("Primera", 1));
    app.poll_replies();
    assert_eq!(app.state, Screen::Result);

    app.ver_todos_diagnosticos();
    assert!(app.is_pending(RequestKind::Multiple));
    app.nuevo_diagnostico();
    release(&held, 3, catalog());
    app.poll_replies();
    assert_eq!(app.state, Screen::Quiz);
    assert!(!app.is_pending(RequestKind::Multiple));

    release(
        &held,
        2,
        Ok(ServiceReply::Multiple(DiagnosisList {
            diagnosticos: Vec::new(),
            total: 0,
        })),
    );
    app.poll_replies();
    assert_eq!(app.state, Screen::Quiz);
    assert!(app.multi_view.is_none());
}

#[test]
fn history_page_reply_after_refresh_is_ignored() {
    let (mut app, held) = deferred_app();
    app.ver_historial();
    let full_page: Vec<HistoryEntry> = (1..=50)
        .map(|id| serde_json::from_value(json!({"id": id})).unwrap())
        .collect();
    release(&held, 0, Ok(ServiceReply::Stats(Stats::default())));
    release(&held, 1, Ok(ServiceReply::History(full_page)));
    app.poll_replies();
    assert!(app.history.has_next_page());

    app.historial_pagina_siguiente();
    assert_eq!(
        held.borrow()[2].0,
        ServiceRequest::History { limit: 50, offset: 50 }
    );
    app.ver_historial();
    release(&held, 2, Ok(ServiceReply::History(Vec::new())));
    app.poll_replies();
    assert_eq!(app.history.offset(), 0);
    assert_eq!(app.history.entries(), &Section::Loading);
    assert_eq!(app.history.empty_message(), None);
}
