// src/quiz.rs

use crate::model::{AnswerMap, Question};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizPhase {
    NotStarted,
    Asking(usize), // posición actual
    Completed,
}

/// Resultado de `answer()`
#[derive(Clone, Debug, PartialEq)]
pub enum AnswerOutcome {
    /// Sin pregunta contra la que responder
    Ignored,
    Next,
    /// Última respuesta registrada: hay que enviar estas respuestas
    Completed(AnswerMap),
}

/// Sesión de preguntas: posición + respuestas sobre un catálogo fijo
#[derive(Clone, Debug, Default)]
pub struct QuizSession {
    questions: Vec<Question>,
    position: usize,
    answers: AnswerMap,
    started: bool,
    generation: u64, // cambia con cada start/reset
}

impl QuizSession {
    /// Empieza una sesión nueva sobre `questions`, descartando todo lo anterior
    pub fn start(&mut self, questions: Vec<Question>) {
        self.questions = questions;
        self.position = 0;
        self.answers.clear();
        self.started = true;
        self.generation += 1;
    }

    /// Abandona la sesión (vuelta al inicio)
    pub fn reset(&mut self) {
        *self = QuizSession {
            generation: self.generation + 1,
            ..QuizSession::default()
        };
    }

    /// Identifica la sesión: las respuestas de una sesión anterior no valen
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn phase(&self) -> QuizPhase {
        if !self.started {
            QuizPhase::NotStarted
        } else if !self.questions.is_empty() && self.position >= self.questions.len() {
            QuizPhase::Completed
        } else {
            // Con catálogo vacío se queda en Asking(0) sin poder avanzar
            QuizPhase::Asking(self.position)
        }
    }

    pub fn answer(&mut self, value: bool) -> AnswerOutcome {
        if !self.started || self.position >= self.questions.len() {
            return AnswerOutcome::Ignored;
        }

        let id = self.questions[self.position].id.clone();
        self.answers.insert(id, value);
        self.position += 1;

        if self.position == self.questions.len() {
            log::info!("cuestionario completado ({} respuestas)", self.answers.len());
            AnswerOutcome::Completed(self.answers.clone())
        } else {
            AnswerOutcome::Next
        }
    }

    /// Retrocede una pregunta sin borrar la respuesta ya guardada
    pub fn back(&mut self) -> bool {
        if self.position == 0 {
            return false;
        }
        self.position -= 1;
        true
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.position)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Fracción de progreso en [0, 1]
    pub fn progress(&self) -> f32 {
        let total = self.questions.len();
        if total == 0 {
            return 0.0;
        }
        ((self.position + 1).min(total)) as f32 / total as f32
    }

    /// "Anterior" sólo desde la segunda pregunta y mientras quede alguna
    pub fn show_back(&self) -> bool {
        self.position > 0 && self.position < self.questions.len()
    }
}
