use super::*;

impl QuizApp {
    /// Cambio exclusivo de pantalla: sólo una visible a la vez
    pub fn show(&mut self, screen: Screen) {
        if self.state != screen {
            log::debug!("pantalla {:?} -> {:?}", self.state, screen);
        }
        self.state = screen;
        self.message.clear();
    }

    /// "Volver al inicio": abandona la sesión en curso
    pub fn volver_inicio(&mut self) {
        self.drop_session_requests();
        self.session.reset();
        self.show(Screen::Start);
    }

    /// Desde la vista de todos los diagnósticos
    pub fn volver_al_resultado(&mut self) {
        if self.result_card.is_some() {
            self.show(Screen::Result);
        } else {
            self.volver_inicio();
        }
    }

    pub fn ver_historial(&mut self) {
        self.show(Screen::History);
        for request in self.history.refresh() {
            self.dispatch(request);
        }
    }

    pub fn historial_pagina_siguiente(&mut self) {
        if let Some(request) = self.history.next_page() {
            self.dispatch(request);
        }
    }

    pub fn historial_pagina_anterior(&mut self) {
        if let Some(request) = self.history.prev_page() {
            self.dispatch(request);
        }
    }
}
