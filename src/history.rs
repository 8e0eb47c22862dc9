// src/history.rs

use crate::config::DEFAULT_HISTORY_LIMIT;
use crate::error::ServiceError;
use crate::model::{HistoryEntry, Stats};
use crate::service::ServiceRequest;
use std::collections::HashSet;

pub const STATS_ERROR: &str = "Error al cargar estadísticas.";
pub const HISTORY_ERROR: &str = "Error al cargar el historial.";
pub const EMPTY_HISTORY: &str = "No hay diagnósticos en el historial.";

/// Estado de cada bloque del panel; fallan por separado
#[derive(Clone, Debug, PartialEq)]
pub enum Section<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed(&'static str),
}

#[derive(Clone, Debug)]
pub struct HistoryPanel {
    limit: u32,
    offset: u32,
    stats: Section<Stats>,
    entries: Section<Vec<HistoryEntry>>,
    expanded: HashSet<i64>, // detalles abiertos
}

impl Default for HistoryPanel {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl HistoryPanel {
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            offset: 0,
            stats: Section::Idle,
            entries: Section::Idle,
            expanded: HashSet::new(),
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn stats(&self) -> &Section<Stats> {
        &self.stats
    }

    pub fn entries(&self) -> &Section<Vec<HistoryEntry>> {
        &self.entries
    }

    /// Recarga completa desde la primera página. Devuelve los dos requests.
    pub fn refresh(&mut self) -> [ServiceRequest; 2] {
        self.offset = 0;
        self.stats = Section::Loading;
        [ServiceRequest::Stats, self.page_request()]
    }

    fn page_request(&mut self) -> ServiceRequest {
        self.entries = Section::Loading;
        ServiceRequest::History {
            limit: self.limit,
            offset: self.offset,
        }
    }

    pub fn has_prev_page(&self) -> bool {
        self.offset > 0
    }

    /// Si la última página vino llena puede haber más
    pub fn has_next_page(&self) -> bool {
        matches!(&self.entries, Section::Loaded(e) if e.len() as u32 >= self.limit)
    }

    pub fn next_page(&mut self) -> Option<ServiceRequest> {
        if !self.has_next_page() {
            return None;
        }
        self.offset += self.limit;
        Some(self.page_request())
    }

    pub fn prev_page(&mut self) -> Option<ServiceRequest> {
        if !self.has_prev_page() {
            return None;
        }
        self.offset = self.offset.saturating_sub(self.limit);
        Some(self.page_request())
    }

    pub fn apply_stats(&mut self, result: Result<Stats, ServiceError>) {
        self.stats = match result {
            Ok(stats) => Section::Loaded(stats),
            Err(err) => {
                log::error!("Error al cargar estadísticas: {err}");
                Section::Failed(STATS_ERROR)
            }
        };
    }

    /// Respuesta de la página `offset`; si ya se pidió otra página se ignora
    pub fn apply_entries(&mut self, offset: u32, result: Result<Vec<HistoryEntry>, ServiceError>) {
        if offset != self.offset {
            log::debug!("página {offset} descartada, la actual es {}", self.offset);
            return;
        }
        self.expanded.clear();
        self.entries = match result {
            Ok(entries) => Section::Loaded(entries),
            Err(err) => {
                log::error!("Error al cargar historial: {err}");
                Section::Failed(HISTORY_ERROR)
            }
        };
    }

    /// Mensaje explícito cuando el historial cargó sin entradas
    pub fn empty_message(&self) -> Option<&'static str> {
        match &self.entries {
            Section::Loaded(entries) if entries.is_empty() => Some(EMPTY_HISTORY),
            _ => None,
        }
    }

    pub fn toggle_details(&mut self, id: i64) {
        if !self.expanded.remove(&id) {
            self.expanded.insert(id);
        }
    }

    pub fn is_expanded(&self, id: i64) -> bool {
        self.expanded.contains(&id)
    }
}
