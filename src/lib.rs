pub mod app;
pub mod catalog;
pub mod config;
pub mod error;
pub mod history;
pub mod model;
pub mod quiz;
pub mod service;
pub mod ui;
pub mod view_models;

pub use app::QuizApp;
