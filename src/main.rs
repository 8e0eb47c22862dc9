use eco_quiz::QuizApp;
use eco_quiz::config::ServiceConfig;

const APP_TITLE: &str = "Sistema Experto Ambiental";

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    use tracing_subscriber::EnvFilter;

    // RUST_LOG manda; por defecto info. Recoge también los `log::` de la librería.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let config = ServiceConfig::load();
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(QuizApp::new(config)))),
    )
}

#[cfg(target_arch = "wasm32")]
fn main() {
    use wasm_bindgen::JsCast;

    eframe::WebLogger::init(log::LevelFilter::Debug).ok();
    let config = ServiceConfig::load();
    log::info!("{APP_TITLE} en {}", config.url_for("/"));

    wasm_bindgen_futures::spawn_local(async move {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("no hay document en el navegador");
            return;
        };
        let canvas = match document
            .get_element_by_id("eco_quiz_canvas")
            .map(|el| el.dyn_into::<web_sys::HtmlCanvasElement>())
        {
            Some(Ok(canvas)) => canvas,
            _ => {
                log::error!("no se encontró el canvas eco_quiz_canvas");
                return;
            }
        };

        let result = eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(move |_cc| Ok(Box::new(QuizApp::new(config)))),
            )
            .await;
        if let Err(err) = result {
            log::error!("no se pudo arrancar la app: {err:?}");
        }
    });
}
