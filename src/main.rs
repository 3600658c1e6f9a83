// src/main.rs
//
// Calculatrice d’algèbre linéaire: point d’entrée NATIF + WEB (WASM)
// -------------------------------------------------------------------
// But:
// - NATIF (Linux/Windows/macOS) : journal simplelog + eframe::run_native
// - WEB  (wasm32)              : eframe::WebRunner + WebOptions + <canvas>
//
// Côté WEB (WASM) : index.html doit contenir un canvas :
//   <canvas id="the_canvas_id"></canvas>
//
// Journal (natif) : niveau lu dans CALC_LOG (error|warn|info|debug|trace), info par défaut.

#![cfg_attr(target_arch = "wasm32", allow(unused_imports))]

use eframe::egui;

mod app;

use app::AppCalc;

/// Titre unique (natif + web).
const TITRE_APP: &str = "Calculatrice d’algèbre linéaire";

/* ------------------------ Journal (natif) ------------------------ */

#[cfg(not(target_arch = "wasm32"))]
fn niveau_journal(valeur: Option<&str>) -> log::LevelFilter {
    valeur
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(log::LevelFilter::Info)
}

#[cfg(not(target_arch = "wasm32"))]
fn initialiser_journal() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let niveau = niveau_journal(std::env::var("CALC_LOG").ok().as_deref());
    // Un logger déjà installé n’empêche pas l’application de tourner.
    if let Err(e) = CombinedLogger::init(vec![TermLogger::new(
        niveau,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]) {
        eprintln!("journal indisponible : {e}");
    }
}

/* ------------------------ Entrée NATIF (PC) ------------------------ */

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    initialiser_journal();
    log::info!("démarrage : {TITRE_APP}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITRE_APP)
            .with_inner_size([720.0, 820.0])
            .with_min_inner_size([480.0, 620.0]),
        ..Default::default()
    };

    eframe::run_native(
        TITRE_APP,
        options,
        Box::new(|_cc| Ok(Box::<AppCalc>::default())),
    )
}

/* ------------------------ Entrée WEB (WASM) ------------------------ */

#[cfg(target_arch = "wasm32")]
fn main() {
    // En wasm32, le démarrage réel passe par `start()` (wasm_bindgen).
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{AppCalc, TITRE_APP};

    use wasm_bindgen::JsCast;
    use web_sys::{window, HtmlCanvasElement};

    /// ID du canvas attendu dans index.html.
    const CANVAS_ID: &str = "the_canvas_id";

    /// Point d’entrée automatique au chargement de la page.
    #[wasm_bindgen::prelude::wasm_bindgen(start)]
    pub async fn start() -> Result<(), wasm_bindgen::JsValue> {
        let w = window().ok_or_else(|| js_err("window() indisponible"))?;
        let d = w
            .document()
            .ok_or_else(|| js_err("document() indisponible"))?;
        d.set_title(TITRE_APP);

        let el = d
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| js_err("canvas introuvable (id incorrect dans index.html)"))?;
        let canvas: HtmlCanvasElement = el
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| js_err("l’élément trouvé n’est pas un <canvas>"))?;

        eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(|_cc| Ok(Box::<AppCalc>::default())),
            )
            .await
    }

    fn js_err(msg: &str) -> wasm_bindgen::JsValue {
        wasm_bindgen::JsValue::from_str(msg)
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::niveau_journal;
    use log::LevelFilter;

    #[test]
    fn niveau_depuis_variable() {
        assert_eq!(niveau_journal(None), LevelFilter::Info);
        assert_eq!(niveau_journal(Some("DEBUG")), LevelFilter::Debug);
        assert_eq!(niveau_journal(Some(" warn ")), LevelFilter::Warn);
        assert_eq!(niveau_journal(Some("Off")), LevelFilter::Off);
        assert_eq!(niveau_journal(Some("bavard")), LevelFilter::Info);
    }
}
