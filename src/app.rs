// src/app.rs
//
// Calculatrice d’algèbre linéaire: module App (racine)
// ----------------------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + calcul.rs + vue.rs)
// - Ré-exporter AppCalc (pour main.rs: use app::AppCalc;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
//
// Important:
// - Ctrl+Enter est géré dans vue.rs (quand un champ a le focus).
// - Ici, uniquement les raccourcis globaux.

pub mod calcul;
pub mod etat;
pub mod vue;

pub use etat::AppCalc;

use eframe::egui;

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ESC = effacer seulement les entrées (comme bouton "C").
        let esc = ctx.input(|i| i.key_pressed(egui::Key::Escape));
        if esc {
            self.clear_entrees();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui);
        });
    }
}
