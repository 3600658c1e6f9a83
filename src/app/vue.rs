// src/app/vue.rs
//
// Vue (UI egui): natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Choix de l’opération (liste déroulante), champs multi-lignes A / B / k
// - Réglages : rendu fraction/décimal/auto, décimales, démarche oui/non
// - Ctrl+Enter calcule (Enter seul = retour à la ligne dans une matrice)

use eframe::egui;

use super::calcul::{calculer, Requete};
use super::etat::{Affichage, AppCalc, Mode, DECIMALES_MAX};

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice d’algèbre linéaire");
                ui.add_space(6.0);

                self.ui_mode(ui);
                self.ui_entrees(ui);
                self.ui_reglages(ui);
                self.ui_boutons(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_resultats(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
            });
    }

    fn ui_mode(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Opération :");
            egui::ComboBox::from_id_salt("mode")
                .selected_text(self.mode.libelle())
                .width(260.0)
                .show_ui(ui, |ui| {
                    for mode in Mode::TOUS {
                        ui.selectable_value(&mut self.mode, mode, mode.libelle());
                    }
                });
        });
    }

    fn ui_entrees(&mut self, ui: &mut egui::Ui) {
        if self.mode.utilise_scalaire() {
            ui.horizontal(|ui| {
                ui.label("k :");
                ui.add(
                    egui::TextEdit::singleline(&mut self.scalaire)
                        .desired_width(120.0)
                        .hint_text("Ex: -3/4")
                        .code_editor(),
                );
            });
        }

        let titre_a = if self.mode == Mode::Expression {
            "Expression :"
        } else if self.mode == Mode::Systeme {
            "Équations :"
        } else {
            "A :"
        };
        ui.label(titre_a);

        let lignes = if self.mode == Mode::Expression { 1 } else { 5 };
        let resp = ui.add(
            egui::TextEdit::multiline(&mut self.entree_a)
                .desired_width(ui.available_width())
                .desired_rows(lignes)
                .hint_text(self.mode.aide_a())
                .id_source("entree_a")
                .code_editor(),
        );

        // Après un clic de bouton, on redonne le focus au champ principal
        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        let ctrl_entree =
            resp.has_focus() && ui.input(|i| i.modifiers.command && i.key_pressed(egui::Key::Enter));

        let mut ctrl_entree_b = false;
        if self.mode.utilise_b() {
            ui.label("B :");
            let resp_b = ui.add(
                egui::TextEdit::multiline(&mut self.entree_b)
                    .desired_width(ui.available_width())
                    .desired_rows(5)
                    .hint_text("Matrice B")
                    .id_source("entree_b")
                    .code_editor(),
            );
            ctrl_entree_b = resp_b.has_focus()
                && ui.input(|i| i.modifiers.command && i.key_pressed(egui::Key::Enter));
        }

        if ctrl_entree || ctrl_entree_b {
            self.calculer_via_noyau();
        }
    }

    fn ui_reglages(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            ui.label("Affichage :");
            for a in [Affichage::Fraction, Affichage::Decimal, Affichage::Auto] {
                ui.radio_value(&mut self.affichage, a, a.libelle());
            }

            ui.separator();

            let mut d = self.decimales;
            ui.label("Décimales :");
            ui.add(egui::DragValue::new(&mut d).range(0..=DECIMALES_MAX));
            self.set_decimales(d);

            ui.separator();

            ui.checkbox(&mut self.enregistrer_pas, "Démarche");
        });
    }

    fn ui_boutons(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            self.bouton_action(ui, "=", "Calculer (Ctrl+Enter)", Action::Calculer);
            self.bouton_action(ui, "C", "Effacer les entrées", Action::ClearEntrees);
            self.bouton_action(ui, "CLR", "Effacer résultats + démarche", Action::ClearResultats);
            self.bouton_action(ui, "AC", "Tout remettre à zéro", Action::ResetTotal);
        });
    }

    fn ui_resultats(&mut self, ui: &mut egui::Ui) {
        if !self.erreur.is_empty() {
            ui.colored_label(ui.visuals().error_fg_color, format!("Erreur : {}", self.erreur));
            ui.add_space(4.0);
        }

        ui.label("Résultat :");
        Self::champ_monospace(ui, "resultat_out", &self.resultat, 2);

        if !self.lignes.is_empty() {
            ui.add_space(6.0);
            Self::champ_monospace(ui, "lignes_out", &self.lignes.join("\n"), self.lignes.len());
        }
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new(format!("Démarche ({} pas)", self.pas.len()))
            .id_salt("demarche")
            .default_open(true)
            .show(ui, |ui| {
                if self.pas.is_empty() {
                    ui.weak("aucun pas enregistré");
                }
                for (i, pas) in self.pas.iter().enumerate() {
                    ui.add_space(4.0);
                    ui.label(format!("{}. {}", i + 1, pas.titre));
                    let rows = pas.grille.lines().count().max(1);
                    Self::champ_monospace(ui, &format!("pas_{i}"), &pas.grille, rows);
                }
            });
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Lecture seule : cadre + label monospace, pas de TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.set_min_height(
                        rows as f32 * ui.text_style_height(&egui::TextStyle::Monospace),
                    );
                    ui.monospace(contenu);
                });
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::Calculer => self.calculer_via_noyau(),
                Action::ClearEntrees => self.clear_entrees(),
                Action::ClearResultats => self.clear_resultats(),
                Action::ResetTotal => self.reset_total(),
            }
            self.focus_entree = true;
        }
    }

    /// Calcule via le pont, puis dépose résultat / lignes / démarche dans l’état UI.
    fn calculer_via_noyau(&mut self) {
        let req = Requete {
            mode: self.mode,
            a: &self.entree_a,
            b: &self.entree_b,
            scalaire: &self.scalaire,
            rendu: self.mode_rendu(),
            decimales: self.decimales,
            enregistrer_pas: self.enregistrer_pas,
        };

        match calculer(&req) {
            Ok(sortie) => self.set_resultats(sortie.resultat, sortie.lignes, sortie.pas),
            Err(e) => self.set_erreur(e.to_string()),
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    Calculer,
    ClearEntrees,
    ClearResultats,
    ResetTotal,
}
