// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : Enter crée l’expression (quand le champ est focus)
// - Tableau : ID | expression | variables | résultat + actions par ligne
// - Démarche : jetons infixes / postfixes de l’expression sélectionnée

use eframe::egui;

use super::etat::AppCalc;
use crate::noyau::format_variables;
use crate::noyau::jetons::format_tokens;

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice RPN");
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_tableau(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_selection(ui);
            });
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("Nouvelle expression :");

        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: x + y * (x^2 - 16), sin(0) + cos(0), -|x_2 - 17|")
                .id_source("entree_edit")
                .code_editor(),
        );

        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // TextEdit singleline perd le focus sur Enter : on teste lost_focus
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if resp.lost_focus() && enter {
            self.creer();
        }

        ui.add_space(6.0);

        ui.horizontal(|ui| {
            if ui
                .add_sized([72.0, 30.0], egui::Button::new("Créer"))
                .on_hover_text("Analyse puis ajoute l’expression au registre")
                .clicked()
            {
                self.creer();
            }
            if ui
                .add_sized([56.0, 30.0], egui::Button::new("C"))
                .on_hover_text("Efface seulement l’entrée")
                .clicked()
            {
                self.entree.clear();
                self.focus_entree = true;
            }
            if ui
                .add_sized([56.0, 30.0], egui::Button::new("AC"))
                .on_hover_text("Supprime toutes les expressions")
                .clicked()
            {
                self.tout_supprimer();
            }

            ui.separator();

            ui.label("Précision :");
            let mut d = self.chiffres as u32;
            let resp = ui.add(
                egui::DragValue::new(&mut d)
                    .speed(1)
                    .range(0..=15)
                    .suffix(" chiffres"),
            );
            if resp.changed() {
                self.set_chiffres(d as usize);
            }
        });

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
            if !self.curseur.is_empty() {
                Self::champ_monospace(ui, "curseur_erreur", &self.curseur, 2);
            }
        } else if !self.message.is_empty() {
            ui.add_space(6.0);
            ui.label(self.message.as_str());
        }
    }

    fn ui_tableau(&mut self, ui: &mut egui::Ui) {
        if self.calc.is_empty() {
            ui.monospace("aucune expression");
            return;
        }

        // Actions différées : on ne modifie pas le registre pendant qu’on le parcourt.
        let mut a_evaluer = None;
        let mut a_supprimer = None;
        let mut a_selectionner = None;

        egui::Grid::new("tableau_expressions")
            .num_columns(5)
            .striped(true)
            .spacing([10.0, 6.0])
            .show(ui, |ui| {
                ui.strong("ID");
                ui.strong("Expression");
                ui.strong("Variables");
                ui.strong("Résultat");
                ui.label("");
                ui.end_row();

                for e in self.calc.expressions() {
                    let id = e.id();
                    let choisie = self.selection == Some(id);

                    if ui.selectable_label(choisie, id.to_string()).clicked() {
                        a_selectionner = Some(id);
                    }
                    ui.monospace(e.source());
                    ui.monospace(format_variables(e.variables()));
                    ui.monospace(self.resultats.get(&id).map(String::as_str).unwrap_or("—"));

                    ui.horizontal(|ui| {
                        if ui.small_button("=").on_hover_text("Évaluer").clicked() {
                            a_evaluer = Some(id);
                        }
                        if ui.small_button("✖").on_hover_text("Supprimer").clicked() {
                            a_supprimer = Some(id);
                        }
                    });
                    ui.end_row();
                }
            });

        if let Some(id) = a_selectionner {
            self.selectionner(id);
        }
        if let Some(id) = a_evaluer {
            self.evaluer(id);
        }
        if let Some(id) = a_supprimer {
            self.supprimer(id);
        }
    }

    fn ui_selection(&mut self, ui: &mut egui::Ui) {
        let Some(id) = self.selection else {
            ui.label("Cliquer un ID pour définir ses variables.");
            return;
        };

        ui.label(format!("Variables de l’expression {id} (nom=valeur, séparées par des virgules) :"));
        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.entree_variables)
                    .desired_width(ui.available_width() - 90.0)
                    .hint_text("x=5, y=10")
                    .id_source("variables_edit")
                    .code_editor(),
            );
            if ui.button("Appliquer").clicked() {
                self.appliquer_variables();
            }
        });

        let Some(e) = self.calc.get(id) else {
            return;
        };
        let infixe = format_tokens(e.infix());
        let postfixe = if e.is_postfix_built() {
            format_tokens(e.postfix())
        } else {
            "(construite à la première évaluation)".to_string()
        };

        egui::CollapsingHeader::new("Démarche")
            .default_open(true)
            .show(ui, |ui| {
                Self::champ_demarche(ui, "Jetons (infixe)", "demarche_infixe", &infixe);
                Self::champ_demarche(ui, "Postfixe", "demarche_postfixe", &postfixe);
            });
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        Self::champ_monospace(ui, id, contenu, 2);
    }

    fn champ_monospace(ui: &mut egui::Ui, id: &str, contenu: &str, rows: usize) {
        // Affichage lecture seule “stable”, sans TextEdit interactif.
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
}
