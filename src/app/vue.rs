// src/app/vue.rs
//
// Vue (UI egui) — natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : Enter calcule (quand le champ est focus)
// - Tactile : gros boutons, focus redonné après clic (focus_entree)
// - Une seule compilation par "=" ; la méthode échantillonne ensuite f(x)

use eframe::egui;

use super::etat::{AppCalc, Demarche, Methode};
use crate::methodes::{self, Schema, SchemaIntegrale, SchemaRacine};
use crate::noyau;

/// Motifs effacés d’un bloc par DEL (les plus longs d’abord).
const MOTIFS_DEL: [&str; 11] = [
    "arcsin(", "arccos(", "arctan(", "sin(", "cos(", "tan(", "csc(", "sec(", "cot(", "log_",
    "pi",
];

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.heading("Calculatrice f(x)");
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_methode(ui);

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

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        ui.label("f(x) =");

        // IMPORTANT : id stable + focus contrôlé
        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: x^3 - 2x + 1, log_2(x), sin(x)/x, arctan(x)")
                .id_salt("entree_edit")
                .code_editor(),
        );

        // Si on a cliqué un bouton (pavé / fonctions / DEL / C / etc.), on redonne le focus
        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // --- Clavier : Enter calcule (seulement si le champ est focus) ---
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if resp.has_focus() && enter {
            self.calculer_via_noyau();
        }

        ui.add_space(6.0);

        // Contrat: C = entrée seulement ; CLR = résultats seulement ; AC = tout
        ui.horizontal(|ui| {
            self.bouton_action(ui, "C", "Efface seulement l’entrée", Action::ClearEntree);
            self.bouton_action(
                ui,
                "CLR",
                "Efface résultat + erreur + démarche",
                Action::ClearResultats,
            );
            self.bouton_action(ui, "AC", "Remise à zéro totale", Action::ResetTotal);
        });

        ui.add_space(8.0);

        // Touches rapides + "="
        ui.horizontal_wrapped(|ui| {
            self.bouton_insert(ui, "(", "(", InsertKind::OpenParen);
            self.bouton_insert(ui, ")", ")", InsertKind::CloseParen);

            self.bouton_insert(ui, "+", "+", InsertKind::Op);
            self.bouton_insert(ui, "-", "-", InsertKind::Op);
            self.bouton_insert(ui, "*", "*", InsertKind::Op);
            self.bouton_insert(ui, "/", "/", InsertKind::Op);
            self.bouton_insert(ui, "^", "^", InsertKind::Op);

            ui.separator();

            self.bouton_insert(ui, "x", "x", InsertKind::Word);
            self.bouton_insert(ui, "pi", "pi", InsertKind::Word);
            self.bouton_insert(ui, "e", "e", InsertKind::Word);
            self.bouton_insert(ui, "log_b", "log_", InsertKind::Func);

            ui.add_space(10.0);

            let eq = ui.add_sized([64.0, 32.0], egui::Button::new("="));
            if eq.clicked() {
                self.calculer_via_noyau();
            }
        });

        ui.horizontal_wrapped(|ui| {
            for nom in ["sin", "cos", "tan", "csc", "sec", "cot", "arcsin", "arccos", "arctan"] {
                self.bouton_insert(ui, nom, &format!("{nom}("), InsertKind::Func);
            }
        });

        ui.add_space(8.0);

        // Pavé numérique
        self.ui_pave_numerique(ui);

        if !self.erreur.is_empty() {
            ui.add_space(6.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }
    }

    fn ui_methode(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            ui.label("Méthode :");
            ui.selectable_value(&mut self.methode, Methode::Evaluer, "f(x)");
            ui.selectable_value(&mut self.methode, Methode::Derivee, "f′(x)");
            ui.selectable_value(&mut self.methode, Methode::Integrale, "∫ f(x) dx");
            ui.selectable_value(&mut self.methode, Methode::Racine, "f(x) = 0");
        });

        ui.add_space(4.0);

        match self.methode {
            Methode::Evaluer => {
                ui.horizontal(|ui| {
                    ui.label("x =");
                    ui.add(egui::DragValue::new(&mut self.x).speed(0.1));
                });
            }
            Methode::Derivee => {
                ui.horizontal_wrapped(|ui| {
                    ui.label("x =");
                    ui.add(egui::DragValue::new(&mut self.x).speed(0.1));
                    ui.separator();
                    ui.selectable_value(&mut self.schema_derivee, Schema::Avant, "avant");
                    ui.selectable_value(&mut self.schema_derivee, Schema::Arriere, "arrière");
                    ui.selectable_value(&mut self.schema_derivee, Schema::Centre, "centrée");
                });
                self.ui_pas_h(ui);
            }
            Methode::Integrale => {
                self.ui_intervalle(ui, "a =", "b =");
                ui.horizontal_wrapped(|ui| {
                    ui.selectable_value(
                        &mut self.schema_integrale,
                        SchemaIntegrale::Simpson13,
                        "Simpson 1/3",
                    );
                    ui.selectable_value(
                        &mut self.schema_integrale,
                        SchemaIntegrale::Simpson38,
                        "Simpson 3/8",
                    );
                    ui.selectable_value(
                        &mut self.schema_integrale,
                        SchemaIntegrale::Trapezes,
                        "trapèzes",
                    );

                    ui.separator();

                    ui.label("subdivisions :");
                    let mut n = self.reglages.subdivisions as u32;
                    let resp = ui.add(egui::DragValue::new(&mut n).speed(1).range(2..=100_000));
                    if resp.changed() {
                        self.reglages.set_subdivisions(n as usize);
                    }
                });
            }
            Methode::Racine => {
                ui.horizontal_wrapped(|ui| {
                    ui.selectable_value(
                        &mut self.schema_racine,
                        SchemaRacine::Bissection,
                        "bissection",
                    );
                    ui.selectable_value(
                        &mut self.schema_racine,
                        SchemaRacine::RegulaFalsi,
                        "regula falsi",
                    );
                    ui.selectable_value(
                        &mut self.schema_racine,
                        SchemaRacine::NewtonRaphson,
                        "Newton-Raphson",
                    );
                });

                if self.schema_racine == SchemaRacine::NewtonRaphson {
                    ui.horizontal(|ui| {
                        ui.label("x₀ =");
                        ui.add(egui::DragValue::new(&mut self.a).speed(0.1));
                    });
                    self.ui_pas_h(ui);
                } else {
                    self.ui_intervalle(ui, "a =", "b =");
                }

                ui.horizontal(|ui| {
                    ui.label("ε :");
                    let mut eps = self.reglages.epsilon;
                    let resp = ui.add(
                        egui::DragValue::new(&mut eps)
                            .speed(1e-5)
                            .range(1e-12..=1.0)
                            .max_decimals(12),
                    );
                    if resp.changed() {
                        self.reglages.set_epsilon(eps);
                    }

                    ui.separator();

                    ui.label("itérations max :");
                    let mut n = self.reglages.iter_max as u32;
                    let resp = ui.add(egui::DragValue::new(&mut n).speed(1).range(1..=1_000_000));
                    if resp.changed() {
                        self.reglages.set_iter_max(n as usize);
                    }
                });
            }
        }
    }

    fn ui_intervalle(&mut self, ui: &mut egui::Ui, label_a: &str, label_b: &str) {
        ui.horizontal(|ui| {
            ui.label(label_a);
            ui.add(egui::DragValue::new(&mut self.a).speed(0.1));
            ui.label(label_b);
            ui.add(egui::DragValue::new(&mut self.b).speed(0.1));
        });
    }

    fn ui_pas_h(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("pas h :");
            let mut h = self.reglages.pas_h;
            let resp = ui.add(
                egui::DragValue::new(&mut h)
                    .speed(1e-4)
                    .range(1e-9..=1.0)
                    .max_decimals(9),
            );
            if resp.changed() {
                self.reglages.set_pas_h(h);
            }
        });
    }

    fn ui_pave_numerique(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("pave_numerique_fx")
            .num_columns(4)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                self.bouton_insert(ui, "7", "7", InsertKind::Digit);
                self.bouton_insert(ui, "8", "8", InsertKind::Digit);
                self.bouton_insert(ui, "9", "9", InsertKind::Digit);
                self.bouton_action(ui, "DEL", "Efface le dernier symbole", Action::Backspace);
                ui.end_row();

                self.bouton_insert(ui, "4", "4", InsertKind::Digit);
                self.bouton_insert(ui, "5", "5", InsertKind::Digit);
                self.bouton_insert(ui, "6", "6", InsertKind::Digit);
                self.bouton_insert(ui, "/", "/", InsertKind::Op);
                ui.end_row();

                self.bouton_insert(ui, "1", "1", InsertKind::Digit);
                self.bouton_insert(ui, "2", "2", InsertKind::Digit);
                self.bouton_insert(ui, "3", "3", InsertKind::Digit);
                self.bouton_insert(ui, ".", ".", InsertKind::Digit);
                ui.end_row();

                self.bouton_insert(ui, "0", "0", InsertKind::Digit);
                ui.label("");
                ui.label("");
                ui.label("");
                ui.end_row();
            });
    }

    /// Backspace “intelligent” : retire d’un coup les motifs utiles ("sin(", "log_", etc.).
    fn backspace_entree(&mut self) {
        if self.entree.is_empty() {
            return;
        }

        // Retire espaces finaux
        while self.entree.ends_with(' ') {
            self.entree.pop();
        }

        // Retire tokens connus
        for pat in MOTIFS_DEL {
            if self.entree.ends_with(pat) {
                for _ in 0..pat.chars().count() {
                    self.entree.pop();
                }
                while self.entree.ends_with(' ') {
                    self.entree.pop();
                }
                return;
            }
        }

        // Sinon : un caractère
        self.entree.pop();
        while self.entree.ends_with(' ') {
            self.entree.pop();
        }
    }

    fn ui_resultats(&mut self, ui: &mut egui::Ui) {
        ui.label("Résultat :");
        if self.resultat_dispo {
            Self::champ_monospace(ui, "resultat_out", &self.resultat, 2);
        } else {
            ui.monospace("indisponible");
        }
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(true)
            .show(ui, |ui| {
                Self::champ_demarche(ui, "Jetons", "demarche_jetons", &self.demarche.jetons);
                Self::champ_demarche(ui, "RPN", "demarche_rpn", &self.demarche.rpn);
                if !self.demarche.iterations.is_empty() {
                    Self::champ_demarche(
                        ui,
                        "Itérations",
                        "demarche_iterations",
                        &self.demarche.iterations,
                    );
                }
                Self::champ_demarche(ui, "Note", "demarche_note", &self.demarche.note);
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

    fn bouton_action(&mut self, ui: &mut egui::Ui, label: &str, tip: &str, action: Action) {
        let resp = ui
            .add_sized([56.0, 30.0], egui::Button::new(label))
            .on_hover_text(tip);

        if resp.clicked() {
            match action {
                Action::ClearEntree => self.clear_entree(),
                Action::ClearResultats => self.clear_resultats(),
                Action::ResetTotal => self.reset_total(),
                Action::Backspace => self.backspace_entree(),
            }
            self.focus_entree = true;
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, label: &str, to_insert: &str, kind: InsertKind) {
        let resp = ui.add_sized([46.0, 28.0], egui::Button::new(label));
        if !resp.clicked() || to_insert.is_empty() {
            return;
        }

        match kind {
            InsertKind::CloseParen => {
                while self.entree.ends_with(' ') {
                    self.entree.pop();
                }
                self.entree.push_str(to_insert);
            }
            InsertKind::OpenParen | InsertKind::Func => {
                if !self.entree.is_empty() {
                    let last = self.entree.chars().rev().find(|c| !c.is_whitespace());
                    if let Some(c) = last {
                        if c.is_ascii_digit() || c.is_ascii_alphabetic() || c == ')' {
                            self.entree.push(' ');
                        }
                    }
                }
                self.entree.push_str(to_insert);
            }
            InsertKind::Op => {
                while self.entree.ends_with(' ') {
                    self.entree.pop();
                }
                if !self.entree.is_empty() {
                    self.entree.push(' ');
                }
                self.entree.push_str(to_insert);
                self.entree.push(' ');
            }
            InsertKind::Digit => {
                // chiffres: pas d’espaces auto
                self.entree.push_str(to_insert);
            }
            InsertKind::Word => {
                // mots: espace si juste avant c’est un chiffre ou ')'
                if !self.entree.is_empty() && !self.entree.ends_with(char::is_whitespace) {
                    let last = self.entree.chars().rev().find(|c| !c.is_whitespace());
                    if let Some(c) = last {
                        if c.is_ascii_digit() || c == ')' {
                            self.entree.push(' ');
                        }
                    }
                }
                self.entree.push_str(to_insert);
            }
        }

        self.focus_entree = true;
    }

    /// Compile f(x) une fois, lance la méthode choisie, puis dépose résultat + démarche.
    fn calculer_via_noyau(&mut self) {
        let s = self.entree.trim().to_string();
        if s.is_empty() {
            self.set_erreur("Entrée vide");
            return;
        }

        let expr = match noyau::compiler(&s) {
            Ok(e) => e,
            Err(e) => {
                if e.est_malformee() {
                    log::debug!("formule refusée {s:?} : {e}");
                }
                self.demarche = Demarche::default();
                self.set_erreur(e.to_string());
                return;
            }
        };

        let d = expr.demarche();
        let mut demarche = Demarche {
            jetons: d.jetons,
            rpn: d.rpn,
            iterations: String::new(),
            note: d.note,
        };

        match methodes::executer(&expr, self.demande(), &self.reglages) {
            Ok(sortie) => {
                demarche.iterations = methodes::format_iterations(&sortie.iterations);
                let txt = self.format_resultat(sortie.valeur);
                self.set_resultat(txt, demarche);
            }
            Err(e) => {
                self.demarche = demarche;
                self.set_erreur(e.to_string());
            }
        }
    }

    fn format_resultat(&self, v: f64) -> String {
        match self.methode {
            Methode::Evaluer => format!("f({}) = {v}", self.x),
            Methode::Derivee => format!("f′({}) ≈ {v}", self.x),
            Methode::Integrale => format!("∫ de {} à {} de f(x) dx ≈ {v}", self.a, self.b),
            Methode::Racine => format!("racine ≈ {v}"),
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    ClearEntree,
    ClearResultats,
    ResetTotal,
    Backspace,
}

#[derive(Clone, Copy, Debug)]
enum InsertKind {
    Digit,
    Word,
    Func,
    Op,
    OpenParen,
    CloseParen,
}
