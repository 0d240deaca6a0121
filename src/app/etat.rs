//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : contenir l’état de la calculatrice f(x) (formule, méthode choisie,
//! paramètres x / a / b, résultat, erreur, démarche) et offrir des opérations
//! simples (C/CLR/AC) sans logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici (pas de noyau, pas de parsing).
//! - Actions déterministes, sans effet de bord caché.

use crate::methodes::{Demande, Reglages, Schema, SchemaIntegrale, SchemaRacine};

/// Bornes de départ proposées pour a / b.
const A_DEFAUT: f64 = 0.0;
const B_DEFAUT: f64 = 1.0;

/// Ce que l’utilisateur veut faire de f(x).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Methode {
    Evaluer,
    Derivee,
    Integrale,
    Racine,
}

#[derive(Clone, Default, Debug)]
pub struct Demarche {
    pub jetons: String,
    pub rpn: String,
    pub iterations: String,
    pub note: String,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- méthode + paramètres ---
    pub methode: Methode,
    pub schema_derivee: Schema,
    pub schema_integrale: SchemaIntegrale,
    pub schema_racine: SchemaRacine,
    pub x: f64,
    pub a: f64,
    pub b: f64,
    pub reglages: Reglages,

    // --- sorties ---
    pub resultat: String,
    pub erreur: String,
    pub resultat_dispo: bool,

    // --- démarche (panneau d’explication) ---
    pub demarche: Demarche,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            methode: Methode::Evaluer,
            schema_derivee: Schema::Centre,
            schema_integrale: SchemaIntegrale::Simpson13,
            schema_racine: SchemaRacine::Bissection,
            x: 0.0,
            a: A_DEFAUT,
            b: B_DEFAUT,
            reglages: Reglages::default(),
            resultat: String::new(),
            erreur: String::new(),
            resultat_dispo: false,
            demarche: Demarche::default(),
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats + paramètres par défaut).
    pub fn reset_total(&mut self) {
        *self = Self::default();
    }

    /// C : effacer seulement l’entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// CLR : effacer résultat + erreur + démarche (sans toucher à l’entrée).
    pub fn clear_resultats(&mut self) {
        self.resultat.clear();
        self.erreur.clear();
        self.resultat_dispo = false;
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// Traduit le choix de l’UI en demande pour les méthodes.
    pub fn demande(&self) -> Demande {
        match self.methode {
            Methode::Evaluer => Demande::Valeur { x: self.x },
            Methode::Derivee => Demande::Derivee {
                x: self.x,
                schema: self.schema_derivee,
            },
            Methode::Integrale => Demande::Integrale {
                a: self.a,
                b: self.b,
                schema: self.schema_integrale,
            },
            Methode::Racine => Demande::Racine {
                a: self.a,
                b: self.b,
                schema: self.schema_racine,
            },
        }
    }

    /// Utilitaire : placer une erreur.
    ///
    /// On CONSERVE la démarche de compilation si elle existe (utile pour voir la RPN
    /// d’une f(x) correcte qui échoue seulement en un point), mais plus de résultat.
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.resultat.clear();
        self.resultat_dispo = false;
        self.demarche.iterations.clear();
        self.focus_entree = true;
    }

    /// Utilitaire : déposer un résultat complet.
    pub fn set_resultat(&mut self, resultat: impl Into<String>, demarche: Demarche) {
        self.erreur.clear();
        self.resultat = resultat.into();
        self.resultat_dispo = true;
        self.demarche = demarche;
        self.focus_entree = true;
    }
}
