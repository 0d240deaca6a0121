// src/noyau/symboles.rs
//
// Tables de symboles (lecture seule, construites une fois au premier accès).
// - OPERATEURS : symbole -> précédence / associativité / fonction binaire
// - FONCTIONS  : nom -> fonction unaire + politique d’angle
//
// `log` n’est PAS dans FONCTIONS : il n’existe qu’à travers sa base (`log_2`),
// c’est le jeton Base qui fait le calcul.

use std::collections::HashMap;
use std::f64::consts::PI;

use lazy_static::lazy_static;

/// Nom réservé du logarithme (toujours suivi de `_<base>`).
pub const LOG: &str = "log";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Assoc {
    Gauche,
    Droite,
}

/// Politique d’angle d’une fonction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Angle {
    /// Argument pris tel quel (radians).
    Radians,
    /// Trig inverse : le résultat est multiplié par π/180.
    DegresEnSortie,
}

#[derive(Clone, Copy, Debug)]
pub struct Operateur {
    pub symbole: char,
    pub precedence: u8,
    pub assoc: Assoc,
    pub applique: fn(f64, f64) -> f64,
}

impl Operateur {
    pub const ARITE: usize = 2;
}

#[derive(Clone, Copy, Debug)]
pub struct Fonction {
    pub nom: &'static str,
    pub applique: fn(f64) -> f64,
    pub angle: Angle,
}

impl Fonction {
    pub const ARITE: usize = 1;

    /// Applique la fonction avec sa politique d’angle.
    pub fn appel(&self, v: f64) -> f64 {
        match self.angle {
            Angle::Radians => (self.applique)(v),
            Angle::DegresEnSortie => (self.applique)(v) * PI / 180.0,
        }
    }
}

/// log base `b` de `a`.
pub fn log_base(a: f64, b: f64) -> f64 {
    a.log10() / b.log10()
}

lazy_static! {
    static ref OPERATEURS: HashMap<char, Operateur> = {
        let table = [
            Operateur { symbole: '^', precedence: 3, assoc: Assoc::Droite, applique: f64::powf },
            Operateur { symbole: '*', precedence: 2, assoc: Assoc::Gauche, applique: |a, b| a * b },
            Operateur { symbole: '/', precedence: 2, assoc: Assoc::Gauche, applique: |a, b| a / b },
            Operateur { symbole: '+', precedence: 1, assoc: Assoc::Gauche, applique: |a, b| a + b },
            Operateur { symbole: '-', precedence: 1, assoc: Assoc::Gauche, applique: |a, b| a - b },
            Operateur { symbole: '_', precedence: 1, assoc: Assoc::Droite, applique: log_base },
        ];
        table.into_iter().map(|op| (op.symbole, op)).collect()
    };

    static ref FONCTIONS: HashMap<&'static str, Fonction> = {
        let table = [
            Fonction { nom: "sin", applique: f64::sin, angle: Angle::Radians },
            Fonction { nom: "cos", applique: f64::cos, angle: Angle::Radians },
            Fonction { nom: "tan", applique: f64::tan, angle: Angle::Radians },
            Fonction { nom: "csc", applique: |v| 1.0 / v.sin(), angle: Angle::Radians },
            Fonction { nom: "sec", applique: |v| 1.0 / v.cos(), angle: Angle::Radians },
            Fonction { nom: "cot", applique: |v| 1.0 / v.tan(), angle: Angle::Radians },
            Fonction { nom: "arcsin", applique: f64::asin, angle: Angle::DegresEnSortie },
            Fonction { nom: "arccos", applique: f64::acos, angle: Angle::DegresEnSortie },
            Fonction { nom: "arctan", applique: f64::atan, angle: Angle::DegresEnSortie },
        ];
        table.into_iter().map(|f| (f.nom, f)).collect()
    };
}

pub fn operateur(symbole: char) -> Option<&'static Operateur> {
    OPERATEURS.get(&symbole)
}

pub fn fonction(nom: &str) -> Option<&'static Fonction> {
    FONCTIONS.get(nom)
}

/// Nom accepté par le tokenizer comme fonction (unaire ou `log`).
pub fn est_nom_de_fonction(nom: &str) -> bool {
    nom == LOG || FONCTIONS.contains_key(nom)
}
