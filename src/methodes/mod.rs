//! Méthodes numériques (consommatrices du noyau)
//!
//! - racines.rs     : bissection, regula falsi, Newton-Raphson
//! - derivees.rs    : différences finies avant / arrière / centrée
//! - integration.rs : Simpson 1/3, Simpson 3/8, trapèzes
//!
//! Chaque méthode reçoit une ExpressionCompilee (compilée une seule fois)
//! et l’échantillonne via `evaluer_fini` : un point hors domaine arrête la méthode.

pub mod derivees;
pub mod integration;
pub mod racines;

use thiserror::Error;

use crate::noyau::{evaluer_fini, ErreurNoyau, ExpressionCompilee};

pub use derivees::{derivee, Schema};
pub use integration::{simpson_1_3, simpson_3_8, trapezes, SchemaIntegrale};
pub use racines::{bissection, newton_raphson, regula_falsi, SchemaRacine};

/// Tolérance par défaut (arrêt des méthodes de racine).
pub const EPSILON_DEFAUT: f64 = 1e-4;

/// Pas des différences finies.
pub const PAS_H_DEFAUT: f64 = 1e-3;

/// Subdivisions pour l’intégration.
pub const SUBDIVISIONS_DEFAUT: usize = 100;

/// Garde-fou : nombre max d’itérations d’une méthode de racine.
pub const ITER_MAX_DEFAUT: usize = 1000;

const SUBDIVISIONS_MAX: usize = 100_000;
const ITER_MAX_MAX: usize = 1_000_000;

/// Réglages des méthodes (bornés par leurs setters).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reglages {
    pub epsilon: f64,
    pub pas_h: f64,
    pub subdivisions: usize,
    pub iter_max: usize,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            epsilon: EPSILON_DEFAUT,
            pas_h: PAS_H_DEFAUT,
            subdivisions: SUBDIVISIONS_DEFAUT,
            iter_max: ITER_MAX_DEFAUT,
        }
    }
}

impl Reglages {
    pub fn set_epsilon(&mut self, epsilon: f64) {
        self.epsilon = if epsilon.is_finite() && epsilon > 0.0 {
            epsilon
        } else {
            EPSILON_DEFAUT
        };
    }

    pub fn set_pas_h(&mut self, pas_h: f64) {
        self.pas_h = if pas_h.is_finite() && pas_h > 0.0 {
            pas_h
        } else {
            PAS_H_DEFAUT
        };
    }

    pub fn set_subdivisions(&mut self, n: usize) {
        self.subdivisions = n.clamp(2, SUBDIVISIONS_MAX);
    }

    pub fn set_iter_max(&mut self, n: usize) {
        self.iter_max = n.clamp(1, ITER_MAX_MAX);
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MethodeErreur {
    #[error(transparent)]
    Noyau(#[from] ErreurNoyau),

    #[error("impossible d’encadrer une racine : f({a}) et f({b}) sont de même signe")]
    PasDeChangementDeSigne { a: f64, b: f64 },

    #[error("dérivée nulle en x = {x} : Newton-Raphson bloqué")]
    DeriveeNulle { x: f64 },

    #[error("pas de convergence après {iterations} itérations")]
    NonConvergence { iterations: usize },

    #[error("intervalle invalide [{a}, {b}]")]
    IntervalleInvalide { a: f64, b: f64 },
}

/// Une ligne de la trace d’une méthode de racine.
/// Bissection / regula falsi : [a, b] encadrement, c point testé.
/// Newton-Raphson : a = x(n), b = c = x(n+1).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Iteration {
    pub i: usize,
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub fc: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Racine {
    pub valeur: f64,
    pub iterations: Vec<Iteration>,
}

/// Ce que l’utilisateur demande pour une f(x) compilée.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Demande {
    Valeur { x: f64 },
    Derivee { x: f64, schema: Schema },
    Integrale { a: f64, b: f64, schema: SchemaIntegrale },
    Racine { a: f64, b: f64, schema: SchemaRacine },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Sortie {
    pub valeur: f64,
    pub iterations: Vec<Iteration>,
}

/// Point d’entrée unique utilisé par l’UI.
pub fn executer(
    expr: &ExpressionCompilee,
    demande: Demande,
    reglages: &Reglages,
) -> Result<Sortie, MethodeErreur> {
    let simple = |valeur| Sortie {
        valeur,
        iterations: Vec::new(),
    };

    let sortie = match demande {
        Demande::Valeur { x } => simple(f(expr, x)?),
        Demande::Derivee { x, schema } => simple(derivee(expr, x, schema, reglages)?),
        Demande::Integrale { a, b, schema } => simple(match schema {
            SchemaIntegrale::Simpson13 => simpson_1_3(expr, a, b, reglages)?,
            SchemaIntegrale::Simpson38 => simpson_3_8(expr, a, b, reglages)?,
            SchemaIntegrale::Trapezes => trapezes(expr, a, b, reglages)?,
        }),
        Demande::Racine { a, b, schema } => {
            let r = match schema {
                SchemaRacine::Bissection => bissection(expr, a, b, reglages)?,
                SchemaRacine::RegulaFalsi => regula_falsi(expr, a, b, reglages)?,
                // Newton part de a (b ignoré)
                SchemaRacine::NewtonRaphson => newton_raphson(expr, a, reglages)?,
            };
            Sortie {
                valeur: r.valeur,
                iterations: r.iterations,
            }
        }
    };

    Ok(sortie)
}

/// Trace tabulée (démarche) : une ligne par itération.
pub fn format_iterations(iterations: &[Iteration]) -> String {
    if iterations.is_empty() {
        return String::new();
    }
    let mut out = String::from("i\ta\t\tb\t\tc\t\tf(c)");
    for it in iterations {
        out.push_str(&format!(
            "\n{}\t{:.6}\t{:.6}\t{:.6}\t{:.6}",
            it.i, it.a, it.b, it.c, it.fc
        ));
    }
    out
}

/// Échantillon strict de f.
pub(crate) fn f(expr: &ExpressionCompilee, x: f64) -> Result<f64, MethodeErreur> {
    Ok(evaluer_fini(expr, x)?)
}

pub(crate) fn verifie_bornes(a: f64, b: f64) -> Result<(), MethodeErreur> {
    if a.is_finite() && b.is_finite() {
        Ok(())
    } else {
        Err(MethodeErreur::IntervalleInvalide { a, b })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noyau::compiler;

    #[test]
    fn reglages_bornes() {
        let mut r = Reglages::default();
        r.set_subdivisions(0);
        assert_eq!(r.subdivisions, 2);
        r.set_iter_max(usize::MAX);
        assert_eq!(r.iter_max, ITER_MAX_MAX);
        r.set_epsilon(-1.0);
        assert_eq!(r.epsilon, EPSILON_DEFAUT);
        r.set_pas_h(f64::NAN);
        assert_eq!(r.pas_h, PAS_H_DEFAUT);
    }

    #[test]
    fn executer_valeur_et_domaine() {
        let e = compiler("1/x").unwrap();
        let r = Reglages::default();
        let s = executer(&e, Demande::Valeur { x: 4.0 }, &r).unwrap();
        assert_eq!(s.valeur, 0.25);
        assert!(s.iterations.is_empty());

        match executer(&e, Demande::Valeur { x: 0.0 }, &r) {
            Err(MethodeErreur::Noyau(ErreurNoyau::Domaine { .. })) => {}
            autre => panic!("attendu Domaine, obtenu {autre:?}"),
        }
    }

    #[test]
    fn executer_racine_avec_trace() {
        let e = compiler("x^2 - 2").unwrap();
        let s = executer(
            &e,
            Demande::Racine {
                a: 0.0,
                b: 2.0,
                schema: SchemaRacine::Bissection,
            },
            &Reglages::default(),
        )
        .unwrap();
        assert!((s.valeur - 2f64.sqrt()).abs() < 1e-3);
        assert!(!s.iterations.is_empty());

        let txt = format_iterations(&s.iterations);
        assert!(txt.starts_with("i\ta"));
        assert_eq!(txt.lines().count(), s.iterations.len() + 1);
    }

    #[test]
    fn bornes_non_finies() {
        let e = compiler("x").unwrap();
        let err = executer(
            &e,
            Demande::Integrale {
                a: f64::NEG_INFINITY,
                b: 1.0,
                schema: SchemaIntegrale::Trapezes,
            },
            &Reglages::default(),
        )
        .unwrap_err();
        assert!(matches!(err, MethodeErreur::IntervalleInvalide { .. }));
    }
}
