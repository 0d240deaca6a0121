// src/methodes/racines.rs
//
// Recherche de racine sur une f(x) compilée.
// - bissection     : |b - a| < epsilon (ou f(c) == 0)
// - regula falsi   : |f(c)| <= epsilon
// - Newton-Raphson : |f(x)| <= epsilon, dérivée par différence avant (pas h)
//
// Toutes bornées par `iter_max` => NonConvergence plutôt qu’une boucle infinie.

use log::{trace, warn};

use super::{f, verifie_bornes, Iteration, MethodeErreur, Racine, Reglages};
use crate::noyau::ExpressionCompilee;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaRacine {
    Bissection,
    RegulaFalsi,
    NewtonRaphson,
}

/// Encadrement initial commun (bissection, regula falsi).
/// Retourne Some(racine) si une borne annule déjà f.
fn encadre(
    expr: &ExpressionCompilee,
    a: f64,
    b: f64,
) -> Result<(f64, f64, Option<f64>), MethodeErreur> {
    verifie_bornes(a, b)?;
    let fa = f(expr, a)?;
    let fb = f(expr, b)?;

    if fa == 0.0 {
        return Ok((fa, fb, Some(a)));
    }
    if fb == 0.0 {
        return Ok((fa, fb, Some(b)));
    }
    if fa * fb > 0.0 {
        warn!("{:?} : pas de changement de signe sur [{a}, {b}]", expr.source());
        return Err(MethodeErreur::PasDeChangementDeSigne { a, b });
    }
    Ok((fa, fb, None))
}

pub fn bissection(
    expr: &ExpressionCompilee,
    a: f64,
    b: f64,
    reglages: &Reglages,
) -> Result<Racine, MethodeErreur> {
    let (mut fa, _fb, deja) = encadre(expr, a, b)?;
    if let Some(valeur) = deja {
        return Ok(Racine {
            valeur,
            iterations: Vec::new(),
        });
    }

    let (mut a, mut b) = (a, b);
    let mut iterations = Vec::new();
    let mut c = (a + b) / 2.0;

    for i in 0..reglages.iter_max {
        if (b - a).abs() < reglages.epsilon {
            return Ok(Racine {
                valeur: c,
                iterations,
            });
        }

        c = (a + b) / 2.0;
        let fc = f(expr, c)?;
        trace!("bissection i={i} a={a} b={b} c={c} f(c)={fc}");
        iterations.push(Iteration { i, a, b, c, fc });

        if fc == 0.0 {
            return Ok(Racine {
                valeur: c,
                iterations,
            });
        }

        if fc * fa < 0.0 {
            b = c;
        } else {
            a = c;
            fa = fc;
        }
    }

    warn!("bissection : pas de convergence en {} itérations", reglages.iter_max);
    Err(MethodeErreur::NonConvergence {
        iterations: reglages.iter_max,
    })
}

pub fn regula_falsi(
    expr: &ExpressionCompilee,
    a: f64,
    b: f64,
    reglages: &Reglages,
) -> Result<Racine, MethodeErreur> {
    let (mut fa, mut fb, deja) = encadre(expr, a, b)?;
    if let Some(valeur) = deja {
        return Ok(Racine {
            valeur,
            iterations: Vec::new(),
        });
    }

    let (mut a, mut b) = (a, b);
    let mut iterations = Vec::new();

    for i in 0..reglages.iter_max {
        // fa et fb restent de signes opposés : fa - fb != 0
        let c = a - (a - b) * fa / (fa - fb);
        let fc = f(expr, c)?;
        trace!("regula falsi i={i} a={a} b={b} c={c} f(c)={fc}");
        iterations.push(Iteration { i, a, b, c, fc });

        if fc.abs() <= reglages.epsilon {
            return Ok(Racine {
                valeur: c,
                iterations,
            });
        }

        if fc * fa < 0.0 {
            b = c;
            fb = fc;
        } else {
            a = c;
            fa = fc;
        }
    }

    warn!("regula falsi : pas de convergence en {} itérations", reglages.iter_max);
    Err(MethodeErreur::NonConvergence {
        iterations: reglages.iter_max,
    })
}

pub fn newton_raphson(
    expr: &ExpressionCompilee,
    x0: f64,
    reglages: &Reglages,
) -> Result<Racine, MethodeErreur> {
    verifie_bornes(x0, x0)?;

    let mut x = x0;
    let mut fx = f(expr, x)?;
    let mut iterations = Vec::new();

    for i in 0..reglages.iter_max {
        if fx.abs() <= reglages.epsilon {
            return Ok(Racine {
                valeur: x,
                iterations,
            });
        }

        let pente = (f(expr, x + reglages.pas_h)? - fx) / reglages.pas_h;
        if pente == 0.0 {
            warn!("Newton-Raphson : dérivée nulle en x = {x}");
            return Err(MethodeErreur::DeriveeNulle { x });
        }

        let suivant = x - fx / pente;
        let f_suivant = f(expr, suivant)?;
        trace!("newton i={i} x={x} f(x)={fx} x+={suivant} f(x+)={f_suivant}");
        iterations.push(Iteration {
            i,
            a: x,
            b: suivant,
            c: suivant,
            fc: f_suivant,
        });

        x = suivant;
        fx = f_suivant;
    }

    if fx.abs() <= reglages.epsilon {
        return Ok(Racine {
            valeur: x,
            iterations,
        });
    }

    warn!("Newton-Raphson : pas de convergence en {} itérations", reglages.iter_max);
    Err(MethodeErreur::NonConvergence {
        iterations: reglages.iter_max,
    })
}
