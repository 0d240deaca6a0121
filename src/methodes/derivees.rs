// src/methodes/derivees.rs
//
// Dérivée numérique par différences finies (pas h des réglages).

use super::{f, verifie_bornes, MethodeErreur, Reglages};
use crate::noyau::ExpressionCompilee;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Schema {
    /// (f(x+h) - f(x)) / h
    Avant,
    /// (f(x) - f(x-h)) / h
    Arriere,
    /// (f(x+h) - f(x-h)) / 2h
    Centre,
}

pub fn derivee(
    expr: &ExpressionCompilee,
    x: f64,
    schema: Schema,
    reglages: &Reglages,
) -> Result<f64, MethodeErreur> {
    verifie_bornes(x, x)?;
    let h = reglages.pas_h;

    let d = match schema {
        Schema::Avant => (f(expr, x + h)? - f(expr, x)?) / h,
        Schema::Arriere => (f(expr, x)? - f(expr, x - h)?) / h,
        Schema::Centre => (f(expr, x + h)? - f(expr, x - h)?) / (2.0 * h),
    };
    Ok(d)
}
