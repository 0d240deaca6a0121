// src/methodes/integration.rs
//
// Quadratures composites sur [a, b] (a > b donne l’opposé, a == b donne 0).
// Le nombre de subdivisions vient des réglages :
// - Simpson 1/3 : arrondi au pair supérieur
// - Simpson 3/8 : arrondi au multiple de 3 inférieur (100 -> 99), au moins 3
// - trapèzes    : tel quel

use super::{f, verifie_bornes, MethodeErreur, Reglages};
use crate::noyau::ExpressionCompilee;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaIntegrale {
    Simpson13,
    Simpson38,
    Trapezes,
}

pub fn simpson_1_3(
    expr: &ExpressionCompilee,
    a: f64,
    b: f64,
    reglages: &Reglages,
) -> Result<f64, MethodeErreur> {
    verifie_bornes(a, b)?;
    let n = (reglages.subdivisions.max(2) + 1) / 2 * 2;
    let step = (b - a) / n as f64;

    let mut sum = f(expr, a)? + f(expr, b)?;
    for i in 1..n {
        let x = a + i as f64 * step;
        let coeff = if i % 2 == 0 { 2.0 } else { 4.0 };
        sum += coeff * f(expr, x)?;
    }

    Ok(step / 3.0 * sum)
}

pub fn simpson_3_8(
    expr: &ExpressionCompilee,
    a: f64,
    b: f64,
    reglages: &Reglages,
) -> Result<f64, MethodeErreur> {
    verifie_bornes(a, b)?;
    let n = (reglages.subdivisions / 3 * 3).max(3);
    let step = (b - a) / n as f64;

    let mut sum = f(expr, a)? + f(expr, b)?;
    for i in 1..n {
        let x = a + i as f64 * step;
        let coeff = if i % 3 == 0 { 2.0 } else { 3.0 };
        sum += coeff * f(expr, x)?;
    }

    Ok(3.0 * step / 8.0 * sum)
}

pub fn trapezes(
    expr: &ExpressionCompilee,
    a: f64,
    b: f64,
    reglages: &Reglages,
) -> Result<f64, MethodeErreur> {
    verifie_bornes(a, b)?;
    let n = reglages.subdivisions.max(1);
    let step = (b - a) / n as f64;

    let mut sum = 0.5 * (f(expr, a)? + f(expr, b)?);
    for i in 1..n {
        let x = a + i as f64 * step;
        sum += f(expr, x)?;
    }

    Ok(sum * step)
}
