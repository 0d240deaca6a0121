//! Tests scientifiques (campagne) : propriétés attendues du moteur f(x).
//!
//! - déterminisme de la compilation (jeton pour jeton)
//! - précédence / associativité droite de ^
//! - multiplication implicite, log à base, politique d’angle des trig inverses
//! - parenthèses déséquilibrées refusées
//! - idempotence bit à bit des évaluations
//! - division par zéro : même résultat à chaque appel

use std::f64::consts::PI;

use super::{compiler, evaluer, ErreurNoyau, ExpressionCompilee};

fn compile_ok(expr: &str) -> ExpressionCompilee {
    compiler(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn eval_ok(expr: &str, x: f64) -> f64 {
    let c = compile_ok(expr);
    evaluer(&c, x).unwrap_or_else(|e| panic!("expr={expr:?} x={x} err={e}"))
}

fn assert_malformee(expr: &str) {
    match compiler(expr) {
        Err(ErreurNoyau::ExpressionMalformee(_)) => {}
        autre => panic!("attendu ExpressionMalformee pour {expr:?}, obtenu {autre:?}"),
    }
}

/* ------------------------ Compilation ------------------------ */

#[test]
fn sci_compilation_deterministe() {
    for expr in ["2+3*4", "log_2(x)^2 - arcsin(x/2)", "-x^2 + 3x - sec(pi*x)"] {
        let a = compile_ok(expr);
        let b = compile_ok(expr);
        assert_eq!(a.postfixe(), b.postfixe(), "expr={expr:?}");
        assert_eq!(a, b);
    }
}

#[test]
fn sci_parentheses_desequilibrees() {
    assert_malformee("(2+3");
    assert_malformee("2+3)");
    assert_malformee("((x)");
    assert_malformee(")(");
}

/* ------------------------ Arithmétique ------------------------ */

#[test]
fn sci_precedence_independante_de_x() {
    for x in [-3.0, 0.0, 1.0, 1e6] {
        assert_eq!(eval_ok("2+3*4", x), 14.0);
    }
}

#[test]
fn sci_puissance_associative_a_droite() {
    assert_eq!(eval_ok("2^3^2", 0.0), 512.0);
    assert_eq!(eval_ok("(2^3)^2", 0.0), 64.0);
}

#[test]
fn sci_multiplication_implicite() {
    assert_eq!(eval_ok("2x", 5.0), 10.0);
    assert_eq!(eval_ok("0.5x^2", 4.0), 8.0);
}

#[test]
fn sci_log_a_base() {
    assert!((eval_ok("log_2(8)", 0.0) - 3.0).abs() < 1e-12);
    assert!((eval_ok("log_3(x)", 81.0) - 4.0).abs() < 1e-12);
}

/* ------------------------ Politique d’angle ------------------------ */

#[test]
fn sci_trig_inverse_convertie() {
    assert_eq!(eval_ok("arcsin(1)", 0.0), 1.0f64.asin() * PI / 180.0);
    assert_eq!(eval_ok("arccos(0)", 0.0), 0.0f64.acos() * PI / 180.0);
    assert_eq!(eval_ok("arctan(x)", 1.0), 1.0f64.atan() * PI / 180.0);
}

#[test]
fn sci_trig_directe_telle_quelle() {
    assert_eq!(eval_ok("sin(x)", 0.3), 0.3f64.sin());
    assert_eq!(eval_ok("tan(x)", 0.3), 0.3f64.tan());
}

/* ------------------------ Réévaluations ------------------------ */

#[test]
fn sci_idempotence_bit_a_bit() {
    let c = compile_ok("sin(x)^2 + cos(x)^2 + log_10(x) * e^x");
    for x in [0.1, 0.7, 2.5, 10.0] {
        let a = evaluer(&c, x).unwrap();
        let b = evaluer(&c, x).unwrap();
        assert_eq!(a.to_bits(), b.to_bits(), "x={x}");
    }
}

#[test]
fn sci_division_par_zero_constante() {
    let c = compile_ok("1/0");
    for _ in 0..5 {
        assert_eq!(evaluer(&c, 0.0).unwrap(), f64::INFINITY);
    }
}

#[test]
fn sci_trig_inverse_hors_domaine() {
    // arcsin(2) : NaN IEEE, pas de panique
    assert!(eval_ok("arcsin(2)", 0.0).is_nan());
}
