//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler compiler/evaluer sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariant clé : une expression qui compile s’évalue sans ExpressionMalformee,
//!   et deux évaluations au même x donnent les mêmes bits
//! - signes unaires et `_` binaire comparés à un calcul direct en f64

use std::time::{Duration, Instant};

use super::{compiler, evaluer};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

const FONCTIONS: [&str; 9] = [
    "sin", "cos", "tan", "csc", "sec", "cot", "arcsin", "arccos", "arctan",
];

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => "x".to_string(),
        1 => format!("{}", rng.pick(10)),
        2 => format!("{}x", 1 + rng.pick(9)),
        3 => "pi".to_string(),
        4 => "e".to_string(),
        _ => format!("{}.{}", rng.pick(5), rng.pick(100)),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    let a = gen_expr(rng, depth - 1);
    match rng.pick(12) {
        0 => gen_atom(rng),
        1 => format!("({a}+{})", gen_expr(rng, depth - 1)),
        2 => format!("({a}-{})", gen_expr(rng, depth - 1)),
        3 => format!("({a}*{})", gen_expr(rng, depth - 1)),
        4 => format!("({a}/{})", gen_expr(rng, depth - 1)),
        5 => format!("({a})^{}", rng.pick(4)),
        6 => format!("log_{}({a})", 2 + rng.pick(9)),
        7 => format!("-{a}"),
        8 => format!("({a})/-{}", gen_atom(rng)),
        9 => format!("({a})^-{}", rng.pick(3)),
        10 => format!("({a})_{}", 2 + rng.pick(8)),
        _ => {
            let f = FONCTIONS[rng.pick(FONCTIONS.len() as u32) as usize];
            format!("{f}({a})")
        }
    }
}

/// Expression courte avec signes et `_` binaire, et sa valeur attendue en `x`
/// calculée directement en f64.
fn gen_signe(rng: &mut Rng, x: f64) -> (String, f64) {
    let a = 1 + rng.pick(9);
    let b = 1 + rng.pick(9);
    let c = 1 + rng.pick(9);
    let (fa, fb, fc) = (a as f64, b as f64, c as f64);
    let base = 2 + rng.pick(8);
    let fbase = base as f64;

    match rng.pick(7) {
        0 => (format!("{a}/-{b}*{c}"), fa / -fb * fc),
        1 => (format!("{a}^-{b}*{c}"), fa.powf(-fb) * fc),
        2 => (format!("{a}*-x^2"), fa * -x.powf(2.0)),
        3 => (format!("x/-{b}*x"), x / -fb * x),
        4 => (format!("{a}_{base}*{c}"), fa.log10() / fbase.log10() * fc),
        5 => (format!("{a}_{base}+{c}"), fa.log10() / fbase.log10() + fc),
        _ => (format!("-{a}_{base}-{c}"), -(fa.log10() / fbase.log10()) - fc),
    }
}

/// Casse une expression valide (suppression d’un caractère au hasard).
fn abime(rng: &mut Rng, s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.is_empty() {
        return String::new();
    }
    let k = rng.pick(chars.len() as u32) as usize;
    chars
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != k)
        .map(|(_, c)| *c)
        .collect()
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_expressions_valides() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);

    for _ in 0..200 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        let c = compiler(&expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));

        for x in [-1.5, 0.0, 0.25, 3.0] {
            let a = evaluer(&c, x).unwrap_or_else(|e| panic!("expr={expr:?} x={x} err={e}"));
            let b = evaluer(&c, x).unwrap_or_else(|e| panic!("expr={expr:?} x={x} err={e}"));
            assert_eq!(a.to_bits(), b.to_bits(), "expr={expr:?} x={x}");
        }
    }
}

#[test]
fn fuzz_safe_expressions_abimees_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xBADC0DE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..300 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 3);
        let casse = abime(&mut rng, &expr);

        match compiler(&casse) {
            // si ça compile encore, l’évaluation ne doit jamais trouver une pile incohérente
            Ok(c) => {
                evaluer(&c, 0.5).unwrap_or_else(|e| panic!("expr={casse:?} err={e}"));
                seen_ok += 1;
            }
            Err(e) => {
                assert!(e.est_malformee(), "expr={casse:?} err={e}");
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 10, "trop peu d’erreurs: {seen_err}");
}

#[test]
fn fuzz_safe_signes_et_underscore_binaire() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0x5165E_u64);

    for _ in 0..300 {
        budget(t0, max);

        let x = [-1.5, 0.25, 3.0][rng.pick(3) as usize];
        let (expr, attendu) = gen_signe(&mut rng, x);
        let c = compiler(&expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
        let v = evaluer(&c, x).unwrap_or_else(|e| panic!("expr={expr:?} x={x} err={e}"));

        let tol = 1e-9 * attendu.abs().max(1.0);
        assert!(
            (v - attendu).abs() <= tol,
            "expr={expr:?} x={x} obtenu={v} attendu={attendu}"
        );
    }
}

#[test]
fn fuzz_safe_longue_somme() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let expr = vec!["x"; 2000].join("+");
    let c = compiler(&expr).unwrap_or_else(|e| panic!("err: {e}"));
    budget(t0, max);

    assert_eq!(evaluer(&c, 0.5).unwrap(), 1000.0);
}
