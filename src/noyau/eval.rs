//! Noyau — compilation + évaluation
//!
//! tokenize -> RPN -> vérification d’arité => ExpressionCompilee
//! ExpressionCompilee + x -> pile de f64 -> valeur
//!
//! Une expression compilée est immuable : on l’évalue autant de fois que
//! nécessaire (bissection, Simpson, différences finies…) sans effet de bord.

use log::debug;

use super::erreur::{ErreurNoyau, Resultat};
use super::jetons::{format_tokens, tokenize, Tok};
use super::rpn::{to_rpn, verifie_arite};
use super::symboles::{fonction, log_base, operateur, LOG};

#[derive(Default, Clone, Debug)]
pub struct DemarcheNoyau {
    pub jetons: String,
    pub rpn: String,
    pub note: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExpressionCompilee {
    source: String,
    infixe: Vec<Tok>,
    postfixe: Vec<Tok>,
}

impl ExpressionCompilee {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn jetons(&self) -> &[Tok] {
        &self.infixe
    }

    pub fn postfixe(&self) -> &[Tok] {
        &self.postfixe
    }

    pub fn demarche(&self) -> DemarcheNoyau {
        DemarcheNoyau {
            jetons: format_tokens(self.jetons()),
            rpn: format_tokens(self.postfixe()),
            note: "Pipeline: jetons → RPN → vérification d’arité → pile f64 (une évaluation par x)."
                .into(),
        }
    }
}

/// API publique : compile une formule en f(x).
/// Aucune expression partielle : soit tout passe, soit ExpressionMalformee.
pub fn compiler(source: &str) -> Resultat<ExpressionCompilee> {
    let infixe = tokenize(source)?;
    if infixe.is_empty() {
        return Err(ErreurNoyau::malformee("entrée vide"));
    }

    let postfixe = to_rpn(&infixe)?;
    verifie_arite(&postfixe)?;

    debug!(
        "compilé {:?} : [{}] -> [{}]",
        source,
        format_tokens(&infixe),
        format_tokens(&postfixe)
    );

    Ok(ExpressionCompilee {
        source: source.to_string(),
        infixe,
        postfixe,
    })
}

/// API publique : évalue en `x`.
/// Sémantique IEEE : 1/0 => inf, log(-1) => NaN (à chaque appel, pas seulement le premier).
pub fn evaluer(expr: &ExpressionCompilee, x: f64) -> Resultat<f64> {
    let mut pile: Vec<f64> = Vec::with_capacity(expr.postfixe.len());

    for tok in &expr.postfixe {
        match tok {
            Tok::Num(v) => pile.push(*v),
            Tok::X => pile.push(x),
            Tok::Const(c) => pile.push(c.valeur()),

            Tok::Op(c) => {
                let op = operateur(*c)
                    .ok_or_else(|| ErreurNoyau::malformee(format!("opérateur inconnu: '{c}'")))?;
                let b = depile(&mut pile)?;
                let a = depile(&mut pile)?;
                pile.push((op.applique)(a, b));
            }

            Tok::Neg => {
                let v = depile(&mut pile)?;
                pile.push(-v);
            }

            Tok::Base(b) => {
                let a = depile(&mut pile)?;
                pile.push(log_base(a, *b));
            }

            // `log` a déjà été calculé par sa base
            Tok::Fonction(nom) if nom == LOG => {}

            Tok::Fonction(nom) => {
                let f = fonction(nom)
                    .ok_or_else(|| ErreurNoyau::malformee(format!("fonction inconnue: '{nom}'")))?;
                let v = depile(&mut pile)?;
                pile.push(f.appel(v));
            }

            Tok::LPar | Tok::RPar => {
                return Err(ErreurNoyau::malformee("parenthèse inattendue en RPN"))
            }
        }
    }

    match (pile.pop(), pile.is_empty()) {
        (Some(v), true) => Ok(v),
        _ => Err(ErreurNoyau::malformee("la pile ne se réduit pas à une valeur")),
    }
}

/// Variante stricte : un résultat non fini devient une erreur de domaine.
pub fn evaluer_fini(expr: &ExpressionCompilee, x: f64) -> Resultat<f64> {
    let v = evaluer(expr, x)?;
    if v.is_finite() {
        return Ok(v);
    }
    let detail = if v.is_nan() {
        format!("{} est indéfini", expr.source.trim())
    } else {
        format!("{} est infini", expr.source.trim())
    };
    Err(ErreurNoyau::Domaine { x, detail })
}

fn depile(pile: &mut Vec<f64>) -> Resultat<f64> {
    pile.pop()
        .ok_or_else(|| ErreurNoyau::malformee("opérande manquante (pile vide)"))
}
