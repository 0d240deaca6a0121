// src/noyau/jetons.rs

use super::erreur::{ErreurNoyau, Resultat};
use super::symboles::est_nom_de_fonction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constante {
    E,
    Pi,
}

impl Constante {
    pub fn valeur(self) -> f64 {
        match self {
            Constante::E => std::f64::consts::E,
            Constante::Pi => std::f64::consts::PI,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    X,
    Const(Constante),

    // Fonction connue (sin, arccos, …) ou `log`
    Fonction(String),

    // Base du logarithme : `_2` dans `log_2(8)`
    Base(f64),

    // ^ * / + - et `_` binaire (8_2 = log base 2 de 8)
    Op(char),

    // Moins unaire, posé par le convertisseur RPN (jamais par le tokenizer)
    Neg,

    LPar,
    RPar,
}

/// Tokenize une chaîne en jetons (forme infixe).
/// Supporte:
/// - nombres décimaux (ex: 12, 0.5, .25)
/// - x, e, pi (insensibles à la casse)
/// - fonctions sin cos tan csc sec cot arcsin arccos arctan, et log
/// - base de log: `_<nombre>` quand le caractère précédent n’est ni chiffre, ni x, ni ')'
/// - opérateurs ^ * / + - _ et parenthèses
/// - multiplication implicite: `2x` => 2 * x
///
/// Entrée vide (ou blancs seulement) => Ok(vec![]) ; c’est `compiler` qui la refuse.
pub fn tokenize(s: &str) -> Resultat<Vec<Tok>> {
    // normalisation : blancs retirés, flux dense
    let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
    let mut out: Vec<Tok> = Vec::new();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        // Nombre : suite maximale de chiffres et de '.'
        if est_chiffre(c) {
            let (v, suite) = lire_nombre(&chars, i)?;
            out.push(Tok::Num(v));
            i = suite;
            continue;
        }

        // Mot : suite maximale de lettres
        if c.is_ascii_alphabetic() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            let w = word.to_lowercase();

            match w.as_str() {
                "x" => {
                    if matches!(out.last(), Some(Tok::Num(_))) {
                        out.push(Tok::Op('*'));
                    }
                    out.push(Tok::X);
                }
                "e" => out.push(Tok::Const(Constante::E)),
                "pi" => out.push(Tok::Const(Constante::Pi)),
                _ if est_nom_de_fonction(&w) => out.push(Tok::Fonction(w)),
                _ => return Err(ErreurNoyau::malformee(format!("identifiant inconnu: '{word}'"))),
            }
            continue;
        }

        if c == '_' {
            // Qualificatif de base seulement après autre chose qu’un opérande fermé
            let precedent = if i > 0 { Some(chars[i - 1]) } else { None };
            let est_base = match precedent {
                Some(p) => !(p.is_ascii_digit() || p == 'x' || p == 'X' || p == ')'),
                None => true,
            };

            i += 1;
            if est_base {
                if i >= chars.len() || !est_chiffre(chars[i]) {
                    return Err(ErreurNoyau::malformee("base de logarithme attendue après '_'"));
                }
                let (b, suite) = lire_nombre(&chars, i)?;
                out.push(Tok::Base(b));
                i = suite;
            } else {
                out.push(Tok::Op('_'));
            }
            continue;
        }

        match c {
            '^' | '*' | '/' | '+' | '-' => out.push(Tok::Op(c)),
            '(' => out.push(Tok::LPar),
            ')' => out.push(Tok::RPar),
            _ => return Err(ErreurNoyau::malformee(format!("caractère inattendu: '{c}'"))),
        }
        i += 1;
    }

    Ok(out)
}

fn est_chiffre(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

/// Lit la suite maximale de chiffres/'.' à partir de `start`.
/// Retourne (valeur, index suivant).
fn lire_nombre(chars: &[char], start: usize) -> Resultat<(f64, usize)> {
    let mut i = start;
    while i < chars.len() && est_chiffre(chars[i]) {
        i += 1;
    }
    let txt: String = chars[start..i].iter().collect();
    let v = txt
        .parse::<f64>()
        .map_err(|_| ErreurNoyau::malformee(format!("nombre invalide: '{txt}'")))?;
    Ok((v, i))
}

/// Format utilitaire (démarche) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::with_capacity(tokens.len());
    for t in tokens {
        let s = match t {
            Tok::Num(v) => format!("{v}"),
            Tok::X => "x".to_string(),
            Tok::Const(Constante::E) => "e".to_string(),
            Tok::Const(Constante::Pi) => "π".to_string(),
            Tok::Fonction(name) => name.clone(),
            Tok::Base(b) => format!("_{b}"),
            Tok::Op(c) => c.to_string(),
            Tok::Neg => "neg".to_string(),
            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
