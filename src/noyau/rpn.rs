// src/noyau/rpn.rs
//
// Shunting-yard : jetons infixes -> RPN (postfix)
//
// Règles:
// - Num / X / Const => sortie directe
// - Fonction / Base => empilées ; elles sortent au prochain opérateur binaire,
//   à la fermeture englobante ou à la vidange finale
// - Opérateur binaire: dépile tant que le sommet est une fonction/base,
//   ou a une précédence plus forte, ou égale avec associativité gauche
// - Signe unaire (quand on attend une valeur) : `+` est ignoré, `-` devient Neg.
//   Neg s’empile sans dépiler et ne lie que son opérande : il passe après
//   `^` et `_`, avant `*` `/` `+` `-` : "2/-3*4" => "2 3 neg / 4 *"

use super::erreur::{ErreurNoyau, Resultat};
use super::jetons::Tok;
use super::symboles::{operateur, Assoc, Fonction, Operateur, LOG};

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Fonction("log"), Base(2), LPar, Num(8), RPar]
///   rpn:    [Num(8), Base(2), Fonction("log")]
pub fn to_rpn(tokens: &[Tok]) -> Resultat<Vec<Tok>> {
    let mut out: Vec<Tok> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Tok> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    let mut prev_was_value = false;

    for tok in tokens.iter().cloned() {
        match tok {
            Tok::Num(_) | Tok::X | Tok::Const(_) => {
                out.push(tok);
                prev_was_value = true;
            }

            Tok::Fonction(_) | Tok::Base(_) | Tok::Neg => {
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::LPar => {
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::RPar => {
                // dépile jusqu’à '(' (qui est jetée)
                loop {
                    match ops.pop() {
                        Some(Tok::LPar) => break,
                        Some(top) => out.push(top),
                        None => {
                            return Err(ErreurNoyau::malformee(
                                "parenthèse fermante sans ouvrante",
                            ))
                        }
                    }
                }
                prev_was_value = true;
            }

            Tok::Op(c) => {
                let courant = descripteur(c)?;

                if !prev_was_value && (c == '-' || c == '+') {
                    if c == '-' {
                        ops.push(Tok::Neg);
                    }
                    continue;
                }

                while let Some(top) = ops.last() {
                    if !doit_depiler(top, courant)? {
                        break;
                    }
                    if let Some(t) = ops.pop() {
                        out.push(t);
                    }
                }

                ops.push(tok);
                prev_was_value = false;
            }
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(ErreurNoyau::malformee("parenthèse ouvrante non fermée"));
        }
        out.push(op);
    }

    Ok(out)
}

fn descripteur(c: char) -> Resultat<&'static Operateur> {
    operateur(c).ok_or_else(|| ErreurNoyau::malformee(format!("opérateur inconnu: '{c}'")))
}

fn doit_depiler(top: &Tok, courant: &Operateur) -> Resultat<bool> {
    Ok(match top {
        Tok::LPar => false,
        Tok::Fonction(_) | Tok::Base(_) => true,
        // `_` binaire se referme comme une base qualifiée
        Tok::Op('_') => true,
        Tok::Neg => !lie_avant_le_signe(courant),
        Tok::Op(t) => {
            let haut = descripteur(*t)?;
            haut.precedence > courant.precedence
                || (haut.precedence == courant.precedence && haut.assoc == Assoc::Gauche)
        }
        _ => false,
    })
}

fn lie_avant_le_signe(op: &Operateur) -> bool {
    matches!(op.symbole, '^' | '_')
}

/// Simulation de pile sur une RPN : chaque jeton consomme son arité.
/// Un `log` seul (sans base) ne consomme rien.
/// Erreur si la pile se vide en cours de route ou ne finit pas à 1.
pub fn verifie_arite(rpn: &[Tok]) -> Resultat<()> {
    let mut profondeur: usize = 0;

    for (pos, tok) in rpn.iter().enumerate() {
        let (consomme, produit) = match tok {
            Tok::Num(_) | Tok::X | Tok::Const(_) => (0, 1),
            Tok::Op(_) => (Operateur::ARITE, 1),
            Tok::Base(_) | Tok::Neg => (1, 1),
            Tok::Fonction(nom) if nom == LOG => (0, 0),
            Tok::Fonction(_) => (Fonction::ARITE, 1),
            Tok::LPar | Tok::RPar => {
                return Err(ErreurNoyau::malformee("parenthèse inattendue en RPN"))
            }
        };

        if profondeur < consomme {
            return Err(ErreurNoyau::malformee(format!(
                "opérande manquante pour le jeton n°{}",
                pos + 1
            )));
        }
        profondeur = profondeur - consomme + produit;
    }

    match profondeur {
        1 => Ok(()),
        0 => Err(ErreurNoyau::malformee("aucune valeur à calculer")),
        n => Err(ErreurNoyau::malformee(format!(
            "{n} valeurs sans opérateur pour les relier"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noyau::jetons::{format_tokens, tokenize};

    fn rpn_txt(s: &str) -> String {
        let t = tokenize(s).unwrap_or_else(|e| panic!("tokenize({s:?}) erreur: {e}"));
        let r = to_rpn(&t).unwrap_or_else(|e| panic!("to_rpn({s:?}) erreur: {e}"));
        format_tokens(&r)
    }

    #[test]
    fn precedence_et_associativite() {
        assert_eq!(rpn_txt("2+3*4"), "2 3 4 * +");
        assert_eq!(rpn_txt("2-3-4"), "2 3 - 4 -");
        assert_eq!(rpn_txt("2^3^2"), "2 3 2 ^ ^");
        assert_eq!(rpn_txt("(2+3)*4"), "2 3 + 4 *");
    }

    #[test]
    fn fonctions_et_base() {
        assert_eq!(rpn_txt("sin(x)"), "x sin");
        assert_eq!(rpn_txt("sin(x)^2"), "x sin 2 ^");
        assert_eq!(rpn_txt("log_2(8)"), "8 _2 log");
        assert_eq!(rpn_txt("log_2(8)+1"), "8 _2 log 1 +");
    }

    #[test]
    fn moins_unaire() {
        assert_eq!(rpn_txt("-x"), "x neg");
        assert_eq!(rpn_txt("+x"), "x");
        assert_eq!(rpn_txt("2*-3"), "2 3 neg *");
        assert_eq!(rpn_txt("-2^2"), "2 2 ^ neg");
        assert_eq!(rpn_txt("2/-3*4"), "2 3 neg / 4 *");
        assert_eq!(rpn_txt("2^-1*4"), "2 1 neg ^ 4 *");
    }

    #[test]
    fn underscore_binaire_depile() {
        assert_eq!(rpn_txt("8_2+1"), "8 2 _ 1 +");
        assert_eq!(rpn_txt("8_2*3"), "8 2 _ 3 *");
    }

    #[test]
    fn parentheses_desequilibrees() {
        let t = tokenize("(2+3").unwrap();
        assert!(to_rpn(&t).unwrap_err().est_malformee());
        let t = tokenize("2+3)").unwrap();
        assert!(to_rpn(&t).unwrap_err().est_malformee());
    }

    #[test]
    fn arite() {
        let ok = to_rpn(&tokenize("log_2(8)").unwrap()).unwrap();
        assert!(verifie_arite(&ok).is_ok());

        for s in ["2+", "*2", "2pi", "()", "sin()", "-", "2*-"] {
            let r = to_rpn(&tokenize(s).unwrap()).unwrap();
            assert!(verifie_arite(&r).unwrap_err().est_malformee(), "expr={s:?}");
        }
    }
}
