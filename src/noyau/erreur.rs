// src/noyau/erreur.rs
//
// Erreurs du noyau.
// - ExpressionMalformee : détectée à la compilation (ou pile incohérente à l’évaluation)
// - Domaine             : résultat non fini (1/0, log d’un négatif, arcsin(2), tan au pôle…)

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErreurNoyau {
    #[error("expression malformée : {0}")]
    ExpressionMalformee(String),

    #[error("hors domaine en x = {x} : {detail}")]
    Domaine { x: f64, detail: String },
}

impl ErreurNoyau {
    pub fn malformee(msg: impl Into<String>) -> Self {
        ErreurNoyau::ExpressionMalformee(msg.into())
    }

    pub fn est_malformee(&self) -> bool {
        matches!(self, ErreurNoyau::ExpressionMalformee(_))
    }
}

pub type Resultat<T> = Result<T, ErreurNoyau>;
