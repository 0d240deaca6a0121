//! Noyau f(x)
//!
//! Organisation interne :
//! - erreur.rs   : ExpressionMalformee / Domaine
//! - symboles.rs : tables opérateurs + fonctions (lecture seule)
//! - jetons.rs   : tokenisation (multiplication implicite, base de log)
//! - rpn.rs      : shunting-yard + vérification d’arité
//! - eval.rs     : compiler une fois, évaluer pour chaque x

pub mod erreur;
pub mod eval;
pub mod jetons;
pub mod rpn;
pub mod symboles;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::ErreurNoyau;
pub use eval::{compiler, evaluer, evaluer_fini, DemarcheNoyau, ExpressionCompilee};
