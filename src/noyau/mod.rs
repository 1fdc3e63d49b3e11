//! Noyau : compilateur/évaluateur d’expressions infixes (f64)
//!
//! Organisation interne :
//! - jetons.rs       : modèle de jetons (genre, priorité, fonction en enum)
//! - lexeur.rs       : lecture + moins unaire + barres |..|
//! - rpn.rs          : shunting-yard (infixe -> postfixe)
//! - eval.rs         : évaluation postfixe + pipeline complet
//! - erreurs.rs      : LexError / SyntaxError / EvalError
//! - expression.rs   : entité Expression (cache infixe/postfixe + variables)
//! - calculatrice.rs : registre d’expressions par identifiant
//! - variables.rs    : table des variables + saisie "x=5, y=10"

pub mod calculatrice;
pub mod erreurs;
pub mod eval;
pub mod expression;
pub mod jetons;
pub mod lexeur;
pub mod rpn;
pub mod variables;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use calculatrice::Calculator;
pub use erreurs::{ErreurCalcul, ErreurNoyau};
pub use eval::{evaluate, evaluate_source, parse};
pub use expression::Expression;
pub use variables::{format_variables, parse_affectations, Variables};
