//! Erreurs du noyau.
//!
//! - `LexError`    : lecture (caractère inattendu, nombre mal formé, identifiant vide)
//! - `SyntaxError` : crochets non appariés (transformation postfixe)
//! - `EvalError`   : évaluation (variable absente, arité, division par zéro, pile finale)
//!
//! Lex/syntaxe : fatales pour la tentative d’analyse.
//! Évaluation : fatale pour la tentative d’évaluation seulement, l’état analysé reste valable.

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Error)]
#[error("{message} (position {})", .position + 1)]
pub struct LexError {
    /// Indice du caractère fautif (en caractères, à partir de 0).
    pub position: usize,
    pub message: String,
    /// Texte source complet, pour l’affichage du curseur.
    pub expression: String,
}

impl LexError {
    pub fn new(message: impl Into<String>, position: usize, expression: &str) -> Self {
        Self {
            position,
            message: message.into(),
            expression: expression.to_string(),
        }
    }

    pub fn curseur(&self) -> String {
        curseur(&self.expression, self.position)
    }
}

/// Rendu deux lignes : le texte puis un `^` sous la colonne fautive.
pub fn curseur(expression: &str, position: usize) -> String {
    format!("{expression}\n{}^", " ".repeat(position))
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum SyntaxError {
    #[error("Mismatched brackets")]
    MismatchedBrackets { position: usize },

    #[error("Unexpected token '{name}' in infix sequence")]
    UnexpectedToken { name: String, position: usize },
}

impl SyntaxError {
    pub fn position(&self) -> usize {
        match self {
            Self::MismatchedBrackets { position } | Self::UnexpectedToken { position, .. } => {
                *position
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum EvalError {
    #[error("Undefined variable: {0}")]
    UndefinedVariable(String),

    #[error("Not enough operands for '{0}'")]
    Arity(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Invalid expression: {restants} value(s) left on the stack")]
    Malformed { restants: usize },

    #[error("Unexpected token '{0}' in postfix sequence")]
    UnexpectedToken(String),
}

/// Erreur d’un pipeline complet (lecture -> postfixe -> évaluation).
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ErreurNoyau {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// Erreur du registre d’expressions.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ErreurCalcul {
    #[error("Expression with ID {0} not found")]
    NotFound(u32),

    #[error("No expression ID left")]
    IdsExhausted,

    #[error(transparent)]
    Noyau(#[from] ErreurNoyau),
}
