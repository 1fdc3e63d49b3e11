//! Noyau — évaluation (pipeline réel)
//!
//! tokenize -> to_postfix -> evaluate (+ variables)
//!
//! L’évaluateur est une simple pile de f64 ; il ne connaît que la séquence postfixe.

use super::erreurs::{ErreurNoyau, EvalError};
use super::jetons::{Operateur, Token, TokenKind};
use super::lexeur::tokenize;
use super::rpn::to_postfix;
use super::variables::Variables;

/// Évalue une séquence postfixe avec les variables données.
pub fn evaluate(postfix: &[Token], vars: &Variables) -> Result<f64, EvalError> {
    let mut pile: Vec<f64> = Vec::with_capacity(postfix.len());

    for tok in postfix {
        match tok.kind {
            TokenKind::Constant => pile.push(tok.value),

            TokenKind::Variable => {
                let v = vars
                    .get(&tok.name)
                    .copied()
                    .ok_or_else(|| EvalError::UndefinedVariable(tok.name.clone()))?;
                pile.push(v);
            }

            TokenKind::Function(f) => {
                let x = pile.pop().ok_or_else(|| EvalError::Arity(tok.name.clone()))?;
                pile.push(f.appliquer(x));
            }

            TokenKind::Operator(op) => {
                // droite puis gauche : l’ordre compte pour '-' et '/'
                let (Some(droite), Some(gauche)) = (pile.pop(), pile.pop()) else {
                    return Err(EvalError::Arity(tok.name.clone()));
                };
                pile.push(appliquer_operateur(op, gauche, droite)?);
            }

            _ => return Err(EvalError::UnexpectedToken(tok.name.clone())),
        }
    }

    match pile.as_slice() {
        [v] => Ok(*v),
        _ => Err(EvalError::Malformed {
            restants: pile.len(),
        }),
    }
}

fn appliquer_operateur(op: Operateur, gauche: f64, droite: f64) -> Result<f64, EvalError> {
    Ok(match op {
        Operateur::Plus => gauche + droite,
        Operateur::Moins => gauche - droite,
        Operateur::Fois => gauche * droite,
        Operateur::Divise => {
            if droite == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            gauche / droite
        }
        Operateur::Puissance => gauche.powf(droite),
    })
}

/// API publique : texte -> séquence infixe.
pub fn parse(source: &str) -> Result<Vec<Token>, ErreurNoyau> {
    Ok(tokenize(source)?)
}

/// API publique : texte -> valeur, en une passe (sans cache).
pub fn evaluate_source(source: &str, vars: &Variables) -> Result<f64, ErreurNoyau> {
    let infixe = tokenize(source)?;
    let postfixe = to_postfix(&infixe)?;
    Ok(evaluate(&postfixe, vars)?)
}
