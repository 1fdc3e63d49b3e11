// src/noyau/rpn.rs
//
// Shunting-yard : séquence infixe -> séquence postfixe (RPN)
// ----------------------------------------------------------
// Règles:
// - Constant / Variable : sortie directe
// - Function / OpenBracket : empilés
// - CloseBracket : dépile jusqu’au crochet ouvrant (n’importe quel style), le jette,
//   puis sort la fonction du sommet s’il y en a une (elle s’attache à son argument)
// - Operator(p) : dépile tant que le sommet est Operator/Function de priorité >= p
//
// NOTE:
// - Associativité GAUCHE pour toutes les priorités égales, y compris '^' :
//   "2 ^ 3 ^ 2" = (2 ^ 3) ^ 2. C’est le comportement voulu, pas un oubli.

use super::erreurs::SyntaxError;
use super::jetons::{Token, TokenKind};

/// Convertit une séquence infixe en postfixe.
///
/// Exemple:
///   infixe:   [sin, (, x, +, 1, )]
///   postfixe: [x, 1, +, sin]
pub fn to_postfix(infix: &[Token]) -> Result<Vec<Token>, SyntaxError> {
    let mut out: Vec<Token> = Vec::with_capacity(infix.len());
    let mut ops: Vec<Token> = Vec::new();

    for tok in infix {
        match tok.kind {
            TokenKind::Constant | TokenKind::Variable => out.push(tok.clone()),

            TokenKind::Function(_) | TokenKind::OpenBracket => ops.push(tok.clone()),

            TokenKind::CloseBracket => {
                // dépile jusqu’au crochet ouvrant
                loop {
                    match ops.pop() {
                        None => {
                            return Err(SyntaxError::MismatchedBrackets {
                                position: tok.position,
                            })
                        }
                        Some(top) if top.kind == TokenKind::OpenBracket => break,
                        Some(top) => out.push(top),
                    }
                }

                // fonction au sommet : elle sort avec son argument
                if let Some(f) = depiler_si(&mut ops, |t| matches!(t.kind, TokenKind::Function(_))) {
                    out.push(f);
                }
            }

            TokenKind::Operator(_) => {
                while let Some(top) = depiler_si(&mut ops, |top| {
                    matches!(top.kind, TokenKind::Operator(_) | TokenKind::Function(_))
                        && top.priority >= tok.priority
                }) {
                    out.push(top);
                }
                ops.push(tok.clone());
            }

            TokenKind::UnaryMinusMarker | TokenKind::AbsOpen | TokenKind::AbsClose => {
                return Err(SyntaxError::UnexpectedToken {
                    name: tok.name.clone(),
                    position: tok.position,
                })
            }
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if op.kind == TokenKind::OpenBracket {
            return Err(SyntaxError::MismatchedBrackets {
                position: op.position,
            });
        }
        out.push(op);
    }

    log::debug!("postfixe : {} jetons", out.len());
    Ok(out)
}

/// Dépile le sommet seulement s’il vérifie `cond`.
fn depiler_si(ops: &mut Vec<Token>, cond: impl Fn(&Token) -> bool) -> Option<Token> {
    if ops.last().is_some_and(cond) {
        ops.pop()
    } else {
        None
    }
}
