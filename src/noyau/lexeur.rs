// src/noyau/lexeur.rs
//
// Lecture : texte -> séquence infixe de jetons
// --------------------------------------------
// Balayage gauche -> droite (espaces ignorés), puis DEUX passes de réécriture,
// dans cet ordre (la seconde suppose la première faite) :
//   1) moins unaire : "-x" => "0 - x"
//   2) barres |..|  : "|e|" => "abs ( e )"
//
// Supporte:
// - nombres décimaux (12, 3.14, .5, 5.) : un seul '.'
// - identifiants [a-zA-Z_][a-zA-Z0-9_]* ; fonctions connues si nom exact (≥ 2 lettres)
// - opérateurs + - * / ^
// - crochets ( [ { et ) ] } (le style n’est pas apparié)
// - | : ouvre ou ferme selon le jeton précédent (un seul jeton de recul)

use super::erreurs::LexError;
use super::jetons::{Fonction, Operateur, Token, TokenKind};

/// Tokenize une chaîne en séquence infixe (sans genre interne résiduel).
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    log::debug!("lecture de {source:?}");

    let brut = balayer(source)?;
    let jetons = remplacer_abs(normaliser_moins_unaire(brut));

    log::debug!("lecture terminée : {} jetons", jetons.len());
    Ok(jetons)
}

fn est_lettre(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn est_car_variable(c: char) -> bool {
    est_lettre(c) || c.is_ascii_digit()
}

/* ------------------------ Balayage brut ------------------------ */

fn balayer(source: &str) -> Result<Vec<Token>, LexError> {
    let chars: Vec<char> = source.chars().collect();
    let mut out: Vec<Token> = Vec::new();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Nombre : chiffre, ou '.' suivi d’un chiffre
        let debut_nombre = c.is_ascii_digit()
            || (c == '.' && chars.get(i + 1).is_some_and(|d| d.is_ascii_digit()));
        if debut_nombre {
            i = lire_nombre(source, &chars, i, &mut out)?;
            continue;
        }

        if est_lettre(c) {
            i = lire_identifiant(source, &chars, i, &mut out)?;
            continue;
        }

        if let Some(op) = Operateur::depuis_char(c) {
            out.push(Token::operateur(op, i));
            i += 1;
            continue;
        }

        match c {
            '(' | '[' | '{' => out.push(Token::ouvrante(c, i)),
            ')' | ']' | '}' => out.push(Token::fermante(c, i)),
            '|' => {
                // ouvre si en tête, ou après opérateur / crochet ouvrant / fonction
                let ouvre = match out.last() {
                    None => true,
                    Some(t) => matches!(
                        t.kind,
                        TokenKind::Operator(_) | TokenKind::OpenBracket | TokenKind::Function(_)
                    ),
                };
                let kind = if ouvre {
                    TokenKind::AbsOpen
                } else {
                    TokenKind::AbsClose
                };
                out.push(Token::marque("|", kind, i));
            }
            _ => {
                return Err(LexError::new(
                    format!("Unexpected character: {c}"),
                    i,
                    source,
                ))
            }
        }
        i += 1;
    }

    Ok(out)
}

/// Lit un littéral numérique à partir de `debut`; retourne l’indice suivant.
fn lire_nombre(
    source: &str,
    chars: &[char],
    debut: usize,
    out: &mut Vec<Token>,
) -> Result<usize, LexError> {
    let mut i = debut;
    let mut point_vu = false;

    while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
        if chars[i] == '.' {
            if point_vu {
                return Err(LexError::new(
                    "Invalid number format: multiple decimal points",
                    i,
                    source,
                ));
            }
            point_vu = true;
        }
        i += 1;
    }

    let texte: String = chars[debut..i].iter().collect();
    let valeur = texte.parse::<f64>().map_err(|_| {
        LexError::new(format!("Invalid number format: {texte}"), debut, source)
    })?;

    out.push(Token::constante(texte, valeur, debut));
    Ok(i)
}

/// Fonction connue, sinon variable.
///
/// Deux lettres de suite : on lit la plus longue suite de lettres et on la cherche
/// dans la table. Si absente, on relit depuis `debut` comme variable (chiffres admis).
fn lire_identifiant(
    source: &str,
    chars: &[char],
    debut: usize,
    out: &mut Vec<Token>,
) -> Result<usize, LexError> {
    if chars.get(debut + 1).is_some_and(|&c| est_lettre(c)) {
        let mut i = debut;
        while i < chars.len() && est_lettre(chars[i]) {
            i += 1;
        }
        let mot: String = chars[debut..i].iter().collect();
        if let Some(f) = Fonction::depuis_nom(&mot) {
            out.push(Token::fonction(mot, f, debut));
            return Ok(i);
        }
    }

    let mut i = debut;
    while i < chars.len() && est_car_variable(chars[i]) {
        i += 1;
    }
    if i == debut {
        return Err(LexError::new("Empty variable name", i, source));
    }

    let nom: String = chars[debut..i].iter().collect();
    out.push(Token::variable(nom, debut));
    Ok(i)
}

/* ------------------------ Passe 1 : moins unaire ------------------------ */

/// Un '-' en tête, ou juste après un opérateur / crochet ouvrant, devient "0 -".
fn normaliser_moins_unaire(jetons: Vec<Token>) -> Vec<Token> {
    developper_moins_unaire(marquer_moins_unaire(jetons))
}

fn marquer_moins_unaire(jetons: Vec<Token>) -> Vec<Token> {
    let mut precedent: Option<TokenKind> = None;
    let mut out = Vec::with_capacity(jetons.len());

    for t in jetons {
        let unaire = t.est_operateur(Operateur::Moins)
            && precedent.map_or(true, |k| {
                matches!(
                    k,
                    TokenKind::Operator(_) | TokenKind::OpenBracket | TokenKind::UnaryMinusMarker
                )
            });

        let t = if unaire {
            Token::marque("-", TokenKind::UnaryMinusMarker, t.position)
        } else {
            t
        };
        precedent = Some(t.kind);
        out.push(t);
    }

    out
}

fn developper_moins_unaire(jetons: Vec<Token>) -> Vec<Token> {
    let mut out = Vec::with_capacity(jetons.len());
    for t in jetons {
        if t.kind == TokenKind::UnaryMinusMarker {
            out.push(Token::constante("0", 0.0, t.position));
            out.push(Token::operateur(Operateur::Moins, t.position));
        } else {
            out.push(t);
        }
    }
    out
}

/* ------------------------ Passe 2 : barres de valeur absolue ------------------------ */

/// `AbsOpen` => "abs (" ; `AbsClose` => ")".
///
/// Profondeur : +1 à l’ouverture, -1 (plancher 0) à la fermeture. Une fermeture à
/// profondeur p > 1 émet p parenthèses (les groupes imbriqués se ferment ensemble).
/// Une fermeture à profondeur 0 n’émet rien.
fn remplacer_abs(jetons: Vec<Token>) -> Vec<Token> {
    let mut out = Vec::with_capacity(jetons.len());
    let mut profondeur: usize = 0;

    for t in jetons {
        match t.kind {
            TokenKind::AbsOpen => {
                out.push(Token::fonction("abs", Fonction::Abs, t.position));
                out.push(Token::ouvrante('(', t.position));
                profondeur += 1;
            }
            TokenKind::AbsClose => {
                for _ in 0..profondeur {
                    out.push(Token::fermante(')', t.position));
                }
                profondeur = profondeur.saturating_sub(1);
            }
            _ => out.push(t),
        }
    }

    out
}
