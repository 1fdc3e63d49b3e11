// src/noyau/jetons.rs
//
// Modèle de jetons (infixe + postfixe)
// ------------------------------------
// - Operateur : + - * / ^ (priorité fixe)
// - Fonction  : ensemble fermé (sin, cos, tan/tg, ln, log, exp, sqrt, abs), priorité 4
// - Token     : nom tel que lu + genre + valeur numérique + priorité + position source
//
// NOTE:
// - Pas de pointeur de fonction stocké : la fonction est un enum, appliquée par `match`.
// - Égalité = nom + genre + valeur (la priorité et la position ne comptent pas).

use std::fmt;

/// Priorité commune à toutes les fonctions unaires.
pub const PRIORITE_FONCTION: u8 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operateur {
    Plus,
    Moins,
    Fois,
    Divise,
    Puissance, // ^
}

impl Operateur {
    pub fn depuis_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Plus),
            '-' => Some(Self::Moins),
            '*' => Some(Self::Fois),
            '/' => Some(Self::Divise),
            '^' => Some(Self::Puissance),
            _ => None,
        }
    }

    pub fn symbole(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Moins => "-",
            Self::Fois => "*",
            Self::Divise => "/",
            Self::Puissance => "^",
        }
    }

    pub fn priorite(self) -> u8 {
        match self {
            Self::Plus | Self::Moins => 1,
            Self::Fois | Self::Divise => 2,
            Self::Puissance => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Ln,
    Log,
    Exp,
    Sqrt,
    Abs,
}

impl Fonction {
    /// Table des noms reconnus (sensible à la casse). `tg` est un alias de `tan`.
    pub fn depuis_nom(nom: &str) -> Option<Self> {
        match nom {
            "sin" => Some(Self::Sin),
            "cos" => Some(Self::Cos),
            "tan" | "tg" => Some(Self::Tan),
            "ln" => Some(Self::Ln),
            "log" => Some(Self::Log),
            "exp" => Some(Self::Exp),
            "sqrt" => Some(Self::Sqrt),
            "abs" => Some(Self::Abs),
            _ => None,
        }
    }

    pub fn appliquer(self, x: f64) -> f64 {
        match self {
            Self::Sin => x.sin(),
            Self::Cos => x.cos(),
            Self::Tan => x.tan(),
            Self::Ln => x.ln(),
            Self::Log => x.log10(),
            Self::Exp => x.exp(),
            Self::Sqrt => x.sqrt(),
            Self::Abs => x.abs(),
        }
    }
}

/// Genre d’un jeton.
///
/// `UnaryMinusMarker`, `AbsOpen` et `AbsClose` n’existent que pendant la lecture :
/// ils sont éliminés par les passes de réécriture avant de sortir du lexeur.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Constant,
    Variable,
    OpenBracket,
    CloseBracket,
    Function(Fonction),
    Operator(Operateur),
    UnaryMinusMarker,
    AbsOpen,
    AbsClose,
}

impl TokenKind {
    /// Genres admis dans une séquence infixe ou postfixe terminée.
    pub fn est_final(self) -> bool {
        matches!(
            self,
            Self::Constant
                | Self::Variable
                | Self::OpenBracket
                | Self::CloseBracket
                | Self::Function(_)
                | Self::Operator(_)
        )
    }
}

#[derive(Clone, Debug)]
pub struct Token {
    pub name: String,
    pub kind: TokenKind,
    pub value: f64,
    pub priority: u8,
    /// Indice (en caractères) dans le texte source.
    pub position: usize,
}

impl Token {
    pub fn constante(texte: impl Into<String>, valeur: f64, position: usize) -> Self {
        Self {
            name: texte.into(),
            kind: TokenKind::Constant,
            value: valeur,
            priority: 0,
            position,
        }
    }

    pub fn variable(nom: impl Into<String>, position: usize) -> Self {
        Self {
            name: nom.into(),
            kind: TokenKind::Variable,
            value: 0.0,
            priority: 0,
            position,
        }
    }

    /// `nom` garde l’orthographe lue (ex: "tg"), `f` porte la sémantique.
    pub fn fonction(nom: impl Into<String>, f: Fonction, position: usize) -> Self {
        Self {
            name: nom.into(),
            kind: TokenKind::Function(f),
            value: 0.0,
            priority: PRIORITE_FONCTION,
            position,
        }
    }

    pub fn operateur(op: Operateur, position: usize) -> Self {
        Self {
            name: op.symbole().to_string(),
            kind: TokenKind::Operator(op),
            value: 0.0,
            priority: op.priorite(),
            position,
        }
    }

    pub fn ouvrante(c: char, position: usize) -> Self {
        Self::marque(c.to_string(), TokenKind::OpenBracket, position)
    }

    pub fn fermante(c: char, position: usize) -> Self {
        Self::marque(c.to_string(), TokenKind::CloseBracket, position)
    }

    /// Jeton sans charge numérique (crochets, marqueurs internes).
    pub fn marque(nom: impl Into<String>, kind: TokenKind, position: usize) -> Self {
        Self {
            name: nom.into(),
            kind,
            value: 0.0,
            priority: 0,
            position,
        }
    }

    /// Fonction unaire liée (seulement pour les jetons `Function`).
    pub fn unary_fn(&self) -> Option<Fonction> {
        match self.kind {
            TokenKind::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn est_operateur(&self, op: Operateur) -> bool {
        self.kind == TokenKind::Operator(op)
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.kind == other.kind && self.value == other.value
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Format utilitaire (debug/“démarche”) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| t.name.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
