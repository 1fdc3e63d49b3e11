//! Expression : texte source + état d’analyse + variables.
//!
//! Machine à états : `Fresh -> Parsed -> PostfixBuilt`.
//! - `set_expression` revient à `Fresh` (séquences vidées)
//! - `parse` relit toujours le texte
//! - `evaluate` analyse et construit la postfixe au besoin (cache), puis évalue
//!
//! Une erreur d’évaluation ne touche pas à l’état : on corrige les variables et on réévalue.

use super::erreurs::ErreurNoyau;
use super::eval::evaluate;
use super::jetons::Token;
use super::lexeur::tokenize;
use super::rpn::to_postfix;
use super::variables::Variables;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Etat {
    Fresh,
    Parsed,
    PostfixBuilt,
}

#[derive(Clone, Debug)]
pub struct Expression {
    id: u32,
    source: String,
    etat: Etat,
    infix: Vec<Token>,
    postfix: Vec<Token>,
    variables: Variables,
}

impl Expression {
    pub fn new(id: u32, source: impl Into<String>) -> Self {
        Self {
            id,
            source: source.into(),
            etat: Etat::Fresh,
            infix: Vec::new(),
            postfix: Vec::new(),
            variables: Variables::new(),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn etat(&self) -> Etat {
        self.etat
    }

    pub fn is_parsed(&self) -> bool {
        self.etat != Etat::Fresh
    }

    pub fn is_postfix_built(&self) -> bool {
        self.etat == Etat::PostfixBuilt
    }

    pub fn infix(&self) -> &[Token] {
        &self.infix
    }

    pub fn postfix(&self) -> &[Token] {
        &self.postfix
    }

    /// Remplace le texte : retour à `Fresh`, séquences vidées. Les variables restent.
    pub fn set_expression(&mut self, source: impl Into<String>) {
        self.source = source.into();
        self.etat = Etat::Fresh;
        self.infix.clear();
        self.postfix.clear();
    }

    /// Relit le texte source. En cas d’échec, l’état précédent est conservé.
    pub fn parse(&mut self) -> Result<(), ErreurNoyau> {
        self.infix = tokenize(&self.source)?;
        self.postfix.clear();
        self.etat = Etat::Parsed;
        Ok(())
    }

    /// Construit la séquence postfixe (analyse d’abord si besoin).
    pub fn build_postfix(&mut self) -> Result<(), ErreurNoyau> {
        if !self.is_parsed() {
            self.parse()?;
        }
        self.postfix = to_postfix(&self.infix)?;
        self.etat = Etat::PostfixBuilt;
        Ok(())
    }

    pub fn evaluate(&mut self) -> Result<f64, ErreurNoyau> {
        if !self.is_postfix_built() {
            self.build_postfix()?;
        }
        Ok(evaluate(&self.postfix, &self.variables)?)
    }

    pub fn set_variable(&mut self, nom: impl Into<String>, valeur: f64) {
        self.variables.insert(nom.into(), valeur);
    }

    /// Remplace toute la table (pas de fusion).
    pub fn set_variables(&mut self, vars: Variables) {
        self.variables = vars;
    }

    pub fn variable(&self, nom: &str) -> Option<f64> {
        self.variables.get(nom).copied()
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }
}
