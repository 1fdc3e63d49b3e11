//! Registre d’expressions (couche “Calculatrice”).
//!
//! Identifiants croissants à partir de 1, jamais réutilisés : une création qui échoue
//! à l’analyse consomme quand même son identifiant.

use serde::{Deserialize, Serialize};

use super::erreurs::ErreurCalcul;
use super::expression::Expression;
use super::variables::Variables;

/// Exemples de départ (avec les variables de la première).
pub const EXEMPLES: [&str; 2] = [
    "x + y * (x^2 - 16)",
    "x_1 * sin(y + 7) + y * (-|x_2 - 17| + 23)",
];

#[derive(Clone, Debug)]
pub struct Calculator {
    expressions: Vec<Expression>,
    next_id: u32,
}

impl Default for Calculator {
    fn default() -> Self {
        Self {
            expressions: Vec::new(),
            next_id: 1,
        }
    }
}

/// Forme sauvegardable d’une expression (texte + variables, sans jetons).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExpressionSauvee {
    pub id: u32,
    pub source: String,
    pub variables: Variables,
}

/// Instantané du registre (persistance côté UI).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Instantane {
    pub expressions: Vec<ExpressionSauvee>,
    pub next_id: u32,
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registre pré-rempli avec les deux exemples (x=5, y=10 pour le premier).
    pub fn with_examples() -> Self {
        let mut calc = Self::new();
        for s in EXEMPLES {
            if let Err(e) = calc.create_expression(s) {
                log::warn!("exemple {s:?} refusé : {e}");
            }
        }
        let vars = Variables::from([("x".to_string(), 5.0), ("y".to_string(), 10.0)]);
        if let Err(e) = calc.set_variables(1, vars) {
            log::warn!("{e}");
        }
        calc
    }

    /// Crée et analyse une expression ; retourne son identifiant.
    pub fn create_expression(&mut self, source: &str) -> Result<u32, ErreurCalcul> {
        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or(ErreurCalcul::IdsExhausted)?;

        let mut expr = Expression::new(id, source);
        if let Err(e) = expr.parse() {
            log::warn!("création refusée (ID {id} perdu) : {e}");
            return Err(e.into());
        }

        log::info!("expression {id} créée : {source}");
        self.expressions.push(expr);
        Ok(id)
    }

    pub fn delete_expression(&mut self, id: u32) -> Result<(), ErreurCalcul> {
        let index = self.index_de(id).ok_or(ErreurCalcul::NotFound(id))?;
        self.expressions.remove(index);
        log::info!("expression {id} supprimée");
        Ok(())
    }

    pub fn set_variables(&mut self, id: u32, vars: Variables) -> Result<(), ErreurCalcul> {
        let expr = self.get_mut(id).ok_or(ErreurCalcul::NotFound(id))?;
        expr.set_variables(vars);
        log::info!("variables de l’expression {id} remplacées");
        Ok(())
    }

    pub fn evaluate_expression(&mut self, id: u32) -> Result<f64, ErreurCalcul> {
        let expr = self.get_mut(id).ok_or(ErreurCalcul::NotFound(id))?;
        match expr.evaluate() {
            Ok(v) => {
                log::debug!("expression {id} = {v}");
                Ok(v)
            }
            Err(e) => {
                log::warn!("évaluation de l’expression {id} : {e}");
                Err(e.into())
            }
        }
    }

    pub fn expression_exists(&self, id: u32) -> bool {
        self.index_de(id).is_some()
    }

    pub fn get(&self, id: u32) -> Option<&Expression> {
        self.expressions.iter().find(|e| e.id() == id)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut Expression> {
        self.expressions.iter_mut().find(|e| e.id() == id)
    }

    /// Liste, dans l’ordre de création.
    pub fn expressions(&self) -> &[Expression] {
        &self.expressions
    }

    pub fn len(&self) -> usize {
        self.expressions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }

    fn index_de(&self, id: u32) -> Option<usize> {
        self.expressions.iter().position(|e| e.id() == id)
    }

    /* ------------------------ Persistance ------------------------ */

    pub fn instantane(&self) -> Instantane {
        Instantane {
            expressions: self
                .expressions
                .iter()
                .map(|e| ExpressionSauvee {
                    id: e.id(),
                    source: e.source().to_string(),
                    variables: e.variables().clone(),
                })
                .collect(),
            next_id: self.next_id,
        }
    }

    /// Reconstruit un registre : les textes sont ré-analysés, ceux qui échouent sont écartés.
    /// Une entrée d’identifiant `u32::MAX` est écartée aussi (plus d’identifiant suivant).
    pub fn depuis_instantane(inst: Instantane) -> Self {
        let mut expressions = Vec::with_capacity(inst.expressions.len());
        let mut max_id = 0;

        for sauvee in inst.expressions {
            if sauvee.id == u32::MAX {
                log::warn!("expression {} écartée à la restauration : identifiant hors bornes", sauvee.id);
                continue;
            }
            let mut expr = Expression::new(sauvee.id, sauvee.source);
            if let Err(e) = expr.parse() {
                log::warn!("expression {} écartée à la restauration : {e}", sauvee.id);
                continue;
            }
            expr.set_variables(sauvee.variables);
            max_id = max_id.max(sauvee.id);
            expressions.push(expr);
        }

        Self {
            expressions,
            next_id: inst.next_id.max(max_id + 1),
        }
    }
}
