// src/noyau/variables.rs
//
// Liaisons de variables : nom -> valeur
// -------------------------------------
// - Variables : table ordonnée (affichage stable)
// - parse_affectations : "x = 5, y=10" -> table (+ rejets)

use std::collections::BTreeMap;

pub type Variables = BTreeMap<String, f64>;

/// Résultat d’une saisie d’affectations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Affectations {
    pub variables: Variables,
    /// Entrées "nom=valeur" dont la valeur n’est pas un nombre.
    pub rejets: Vec<String>,
}

/// Lit des affectations séparées par des virgules.
///
/// - espaces autour du nom et de la valeur ignorés
/// - entrée sans '=' : ignorée
/// - nom vide ou valeur non numérique : rejetée (listée dans `rejets`)
/// - nom répété : la dernière valeur gagne
pub fn parse_affectations(texte: &str) -> Affectations {
    let mut out = Affectations::default();

    for paire in texte.split(',') {
        let Some((nom, valeur)) = paire.split_once('=') else {
            continue;
        };
        let nom = nom.trim();
        if nom.is_empty() {
            log::warn!("affectation sans nom : {:?}", paire.trim());
            out.rejets.push(paire.trim().to_string());
            continue;
        }
        match valeur.trim().parse::<f64>() {
            Ok(v) => {
                out.variables.insert(nom.to_string(), v);
            }
            Err(_) => {
                log::warn!("valeur invalide pour la variable {nom:?}");
                out.rejets.push(paire.trim().to_string());
            }
        }
    }

    out
}

/// Format utilitaire : "x = 5, y = 10" (ou "non définies").
pub fn format_variables(vars: &Variables) -> String {
    if vars.is_empty() {
        return "non définies".to_string();
    }
    vars.iter()
        .map(|(k, v)| format!("{k} = {v}"))
        .collect::<Vec<_>>()
        .join(", ")
}
