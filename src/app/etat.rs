//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : contenir le registre d’expressions + les saisies + les derniers résultats,
//! et offrir les actions du menu (créer / supprimer / variables / évaluer) sans
//! logique d’affichage.
//!
//! Contrats :
//! - L’évaluation passe toujours par le registre (noyau::Calculator).
//! - Actions déterministes, sans effet de bord caché.
//! - Défense en profondeur : bornes sur la précision d’affichage.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::noyau::calculatrice::Instantane;
use crate::noyau::erreurs::{curseur, ErreurCalcul, ErreurNoyau};
use crate::noyau::{parse_affectations, Calculator};

/// Précision d’affichage par défaut (chiffres après la virgule).
const CHIFFRES_DEFAUT: usize = 6;

/// Garde-fou : au-delà, un f64 n’a plus rien à dire.
const CHIFFRES_MAX: usize = 15;

/// Ce qui survit à un redémarrage (clé eframe::APP_KEY).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Sauvegarde {
    pub registre: Instantane,
    pub chiffres: usize,
}

pub struct AppCalc {
    // --- registre ---
    pub calc: Calculator,
    pub selection: Option<u32>,

    // --- saisies ---
    pub entree: String,          // nouvelle expression
    pub entree_variables: String, // "x=5, y=10" pour la sélection

    // --- sorties ---
    pub resultats: BTreeMap<u32, String>, // dernier résultat (ou erreur) par ID
    pub erreur: String,
    pub curseur: String, // rendu "^" sous la colonne fautive (lecture / syntaxe)
    pub message: String,

    // --- paramètres ---
    pub chiffres: usize,

    // --- UX ---
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            calc: Calculator::with_examples(),
            selection: Some(1),
            entree: String::new(),
            entree_variables: String::new(),
            resultats: BTreeMap::new(),
            erreur: String::new(),
            curseur: String::new(),
            message: String::new(),
            chiffres: CHIFFRES_DEFAUT,
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppCalc {
    /// Restaure la dernière session si elle existe, sinon registre d’exemples.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let Some(sauvegarde) = cc
            .storage
            .and_then(|s| eframe::get_value::<Sauvegarde>(s, eframe::APP_KEY))
        else {
            return Self::default();
        };

        log::info!(
            "session restaurée : {} expression(s)",
            sauvegarde.registre.expressions.len()
        );
        let calc = Calculator::depuis_instantane(sauvegarde.registre);
        let selection = calc.expressions().first().map(|e| e.id());
        let mut app = Self {
            calc,
            selection,
            ..Self::default()
        };
        app.set_chiffres(sauvegarde.chiffres);
        app
    }

    pub fn sauvegarde(&self) -> Sauvegarde {
        Sauvegarde {
            registre: self.calc.instantane(),
            chiffres: self.chiffres,
        }
    }

    /* ------------------------ Actions “menu” ------------------------ */

    /// Créer : analyse l’entrée ; en cas de succès, sélectionne la nouvelle expression.
    pub fn creer(&mut self) {
        let s = self.entree.trim().to_string();
        if s.is_empty() {
            self.set_erreur("Entrée vide");
            return;
        }

        match self.calc.create_expression(&s) {
            Ok(id) => {
                self.clear_erreur();
                self.message = format!("Expression créée avec l’ID {id}");
                self.selection = Some(id);
                self.entree.clear();
            }
            Err(e) => self.set_erreur_calcul(&e),
        }
        self.focus_entree = true;
    }

    pub fn supprimer(&mut self, id: u32) {
        match self.calc.delete_expression(id) {
            Ok(()) => {
                self.clear_erreur();
                self.resultats.remove(&id);
                self.message = format!("Expression {id} supprimée");
                if self.selection == Some(id) {
                    self.selection = None;
                }
            }
            Err(e) => self.set_erreur_calcul(&e),
        }
    }

    /// Variables : remplace toute la table de la sélection par la saisie.
    pub fn appliquer_variables(&mut self) {
        let Some(id) = self.selection else {
            self.set_erreur("Aucune expression sélectionnée");
            return;
        };

        let saisie = parse_affectations(&self.entree_variables);
        if !saisie.rejets.is_empty() {
            self.set_erreur(format!("Valeurs invalides : {}", saisie.rejets.join(", ")));
            return;
        }

        match self.calc.set_variables(id, saisie.variables) {
            Ok(()) => {
                self.clear_erreur();
                self.resultats.remove(&id);
                self.message = format!("Variables définies pour l’expression {id}");
            }
            Err(e) => self.set_erreur_calcul(&e),
        }
    }

    pub fn evaluer(&mut self, id: u32) {
        let texte = match self.calc.evaluate_expression(id) {
            Ok(v) => {
                self.clear_erreur();
                format!("{:.*}", self.chiffres, v)
            }
            Err(e) => {
                self.set_erreur_calcul(&e);
                if let ErreurCalcul::Noyau(ErreurNoyau::Syntax(syn)) = &e {
                    if let Some(expr) = self.calc.get(id) {
                        self.curseur = curseur(expr.source(), syn.position());
                    }
                }
                format!("erreur : {e}")
            }
        };
        self.resultats.insert(id, texte);
    }

    pub fn selectionner(&mut self, id: u32) {
        self.selection = Some(id);
        self.entree_variables = self
            .calc
            .get(id)
            .map(|e| {
                e.variables()
                    .iter()
                    .map(|(k, v)| format!("{k}={v}"))
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default();
    }

    /// AC : registre vide (les ID continuent de croître).
    pub fn tout_supprimer(&mut self) {
        let ids: Vec<u32> = self.calc.expressions().iter().map(|e| e.id()).collect();
        for id in ids {
            if let Err(e) = self.calc.delete_expression(id) {
                log::warn!("{e}");
            }
        }
        self.resultats.clear();
        self.selection = None;
        self.clear_erreur();
        self.message.clear();
    }

    /* ------------------------ Utilitaires ------------------------ */

    /// Garde-fou : limite la précision d’affichage.
    pub fn set_chiffres(&mut self, chiffres: usize) {
        self.chiffres = chiffres.min(CHIFFRES_MAX);
    }

    pub fn clear_erreur(&mut self) {
        self.erreur.clear();
        self.curseur.clear();
    }

    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.curseur.clear();
        self.message.clear();
        self.focus_entree = true;
    }

    /// Erreur du registre ; pour une erreur de lecture on garde aussi le curseur.
    fn set_erreur_calcul(&mut self, e: &ErreurCalcul) {
        self.set_erreur(e.to_string());
        if let ErreurCalcul::Noyau(ErreurNoyau::Lex(lex)) = e {
            self.curseur = lex.curseur();
        }
    }
}
