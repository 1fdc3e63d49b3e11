// src/lib.rs
//
// Calculatrice RPN — bibliothèque
// -------------------------------
// - noyau : lecture, postfixe, évaluation, registre d’expressions (sans UI)
// - app   : état + vue egui, consommés par main.rs (natif + wasm)

pub mod app;
pub mod noyau;

pub use app::AppCalc;
pub use noyau::{
    evaluate, evaluate_source, parse, parse_affectations, Calculator, ErreurCalcul, ErreurNoyau,
    Expression, Variables,
};
