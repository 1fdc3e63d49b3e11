//! Tests scientifiques (campagne) : propriétés du pipeline de bout en bout.
//!
//! But : épingler le comportement observable (y compris les choix non standard).
//! - priorités + associativité gauche de '^'
//! - variables, fonctions, valeur absolue + moins unaire
//! - erreurs typées (crochets, division par zéro, variable absente)
//! - budget temps global sur les entrées longues

use std::time::{Duration, Instant};

use super::erreurs::{ErreurNoyau, EvalError, SyntaxError};
use super::expression::Expression;
use super::jetons::TokenKind;
use super::lexeur::tokenize;
use super::rpn::to_postfix;
use super::variables::Variables;
use super::{evaluate, evaluate_source};

const EPS: f64 = 1e-9;

fn vars(paires: &[(&str, f64)]) -> Variables {
    paires.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

fn eval_ok(expr: &str, v: &Variables) -> f64 {
    evaluate_source(expr, v).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_proche(expr: &str, v: &Variables, attendu: f64) {
    let obtenu = eval_ok(expr, v);
    assert!(
        (obtenu - attendu).abs() < EPS,
        "expr={expr:?} obtenu={obtenu} attendu={attendu}"
    );
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Propriétés de base ------------------------ */

#[test]
fn sci_priorites() {
    let v = Variables::new();
    assert_eq!(eval_ok("3 + 4 * 2", &v), 11.0);
    assert_eq!(eval_ok("(3 + 4) * 2", &v), 14.0);
    assert_eq!(eval_ok("2 * 3 ^ 2", &v), 18.0);
    assert_eq!(eval_ok("10 - 2 - 3", &v), 5.0);
    assert_eq!(eval_ok("64 / 4 / 2", &v), 8.0);
}

#[test]
fn sci_puissance_gauche_a_droite() {
    // (2^3)^2 = 64, et non 2^(3^2) = 512
    assert_eq!(eval_ok("2 ^ 3 ^ 2", &Variables::new()), 64.0);
}

#[test]
fn sci_variables() {
    assert_eq!(eval_ok("x + y * 2", &vars(&[("x", 5.0), ("y", 3.0)])), 11.0);
    assert_eq!(
        eval_ok("x + y * (x^2 - 16)", &vars(&[("x", 5.0), ("y", 10.0)])),
        95.0
    );
    assert_eq!(eval_ok("x^2 + y^2", &vars(&[("x", 3.0), ("y", 4.0)])), 25.0);
}

#[test]
fn sci_fonctions() {
    let v = Variables::new();
    assert_proche("sin(0) + cos(0)", &v, 1.0);
    assert_proche("sqrt(2) ^ 2", &v, 2.0);
    assert_proche("tg(0) + exp(0) + ln(1)", &v, 1.0);
    assert_proche("[2 + {3 * (1 + 1)}]", &v, 8.0);
}

#[test]
fn sci_abs_et_moins_unaire() {
    let v = vars(&[("x", 5.0), ("y", 10.0), ("x_1", 2.0), ("x_2", 20.0)]);
    // |20 - 17| = 3 ; -3 + 23 = 20 ; 10 * 20 = 200
    assert_eq!(eval_ok("x + y * (-|x_2 - 17| + 23)", &v), 205.0);
    assert_proche(
        "x_1 * sin(y + 7) + y * (-|x_2 - 17| + 23)",
        &v,
        2.0 * 17.0_f64.sin() + 200.0,
    );
    assert_eq!(eval_ok("|x - y| + |3 - x_2|", &v), 22.0);
    assert_eq!(eval_ok("-x", &v), -5.0);
}

#[test]
fn sci_moins_unaire_apres_operateur() {
    // "2 * -x" => "2 * 0 - x" => (2 * 0) - x
    assert_eq!(eval_ok("2 * -x", &vars(&[("x", 5.0)])), -5.0);
}

#[test]
fn sci_moins_juste_apres_barre_ouvrante() {
    // '-' après '|' n’est pas unaire : "abs ( - 3 )" manque d’opérande
    assert_eq!(
        evaluate_source("|-3|", &Variables::new()),
        Err(ErreurNoyau::Eval(EvalError::Arity("-".into())))
    );
}

#[test]
fn sci_moins_unaire_est_une_soustraction() {
    // "-2 ^ 2" => "0 - 2 ^ 2" => -(2^2)
    assert_eq!(eval_ok("-2 ^ 2", &Variables::new()), -4.0);
}

/* ------------------------ Erreurs ------------------------ */

#[test]
fn sci_division_par_zero() {
    assert_eq!(
        evaluate_source("5 / 0", &Variables::new()),
        Err(ErreurNoyau::Eval(EvalError::DivisionByZero))
    );
}

#[test]
fn sci_crochets_non_apparies() {
    let v = vars(&[("a", 1.0), ("b", 2.0)]);
    assert_eq!(
        evaluate_source("(a + b", &v),
        Err(ErreurNoyau::Syntax(SyntaxError::MismatchedBrackets { position: 0 }))
    );
    assert_eq!(
        evaluate_source(")", &v),
        Err(ErreurNoyau::Syntax(SyntaxError::MismatchedBrackets { position: 0 }))
    );
}

#[test]
fn sci_variable_absente() {
    assert_eq!(
        evaluate_source("x + 1", &Variables::new()),
        Err(ErreurNoyau::Eval(EvalError::UndefinedVariable("x".into())))
    );
}

#[test]
fn sci_erreur_de_lecture_positionnee() {
    match evaluate_source("sin(x) + 3.1.4", &Variables::new()) {
        Err(ErreurNoyau::Lex(e)) => {
            assert_eq!(e.position, 12);
            assert_eq!(e.curseur(), "sin(x) + 3.1.4\n            ^");
        }
        autre => panic!("attendu LexError, obtenu {autre:?}"),
    }
}

/* ------------------------ Invariants de séquence ------------------------ */

#[test]
fn sci_postfixe_sans_crochets() {
    for s in [
        "3 + 4 * 2",
        "x_1 * sin(y + 7) + y * (-|x_2 - 17| + 23)",
        "[a] * {b} - (c)",
        "sqrt(sqrt(sqrt(256)))",
    ] {
        let infixe = tokenize(s).unwrap();
        let postfixe = to_postfix(&infixe).unwrap();
        let crochets = infixe
            .iter()
            .filter(|t| matches!(t.kind, TokenKind::OpenBracket | TokenKind::CloseBracket))
            .count();
        assert_eq!(postfixe.len(), infixe.len() - crochets, "s={s:?}");
        assert!(postfixe.iter().all(|t| matches!(
            t.kind,
            TokenKind::Constant | TokenKind::Variable | TokenKind::Function(_) | TokenKind::Operator(_)
        )));
    }
}

#[test]
fn sci_idempotence_de_l_analyse() {
    let mut e = Expression::new(1, "x + y * (-|x_2 - 17| + 23)");
    e.parse().unwrap();
    let a = e.infix().to_vec();
    e.parse().unwrap();
    assert_eq!(e.infix(), a.as_slice());
}

#[test]
fn sci_postfixe_reutilisable() {
    // une même postfixe, plusieurs jeux de variables
    let postfixe = to_postfix(&tokenize("x * x - 1").unwrap()).unwrap();
    for x in [-3.0, 0.0, 0.5, 12.0] {
        let v = vars(&[("x", x)]);
        assert_eq!(evaluate(&postfixe, &v), Ok(x * x - 1.0));
    }
}

/* ------------------------ Stress borné ------------------------ */

#[test]
fn sci_longue_somme() {
    let start = Instant::now();
    let n = 2000;
    let s = vec!["1"; n].join(" + ");
    assert_eq!(eval_ok(&s, &Variables::new()), n as f64);
    budget(start, Duration::from_secs(2));
}

#[test]
fn sci_parentheses_profondes() {
    let start = Instant::now();
    let prof = 500;
    let s = format!("{}x{}", "(".repeat(prof), " + 1)".repeat(prof));
    assert_eq!(eval_ok(&s, &vars(&[("x", 0.0)])), prof as f64);
    budget(start, Duration::from_secs(2));
}
