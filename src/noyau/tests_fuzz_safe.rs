//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe) pour le bruit de caractères
//! - proptest pour les expressions bien formées (crochets équilibrés)
//! - budget temps global
//! - invariant clé : jamais de panique, seulement des erreurs typées

use std::time::{Duration, Instant};

use proptest::prelude::*;

use super::erreurs::{ErreurNoyau, EvalError};
use super::jetons::TokenKind;
use super::lexeur::tokenize;
use super::rpn::to_postfix;
use super::variables::Variables;
use super::{evaluate, evaluate_source};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

fn variables_fuzz() -> Variables {
    [("x", 1.5), ("y", -2.0), ("x_2", 17.0)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

/* ------------------------ Bruit de caractères ------------------------ */

const ALPHABET: &[&str] = &[
    "1", "2", "0", ".", "3.5", "x", "y", "x_2", "z", "+", "-", "*", "/", "^", "(", ")", "[",
    "]", "{", "}", "|", " ", "sin", "cos", "tg", "ln", "log", "exp", "sqrt", "abs", "#",
];

fn gen_bruit(rng: &mut Rng) -> String {
    let n = 1 + rng.pick(24);
    (0..n)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

#[test]
fn fuzz_bruit_sans_panique() {
    let start = Instant::now();
    let vars = variables_fuzz();
    let mut rng = Rng::new(0x5EED_CAFE);

    for _ in 0..5000 {
        let s = gen_bruit(&mut rng);

        match tokenize(&s) {
            Err(e) => {
                // position toujours dans le texte
                assert!(e.position < s.chars().count(), "s={s:?} e={e:?}");
            }
            Ok(infixe) => {
                assert!(infixe.iter().all(|t| t.kind.est_final()), "s={s:?}");
                if let Ok(postfixe) = to_postfix(&infixe) {
                    // l’évaluation peut échouer, mais proprement
                    let _ = evaluate(&postfixe, &vars);
                }
            }
        }

        budget(start, Duration::from_secs(5));
    }
}

#[test]
fn fuzz_determinisme() {
    let vars = variables_fuzz();
    let mut a = Rng::new(42);
    let mut b = Rng::new(42);

    for _ in 0..500 {
        let sa = gen_bruit(&mut a);
        let sb = gen_bruit(&mut b);
        assert_eq!(sa, sb);

        let ra = evaluate_source(&sa, &vars);
        let rb = evaluate_source(&sb, &vars);
        match (ra, rb) {
            (Ok(x), Ok(y)) => assert!(x == y || (x.is_nan() && y.is_nan()), "s={sa:?}"),
            (ra, rb) => assert_eq!(ra.is_ok(), rb.is_ok(), "s={sa:?}"),
        }
    }
}

/* ------------------------ Propriétés (proptest) ------------------------ */

/// Expressions bien formées, sans barres |..| (leur imbrication est volontairement fragile).
fn expression_bien_formee() -> impl Strategy<Value = String> {
    let feuille = prop_oneof![
        (0u32..100).prop_map(|n| n.to_string()),
        (0u32..100, 1u32..100).prop_map(|(a, b)| format!("{a}.{b}")),
        prop::sample::select(vec!["x", "y", "x_2"]).prop_map(String::from),
    ];

    feuille.prop_recursive(4, 48, 2, |inner| {
        prop_oneof![
            (
                inner.clone(),
                prop::sample::select(vec!["+", "-", "*", "/", "^"]),
                inner.clone()
            )
                .prop_map(|(a, op, b)| format!("{a} {op} {b}")),
            inner.clone().prop_map(|a| format!("({a})")),
            inner.clone().prop_map(|a| format!("[{a}]")),
            inner.clone().prop_map(|a| format!("(-{a})")),
            (
                prop::sample::select(vec!["sin", "cos", "tg", "exp", "sqrt", "abs", "ln"]),
                inner
            )
                .prop_map(|(f, a)| format!("{f}({a})")),
        ]
    })
}

proptest! {
    #[test]
    fn postfixe_termine_sans_crochets(s in expression_bien_formee()) {
        let infixe = tokenize(&s).unwrap();
        let postfixe = to_postfix(&infixe).unwrap();

        let crochets = infixe
            .iter()
            .filter(|t| matches!(t.kind, TokenKind::OpenBracket | TokenKind::CloseBracket))
            .count();
        prop_assert_eq!(postfixe.len(), infixe.len() - crochets);
        prop_assert!(postfixe.iter().all(|t| matches!(
            t.kind,
            TokenKind::Constant | TokenKind::Variable | TokenKind::Function(_) | TokenKind::Operator(_)
        )));
    }

    #[test]
    fn evaluation_bien_formee(s in expression_bien_formee()) {
        // toutes les variables liées : seule la division par zéro peut échouer
        match evaluate_source(&s, &variables_fuzz()) {
            Ok(_) | Err(ErreurNoyau::Eval(EvalError::DivisionByZero)) => {}
            Err(e) => prop_assert!(false, "s={:?} err={}", s, e),
        }
    }

    #[test]
    fn analyse_idempotente(s in expression_bien_formee()) {
        prop_assert_eq!(tokenize(&s).unwrap(), tokenize(&s).unwrap());
    }
}
