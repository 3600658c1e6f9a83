//! Tests scientifiques (campagne) : propriétés attendues du noyau.
//!
//! - fractions : forme réduite, dénominateur positif, aller-retour texte
//! - expressions : précédences, racines, constantes
//! - systèmes : classification UNIQUE / INFINIE / INCOHÉRENTE, homogène
//! - algèbre : det, inverse, Cramer cohérents entre eux

use std::time::{Duration, Instant};

use num_bigint::BigInt;
use num_traits::{One, Signed};
use pretty_assertions::assert_eq;

use super::algebre::{cramer, determinant, inverse, produit};
use super::fraction::pgcd;
use super::{
    analyser_homogene, evaluer_expression, lire_fraction, lire_matrice_augmentee, parser_systeme,
    resoudre_gauss, resoudre_gauss_jordan, resoudre_systeme, Classification, Erreur, Fraction,
    Homogene, Matrice, Options, PRECISION_DEFAUT,
};

fn fr(n: i64, d: i64) -> Fraction {
    Fraction::new(n, d).unwrap()
}

fn eval_ok(expr: &str) -> Fraction {
    evaluer_expression(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Fractions ------------------------ */

#[test]
fn sci_forme_reduite_apres_chaque_operation() {
    let valeurs = [fr(6, -4), fr(10, 25), fr(-9, 3), fr(0, 7)];
    for a in &valeurs {
        for b in &valeurs {
            for r in [a + b, a - b, a * b] {
                assert!(r.denom().is_positive(), "{a} op {b} -> {r}");
                assert!(pgcd(r.numer(), r.denom()).is_one(), "{a} op {b} -> {r}");
            }
        }
    }
}

#[test]
fn sci_division_puis_produit_rend_a() {
    // entrées non réduites et négatives comprises
    let grille = [
        fr(6, -4),
        fr(10, 25),
        fr(-9, 3),
        fr(0, 7),
        fr(22, 7),
        fr(-1, 1000),
        fr(4, 4),
    ];
    for a in &grille {
        for b in &grille {
            if b.est_zero() {
                assert_eq!(a.diviser(b), Err(Erreur::DivisionParZero), "{a} / {b}");
                continue;
            }
            let q = a.diviser(b).unwrap_or_else(|e| panic!("{a} / {b}: {e}"));
            assert_eq!(&q * b, a.clone(), "({a} / {b}) * {b}");
        }
    }
}

#[test]
fn sci_aller_retour_rendu_lecture() {
    for (n, d) in [(1, 3), (-22, 7), (0, 1), (5, 1), (-1, 1000)] {
        let f = fr(n, d);
        assert_eq!(lire_fraction(&f.to_string()).unwrap(), f);
    }
}

#[test]
fn sci_racines() {
    assert_eq!(fr(4, 1).racine(PRECISION_DEFAUT).unwrap(), fr(2, 1));

    // (√2)² à 10^-precision près de 2
    let r = fr(2, 1).racine(PRECISION_DEFAUT).unwrap();
    let ecart = (&r * &r - fr(2, 1)).abs();
    let tolerance = Fraction::new(1, BigInt::from(10).pow(PRECISION_DEFAUT)).unwrap();
    assert!(ecart < tolerance, "écart {ecart}");
}

/* ------------------------ Expressions ------------------------ */

#[test]
fn sci_precedences_puissance() {
    assert_eq!(eval_ok("2^3"), fr(8, 1));
    assert_eq!(eval_ok("-3^2"), fr(-9, 1));
    assert_eq!(eval_ok("2^-3"), fr(1, 8));
    assert_eq!(eval_ok("-2^-2"), fr(-1, 4));
    assert_eq!(eval_ok("2*3^2"), fr(18, 1));
}

#[test]
fn sci_constantes_et_fonctions() {
    // π arrondi à 10 décimales
    assert_eq!(eval_ok("pi"), fr(31_415_926_536, 10_000_000_000));
    assert_eq!(eval_ok("π"), eval_ok("pi"));
    assert_eq!(eval_ok("ln(e)"), fr(1, 1));
    assert_eq!(eval_ok("log(1000)"), fr(3, 1));
    assert_eq!(eval_ok("√(16/9)"), fr(4, 3));
}

/* ------------------------ Systèmes ------------------------ */

#[test]
fn sci_systeme_deux_equations() {
    let s = parser_systeme("x + 2y = 5\n3x - y = 4").unwrap();
    assert_eq!(s.variables, vec!["x", "y"]);
    assert_eq!(s.a, Matrice::depuis_entiers(&[&[1, 2], &[3, -1]]).unwrap());
    assert_eq!(s.b, vec![fr(5, 1), fr(4, 1)]);

    let r = resoudre_systeme(&s, Options::default()).unwrap();
    assert_eq!(
        r.classification,
        Classification::Unique {
            solution: vec![fr(13, 7), fr(11, 7)]
        }
    );
}

#[test]
fn sci_incoherent() {
    let s = parser_systeme("x=1\nx=2").unwrap();
    let r = resoudre_systeme(&s, Options::default()).unwrap();
    assert!(matches!(
        r.classification,
        Classification::Incoherente { ligne: 1, .. }
    ));
}

#[test]
fn sci_gauss_et_gauss_jordan_meme_classe() {
    let cas = [
        "1 2 | 5\n3 -1 | 4",
        "1 1 1 | 6\n0 1 -1 | 0\n1 2 0 | 6",
        "1 2 1 | 3\n2 4 0 | 2",
        "1 1 | 1\n2 2 | 3",
    ];
    for texte in cas {
        let m = lire_matrice_augmentee(texte).unwrap();
        let g = resoudre_gauss(&m, None, Options::default()).unwrap();
        let gj = resoudre_gauss_jordan(&m, None, Options::default()).unwrap();
        assert_eq!(g.reduction.pivots, gj.reduction.pivots, "{texte}");
        match (&g.classification, &gj.classification) {
            (Classification::Unique { solution: a }, Classification::Unique { solution: b }) => {
                assert_eq!(a, b)
            }
            (
                Classification::Infinie { particuliere: a, .. },
                Classification::Infinie { particuliere: b, .. },
            ) => assert_eq!(a, b),
            (Classification::Incoherente { .. }, Classification::Incoherente { .. }) => {}
            (a, b) => panic!("{texte}: {a:?} vs {b:?}"),
        }
    }
}

#[test]
fn sci_homogene() {
    let independant = Matrice::depuis_entiers(&[&[1, 0], &[0, 1], &[1, 1]]).unwrap();
    let a = analyser_homogene(&independant, Options::default()).unwrap();
    assert_eq!(a.verdict, Homogene::Triviale);

    let dependant = Matrice::depuis_entiers(&[&[1, 2, 3], &[2, 4, 6]]).unwrap();
    let a = analyser_homogene(&dependant, Options::default()).unwrap();
    match a.verdict {
        Homogene::NonTriviale { libres } => assert!(!libres.is_empty()),
        Homogene::Triviale => panic!("colonnes dépendantes attendues"),
    }
}

/* ------------------------ Algèbre ------------------------ */

#[test]
fn sci_det_inverse_2x2() {
    let a = Matrice::depuis_entiers(&[&[1, 2], &[3, 4]]).unwrap();
    assert_eq!(determinant(&a, Options::default()).unwrap().valeur, fr(-2, 1));
    let inv = inverse(&a, Options::default()).unwrap().matrice;
    assert_eq!(
        produit(&inv, &a, Options::default()).unwrap().matrice,
        Matrice::identite(2)
    );
}

#[test]
fn sci_cramer_concorde_avec_gauss_jordan() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let a = Matrice::depuis_entiers(&[&[2, 1, -1], &[-3, -1, 2], &[-2, 1, 2]]).unwrap();
    let b = vec![fr(8, 1), fr(-11, 1), fr(-3, 1)];

    let c = cramer(&a, &b, Options::default()).unwrap();
    let gj = resoudre_gauss_jordan(&a.augmentee(&b).unwrap(), None, Options::default()).unwrap();
    budget(t0, max);

    assert_eq!(
        gj.classification,
        Classification::Unique {
            solution: c.solution.clone()
        }
    );
    assert_eq!(c.solution, vec![fr(2, 1), fr(3, 1), fr(-1, 1)]);
}

#[test]
fn sci_det_produit_multiplicatif() {
    let a = Matrice::depuis_entiers(&[&[1, 2, 0], &[0, 1, 3], &[4, 0, 1]]).unwrap();
    let b = Matrice::depuis_entiers(&[&[2, 0, 1], &[1, 3, 2], &[1, 1, 2]]).unwrap();
    let ab = produit(&a, &b, Options::default()).unwrap().matrice;

    let da = determinant(&a, Options::default()).unwrap().valeur;
    let db = determinant(&b, Options::default()).unwrap().valeur;
    let dab = determinant(&ab, Options::default()).unwrap().valeur;
    assert_eq!(dab, da * db);
}
