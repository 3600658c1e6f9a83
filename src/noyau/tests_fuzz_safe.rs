//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le noyau sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur et tailles bornées
//! - budget temps global
//! - on accepte certaines erreurs attendues (division par zéro, exposant non entier, etc.)
//! - invariants clés : fractions toujours réduites, Gauss-Jordan idempotent,
//!   A⁻¹·A = I dès que l’inverse existe

use std::time::{Duration, Instant};

use num_traits::{One, Signed};

use super::algebre::{determinant, inverse, produit};
use super::fraction::pgcd;
use super::{evaluer_expression, gauss_jordan, Erreur, Fraction, Matrice, Options};

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
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
    /// Entier dans [-k, k].
    fn entier(&mut self, k: i64) -> i64 {
        self.pick((2 * k + 1) as u32) as i64 - k
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

fn is_erreur_attendue(e: &Erreur) -> bool {
    // Liste blanche : erreurs *normales* pour un fuzz d’expressions.
    matches!(
        e,
        Erreur::DivisionParZero | Erreur::ExposantNonEntier | Erreur::OperandeInvalide(_)
    )
}

fn check_reduite(f: &Fraction) {
    assert!(f.denom().is_positive(), "dénominateur non positif: {f}");
    assert!(pgcd(f.numer(), f.denom()).is_one(), "non réduite: {f}");
}

/* ------------------------ Génération (bornée) ------------------------ */

fn gen_rat(rng: &mut Rng) -> String {
    // rationnels simples, incluant 0 (utile pour tester les divisions)
    let a = rng.pick(8);
    let b = rng.pick(7) + 1;
    if rng.coin() {
        format!("{a}/{b}")
    } else {
        format!("{a}")
    }
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 | 1 | 2 => gen_rat(rng),
        3 => "pi".to_string(),
        4 => format!("sqrt({})", gen_rat(rng)),
        _ => format!("-{}", gen_rat(rng)),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    match rng.pick(8) {
        0 => gen_atom(rng),
        1 => format!("({}+{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        2 => format!("({}-{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        3 => format!("({}*{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        4 => format!("({}/{})", gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        // exposant borné ; parfois non entier (erreur attendue)
        5 => format!("({})^{}", gen_expr(rng, depth - 1), rng.entier(2)),
        6 => format!("({})^({}/2)", gen_expr(rng, depth - 1), rng.pick(3)),
        _ => format!("abs({})", gen_expr(rng, depth - 1)),
    }
}

fn gen_matrice(rng: &mut Rng, m: usize, n: usize) -> Matrice {
    let lignes = (0..m)
        .map(|_| {
            (0..n)
                .map(|_| {
                    let num = rng.entier(6);
                    let den = rng.pick(3) as i64 + 1;
                    Fraction::new(num, den).unwrap()
                })
                .collect()
        })
        .collect();
    Matrice::depuis_lignes(lignes).unwrap()
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_expressions_deterministes() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_err = 0usize;

    for _ in 0..150 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);

        // même entrée => même sortie
        let a = evaluer_expression(&expr);
        let b = evaluer_expression(&expr);
        assert_eq!(a, b, "non déterministe: {expr:?}");

        match a {
            Ok(f) => {
                check_reduite(&f);
                seen_ok += 1;
            }
            Err(e) => {
                assert!(
                    is_erreur_attendue(&e),
                    "erreur non attendue: expr={expr:?} err={e}"
                );
                seen_err += 1;
            }
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_err > 0, "aucune erreur vue: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_entrees_bruitees_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let alphabet: Vec<char> = "0123456789.+-*/^()pie sqrt×÷−√π%=x,".chars().collect();
    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..400 {
        budget(t0, max);

        let len = rng.pick(11) as usize;
        let s: String = (0..len)
            .map(|_| alphabet[rng.pick(alphabet.len() as u32) as usize])
            .collect();

        // aucune panique : soit une fraction réduite, soit une erreur typée
        if let Ok(f) = evaluer_expression(&s) {
            check_reduite(&f);
        }
    }
}

#[test]
fn fuzz_safe_gauss_jordan_idempotent() {
    let t0 = Instant::now();
    let max = Duration::from_millis(800);

    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..60 {
        budget(t0, max);

        let m = rng.pick(4) as usize + 1;
        let n = rng.pick(4) as usize + 2;
        let a = gen_matrice(&mut rng, m, n);

        let une = gauss_jordan(&a, Options::default()).unwrap();
        let deux = gauss_jordan(&une.matrice, Options::default()).unwrap();
        assert_eq!(deux.matrice, une.matrice, "A={a:?}");
        assert_eq!(deux.pivots, une.pivots);
        assert!(une.pivots.len() <= m.min(n - 1));
        assert!(une.pivots.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn fuzz_safe_inverse_fois_a_identite() {
    let t0 = Instant::now();
    let max = Duration::from_millis(800);

    let mut rng = Rng::new(0xFEED_u64);
    let mut inversibles = 0usize;

    for _ in 0..60 {
        budget(t0, max);

        let n = rng.pick(4) as usize + 1;
        let a = gen_matrice(&mut rng, n, n);
        let det = determinant(&a, Options::default()).unwrap().valeur;

        match inverse(&a, Options::default()) {
            Ok(r) => {
                assert!(!det.est_zero(), "inverse d’une matrice singulière: {a:?}");
                let id = produit(&r.matrice, &a, Options::default()).unwrap().matrice;
                assert_eq!(id, Matrice::identite(n), "A={a:?}");
                inversibles += 1;
            }
            Err(e) => {
                assert_eq!(e, Erreur::NonInversible);
                assert!(det.est_zero(), "det non nul mais non inversible: {a:?}");
            }
        }
    }

    assert!(inversibles > 10, "trop peu de matrices inversibles: {inversibles}");
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let expr = somme_balancee("1/2", 800);
    let v = evaluer_expression(&expr).unwrap_or_else(|e| panic!("err: {e}"));
    budget(t0, max);

    // 800*(1/2) = 400
    assert_eq!(v, Fraction::entier(400));
}
