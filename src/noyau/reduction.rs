// src/noyau/reduction.rs
//
// Gauss (forme échelonnée) et Gauss-Jordan (forme échelonnée réduite).
//
// Même balayage dans les deux cas : colonne par colonne, premier pivot non nul
// à partir de la ligne courante, échange si besoin, mise à l’échelle du pivot à 1,
// puis élimination (sous le pivot pour Gauss, partout ailleurs pour Gauss-Jordan).
// Seules les `limite` premières colonnes portent des pivots : la dernière colonne
// d’une matrice augmentée (ou le bloc I de [A | I]) suit sans être balayée.

use super::erreur::Resultat;
use super::fraction::Fraction;
use super::matrice::Matrice;
use super::trace::{OperationLigne, Options, Pas, Trace};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Forme {
    /// Gauss
    Echelonnee,
    /// Gauss-Jordan
    EchelonneeReduite,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reduction {
    pub forme: Forme,
    pub matrice: Matrice,
    /// Colonnes pivots (0-based), strictement croissantes.
    pub pivots: Vec<usize>,
    /// Toujours rendues (le déterminant s’en sert), même sans démarche.
    pub operations: Vec<OperationLigne>,
    pub pas: Option<Vec<Pas>>,
}

/// Gauss sur une matrice augmentée [A | b].
pub fn gauss(m: &Matrice, options: Options<'_>) -> Resultat<Reduction> {
    reduire(m, m.nb_colonnes() - 1, Forme::Echelonnee, options)
}

/// Gauss-Jordan sur une matrice augmentée [A | b].
pub fn gauss_jordan(m: &Matrice, options: Options<'_>) -> Resultat<Reduction> {
    reduire(m, m.nb_colonnes() - 1, Forme::EchelonneeReduite, options)
}

/// Réduction générale : pivots cherchés dans les colonnes `0..limite`.
pub fn reduire(
    m: &Matrice,
    limite: usize,
    forme: Forme,
    options: Options<'_>,
) -> Resultat<Reduction> {
    let mut r = m.clone();
    let nb_lignes = r.nb_lignes();
    let limite = limite.min(r.nb_colonnes());

    let mut trace = if limite < r.nb_colonnes() {
        Trace::augmentee(options.enregistrer_pas, limite)
    } else {
        Trace::new(options.enregistrer_pas)
    };
    let mut operations = Vec::new();
    let mut pivots = Vec::new();

    trace.noter(|| "Matrice de départ".to_string(), &r);

    let mut ligne_pivot = 0;
    let mut col = 0;
    while col < limite && ligne_pivot < nb_lignes {
        // premier non nul de la colonne, à partir de la ligne pivot
        let Some(trouve) = (ligne_pivot..nb_lignes).find(|&i| !r[(i, col)].est_zero()) else {
            col += 1;
            continue;
        };

        if trouve != ligne_pivot {
            r.echanger_lignes(ligne_pivot, trouve);
            trace.noter(
                || format!("Échanger F{} ↔ F{}", ligne_pivot + 1, trouve + 1),
                &r,
            );
            operations.push(OperationLigne::Echange {
                i: ligne_pivot,
                j: trouve,
            });
        }

        let pivot = r[(ligne_pivot, col)].clone();
        if !pivot.est_un() {
            r.multiplier_ligne(ligne_pivot, &pivot.inverse()?);
            trace.noter(
                || {
                    format!(
                        "F{l} → (1/{p})·F{l}",
                        l = ligne_pivot + 1,
                        p = options.texte(&pivot)
                    )
                },
                &r,
            );
            operations.push(OperationLigne::Echelle {
                ligne: ligne_pivot,
                pivot,
            });
        }

        let cibles: Vec<usize> = match forme {
            Forme::Echelonnee => (ligne_pivot + 1..nb_lignes).collect(),
            Forme::EchelonneeReduite => (0..nb_lignes).filter(|&i| i != ligne_pivot).collect(),
        };
        for cible in cibles {
            let facteur = r[(cible, col)].clone();
            if facteur.est_zero() {
                continue;
            }
            r.ajouter_multiple(cible, ligne_pivot, &-&facteur);
            trace.noter(
                || {
                    format!(
                        "F{c} → F{c} − ({f})·F{s}",
                        c = cible + 1,
                        f = options.texte(&facteur),
                        s = ligne_pivot + 1
                    )
                },
                &r,
            );
            operations.push(OperationLigne::Elimination {
                cible,
                source: ligne_pivot,
                facteur,
            });
        }

        pivots.push(col);
        ligne_pivot += 1;
        col += 1;
    }

    trace.noter(
        || match forme {
            Forme::Echelonnee => "Matrice en forme échelonnée (finale)".to_string(),
            Forme::EchelonneeReduite => {
                "Matrice en forme échelonnée réduite (finale)".to_string()
            }
        },
        &r,
    );

    debug_assert_eq!(
        pivots,
        match forme {
            Forme::Echelonnee => colonnes_pivots_gauss(&r, limite),
            Forme::EchelonneeReduite => colonnes_pivots_gauss_jordan(&r, limite),
        }
    );

    Ok(Reduction {
        forme,
        matrice: r,
        pivots,
        operations,
        pas: trace.terminer(),
    })
}

/// Forme échelonnée : colonne du premier non nul de chaque ligne.
pub fn colonnes_pivots_gauss(r: &Matrice, limite: usize) -> Vec<usize> {
    r.lignes()
        .iter()
        .filter_map(|l| l[..limite].iter().position(|v| !v.est_zero()))
        .collect()
}

/// Forme réduite : colonnes valant 1 sur la ligne courante et 0 ailleurs.
pub fn colonnes_pivots_gauss_jordan(r: &Matrice, limite: usize) -> Vec<usize> {
    let mut pivots = Vec::new();
    let mut ligne = 0;
    for c in 0..limite {
        if ligne >= r.nb_lignes() {
            break;
        }
        let propre = r[(ligne, c)].est_un()
            && (0..r.nb_lignes()).all(|i| i == ligne || r[(i, c)].est_zero());
        if propre {
            pivots.push(c);
            ligne += 1;
        }
    }
    pivots
}

/// Déterminant d’une matrice carrée lu sur les opérations d’une réduction
/// complète (limite = n) : (−1)^échanges · Π pivots, ou 0 s’il manque un pivot.
pub fn determinant_depuis(reduction: &Reduction, n: usize) -> Fraction {
    if reduction.pivots.len() < n {
        return Fraction::zero();
    }
    reduction
        .operations
        .iter()
        .fold(Fraction::un(), |acc, op| match op {
            OperationLigne::Echange { .. } => -acc,
            OperationLigne::Echelle { pivot, .. } => acc * pivot,
            OperationLigne::Elimination { .. } => acc,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fr(n: i64, d: i64) -> Fraction {
        Fraction::new(n, d).unwrap()
    }

    fn aug(lignes: &[&[i64]]) -> Matrice {
        Matrice::depuis_entiers(lignes).unwrap()
    }

    #[test]
    fn gauss_jordan_systeme_unique() {
        let r = gauss_jordan(&aug(&[&[1, 2, 5], &[3, -1, 4]]), Options::default()).unwrap();
        assert_eq!(r.pivots, vec![0, 1]);
        assert_eq!(
            r.matrice,
            Matrice::depuis_lignes(vec![
                vec![fr(1, 1), fr(0, 1), fr(13, 7)],
                vec![fr(0, 1), fr(1, 1), fr(11, 7)],
            ])
            .unwrap()
        );
        assert!(r.pas.is_none());
    }

    #[test]
    fn gauss_n_elimine_que_sous_le_pivot() {
        let r = gauss(&aug(&[&[1, 2, 5], &[3, -1, 4]]), Options::default()).unwrap();
        assert_eq!(r.pivots, vec![0, 1]);
        assert_eq!(r.matrice.ligne(0), &[fr(1, 1), fr(2, 1), fr(5, 1)]);
        assert_eq!(r.matrice.ligne(1), &[fr(0, 1), fr(1, 1), fr(11, 7)]);
    }

    #[test]
    fn echange_quand_pivot_nul() {
        let opts = Options::avec_pas(&|f: &Fraction| f.to_string());
        let r = gauss_jordan(&aug(&[&[0, 2, 4], &[3, 0, 6]]), opts).unwrap();
        assert_eq!(r.operations[0], OperationLigne::Echange { i: 0, j: 1 });

        let pas = r.pas.unwrap();
        let descriptions: Vec<&str> = pas.iter().map(|p| p.operation.as_str()).collect();
        assert_eq!(
            descriptions,
            vec![
                "Matrice de départ",
                "Échanger F1 ↔ F2",
                "F1 → (1/3)·F1",
                "F2 → (1/2)·F2",
                "Matrice en forme échelonnée réduite (finale)",
            ]
        );
        // chaque instantané est une copie figée
        assert_eq!(pas[0].cellules, aug(&[&[0, 2, 4], &[3, 0, 6]]).instantane());
        assert_eq!(pas[0].separateur, Some(2));
    }

    #[test]
    fn description_elimination() {
        let opts = Options::avec_pas(&|f: &Fraction| f.to_string());
        let r = gauss(&aug(&[&[1, 1, 2], &[2, 1, 3]]), opts).unwrap();
        let pas = r.pas.unwrap();
        assert_eq!(pas[1].operation, "F2 → F2 − (2)·F1");
    }

    #[test]
    fn colonne_sans_pivot() {
        let r = gauss_jordan(&aug(&[&[1, 2, 1, 3], &[2, 4, 0, 2]]), Options::default()).unwrap();
        assert_eq!(r.pivots, vec![0, 2]);
    }

    #[test]
    fn idempotence_gauss_jordan() {
        let m = aug(&[&[2, 1, -1, 8], &[-3, -1, 2, -11], &[-2, 1, 2, -3]]);
        let une = gauss_jordan(&m, Options::default()).unwrap();
        let deux = gauss_jordan(&une.matrice, Options::default()).unwrap();
        assert_eq!(deux.matrice, une.matrice);
        assert!(deux.operations.is_empty());
    }

    #[test]
    fn determinant_par_operations() {
        let a = aug(&[&[0, 1, 2], &[1, 0, 3], &[4, -3, 8]]);
        let r = reduire(&a, 3, Forme::Echelonnee, Options::default()).unwrap();
        assert_eq!(determinant_depuis(&r, 3), fr(-2, 1));

        let s = aug(&[&[1, 2], &[2, 4]]);
        let r = reduire(&s, 2, Forme::Echelonnee, Options::default()).unwrap();
        assert_eq!(determinant_depuis(&r, 2), Fraction::zero());
    }
}
