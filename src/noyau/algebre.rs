// src/noyau/algebre.rs
//
// Algèbre matricielle sur les fractions : somme, multiple scalaire, produit,
// transposée, déterminant, inverse, règle de Cramer.
// Chaque opération rend son résultat et, sur demande, sa démarche.

use super::erreur::{Erreur, Resultat};
use super::fraction::Fraction;
use super::matrice::Matrice;
use super::reduction::{determinant_depuis, reduire, Forme};
use super::trace::{Cellule, OperationLigne, Options, Pas, Trace};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultatMatrice {
    pub matrice: Matrice,
    pub pas: Option<Vec<Pas>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultatDeterminant {
    pub valeur: Fraction,
    pub pas: Option<Vec<Pas>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultatCramer {
    pub solution: Vec<Fraction>,
    pub determinant: Fraction,
    /// det(A_i), A_i = A dont la colonne i est remplacée par b.
    pub mineurs: Vec<Fraction>,
    pub pas: Option<Vec<Pas>>,
}

fn dimensions(m: &Matrice) -> String {
    format!("{}×{}", m.nb_lignes(), m.nb_colonnes())
}

fn sans_pas(options: Options<'_>) -> Options<'_> {
    Options {
        enregistrer_pas: false,
        ..options
    }
}

/* ------------------------ Somme / scalaire / transposée ------------------------ */

pub fn somme(a: &Matrice, b: &Matrice, options: Options<'_>) -> Resultat<ResultatMatrice> {
    if a.nb_lignes() != b.nb_lignes() || a.nb_colonnes() != b.nb_colonnes() {
        return Err(Erreur::DimensionsIncompatibles(format!(
            "pour additionner, A ({}) et B ({}) doivent avoir les mêmes dimensions",
            dimensions(a),
            dimensions(b)
        )));
    }

    let lignes = a
        .lignes()
        .iter()
        .zip(b.lignes())
        .map(|(la, lb)| la.iter().zip(lb).map(|(x, y)| x + y).collect())
        .collect();
    let c = Matrice::depuis_lignes(lignes)?;

    let mut trace = Trace::new(options.enregistrer_pas);
    trace.noter(|| "C = A + B (terme à terme : cᵢⱼ = aᵢⱼ + bᵢⱼ)".to_string(), &c);
    Ok(ResultatMatrice {
        matrice: c,
        pas: trace.terminer(),
    })
}

pub fn multiplier_scalaire(k: &Fraction, a: &Matrice, options: Options<'_>) -> ResultatMatrice {
    let mut c = a.clone();
    for i in 0..c.nb_lignes() {
        c.multiplier_ligne(i, k);
    }

    let mut trace = Trace::new(options.enregistrer_pas);
    trace.noter(|| format!("C = ({})·A", options.texte(k)), &c);
    ResultatMatrice {
        matrice: c,
        pas: trace.terminer(),
    }
}

pub fn transposee(a: &Matrice, options: Options<'_>) -> ResultatMatrice {
    let t = a.transposee();
    let mut trace = Trace::new(options.enregistrer_pas);
    trace.noter(
        || {
            format!(
                "Aᵀ ({}) : la ligne i de A devient la colonne i",
                dimensions(&t)
            )
        },
        &t,
    );
    ResultatMatrice {
        matrice: t,
        pas: trace.terminer(),
    }
}

/* ------------------------ Produit ------------------------ */

/// C = A·B, calculé colonne par colonne : C[:,j] = Σ_k B[k][j]·A[:,k].
pub fn produit(a: &Matrice, b: &Matrice, options: Options<'_>) -> Resultat<ResultatMatrice> {
    if a.nb_colonnes() != b.nb_lignes() {
        return Err(Erreur::DimensionsIncompatibles(format!(
            "pour multiplier, le nombre de colonnes de A ({}) doit égaler le nombre de lignes de B ({})",
            dimensions(a),
            dimensions(b)
        )));
    }

    let (m, p, n) = (a.nb_lignes(), a.nb_colonnes(), b.nb_colonnes());
    let mut c = Matrice::zeros(m, n);
    let mut trace = Trace::new(options.enregistrer_pas);
    trace.noter(|| format!("Initialiser C ({m}×{n}) avec des zéros"), &c);

    for j in 0..n {
        if trace.active() {
            // colonne j affichée comme combinaison en attente
            let mut cellules = c.instantane();
            for (i, ligne) in cellules.iter_mut().enumerate() {
                let formule = (0..p)
                    .map(|k| {
                        format!(
                            "({})({})",
                            options.texte(&b[(k, j)]),
                            options.texte(&a[(i, k)])
                        )
                    })
                    .collect::<Vec<_>>()
                    .join(" + ");
                ligne[j] = Cellule::Texte(formule);
            }
            trace.noter_cellules(
                || {
                    format!(
                        "Calculer la colonne {} de C comme combinaison linéaire des colonnes de A (coefficients : colonne {} de B)",
                        j + 1,
                        j + 1
                    )
                },
                cellules,
            );
        }

        for k in 0..p {
            let coeff = &b[(k, j)];
            for i in 0..m {
                let terme = coeff * &a[(i, k)];
                c[(i, j)] = &c[(i, j)] + &terme;
            }
            trace.noter(
                || {
                    format!(
                        "Ajouter ({})·colonne A{} à la colonne {} de C",
                        options.texte(coeff),
                        k + 1,
                        j + 1
                    )
                },
                &c,
            );
        }

        trace.noter(
            || {
                let parties: Vec<String> = (0..p)
                    .filter(|&k| !b[(k, j)].est_zero())
                    .map(|k| format!("{}·A[:,{}]", options.texte(&b[(k, j)]), k + 1))
                    .collect();
                let somme = if parties.is_empty() {
                    "0".to_string()
                } else {
                    parties.join(" + ")
                };
                format!("Colonne {} terminée : C[:,{}] = {somme}", j + 1, j + 1)
            },
            &c,
        );
    }

    Ok(ResultatMatrice {
        matrice: c,
        pas: trace.terminer(),
    })
}

/* ------------------------ Déterminant ------------------------ */

/// 1×1 et 2×2 en forme close ; n ≥ 3 par réduction (échanges et pivots).
pub fn determinant(a: &Matrice, options: Options<'_>) -> Resultat<ResultatDeterminant> {
    if !a.est_carree() {
        return Err(Erreur::NonCarree);
    }
    let n = a.nb_lignes();
    let mut trace = Trace::new(options.enregistrer_pas);

    let valeur = match n {
        1 => {
            let v = a[(0, 0)].clone();
            trace.noter(|| format!("det(A) = a₁₁ = {}", options.texte(&v)), a);
            v
        }
        2 => {
            let (p, q, r, s) = (&a[(0, 0)], &a[(0, 1)], &a[(1, 0)], &a[(1, 1)]);
            let v = p * s - q * r;
            trace.noter(
                || {
                    format!(
                        "det(A) = a·d − b·c = ({})({}) − ({})({}) = {}",
                        options.texte(p),
                        options.texte(s),
                        options.texte(q),
                        options.texte(r),
                        options.texte(&v)
                    )
                },
                a,
            );
            v
        }
        _ => {
            let red = reduire(a, n, Forme::Echelonnee, options)?;
            let v = determinant_depuis(&red, n);
            trace.etendre(red.pas);
            trace.noter(
                || {
                    if red.pivots.len() < n {
                        format!(
                            "Colonne sans pivot : det(A) = {}",
                            options.texte(&v)
                        )
                    } else {
                        let echanges = red
                            .operations
                            .iter()
                            .filter(|o| matches!(o, OperationLigne::Echange { .. }))
                            .count();
                        format!(
                            "det(A) = (−1)^{echanges} × produit des pivots = {}",
                            options.texte(&v)
                        )
                    }
                },
                &red.matrice,
            );
            v
        }
    };

    Ok(ResultatDeterminant {
        valeur,
        pas: trace.terminer(),
    })
}

/* ------------------------ Inverse ------------------------ */

/// 1×1 et 2×2 par l’adjointe ; n ≥ 3 par Gauss-Jordan sur [A | I].
pub fn inverse(a: &Matrice, options: Options<'_>) -> Resultat<ResultatMatrice> {
    if !a.est_carree() {
        return Err(Erreur::NonCarree);
    }
    let n = a.nb_lignes();

    match n {
        1 => {
            let v = &a[(0, 0)];
            if v.est_zero() {
                return Err(Erreur::NonInversible);
            }
            let inv = Matrice::depuis_lignes(vec![vec![v.inverse()?]])?;
            let mut trace = Trace::new(options.enregistrer_pas);
            trace.noter(|| format!("A⁻¹ = 1/({})", options.texte(v)), &inv);
            Ok(ResultatMatrice {
                matrice: inv,
                pas: trace.terminer(),
            })
        }
        2 => inverse_2x2(a, options),
        _ => inverse_par_reduction(a, options),
    }
}

fn inverse_2x2(a: &Matrice, options: Options<'_>) -> Resultat<ResultatMatrice> {
    let det = determinant(a, options)?;
    if det.valeur.est_zero() {
        return Err(Erreur::NonInversible);
    }

    let (p, q, r, s) = (&a[(0, 0)], &a[(0, 1)], &a[(1, 0)], &a[(1, 1)]);
    let adj = Matrice::depuis_lignes(vec![vec![s.clone(), -q], vec![-r, p.clone()]])?;
    let facteur = det.valeur.inverse()?;
    let mut inv = adj.clone();
    for i in 0..2 {
        inv.multiplier_ligne(i, &facteur);
    }

    let mut trace = Trace::new(options.enregistrer_pas);
    trace.etendre(det.pas);
    trace.noter(|| "adj(A) = [[d, −b], [−c, a]]".to_string(), &adj);
    trace.noter(
        || format!("A⁻¹ = (1/{})·adj(A)", options.texte(&det.valeur)),
        &inv,
    );
    Ok(ResultatMatrice {
        matrice: inv,
        pas: trace.terminer(),
    })
}

fn inverse_par_reduction(a: &Matrice, options: Options<'_>) -> Resultat<ResultatMatrice> {
    let n = a.nb_lignes();
    let bloc = a.juxtaposee(&Matrice::identite(n))?;
    let red = reduire(&bloc, n, Forme::EchelonneeReduite, options)?;

    let gauche = red.matrice.sous_matrice_colonnes(0, n);
    if red.pivots.len() < n || gauche != Matrice::identite(n) {
        return Err(Erreur::NonInversible);
    }
    let inv = red.matrice.sous_matrice_colonnes(n, 2 * n);

    let mut trace = Trace::new(options.enregistrer_pas);
    trace.etendre(red.pas);
    trace.noter(|| "Le bloc de gauche est I : A⁻¹ = bloc de droite".to_string(), &inv);
    Ok(ResultatMatrice {
        matrice: inv,
        pas: trace.terminer(),
    })
}

/* ------------------------ Cramer ------------------------ */

/// x_i = det(A_i) / det(A).
pub fn cramer(a: &Matrice, b: &[Fraction], options: Options<'_>) -> Resultat<ResultatCramer> {
    if !a.est_carree() {
        return Err(Erreur::NonCarree);
    }
    let n = a.nb_lignes();
    if b.len() != n {
        return Err(Erreur::DimensionsIncompatibles(format!(
            "A est {} mais b a {} entrées",
            dimensions(a),
            b.len()
        )));
    }

    let det = determinant(a, sans_pas(options))?.valeur;
    let mut trace = Trace::new(options.enregistrer_pas);
    trace.noter(|| format!("det(A) = {}", options.texte(&det)), a);
    if det.est_zero() {
        return Err(Erreur::NonInversible);
    }

    let mut mineurs = Vec::with_capacity(n);
    let mut solution = Vec::with_capacity(n);
    for i in 0..n {
        let ai = a.remplacer_colonne(i, b);
        let di = determinant(&ai, sans_pas(options))?.valeur;
        let xi = di.diviser(&det)?;
        trace.noter(
            || {
                format!(
                    "A{k} : colonne {k} remplacée par b ; det(A{k}) = {} ; x{k} = {} / {} = {}",
                    options.texte(&di),
                    options.texte(&di),
                    options.texte(&det),
                    options.texte(&xi),
                    k = i + 1
                )
            },
            &ai,
        );
        mineurs.push(di);
        solution.push(xi);
    }

    Ok(ResultatCramer {
        solution,
        determinant: det,
        mineurs,
        pas: trace.terminer(),
    })
}
