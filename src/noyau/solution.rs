// src/noyau/solution.rs
//
// Lecture d’une matrice augmentée réduite : UNIQUE / INFINIE / INCOHÉRENTE.

use super::erreur::Resultat;
use super::fraction::Fraction;
use super::matrice::Matrice;
use super::reduction::{gauss, gauss_jordan, Forme, Reduction};
use super::systeme::Systeme;
use super::trace::Options;

/// x_variable = constante − Σ coeff·x_libre
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpressionParametrique {
    pub variable: usize,
    pub constante: Fraction,
    pub termes: Vec<(usize, Fraction)>,
}

impl ExpressionParametrique {
    pub fn texte(&self, noms: &[String], options: Options<'_>) -> String {
        let mut parties = Vec::new();
        if !self.constante.est_zero() {
            parties.push(options.texte(&self.constante));
        }
        for (libre, coeff) in &self.termes {
            let nom = &noms[*libre];
            let terme = if coeff.est_un() {
                format!("- {nom}")
            } else if (-coeff).est_un() {
                format!("+ {nom}")
            } else if coeff.est_negatif() {
                format!("+ {}·{nom}", options.texte(&-coeff))
            } else {
                format!("- {}·{nom}", options.texte(coeff))
            };
            parties.push(terme);
        }

        let droite = if parties.is_empty() {
            "0".to_string()
        } else {
            parties.join(" ")
        };
        format!("{} = {droite}", noms[self.variable])
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Classification {
    Unique {
        solution: Vec<Fraction>,
    },
    Infinie {
        /// Variables libres à 0.
        particuliere: Vec<Fraction>,
        libres: Vec<usize>,
        /// Vide pour la forme échelonnée simple.
        parametriques: Vec<ExpressionParametrique>,
    },
    Incoherente {
        /// Ligne (0-based) de la forme 0 = c, c ≠ 0.
        ligne: usize,
        valeur: Fraction,
    },
}

/// Colonnes 0..n sans pivot.
pub fn variables_libres(n: usize, pivots: &[usize]) -> Vec<usize> {
    (0..n).filter(|c| !pivots.contains(c)).collect()
}

fn ligne_contradictoire(r: &Matrice) -> Option<(usize, Fraction)> {
    let n = r.nb_colonnes() - 1;
    r.lignes()
        .iter()
        .enumerate()
        .find(|(_, l)| l[..n].iter().all(Fraction::est_zero) && !l[n].est_zero())
        .map(|(i, l)| (i, l[n].clone()))
}

/// Classe une matrice augmentée déjà réduite (dernière colonne = b).
pub fn classer(r: &Matrice, pivots: &[usize], forme: Forme) -> Resultat<Classification> {
    if let Some((ligne, valeur)) = ligne_contradictoire(r) {
        return Ok(Classification::Incoherente { ligne, valeur });
    }

    let n = r.nb_colonnes() - 1;
    let particuliere = match forme {
        Forme::Echelonnee => substitution_arriere(r)?,
        Forme::EchelonneeReduite => {
            let mut x = vec![Fraction::zero(); n];
            for (ligne, &col) in pivots.iter().enumerate() {
                x[col] = r[(ligne, n)].clone();
            }
            x
        }
    };

    if pivots.len() == n {
        return Ok(Classification::Unique {
            solution: particuliere,
        });
    }

    let libres = variables_libres(n, pivots);
    let parametriques = match forme {
        Forme::Echelonnee => Vec::new(),
        Forme::EchelonneeReduite => pivots
            .iter()
            .enumerate()
            .map(|(ligne, &col)| ExpressionParametrique {
                variable: col,
                constante: r[(ligne, n)].clone(),
                termes: libres
                    .iter()
                    .filter(|&&f| !r[(ligne, f)].est_zero())
                    .map(|&f| (f, r[(ligne, f)].clone()))
                    .collect(),
            })
            .collect(),
    };

    Ok(Classification::Infinie {
        particuliere,
        libres,
        parametriques,
    })
}

/// Remontée depuis la dernière ligne ; variables libres à 0.
fn substitution_arriere(r: &Matrice) -> Resultat<Vec<Fraction>> {
    let n = r.nb_colonnes() - 1;
    let mut x = vec![Fraction::zero(); n];

    for l in r.lignes().iter().rev() {
        let Some(col) = l[..n].iter().position(|v| !v.est_zero()) else {
            continue;
        };
        let somme = ((col + 1)..n)
            .filter(|&j| !l[j].est_zero())
            .fold(Fraction::zero(), |acc, j| acc + &l[j] * &x[j]);
        let reste = &l[n] - &somme;
        x[col] = if l[col].est_un() {
            reste
        } else {
            reste.diviser(&l[col])?
        };
    }
    Ok(x)
}

/* ------------------------ Rapport complet ------------------------ */

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub reduction: Reduction,
    /// Nom de chaque inconnue (x1…xn par défaut).
    pub noms: Vec<String>,
    pub classification: Classification,
    /// Tous les seconds membres nuls.
    pub homogene: bool,
}

impl Resolution {
    pub fn pivots_noms(&self) -> Vec<String> {
        self.reduction
            .pivots
            .iter()
            .map(|&p| self.noms[p].clone())
            .collect()
    }

    /// Lignes prêtes à afficher ("x1 = 13/7", "x3 libre", "Ligne 3 : 0 = 1"…).
    pub fn lignes(&self, options: Options<'_>) -> Vec<String> {
        let valeurs = |x: &[Fraction]| -> Vec<String> {
            x.iter()
                .zip(&self.noms)
                .map(|(v, nom)| format!("{nom} = {}", options.texte(v)))
                .collect()
        };

        match &self.classification {
            Classification::Unique { solution } => valeurs(solution),
            Classification::Infinie {
                particuliere,
                libres,
                parametriques,
            } => {
                let mut out: Vec<String> = parametriques
                    .iter()
                    .map(|e| e.texte(&self.noms, options))
                    .collect();
                out.extend(libres.iter().map(|&c| format!("{} libre", self.noms[c])));
                if parametriques.is_empty() {
                    out.push("Solution particulière (variables libres = 0) :".to_string());
                    out.extend(valeurs(particuliere));
                }
                out
            }
            Classification::Incoherente { ligne, valeur } => {
                vec![format!("Ligne {} : 0 = {}", ligne + 1, options.texte(valeur))]
            }
        }
    }
}

fn noms_par_defaut(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("x{i}")).collect()
}

fn resoudre(
    m: &Matrice,
    noms: Option<&[String]>,
    reduction: Reduction,
) -> Resultat<Resolution> {
    let n = m.nb_colonnes() - 1;
    let noms = match noms {
        Some(noms) if noms.len() == n => noms.to_vec(),
        _ => noms_par_defaut(n),
    };
    let classification = classer(&reduction.matrice, &reduction.pivots, reduction.forme)?;
    let homogene = m.colonne(n).iter().all(Fraction::est_zero);

    Ok(Resolution {
        reduction,
        noms,
        classification,
        homogene,
    })
}

/// Matrice augmentée [A | b] -> Gauss + substitution arrière.
pub fn resoudre_gauss(
    m: &Matrice,
    noms: Option<&[String]>,
    options: Options<'_>,
) -> Resultat<Resolution> {
    resoudre(m, noms, gauss(m, options)?)
}

/// Matrice augmentée [A | b] -> Gauss-Jordan + expressions paramétriques.
pub fn resoudre_gauss_jordan(
    m: &Matrice,
    noms: Option<&[String]>,
    options: Options<'_>,
) -> Resultat<Resolution> {
    resoudre(m, noms, gauss_jordan(m, options)?)
}

/// Système lu depuis des équations : les noms des inconnues sont conservés.
pub fn resoudre_systeme(s: &Systeme, options: Options<'_>) -> Resultat<Resolution> {
    resoudre_gauss_jordan(&s.augmentee()?, Some(&s.variables), options)
}

/* ------------------------ Système homogène ------------------------ */

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Homogene {
    /// Colonnes linéairement indépendantes.
    Triviale,
    /// Colonnes linéairement dépendantes.
    NonTriviale { libres: Vec<usize> },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalyseHomogene {
    pub verdict: Homogene,
    pub resolution: Resolution,
}

/// Ax = 0 : A augmentée d’une colonne nulle, puis Gauss-Jordan.
pub fn analyser_homogene(a: &Matrice, options: Options<'_>) -> Resultat<AnalyseHomogene> {
    let zeros = vec![Fraction::zero(); a.nb_lignes()];
    let resolution = resoudre_gauss_jordan(&a.augmentee(&zeros)?, None, options)?;

    let verdict = match &resolution.classification {
        Classification::Infinie { libres, .. } => Homogene::NonTriviale {
            libres: libres.clone(),
        },
        // une colonne nulle ne peut pas être contradictoire
        Classification::Unique { .. } | Classification::Incoherente { .. } => Homogene::Triviale,
    };

    Ok(AnalyseHomogene {
        verdict,
        resolution,
    })
}
