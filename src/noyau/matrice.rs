// src/noyau/matrice.rs
//
// Matrice rectangulaire de fractions.
// Invariant : toutes les lignes ont `colonnes` entrées, et la matrice n’est
// jamais vide (vérifié à la construction, jamais cassé ensuite).

use std::ops::{Index, IndexMut};

use super::erreur::{Erreur, Resultat};
use super::eval::lire_fraction;
use super::format::format_grille;
use super::fraction::Fraction;
use super::trace::{Cellule, Rendu};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrice {
    lignes: Vec<Vec<Fraction>>,
    colonnes: usize,
}

impl Matrice {
    pub fn depuis_lignes(lignes: Vec<Vec<Fraction>>) -> Resultat<Self> {
        let colonnes = lignes.first().map(Vec::len).unwrap_or(0);
        if colonnes == 0 {
            return Err(Erreur::EntreeVide);
        }
        if lignes.iter().any(|l| l.len() != colonnes) {
            return Err(Erreur::MatriceIrreguliere);
        }
        Ok(Matrice { lignes, colonnes })
    }

    /// Raccourci (tests, démos) : entiers seulement.
    pub fn depuis_entiers(lignes: &[&[i64]]) -> Resultat<Self> {
        Self::depuis_lignes(
            lignes
                .iter()
                .map(|l| l.iter().map(|&v| Fraction::entier(v)).collect())
                .collect(),
        )
    }

    /// Appelant : m >= 1 et n >= 1.
    pub fn zeros(m: usize, n: usize) -> Self {
        Matrice {
            lignes: vec![vec![Fraction::zero(); n]; m],
            colonnes: n,
        }
    }

    pub fn identite(n: usize) -> Self {
        let mut m = Self::zeros(n, n);
        for i in 0..n {
            m.lignes[i][i] = Fraction::un();
        }
        m
    }

    pub fn nb_lignes(&self) -> usize {
        self.lignes.len()
    }

    pub fn nb_colonnes(&self) -> usize {
        self.colonnes
    }

    pub fn est_carree(&self) -> bool {
        self.nb_lignes() == self.colonnes
    }

    pub fn lignes(&self) -> &[Vec<Fraction>] {
        &self.lignes
    }

    pub fn ligne(&self, i: usize) -> &[Fraction] {
        &self.lignes[i]
    }

    pub fn colonne(&self, j: usize) -> Vec<Fraction> {
        self.lignes.iter().map(|l| l[j].clone()).collect()
    }

    /* ------------------------ Opérations sur les lignes ------------------------ */

    pub fn echanger_lignes(&mut self, i: usize, j: usize) {
        self.lignes.swap(i, j);
    }

    /// Fi → c·Fi
    pub fn multiplier_ligne(&mut self, i: usize, c: &Fraction) {
        for v in &mut self.lignes[i] {
            *v = &*v * c;
        }
    }

    /// Fcible → Fcible + c·Fsource
    pub fn ajouter_multiple(&mut self, cible: usize, source: usize, c: &Fraction) {
        if c.est_zero() {
            return;
        }
        let source = self.lignes[source].clone();
        for (v, s) in self.lignes[cible].iter_mut().zip(&source) {
            *v = &*v + &(c * s);
        }
    }

    /* ------------------------ Formes dérivées ------------------------ */

    pub fn transposee(&self) -> Matrice {
        let lignes = (0..self.colonnes).map(|j| self.colonne(j)).collect();
        Matrice {
            lignes,
            colonnes: self.nb_lignes(),
        }
    }

    /// [A | b]
    pub fn augmentee(&self, b: &[Fraction]) -> Resultat<Matrice> {
        if b.len() != self.nb_lignes() {
            return Err(Erreur::DimensionsIncompatibles(format!(
                "A a {} lignes mais b a {} entrées",
                self.nb_lignes(),
                b.len()
            )));
        }
        let lignes = self
            .lignes
            .iter()
            .zip(b)
            .map(|(l, v)| {
                let mut l = l.clone();
                l.push(v.clone());
                l
            })
            .collect();
        Ok(Matrice {
            lignes,
            colonnes: self.colonnes + 1,
        })
    }

    /// [A | B] (ex: [A | I] pour l’inverse)
    pub fn juxtaposee(&self, droite: &Matrice) -> Resultat<Matrice> {
        if droite.nb_lignes() != self.nb_lignes() {
            return Err(Erreur::DimensionsIncompatibles(format!(
                "{} lignes contre {}",
                self.nb_lignes(),
                droite.nb_lignes()
            )));
        }
        let lignes = self
            .lignes
            .iter()
            .zip(&droite.lignes)
            .map(|(g, d)| g.iter().chain(d).cloned().collect())
            .collect();
        Ok(Matrice {
            lignes,
            colonnes: self.colonnes + droite.colonnes,
        })
    }

    /// Colonnes [debut, fin) ; appelant : debut < fin <= nb_colonnes.
    pub fn sous_matrice_colonnes(&self, debut: usize, fin: usize) -> Matrice {
        Matrice {
            lignes: self.lignes.iter().map(|l| l[debut..fin].to_vec()).collect(),
            colonnes: fin - debut,
        }
    }

    /// Copie où la colonne `j` est remplacée par `v` (règle de Cramer).
    pub fn remplacer_colonne(&self, j: usize, v: &[Fraction]) -> Matrice {
        let mut m = self.clone();
        for (l, x) in m.lignes.iter_mut().zip(v) {
            l[j] = x.clone();
        }
        m
    }

    /// Copie profonde pour la démarche.
    pub fn instantane(&self) -> Vec<Vec<Cellule>> {
        self.lignes
            .iter()
            .map(|l| l.iter().cloned().map(Cellule::Valeur).collect())
            .collect()
    }

    pub fn texte(&self, rendu: Rendu<'_>, separateur: Option<usize>) -> String {
        let textes: Vec<Vec<String>> = self
            .lignes
            .iter()
            .map(|l| l.iter().map(rendu).collect())
            .collect();
        format_grille(&textes, separateur)
    }
}

impl Index<(usize, usize)> for Matrice {
    type Output = Fraction;

    fn index(&self, (i, j): (usize, usize)) -> &Fraction {
        &self.lignes[i][j]
    }
}

impl IndexMut<(usize, usize)> for Matrice {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Fraction {
        &mut self.lignes[i][j]
    }
}

/* ------------------------ Lecture texte ------------------------ */

fn lignes_non_vides(texte: &str) -> impl Iterator<Item = (usize, &str)> {
    texte
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty())
}

/// Cellules séparées par des blancs (ou des virgules).
fn lire_cellules(ligne: &str) -> Resultat<Vec<Fraction>> {
    ligne
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(lire_fraction)
        .collect()
}

/// Grille simple : une ligne de texte par ligne de matrice.
///
/// ```text
/// 1 2 3
/// 4 5 1/2
/// ```
pub fn lire_matrice(texte: &str) -> Resultat<Matrice> {
    let lignes = lignes_non_vides(texte)
        .map(|(_, l)| lire_cellules(l))
        .collect::<Resultat<Vec<_>>>()?;
    Matrice::depuis_lignes(lignes)
}

/// Forme augmentée : chaque ligne contient un '|' suivi d’une seule valeur.
///
/// ```text
/// 1  2 | 5
/// 3 -1 | 4
/// ```
///
/// Rend la matrice [A | b] (b en dernière colonne).
pub fn lire_matrice_augmentee(texte: &str) -> Resultat<Matrice> {
    let mut lignes = Vec::new();
    for (num, l) in lignes_non_vides(texte) {
        let (gauche, droite) = l
            .split_once('|')
            .ok_or(Erreur::SeparateurManquant { ligne: num })?;

        let mut coeffs = lire_cellules(gauche)?;
        let b = lire_cellules(droite)?;
        if b.len() != 1 || coeffs.is_empty() {
            return Err(Erreur::SecondMembreInvalide { ligne: num });
        }
        coeffs.extend(b);
        lignes.push(coeffs);
    }
    Matrice::depuis_lignes(lignes)
}

/// Vecteur : valeurs séparées par des blancs, virgules ou retours à la ligne.
pub fn lire_vecteur(texte: &str) -> Resultat<Vec<Fraction>> {
    let v = lire_cellules(texte)?;
    if v.is_empty() {
        return Err(Erreur::EntreeVide);
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fr(n: i64, d: i64) -> Fraction {
        Fraction::new(n, d).unwrap()
    }

    #[test]
    fn construction_validee() {
        assert_eq!(Matrice::depuis_lignes(vec![]), Err(Erreur::EntreeVide));
        assert_eq!(
            Matrice::depuis_entiers(&[&[1, 2], &[3]]),
            Err(Erreur::MatriceIrreguliere)
        );
        let m = Matrice::depuis_entiers(&[&[1, 2, 3], &[4, 5, 6]]).unwrap();
        assert_eq!((m.nb_lignes(), m.nb_colonnes()), (2, 3));
        assert_eq!(m[(1, 2)], Fraction::entier(6));
    }

    #[test]
    fn operations_elementaires() {
        let mut m = Matrice::depuis_entiers(&[&[1, 2], &[3, 4]]).unwrap();
        m.echanger_lignes(0, 1);
        assert_eq!(m.ligne(0), &[Fraction::entier(3), Fraction::entier(4)]);
        m.multiplier_ligne(0, &fr(1, 3));
        assert_eq!(m.ligne(0), &[Fraction::un(), fr(4, 3)]);
        m.ajouter_multiple(1, 0, &Fraction::entier(-1));
        assert_eq!(m.ligne(1), &[Fraction::zero(), fr(2, 3)]);
    }

    #[test]
    fn transposee_et_augmentee() {
        let m = Matrice::depuis_entiers(&[&[1, 2, 3], &[4, 5, 6]]).unwrap();
        let t = m.transposee();
        assert_eq!(t, Matrice::depuis_entiers(&[&[1, 4], &[2, 5], &[3, 6]]).unwrap());

        let a = m.augmentee(&[Fraction::entier(7), Fraction::entier(8)]).unwrap();
        assert_eq!(a.nb_colonnes(), 4);
        assert_eq!(a.colonne(3), vec![Fraction::entier(7), Fraction::entier(8)]);
        assert!(matches!(
            m.augmentee(&[Fraction::un()]),
            Err(Erreur::DimensionsIncompatibles(_))
        ));
    }

    #[test]
    fn lecture_grille() {
        let m = lire_matrice("1 2 3\n\n 4 5 1/2 \n").unwrap();
        assert_eq!(m.ligne(1), &[Fraction::entier(4), Fraction::entier(5), fr(1, 2)]);
        assert_eq!(lire_matrice("1 2\n3"), Err(Erreur::MatriceIrreguliere));
        assert_eq!(lire_matrice("  \n "), Err(Erreur::EntreeVide));
        assert!(lire_matrice("1 x").is_err());
    }

    #[test]
    fn lecture_augmentee() {
        let m = lire_matrice_augmentee("1 2 | 5\n3 -1 | 4").unwrap();
        assert_eq!(m.colonne(2), vec![Fraction::entier(5), Fraction::entier(4)]);
        assert_eq!(
            lire_matrice_augmentee("1 2 | 5\n3 -1 4"),
            Err(Erreur::SeparateurManquant { ligne: 2 })
        );
        assert_eq!(
            lire_matrice_augmentee("1 2 | 5 6"),
            Err(Erreur::SecondMembreInvalide { ligne: 1 })
        );
    }

    #[test]
    fn rendu_texte() {
        let m = Matrice::depuis_lignes(vec![vec![fr(1, 2), Fraction::entier(-3)]]).unwrap();
        assert_eq!(m.texte(&|f: &Fraction| f.to_string(), None), "[ 1/2 -3 ]");
    }
}
