// src/noyau/trace.rs
//
// Démarche pas à pas : chaque pas = (description, instantané de la matrice).
// Un instantané est une copie profonde : il n’aliase jamais la matrice de travail.

use super::format::texte_fraction;
use super::fraction::Fraction;
use super::matrice::Matrice;

/// Cellule d’instantané : valeur exacte, ou texte d’affichage
/// (ex: combinaison "(1)(5) + (2)(7)" en cours de calcul dans un produit).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Cellule {
    Valeur(Fraction),
    Texte(String),
}

/// Opération élémentaire sur les lignes (indices 0-based).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OperationLigne {
    /// Fi ↔ Fj
    Echange { i: usize, j: usize },
    /// Fi → facteur·Fi (facteur = 1/pivot)
    Echelle { ligne: usize, pivot: Fraction },
    /// Fcible → Fcible − facteur·Fsource
    Elimination {
        cible: usize,
        source: usize,
        facteur: Fraction,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pas {
    pub operation: String,
    pub cellules: Vec<Vec<Cellule>>,
    /// Colonne précédée d’une barre verticale à l’affichage (matrices augmentées).
    pub separateur: Option<usize>,
}

/// Fonction de rendu texte d’une fraction, fournie par l’appelant.
pub type Rendu<'a> = &'a dyn Fn(&Fraction) -> String;

/// Options communes à tous les algorithmes.
#[derive(Clone, Copy)]
pub struct Options<'a> {
    /// Faux : aucun instantané n’est construit (seul le résultat final est rendu).
    pub enregistrer_pas: bool,
    pub rendu: Rendu<'a>,
}

impl Default for Options<'static> {
    fn default() -> Self {
        Options {
            enregistrer_pas: false,
            rendu: &texte_fraction,
        }
    }
}

impl<'a> Options<'a> {
    pub fn avec_pas(rendu: Rendu<'a>) -> Self {
        Options {
            enregistrer_pas: true,
            rendu,
        }
    }

    pub fn texte(&self, f: &Fraction) -> String {
        (self.rendu)(f)
    }
}

impl std::fmt::Debug for Options<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Options")
            .field("enregistrer_pas", &self.enregistrer_pas)
            .finish_non_exhaustive()
    }
}

/// Journal de pas, inerte si l’enregistrement est désactivé.
#[derive(Debug, Default)]
pub struct Trace {
    pas: Option<Vec<Pas>>,
    separateur: Option<usize>,
}

impl Trace {
    pub fn new(enregistrer: bool) -> Self {
        Trace {
            pas: enregistrer.then(Vec::new),
            separateur: None,
        }
    }

    /// Trace d’une matrice augmentée : barre avant la colonne `col`.
    pub fn augmentee(enregistrer: bool, col: usize) -> Self {
        Trace {
            pas: enregistrer.then(Vec::new),
            separateur: Some(col),
        }
    }

    pub fn active(&self) -> bool {
        self.pas.is_some()
    }

    /// La description n’est construite que si la trace est active.
    pub fn noter<F>(&mut self, description: F, m: &Matrice)
    where
        F: FnOnce() -> String,
    {
        if let Some(pas) = self.pas.as_mut() {
            pas.push(Pas {
                operation: description(),
                cellules: m.instantane(),
                separateur: self.separateur,
            });
        }
    }

    pub fn noter_cellules<F>(&mut self, description: F, cellules: Vec<Vec<Cellule>>)
    where
        F: FnOnce() -> String,
    {
        if let Some(pas) = self.pas.as_mut() {
            pas.push(Pas {
                operation: description(),
                cellules,
                separateur: self.separateur,
            });
        }
    }

    /// Ajoute les pas d’une sous-trace (ex: réduction interne d’un déterminant).
    pub fn etendre(&mut self, autres: Option<Vec<Pas>>) {
        if let (Some(pas), Some(autres)) = (self.pas.as_mut(), autres) {
            pas.extend(autres);
        }
    }

    pub fn terminer(self) -> Option<Vec<Pas>> {
        self.pas
    }
}
