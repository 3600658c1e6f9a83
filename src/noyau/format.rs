// src/noyau/format.rs
//
// Rendu texte des fractions et des grilles (matrices / instantanés de pas).
// - Fraction : "n" si d = 1, sinon "n/d"
// - Decimal  : arrondi à k décimales, zéros finaux retirés
// - Auto     : décimal si le développement est fini (d = 2^a·5^b), sinon fraction

use num_bigint::BigInt;
use num_traits::{One, Zero};

use super::fraction::Fraction;
use super::lecture::{rational_scaled_arrondi, scaled_to_decimal};
use super::trace::Cellule;

/// Décimales par défaut du rendu décimal.
pub const DECIMALES_DEFAUT: usize = 6;

/// Décimales minimales en mode Auto (un développement fini s’affiche en entier).
const DECIMALES_AUTO_MIN: usize = 12;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModeRendu {
    #[default]
    Fraction,
    Decimal(usize),
    Auto(usize),
}

impl ModeRendu {
    pub fn rendre(self, f: &Fraction) -> String {
        match self {
            ModeRendu::Fraction => texte_fraction(f),
            ModeRendu::Decimal(k) => texte_decimal(f, k),
            ModeRendu::Auto(k) => {
                if decimal_fini(f.denom()) {
                    texte_decimal(f, k.max(DECIMALES_AUTO_MIN))
                } else {
                    texte_fraction(f)
                }
            }
        }
    }
}

/* ------------------------ Fractions ------------------------ */

pub fn texte_fraction(f: &Fraction) -> String {
    f.to_string()
}

/// Décimal arrondi à `decimales` chiffres, sans zéros finaux ni point final.
pub fn texte_decimal(f: &Fraction, decimales: usize) -> String {
    let digits = decimales as u32;
    let scaled = rational_scaled_arrondi(f.ratio(), digits);
    let mut s = scaled_to_decimal(scaled, digits);
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    s
}

/// Vrai si 1/d a un développement décimal fini (facteurs 2 et 5 seulement).
pub fn decimal_fini(d: &BigInt) -> bool {
    if d.is_zero() {
        return false;
    }
    let deux = BigInt::from(2);
    let cinq = BigInt::from(5);
    let mut d = d.clone();
    while (&d % &deux).is_zero() {
        d /= &deux;
    }
    while (&d % &cinq).is_zero() {
        d /= &cinq;
    }
    d.is_one() || d == BigInt::from(-1)
}

/* ------------------------ Grilles ------------------------ */

/// Rendu d’une cellule d’instantané avec la fonction de rendu de l’appelant.
pub fn texte_cellule(c: &Cellule, rendu: &dyn Fn(&Fraction) -> String) -> String {
    match c {
        Cellule::Valeur(f) => rendu(f),
        Cellule::Texte(t) => t.clone(),
    }
}

/// Grille alignée en colonnes. `separateur` : indice de colonne précédé d’un "|"
/// (matrices augmentées).
pub fn format_grille(
    lignes: &[Vec<String>],
    separateur: Option<usize>,
) -> String {
    let nb_col = lignes.iter().map(Vec::len).max().unwrap_or(0);
    let mut largeurs = vec![0usize; nb_col];
    for ligne in lignes {
        for (j, t) in ligne.iter().enumerate() {
            largeurs[j] = largeurs[j].max(t.chars().count());
        }
    }

    let mut out = String::new();
    for (i, ligne) in lignes.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push('[');
        for (j, t) in ligne.iter().enumerate() {
            if separateur == Some(j) {
                out.push_str(" |");
            }
            out.push(' ');
            let pad = largeurs[j] - t.chars().count();
            out.push_str(&" ".repeat(pad));
            out.push_str(t);
        }
        out.push_str(" ]");
    }
    out
}

pub fn format_cellules(
    cellules: &[Vec<Cellule>],
    separateur: Option<usize>,
    rendu: &dyn Fn(&Fraction) -> String,
) -> String {
    let textes: Vec<Vec<String>> = cellules
        .iter()
        .map(|l| l.iter().map(|c| texte_cellule(c, rendu)).collect())
        .collect();
    format_grille(&textes, separateur)
}
