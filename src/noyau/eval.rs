//! Noyau: évaluation
//!
//! texte -> jetons -> RPN -> Fraction
//!
//! Le résultat est exact tant que l’expression n’appelle ni π, ni e, ni
//! fonction transcendante, ni racine non exacte.

use std::str::FromStr;

use super::erreur::{Erreur, Resultat};
use super::format::texte_decimal;
use super::fraction::{Fraction, PRECISION_DEFAUT};
use super::jetons::{format_tokens, lire_nombre, tokenize};
use super::rpn::{eval_rpn, format_rpn, to_rpn};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DemarcheNoyau {
    pub jetons: String,
    pub rpn: String,
    pub resultat: Fraction,
    pub decimal: String,
}

/// Évalue une expression (π, e, fonctions à `PRECISION_DEFAUT` décimales).
pub fn evaluer_expression(s: &str) -> Resultat<Fraction> {
    evaluer_expression_avec(s, PRECISION_DEFAUT)
}

pub fn evaluer_expression_avec(s: &str, precision: u32) -> Resultat<Fraction> {
    let s = s.trim();
    if s.is_empty() {
        return Err(Erreur::EntreeVide);
    }
    let jetons = tokenize(s)?;
    let rpn = to_rpn(&jetons)?;
    eval_rpn(&rpn, precision)
}

/// Même pipeline, mais garde chaque étape pour l’affichage.
pub fn demarche_expression(
    s: &str,
    precision: u32,
    decimales: usize,
) -> Resultat<DemarcheNoyau> {
    let s = s.trim();
    if s.is_empty() {
        return Err(Erreur::EntreeVide);
    }

    // 1) Jetons
    let jetons = tokenize(s)?;

    // 2) RPN
    let rpn = to_rpn(&jetons)?;

    // 3) Valeur
    let resultat = eval_rpn(&rpn, precision)?;

    Ok(DemarcheNoyau {
        jetons: format_tokens(&jetons),
        rpn: format_rpn(&rpn),
        decimal: texte_decimal(&resultat, decimales),
        resultat,
    })
}

/* ------------------------ Littéraux ------------------------ */

/// Nombre avec signe optionnel : "-3.25", "+4", ".5"
fn nombre_signe(s: &str) -> Option<Fraction> {
    let s = s.trim();
    let (negatif, corps) = match s.strip_prefix('-') {
        Some(reste) => (true, reste),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };
    let f = lire_nombre(corps.trim_start()).ok()?;
    Some(if negatif { -f } else { f })
}

/// Lit une valeur de cellule : entier, décimal, "a/b", ou expression complète
/// (tout autre texte passe par l’évaluateur).
pub fn lire_fraction(texte: &str) -> Resultat<Fraction> {
    let s = texte.trim();
    if s.is_empty() {
        return Err(Erreur::EntreeVide);
    }

    if let Some(f) = nombre_signe(s) {
        return Ok(f);
    }
    if let Some((a, b)) = s.split_once('/') {
        if let (Some(a), Some(b)) = (nombre_signe(a), nombre_signe(b)) {
            return a.diviser(&b);
        }
    }

    evaluer_expression(s)
}

impl FromStr for Fraction {
    type Err = Erreur;

    fn from_str(s: &str) -> Resultat<Self> {
        lire_fraction(s)
    }
}
