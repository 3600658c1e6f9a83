// src/noyau/systeme.rs
//
// Système d’équations (texte) -> A, b
//
//   2x + 3y = 5
//   x - y = 1/2 ; 3z = pi
//
// Chaque côté est découpé en termes au niveau 0 des parenthèses. Un terme est
// un coefficient (évalué par le noyau d’expressions) suivi d’un identifiant
// optionnel. Les équations sont ramenées à la forme Σ coeff·var = b.

use std::collections::{BTreeMap, BTreeSet};

use super::erreur::{Erreur, Resultat};
use super::eval::lire_fraction;
use super::fraction::Fraction;
use super::jetons::{normaliser_entree, Constante, Fonction};
use super::matrice::Matrice;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Systeme {
    /// Noms triés (ordre lexicographique) ; colonne j de `a` = variables[j].
    pub variables: Vec<String>,
    pub a: Matrice,
    pub b: Vec<Fraction>,
}

impl Systeme {
    /// [A | b]
    pub fn augmentee(&self) -> Resultat<Matrice> {
        self.a.augmentee(&self.b)
    }
}

/// Un côté d’équation, déjà réduit : coefficients par variable + constante.
#[derive(Default)]
struct Cote {
    coeffs: BTreeMap<String, Fraction>,
    constante: Fraction,
}

enum Terme {
    Variable(String, Fraction),
    Constante(Fraction),
}

pub fn parser_systeme(texte: &str) -> Resultat<Systeme> {
    let texte = normaliser_entree(texte);
    let equations: Vec<&str> = texte
        .split(['\n', ';'])
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if equations.is_empty() {
        return Err(Erreur::EntreeVide);
    }

    let mut noms: BTreeSet<String> = BTreeSet::new();
    let mut lignes: Vec<(BTreeMap<String, Fraction>, Fraction)> = Vec::new();

    for (k, eq) in equations.iter().enumerate() {
        let num = k + 1;
        let mut cotes = eq.split('=');
        let (gauche, droite) = match (cotes.next(), cotes.next(), cotes.next()) {
            (Some(g), Some(d), None) => (g, d),
            (_, None, _) => return Err(Erreur::EgalManquant { ligne: num }),
            _ => return Err(Erreur::EgalMultiple { ligne: num }),
        };

        let g = lire_cote(gauche)?;
        let d = lire_cote(droite)?;

        // gauche - droite = 0  =>  Σ (cg - cd)·v = kd - kg
        let mut coeffs = g.coeffs;
        for (v, c) in d.coeffs {
            let e = coeffs.entry(v).or_insert_with(Fraction::zero);
            *e = &*e - &c;
        }
        noms.extend(coeffs.keys().cloned());
        lignes.push((coeffs, d.constante - g.constante));
    }

    if noms.is_empty() {
        return Err(Erreur::AucuneVariable);
    }

    let variables: Vec<String> = noms.into_iter().collect();
    let mut rangees = Vec::with_capacity(lignes.len());
    let mut b = Vec::with_capacity(lignes.len());
    for (coeffs, constante) in lignes {
        rangees.push(
            variables
                .iter()
                .map(|v| coeffs.get(v).cloned().unwrap_or_else(Fraction::zero))
                .collect(),
        );
        b.push(constante);
    }

    Ok(Systeme {
        variables,
        a: Matrice::depuis_lignes(rangees)?,
        b,
    })
}

fn lire_cote(cote: &str) -> Resultat<Cote> {
    let mut out = Cote::default();
    for (signe, texte) in decouper_termes(cote)? {
        match lire_terme(&texte)? {
            Terme::Variable(v, c) => {
                let c = if signe < 0 { -c } else { c };
                let e = out.coeffs.entry(v).or_insert_with(Fraction::zero);
                *e = &*e + &c;
            }
            Terme::Constante(c) => {
                let c = if signe < 0 { -c } else { c };
                out.constante = &out.constante + &c;
            }
        }
    }
    Ok(out)
}

/// Découpe aux '+'/'-' du niveau 0. Un signe qui suit `* / ^ (` appartient au
/// coefficient. Les signes consécutifs se multiplient ; un terme vide vaut 0.
fn decouper_termes(cote: &str) -> Resultat<Vec<(i8, String)>> {
    let mut termes = Vec::new();
    let mut courant = String::new();
    let mut signe: i8 = 1;
    let mut profondeur: i32 = 0;

    for c in cote.chars() {
        match c {
            '(' => {
                profondeur += 1;
                courant.push(c);
            }
            ')' => {
                profondeur -= 1;
                if profondeur < 0 {
                    return Err(Erreur::ParenthesesDesequilibrees);
                }
                courant.push(c);
            }
            '+' | '-' if profondeur == 0 && !signe_interne(&courant) => {
                if !courant.trim().is_empty() {
                    termes.push((signe, std::mem::take(&mut courant)));
                    signe = 1;
                }
                courant.clear();
                if c == '-' {
                    signe = -signe;
                }
            }
            _ => courant.push(c),
        }
    }

    if profondeur != 0 {
        return Err(Erreur::ParenthesesDesequilibrees);
    }
    if !courant.trim().is_empty() {
        termes.push((signe, courant));
    }
    Ok(termes)
}

fn signe_interne(courant: &str) -> bool {
    matches!(
        courant.trim_end().chars().last(),
        Some('*' | '/' | '^' | '(')
    )
}

fn lire_terme(terme: &str) -> Resultat<Terme> {
    let terme = terme.trim();

    // suffixe [A-Za-z0-9_]* ; l’identifiant commence à sa première lettre
    let debut_suffixe = terme
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_alphanumeric() || *c == '_')
        .last()
        .map(|(i, _)| i)
        .unwrap_or(terme.len());
    let debut_ident = terme[debut_suffixe..]
        .find(|c: char| c.is_ascii_alphabetic())
        .map(|i| debut_suffixe + i);

    let Some(debut_ident) = debut_ident else {
        return Ok(Terme::Constante(lire_fraction(terme)?));
    };

    let ident = &terme[debut_ident..];
    let coeff = lire_coefficient(&terme[..debut_ident])?;

    // "2pi" : constante, pas variable. Sensible à la casse : "E" reste une variable.
    if Constante::depuis_nom(ident).is_some() {
        return Ok(Terme::Constante(coeff * lire_fraction(ident)?));
    }
    if Fonction::depuis_nom(ident).is_some() {
        // nom de fonction sans argument : ni variable ni coefficient
        return Err(Erreur::JetonNonSupporte(ident.to_string()));
    }

    Ok(Terme::Variable(ident.to_string(), coeff))
}

/// Coefficient devant une variable : vide => 1, '*' final ignoré,
/// signe final ("2*-x") => ±1, constante finale ("2pi x") => facteur.
fn lire_coefficient(texte: &str) -> Resultat<Fraction> {
    let mut t = texte.trim();
    if let Some(sans) = t.strip_suffix('*') {
        t = sans.trim_end();
    }
    if t.is_empty() {
        return Ok(Fraction::un());
    }
    if t.ends_with(['+', '-']) {
        return lire_fraction(&format!("{t}1"));
    }

    // constante finale : "2pi", "3/4 e"
    let debut_mot = t
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_alphabetic())
        .last()
        .map(|(i, _)| i);
    if let Some(i) = debut_mot {
        let (avant, mot) = t.split_at(i);
        if Constante::depuis_nom(mot).is_some() {
            return Ok(lire_coefficient(avant)? * lire_fraction(mot)?);
        }
    }
    lire_fraction(t)
}
