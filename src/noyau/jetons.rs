// src/noyau/jetons.rs

use num_bigint::BigInt;

use super::erreur::{Erreur, Resultat};
use super::fraction::Fraction;
use super::lecture::pow10;

/// Fonctions unaires reconnues.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sqrt,
    Sin,
    Cos,
    Tan,
    Cot,
    Sec,
    Csc,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Ln,
    Log,
    Exp,
    Abs,
}

/// Liste blanche (nom -> fonction). Tout autre identifiant est refusé.
const FONCTIONS: &[(&str, Fonction)] = &[
    ("sqrt", Fonction::Sqrt),
    ("sin", Fonction::Sin),
    ("cos", Fonction::Cos),
    ("tan", Fonction::Tan),
    ("cot", Fonction::Cot),
    ("sec", Fonction::Sec),
    ("csc", Fonction::Csc),
    ("asin", Fonction::Asin),
    ("acos", Fonction::Acos),
    ("atan", Fonction::Atan),
    ("sinh", Fonction::Sinh),
    ("cosh", Fonction::Cosh),
    ("tanh", Fonction::Tanh),
    ("ln", Fonction::Ln),
    ("log", Fonction::Log),
    ("exp", Fonction::Exp),
    ("abs", Fonction::Abs),
];

impl Fonction {
    pub fn depuis_nom(nom: &str) -> Option<Fonction> {
        FONCTIONS.iter().find(|(n, _)| *n == nom).map(|(_, f)| *f)
    }

    pub fn nom(self) -> &'static str {
        FONCTIONS
            .iter()
            .find(|(_, f)| *f == self)
            .map(|(n, _)| *n)
            .unwrap_or("?")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Constante {
    Pi,
    E,
}

impl Constante {
    pub fn depuis_nom(nom: &str) -> Option<Constante> {
        match nom {
            "pi" => Some(Constante::Pi),
            "e" => Some(Constante::E),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tok {
    Num(Fraction),
    Const(Constante),
    Fonc(Fonction),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^

    LPar,
    RPar,
}

/// Unifie les symboles usuels en ASCII : × ÷ − √ π **
pub fn normaliser_entree(s: &str) -> String {
    s.replace('×', "*")
        .replace('÷', "/")
        .replace('−', "-")
        .replace('√', "sqrt")
        .replace('π', "pi")
        .replace("**", "^")
}

/// Nombre décimal ou entier (sans signe) -> fraction exacte. ".5" vaut "0.5".
pub fn lire_nombre(texte: &str) -> Resultat<Fraction> {
    let refus = || Erreur::JetonNonSupporte(texte.to_string());

    let (entier, decimales) = match texte.split_once('.') {
        Some((e, d)) => (e, d),
        None => (texte, ""),
    };
    if entier.is_empty() && decimales.is_empty() {
        return Err(refus());
    }
    if !entier.chars().all(|c| c.is_ascii_digit()) || !decimales.chars().all(|c| c.is_ascii_digit())
    {
        return Err(refus());
    }

    let chiffres = format!("{}{}", if entier.is_empty() { "0" } else { entier }, decimales);
    let n = BigInt::parse_bytes(chiffres.as_bytes(), 10).ok_or_else(refus)?;
    Fraction::new(n, pow10(decimales.len() as u32))
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - entiers et décimaux (ex: 12, 3.25, .5)
/// - opérateurs + - * / ^
/// - parenthèses ( )
/// - constantes pi, e
/// - fonctions de la liste blanche (insensibles à la casse)
///
/// Pas de multiplication implicite : "2pi" donne deux jetons consécutifs,
/// refusés ensuite à l’évaluation.
pub fn tokenize(s: &str) -> Resultat<Vec<Tok>> {
    let norm = normaliser_entree(s);
    let chars: Vec<char> = norm.chars().collect();
    let mut out = Vec::new();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            '+' => Some(Tok::Plus),
            '-' => Some(Tok::Minus),
            '*' => Some(Tok::Star),
            '/' => Some(Tok::Slash),
            '^' => Some(Tok::Caret),
            _ => None,
        };
        if let Some(t) = simple {
            out.push(t);
            i += 1;
            continue;
        }

        // Identifiants ASCII : [a-zA-Z][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            let w = word.to_lowercase();

            if let Some(k) = Constante::depuis_nom(&w) {
                out.push(Tok::Const(k));
            } else if let Some(f) = Fonction::depuis_nom(&w) {
                out.push(Tok::Fonc(f));
            } else {
                return Err(Erreur::JetonNonSupporte(word));
            }
            continue;
        }

        // Nombre entier ou décimal
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let texte: String = chars[start..i].iter().collect();
            out.push(Tok::Num(lire_nombre(&texte)?));
            continue;
        }

        if c.is_ascii_punctuation() {
            return Err(Erreur::OperateurNonSupporte(c.to_string()));
        }
        return Err(Erreur::JetonNonSupporte(c.to_string()));
    }

    Ok(out)
}

/// Format utilitaire (démarche) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    tokens
        .iter()
        .map(|t| match t {
            Tok::Num(r) => r.to_string(),
            Tok::Const(Constante::Pi) => "π".to_string(),
            Tok::Const(Constante::E) => "e".to_string(),
            Tok::Fonc(f) => f.nom().to_string(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
