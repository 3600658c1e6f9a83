// src/noyau/erreur.rs
//
// Taxonomie des erreurs du noyau.
// Toutes les erreurs sont levées au point de détection et propagées telles
// quelles (pas de reprise interne, pas de résultat partiel silencieux).

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Erreur {
    #[error("division par zéro")]
    DivisionParZero,

    #[error("opérande invalide : {0}")]
    OperandeInvalide(String),

    #[error("jeton non supporté : '{0}'")]
    JetonNonSupporte(String),

    #[error("opérateur non supporté : '{0}'")]
    OperateurNonSupporte(String),

    #[error("parenthèses non équilibrées")]
    ParenthesesDesequilibrees,

    #[error("l’exposant doit être un entier")]
    ExposantNonEntier,

    #[error("expression invalide")]
    ExpressionInvalide,

    #[error("entrée vide")]
    EntreeVide,

    #[error("ligne {ligne} : chaque équation doit contenir '='")]
    EgalManquant { ligne: usize },

    #[error("ligne {ligne} : une équation ne peut contenir qu’un seul '='")]
    EgalMultiple { ligne: usize },

    #[error("aucune variable détectée dans les équations")]
    AucuneVariable,

    #[error("dimensions incompatibles : {0}")]
    DimensionsIncompatibles(String),

    #[error("toutes les lignes doivent avoir le même nombre de colonnes")]
    MatriceIrreguliere,

    #[error("ligne {ligne} : il faut un '|' pour séparer A et b (ex: 1 2 | 5)")]
    SeparateurManquant { ligne: usize },

    #[error("ligne {ligne} : le second membre b doit être une seule valeur")]
    SecondMembreInvalide { ligne: usize },

    #[error("la matrice doit être carrée")]
    NonCarree,

    #[error("la matrice n’est pas inversible")]
    NonInversible,
}

pub type Resultat<T> = Result<T, Erreur>;
