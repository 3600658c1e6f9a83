//! Noyau exact : fractions, expressions, systèmes linéaires
//!
//! Organisation interne :
//! - erreur.rs    : taxonomie des erreurs
//! - fraction.rs  : rationnel exact en grands entiers
//! - lecture.rs   : décimal “scalé” (π, e, √ approchée, réel -> fraction)
//! - format.rs    : rendu fraction / décimal / auto + grilles
//! - jetons.rs    : tokenisation
//! - rpn.rs       : shunting-yard + évaluation postfixée
//! - eval.rs      : pipeline complet + lecture des littéraux
//! - matrice.rs   : matrice de fractions + lecture texte
//! - trace.rs     : démarche pas à pas
//! - systeme.rs   : équations -> A, b
//! - reduction.rs : Gauss / Gauss-Jordan
//! - solution.rs  : classification, expressions paramétriques, homogène
//! - algebre.rs   : somme, produit, transposée, déterminant, inverse, Cramer
//!
//! Le noyau est pur : ni état partagé, ni journalisation, ni E/S.

pub mod algebre;
pub mod erreur;
pub mod eval;
pub mod format;
pub mod fraction;
pub mod jetons;
pub mod lecture;
pub mod matrice;
pub mod reduction;
pub mod rpn;
pub mod solution;
pub mod systeme;
pub mod trace;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique
pub use erreur::{Erreur, Resultat};
pub use eval::{demarche_expression, evaluer_expression, evaluer_expression_avec, lire_fraction};
pub use format::ModeRendu;
pub use fraction::{Fraction, PRECISION_DEFAUT};
pub use matrice::{lire_matrice, lire_matrice_augmentee, lire_vecteur, Matrice};
pub use reduction::{gauss, gauss_jordan, Forme, Reduction};
pub use solution::{
    analyser_homogene, resoudre_gauss, resoudre_gauss_jordan, resoudre_systeme, Classification,
    Homogene, Resolution,
};
pub use systeme::{parser_systeme, Systeme};
pub use trace::{Cellule, Options, Pas};
