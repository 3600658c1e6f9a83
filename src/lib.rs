//! Calculatrice d’algèbre linéaire en fractions exactes.
//!
//! Le noyau (`noyau`) est indépendant de l’interface : l’application eframe
//! (binaire) ne fait que lire les champs texte, appeler le noyau et afficher.

pub mod noyau;
