//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : contenir l’état de la calculatrice (mode, champs texte, résultats,
//! erreur, réglages d’affichage, démarche) et offrir des opérations simples
//! (CLR/AC) sans logique d’affichage.
//!
//! Contrats :
//! - Aucun calcul ici (pas de noyau, pas de parsing).
//! - Actions déterministes, sans effet de bord caché.
//! - Défense en profondeur : bornes sur les décimales.

use calculatrice_lineaire::noyau::format::DECIMALES_DEFAUT;
use calculatrice_lineaire::noyau::ModeRendu;

/// Garde-fou : on borne les décimales affichées.
pub const DECIMALES_MAX: usize = 30;

/// Opérations proposées dans la liste déroulante.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Expression,
    Gauss,
    GaussJordan,
    Homogene,
    Systeme,
    Somme,
    Produit,
    Scalaire,
    Transposee,
    Determinant,
    Inverse,
    Cramer,
}

impl Mode {
    pub const TOUS: [Mode; 12] = [
        Mode::Expression,
        Mode::Gauss,
        Mode::GaussJordan,
        Mode::Homogene,
        Mode::Systeme,
        Mode::Somme,
        Mode::Produit,
        Mode::Scalaire,
        Mode::Transposee,
        Mode::Determinant,
        Mode::Inverse,
        Mode::Cramer,
    ];

    pub fn libelle(self) -> &'static str {
        match self {
            Mode::Expression => "Expression",
            Mode::Gauss => "Gauss (forme échelonnée)",
            Mode::GaussJordan => "Gauss-Jordan (forme réduite)",
            Mode::Homogene => "Système homogène Ax = 0",
            Mode::Systeme => "Système d’équations",
            Mode::Somme => "Somme A + B",
            Mode::Produit => "Produit A·B",
            Mode::Scalaire => "Multiple scalaire k·A",
            Mode::Transposee => "Transposée",
            Mode::Determinant => "Déterminant",
            Mode::Inverse => "Inverse",
            Mode::Cramer => "Règle de Cramer",
        }
    }

    /// Aide affichée sous le champ A.
    pub fn aide_a(self) -> &'static str {
        match self {
            Mode::Expression => "Ex: (1/2 + 3)^2 - sqrt(2), sin(pi/6)",
            Mode::Gauss | Mode::GaussJordan | Mode::Cramer => {
                "Matrice augmentée, une ligne par équation : 1 2 | 5"
            }
            Mode::Systeme => "Ex: 2x + 3y = 5 ; x - y = 1/2",
            _ => "Matrice A : une ligne par rangée, valeurs séparées par des espaces",
        }
    }

    pub fn utilise_b(self) -> bool {
        matches!(self, Mode::Somme | Mode::Produit)
    }

    pub fn utilise_scalaire(self) -> bool {
        self == Mode::Scalaire
    }
}

/// Rendu des fractions choisi par l’utilisateur.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Affichage {
    Fraction,
    Decimal,
    Auto,
}

impl Affichage {
    pub fn libelle(self) -> &'static str {
        match self {
            Affichage::Fraction => "Fraction",
            Affichage::Decimal => "Décimal",
            Affichage::Auto => "Auto",
        }
    }
}

/// Un pas de démarche déjà mis en texte.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PasAffiche {
    pub titre: String,
    pub grille: String,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub mode: Mode,
    pub entree_a: String,
    pub entree_b: String,
    pub scalaire: String,

    // --- sorties ---
    pub resultat: String,
    pub lignes: Vec<String>,
    pub erreur: String,

    // --- démarche (panneau d’explication) ---
    pub pas: Vec<PasAffiche>,

    // --- paramètres ---
    pub affichage: Affichage,
    pub decimales: usize,
    pub enregistrer_pas: bool,

    // --- UX ---
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            mode: Mode::GaussJordan,
            entree_a: "1 2 | 5\n3 -1 | 4".to_string(),
            entree_b: String::new(),
            scalaire: "2".to_string(),
            resultat: String::new(),
            lignes: Vec::new(),
            erreur: String::new(),
            pas: Vec::new(),
            affichage: Affichage::Fraction,
            decimales: DECIMALES_DEFAUT,
            enregistrer_pas: true,
            focus_entree: true,
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrées + résultats + réglages par défaut).
    pub fn reset_total(&mut self) {
        let mode = self.mode;
        *self = Self {
            mode,
            entree_a: String::new(),
            ..Self::default()
        };
    }

    /// C : effacer seulement les entrées, k compris (sans toucher aux résultats).
    pub fn clear_entrees(&mut self) {
        self.entree_a.clear();
        self.entree_b.clear();
        self.scalaire.clear();
        self.focus_entree = true;
    }

    /// CLR : effacer résultats + erreur + démarche (sans toucher aux entrées).
    pub fn clear_resultats(&mut self) {
        self.resultat.clear();
        self.lignes.clear();
        self.erreur.clear();
        self.pas.clear();
        self.focus_entree = true;
    }

    /// Choix UX : on CONSERVE le dernier résultat, mais la démarche
    /// (non fiable si le calcul échoue) est effacée.
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.pas.clear();
        self.focus_entree = true;
    }

    pub fn set_resultats(
        &mut self,
        resultat: impl Into<String>,
        lignes: Vec<String>,
        pas: Vec<PasAffiche>,
    ) {
        self.erreur.clear();
        self.resultat = resultat.into();
        self.lignes = lignes;
        self.pas = pas;
        self.focus_entree = true;
    }

    pub fn set_decimales(&mut self, decimales: usize) {
        self.decimales = decimales.min(DECIMALES_MAX);
    }

    pub fn mode_rendu(&self) -> ModeRendu {
        match self.affichage {
            Affichage::Fraction => ModeRendu::Fraction,
            Affichage::Decimal => ModeRendu::Decimal(self.decimales),
            Affichage::Auto => ModeRendu::Auto(self.decimales),
        }
    }
}
