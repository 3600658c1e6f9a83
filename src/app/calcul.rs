//! src/app/calcul.rs
//!
//! Pont pur entre l’UI et le noyau : (mode, champs texte, réglages) -> texte rendu.
//!
//! Rôle :
//! - appliquer les bornes d’entrée (taille des champs, dimensions des matrices)
//! - appeler le noyau avec le rendu choisi
//! - mettre la démarche en texte (grilles alignées)
//! - journaliser (le noyau, lui, ne journalise jamais)
//!
//! Aucune dépendance à egui : testable tel quel.

use log::{debug, info, warn};

use calculatrice_lineaire::noyau::algebre::{
    cramer, determinant, inverse, multiplier_scalaire, produit, somme, transposee,
};
use calculatrice_lineaire::noyau::format::format_cellules;
use calculatrice_lineaire::noyau::{
    analyser_homogene, demarche_expression, lire_fraction, lire_matrice, lire_matrice_augmentee,
    parser_systeme, resoudre_gauss, resoudre_gauss_jordan, resoudre_systeme, Classification,
    Erreur, Fraction, Homogene, Matrice, ModeRendu, Options, Pas, Resolution, PRECISION_DEFAUT,
};

use super::etat::{Mode, PasAffiche};

/// Garde-fou : taille max d’un champ texte.
pub const ENTREE_MAX: usize = 4000;
/// Garde-fou : dimensions max d’une matrice (hors colonne b).
pub const DIM_MAX: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErreurCalcul {
    #[error(transparent)]
    Noyau(#[from] Erreur),
    #[error("Entrée trop longue : {champ} dépasse {max} caractères")]
    EntreeTropLongue { champ: &'static str, max: usize },
    #[error("Matrice trop grande : {lignes}×{colonnes} (max {max}×{max})")]
    MatriceTropGrande {
        lignes: usize,
        colonnes: usize,
        max: usize,
    },
}

/// Ce que l’UI demande.
#[derive(Clone, Copy, Debug)]
pub struct Requete<'a> {
    pub mode: Mode,
    pub a: &'a str,
    pub b: &'a str,
    pub scalaire: &'a str,
    pub rendu: ModeRendu,
    pub decimales: usize,
    pub enregistrer_pas: bool,
}

/// Ce que l’UI affiche.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sortie {
    pub resultat: String,
    pub lignes: Vec<String>,
    pub pas: Vec<PasAffiche>,
}

pub fn calculer(req: &Requete<'_>) -> Result<Sortie, ErreurCalcul> {
    info!("calcul demandé : {:?}", req.mode);
    let sortie = executer(req);
    match &sortie {
        Ok(s) => debug!("{:?} : {} pas enregistrés", req.mode, s.pas.len()),
        Err(e) => warn!("{:?} : {e}", req.mode),
    }
    sortie
}

fn executer(req: &Requete<'_>) -> Result<Sortie, ErreurCalcul> {
    borner_texte("A", req.a)?;
    borner_texte("B", req.b)?;
    borner_texte("k", req.scalaire)?;

    let mode_rendu = req.rendu;
    let rendu = move |f: &Fraction| mode_rendu.rendre(f);
    let options = Options {
        enregistrer_pas: req.enregistrer_pas,
        rendu: &rendu,
    };

    let sortie = match req.mode {
        Mode::Expression => {
            let d = demarche_expression(req.a, PRECISION_DEFAUT, req.decimales)?;
            Sortie {
                resultat: options.texte(&d.resultat),
                lignes: vec![
                    format!("Jetons : {}", d.jetons),
                    format!("RPN : {}", d.rpn),
                    format!("Exact : {}", d.resultat),
                    format!("Décimal : {}", d.decimal),
                ],
                pas: Vec::new(),
            }
        }

        Mode::Gauss | Mode::GaussJordan | Mode::Cramer => {
            let m = lire_matrice_augmentee(req.a)?;
            borner_matrice(&m, 1)?;
            if req.mode == Mode::Cramer {
                let n = m.nb_colonnes() - 1;
                let a = m.sous_matrice_colonnes(0, n);
                info!("Cramer sur A {}×{}", a.nb_lignes(), n);
                let r = cramer(&a, &m.colonne(n), options)?;
                let lignes = r
                    .solution
                    .iter()
                    .enumerate()
                    .map(|(i, x)| format!("x{} = {}", i + 1, options.texte(x)))
                    .collect();
                Sortie {
                    resultat: format!("det(A) = {}", options.texte(&r.determinant)),
                    lignes,
                    pas: mettre_en_texte(r.pas, &rendu),
                }
            } else {
                info!("réduction de [A | b] {}×{}", m.nb_lignes(), m.nb_colonnes());
                let r = if req.mode == Mode::Gauss {
                    resoudre_gauss(&m, None, options)?
                } else {
                    resoudre_gauss_jordan(&m, None, options)?
                };
                rapport(r, options, &rendu)
            }
        }

        Mode::Systeme => {
            let s = parser_systeme(req.a)?;
            borner_matrice(&s.a, 0)?;
            info!(
                "système : {} équations, inconnues {:?}",
                s.a.nb_lignes(),
                s.variables
            );
            rapport(resoudre_systeme(&s, options)?, options, &rendu)
        }

        Mode::Homogene => {
            let a = matrice(req.a)?;
            let analyse = analyser_homogene(&a, options)?;
            let verdict = match &analyse.verdict {
                Homogene::Triviale => "Solution triviale uniquement (colonnes indépendantes)",
                Homogene::NonTriviale { .. } => {
                    "Solutions non triviales (colonnes dépendantes)"
                }
            };
            let mut sortie = rapport(analyse.resolution, options, &rendu);
            sortie.resultat = verdict.to_string();
            sortie
        }

        Mode::Somme | Mode::Produit => {
            let a = matrice(req.a)?;
            let b = matrice(req.b)?;
            info!(
                "{:?} : A {}×{}, B {}×{}",
                req.mode,
                a.nb_lignes(),
                a.nb_colonnes(),
                b.nb_lignes(),
                b.nb_colonnes()
            );
            let r = if req.mode == Mode::Somme {
                somme(&a, &b, options)?
            } else {
                produit(&a, &b, options)?
            };
            sortie_matrice(&r.matrice, r.pas, &rendu)
        }

        Mode::Scalaire => {
            let k = lire_fraction(req.scalaire)?;
            let a = matrice(req.a)?;
            let r = multiplier_scalaire(&k, &a, options);
            sortie_matrice(&r.matrice, r.pas, &rendu)
        }

        Mode::Transposee => {
            let a = matrice(req.a)?;
            let r = transposee(&a, options);
            sortie_matrice(&r.matrice, r.pas, &rendu)
        }

        Mode::Determinant => {
            let a = matrice(req.a)?;
            let r = determinant(&a, options)?;
            Sortie {
                resultat: format!("det(A) = {}", options.texte(&r.valeur)),
                lignes: Vec::new(),
                pas: mettre_en_texte(r.pas, &rendu),
            }
        }

        Mode::Inverse => {
            let a = matrice(req.a)?;
            let r = inverse(&a, options)?;
            sortie_matrice(&r.matrice, r.pas, &rendu)
        }
    };

    Ok(sortie)
}

/* ------------------------ Bornes ------------------------ */

fn borner_texte(champ: &'static str, texte: &str) -> Result<(), ErreurCalcul> {
    if texte.chars().count() > ENTREE_MAX {
        return Err(ErreurCalcul::EntreeTropLongue {
            champ,
            max: ENTREE_MAX,
        });
    }
    Ok(())
}

/// `extra` : colonnes tolérées en plus (colonne b d’une matrice augmentée).
fn borner_matrice(m: &Matrice, extra: usize) -> Result<(), ErreurCalcul> {
    if m.nb_lignes() > DIM_MAX || m.nb_colonnes() > DIM_MAX + extra {
        return Err(ErreurCalcul::MatriceTropGrande {
            lignes: m.nb_lignes(),
            colonnes: m.nb_colonnes(),
            max: DIM_MAX,
        });
    }
    Ok(())
}

fn matrice(texte: &str) -> Result<Matrice, ErreurCalcul> {
    let m = lire_matrice(texte)?;
    borner_matrice(&m, 0)?;
    Ok(m)
}

/* ------------------------ Mise en texte ------------------------ */

fn mettre_en_texte(pas: Option<Vec<Pas>>, rendu: &dyn Fn(&Fraction) -> String) -> Vec<PasAffiche> {
    pas.unwrap_or_default()
        .into_iter()
        .map(|p| PasAffiche {
            grille: format_cellules(&p.cellules, p.separateur, rendu),
            titre: p.operation,
        })
        .collect()
}

fn sortie_matrice(
    m: &Matrice,
    pas: Option<Vec<Pas>>,
    rendu: &dyn Fn(&Fraction) -> String,
) -> Sortie {
    Sortie {
        resultat: m.texte(rendu, None),
        lignes: Vec::new(),
        pas: mettre_en_texte(pas, rendu),
    }
}

fn rapport(r: Resolution, options: Options<'_>, rendu: &dyn Fn(&Fraction) -> String) -> Sortie {
    let resultat = match r.classification {
        Classification::Unique { .. } => "Solution unique",
        Classification::Infinie { .. } => "Infinité de solutions",
        Classification::Incoherente { .. } => "Système incohérent (aucune solution)",
    };

    let mut lignes = r.lignes(options);
    let pivots = r.pivots_noms();
    lignes.push(if pivots.is_empty() {
        "Aucune colonne pivot".to_string()
    } else {
        format!("Colonnes pivots : {}", pivots.join(", "))
    });
    if r.homogene {
        lignes.push("Système homogène (b = 0)".to_string());
    }

    Sortie {
        resultat: resultat.to_string(),
        lignes,
        pas: mettre_en_texte(r.reduction.pas, rendu),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requete(mode: Mode, a: &str) -> Requete<'_> {
        Requete {
            mode,
            a,
            b: "",
            scalaire: "",
            rendu: ModeRendu::Fraction,
            decimales: 6,
            enregistrer_pas: true,
        }
    }

    #[test]
    fn expression_exacte_et_decimale() {
        let s = calculer(&requete(Mode::Expression, "1/3 + 1/6")).unwrap();
        assert_eq!(s.resultat, "1/2");
        assert!(s.lignes.contains(&"Décimal : 0.5".to_string()), "{:?}", s.lignes);
        assert!(s.pas.is_empty());
    }

    #[test]
    fn gauss_jordan_avec_demarche() {
        let s = calculer(&requete(Mode::GaussJordan, "1 2 | 5\n3 -1 | 4")).unwrap();
        assert_eq!(s.resultat, "Solution unique");
        assert_eq!(s.lignes[0], "x1 = 13/7");
        assert_eq!(s.lignes[1], "x2 = 11/7");
        assert_eq!(s.pas.first().map(|p| p.titre.as_str()), Some("Matrice de départ"));
        assert!(s.pas.iter().all(|p| p.grille.contains('|')));
    }

    #[test]
    fn systeme_noms_conserves() {
        let s = calculer(&requete(Mode::Systeme, "x + y + z = 1\nx - y = 0")).unwrap();
        assert_eq!(s.resultat, "Infinité de solutions");
        assert!(s.lignes.iter().any(|l| l == "z libre"), "{:?}", s.lignes);
        assert!(s.lignes.iter().any(|l| l == "Colonnes pivots : x, y"));
    }

    #[test]
    fn sans_demarche_aucun_pas() {
        let mut req = requete(Mode::Inverse, "1 2\n3 4");
        req.enregistrer_pas = false;
        let s = calculer(&req).unwrap();
        assert!(s.pas.is_empty());
        assert!(s.resultat.contains("-2"), "{}", s.resultat);
    }

    #[test]
    fn rendu_decimal() {
        let mut req = requete(Mode::Determinant, "1 2\n3 4");
        req.rendu = ModeRendu::Decimal(2);
        assert_eq!(calculer(&req).unwrap().resultat, "det(A) = -2");

        let mut req = requete(Mode::Expression, "1/3");
        req.rendu = ModeRendu::Decimal(2);
        assert_eq!(calculer(&req).unwrap().resultat, "0.33");
    }

    #[test]
    fn produit_et_scalaire() {
        let mut req = requete(Mode::Produit, "1 2\n3 4");
        req.b = "5\n7";
        let s = calculer(&req).unwrap();
        assert_eq!(s.resultat, "[ 19 ]\n[ 43 ]");

        let mut req = requete(Mode::Scalaire, "1 2");
        req.scalaire = "1/2";
        assert_eq!(calculer(&req).unwrap().resultat, "[ 1/2 1 ]");
    }

    #[test]
    fn cramer_depuis_augmentee() {
        let s = calculer(&requete(Mode::Cramer, "2 1 -1 | 8\n-3 -1 2 | -11\n-2 1 2 | -3")).unwrap();
        assert_eq!(s.lignes, vec!["x1 = 2", "x2 = 3", "x3 = -1"]);
    }

    #[test]
    fn homogene_verdict() {
        let s = calculer(&requete(Mode::Homogene, "1 2 3\n2 4 6")).unwrap();
        assert!(s.resultat.starts_with("Solutions non triviales"));
        assert!(s.lignes.iter().any(|l| l.contains("homogène")));
    }

    #[test]
    fn bornes_appliquees() {
        let long = "1".repeat(ENTREE_MAX + 1);
        assert_eq!(
            calculer(&requete(Mode::Expression, &long)),
            Err(ErreurCalcul::EntreeTropLongue {
                champ: "A",
                max: ENTREE_MAX
            })
        );

        let ligne = vec!["1"; DIM_MAX + 1].join(" ");
        assert!(matches!(
            calculer(&requete(Mode::Transposee, &ligne)),
            Err(ErreurCalcul::MatriceTropGrande { .. })
        ));
    }

    #[test]
    fn puissance_geante_refusee() {
        // texte court, résultat démesuré : refusé avant le calcul
        assert!(matches!(
            calculer(&requete(Mode::Expression, "9^999999999")),
            Err(ErreurCalcul::Noyau(Erreur::OperandeInvalide(_)))
        ));
        assert!(matches!(
            calculer(&requete(Mode::Systeme, "2^999999 x = 1")),
            Err(ErreurCalcul::Noyau(Erreur::OperandeInvalide(_)))
        ));
    }

    #[test]
    fn erreurs_du_noyau_transmises() {
        assert_eq!(
            calculer(&requete(Mode::Expression, "1/0")),
            Err(ErreurCalcul::Noyau(Erreur::DivisionParZero))
        );
        assert_eq!(
            calculer(&requete(Mode::Inverse, "1 2\n2 4")),
            Err(ErreurCalcul::Noyau(Erreur::NonInversible))
        );
    }
}
