// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> valeur exacte (Fraction)
//
// Précédences (de la plus forte à la plus faible) :
//   NegHaute (5) : moins unaire juste après '^'      => 2^-3 = 2^(-3)
//   fonctions (4)
//   '^' (3, associatif à droite)
//   '*' '/' et Neg (2, Neg associatif à droite)      => -3^2 = -(3^2)
//   '+' '-' (1)
//
// Les fonctions restent “collées” à leur argument : elles sortent de la pile
// à la parenthèse fermante (ou par précédence si l’argument n’est pas parenthésé).

use num_traits::ToPrimitive;

use super::erreur::{Erreur, Resultat};
use super::fraction::Fraction;
use super::jetons::{format_tokens, Constante, Fonction, Tok};
use super::lecture::{depuis_reel, e_scaled, pi_scaled, pow10};

/// Élément de la suite postfixée.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Postfixe {
    Num(Fraction),
    Const(Constante),
    Op(Op),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Plus,
    Moins,
    Fois,
    Div,
    Puiss,
    Neg,
    NegHaute,
    Fonc(Fonction),
}

/// Entrée de la pile d’opérateurs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pile {
    Op(Op),
    LPar,
}

fn precedence(op: Op) -> i32 {
    match op {
        Op::NegHaute => 5,
        Op::Fonc(_) => 4,
        Op::Puiss => 3,
        Op::Fois | Op::Div | Op::Neg => 2,
        Op::Plus | Op::Moins => 1,
    }
}

fn is_right_associative(op: Op) -> bool {
    matches!(op, Op::Puiss | Op::Neg)
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Fonc(sin), LPar, Pi, Slash, Num(2), RPar]
///   rpn:    [Pi, Num(2), Div, Fonc(sin)]
pub fn to_rpn(tokens: &[Tok]) -> Resultat<Vec<Postfixe>> {
    let mut out: Vec<Postfixe> = Vec::new();
    let mut ops: Vec<Pile> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    // Sert à détecter le moins unaire.
    let mut prev_was_value = false;

    for tok in tokens {
        match tok {
            Tok::Num(r) => {
                out.push(Postfixe::Num(r.clone()));
                prev_was_value = true;
            }
            Tok::Const(k) => {
                out.push(Postfixe::Const(*k));
                prev_was_value = true;
            }

            Tok::Fonc(f) => {
                // fonction : on la garde sur la pile (elle sortira après son argument)
                ops.push(Pile::Op(Op::Fonc(*f)));
                prev_was_value = false;
            }

            Tok::LPar => {
                ops.push(Pile::LPar);
                prev_was_value = false;
            }

            Tok::RPar => {
                // dépile jusqu’à '('
                loop {
                    match ops.pop() {
                        Some(Pile::LPar) => break,
                        Some(Pile::Op(op)) => out.push(Postfixe::Op(op)),
                        None => return Err(Erreur::ParenthesesDesequilibrees),
                    }
                }

                // si une fonction est au sommet, on la sort aussi
                if let Some(Pile::Op(Op::Fonc(f))) = ops.last().copied() {
                    ops.pop();
                    out.push(Postfixe::Op(Op::Fonc(f)));
                }

                prev_was_value = true;
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                let op = match tok {
                    Tok::Minus if !prev_was_value => {
                        // moins unaire ; juste après '^' il porte sur l’exposant
                        if ops.last() == Some(&Pile::Op(Op::Puiss)) {
                            Op::NegHaute
                        } else {
                            Op::Neg
                        }
                    }
                    Tok::Plus if !prev_was_value => {
                        // plus unaire : neutre
                        continue;
                    }
                    Tok::Plus => Op::Plus,
                    Tok::Minus => Op::Moins,
                    Tok::Star => Op::Fois,
                    Tok::Slash => Op::Div,
                    _ => Op::Puiss,
                };

                // un opérateur unaire préfixe ne fait rien sortir de la pile
                if !matches!(op, Op::Neg | Op::NegHaute) {
                    while let Some(Pile::Op(top)) = ops.last().copied() {
                        let p_top = precedence(top);
                        let p_op = precedence(op);
                        let doit_pop = p_top > p_op || (p_top == p_op && !is_right_associative(op));
                        if !doit_pop {
                            break;
                        }
                        ops.pop();
                        out.push(Postfixe::Op(top));
                    }
                }

                ops.push(Pile::Op(op));
                prev_was_value = false;
            }
        }
    }

    // vide la pile ops
    while let Some(p) = ops.pop() {
        match p {
            Pile::LPar => return Err(Erreur::ParenthesesDesequilibrees),
            Pile::Op(op) => out.push(Postfixe::Op(op)),
        }
    }

    Ok(out)
}

/// Évalue une RPN sur une pile de fractions.
///
/// π, e, √ non exactes et fonctions transcendantes sont approchées à
/// `precision` décimales (dénominateur 10^precision) : seul endroit où
/// l’exactitude est sacrifiée.
pub fn eval_rpn(rpn: &[Postfixe], precision: u32) -> Resultat<Fraction> {
    let mut st: Vec<Fraction> = Vec::new();

    for item in rpn {
        match item {
            Postfixe::Num(r) => st.push(r.clone()),
            Postfixe::Const(k) => st.push(constante(*k, precision)?),

            Postfixe::Op(op) => match op {
                Op::Neg | Op::NegHaute => {
                    let a = st.pop().ok_or(Erreur::ExpressionInvalide)?;
                    st.push(-a);
                }
                Op::Fonc(f) => {
                    let a = st.pop().ok_or(Erreur::ExpressionInvalide)?;
                    st.push(appliquer_fonction(*f, &a, precision)?);
                }
                Op::Plus | Op::Moins | Op::Fois | Op::Div | Op::Puiss => {
                    let b = st.pop().ok_or(Erreur::ExpressionInvalide)?;
                    let a = st.pop().ok_or(Erreur::ExpressionInvalide)?;
                    let r = match op {
                        Op::Plus => a + b,
                        Op::Moins => a - b,
                        Op::Fois => a * b,
                        Op::Div => a.diviser(&b)?,
                        _ => {
                            // exposant entier seulement
                            if !b.est_entier() {
                                return Err(Erreur::ExposantNonEntier);
                            }
                            let n = b.numer().to_i64().ok_or(Erreur::ExposantNonEntier)?;
                            a.puissance(n)?
                        }
                    };
                    st.push(r);
                }
            },
        }
    }

    if st.len() != 1 {
        return Err(Erreur::ExpressionInvalide);
    }
    st.pop().ok_or(Erreur::ExpressionInvalide)
}

fn constante(k: Constante, precision: u32) -> Resultat<Fraction> {
    let n = match k {
        Constante::Pi => pi_scaled(precision),
        Constante::E => e_scaled(precision),
    };
    Fraction::new(n, pow10(precision))
}

fn appliquer_fonction(f: Fonction, a: &Fraction, precision: u32) -> Resultat<Fraction> {
    let reel: fn(f64) -> f64 = match f {
        // exactes quand c’est possible
        Fonction::Sqrt => return a.racine(precision),
        Fonction::Abs => return Ok(a.abs()),

        Fonction::Sin => f64::sin,
        Fonction::Cos => f64::cos,
        Fonction::Tan => f64::tan,
        Fonction::Cot => |x| 1.0 / x.tan(),
        Fonction::Sec => |x| 1.0 / x.cos(),
        Fonction::Csc => |x| 1.0 / x.sin(),
        Fonction::Asin => f64::asin,
        Fonction::Acos => f64::acos,
        Fonction::Atan => f64::atan,
        Fonction::Sinh => f64::sinh,
        Fonction::Cosh => f64::cosh,
        Fonction::Tanh => f64::tanh,
        Fonction::Ln => f64::ln,
        Fonction::Log => f64::log10,
        Fonction::Exp => f64::exp,
    };

    let x = a
        .vers_f64()
        .ok_or_else(|| Erreur::OperandeInvalide(format!("{}({a}) : valeur hors bornes", f.nom())))?;
    let val = reel(x);

    let r = depuis_reel(val, precision)
        .map_err(|_| Erreur::OperandeInvalide(format!("{}({a}) hors domaine", f.nom())))?;
    Ok(Fraction::depuis_ratio(r))
}

/// Format utilitaire (démarche) : suite postfixée en texte.
pub fn format_rpn(rpn: &[Postfixe]) -> String {
    rpn.iter()
        .map(|p| match p {
            Postfixe::Num(r) => r.to_string(),
            Postfixe::Const(k) => format_tokens(&[Tok::Const(*k)]),
            Postfixe::Op(op) => match op {
                Op::Plus => "+".to_string(),
                Op::Moins => "-".to_string(),
                Op::Fois => "*".to_string(),
                Op::Div => "/".to_string(),
                Op::Puiss => "^".to_string(),
                Op::Neg => "neg".to_string(),
                Op::NegHaute => "neg^".to_string(),
                Op::Fonc(f) => f.nom().to_string(),
            },
        })
        .collect::<Vec<_>>()
        .join(" ")
}
