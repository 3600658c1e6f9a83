// src/noyau/lecture.rs
//
// Machinerie décimale “scalée” : un réel x est représenté par l’entier
// round(x * 10^precision). Sert aux constantes (π, e), aux racines non exactes,
// aux fonctions transcendantes et à l’affichage décimal.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{FromPrimitive, One, Signed, Zero};

use super::erreur::{Erreur, Resultat};

/// Chiffres de garde pour les séries (absorbent les erreurs de troncature).
const CHIFFRES_GARDE: u32 = 10;

pub fn pow10(n: u32) -> BigInt {
    BigInt::from(10).pow(n)
}

/* ------------------------ Décimal (scaled -> texte) ------------------------ */

/// Convertit un entier “scalé” (×10^digits) en texte décimal.
pub fn scaled_to_decimal(mut scaled: BigInt, digits: u32) -> String {
    let neg = scaled.is_negative();
    if neg {
        scaled = -scaled;
    }

    let scale = pow10(digits);
    let int_part = &scaled / &scale;
    let frac_part = &scaled % &scale;

    let signe = if neg { "-" } else { "" };

    if digits == 0 {
        return format!("{signe}{int_part}");
    }

    let mut frac = frac_part.to_str_radix(10);
    while frac.len() < digits as usize {
        frac.insert(0, '0');
    }

    format!("{signe}{int_part}.{frac}")
}

/// Division entière arrondie au plus proche (demi -> loin de zéro). `d > 0`.
fn div_arrondie(n: &BigInt, d: &BigInt) -> BigInt {
    let deux = BigInt::from(2);
    if n.is_negative() {
        -((-n * &deux + d) / (d * &deux))
    } else {
        (n * &deux + d) / (d * &deux)
    }
}

/// r -> round(r * 10^digits)
pub fn rational_scaled_arrondi(r: &BigRational, digits: u32) -> BigInt {
    div_arrondie(&(r.numer() * pow10(digits)), r.denom())
}

/* ------------------------ π (Machin) ------------------------ */

/// arctan(1/q) en entier scalé (troncature) via série:
/// atan(z) = z - z^3/3 + z^5/5 - ...
fn arctan_inv_q_scaled(q: i64, scale: &BigInt) -> BigInt {
    let q = BigInt::from(q);
    let q2 = &q * &q;

    let mut k: u64 = 0;
    let mut q_pow = q.clone();
    let mut sum = BigInt::zero();

    loop {
        let term = scale / (&q_pow * BigInt::from(2 * k + 1));
        if term.is_zero() {
            break;
        }
        if k % 2 == 0 {
            sum += &term;
        } else {
            sum -= &term;
        }
        q_pow *= &q2;
        k += 1;
    }

    sum
}

/// π arrondi à `precision` décimales, en entier scalé.
/// Machin : π = 16*atan(1/5) - 4*atan(1/239)
pub fn pi_scaled(precision: u32) -> BigInt {
    let scale = pow10(precision + CHIFFRES_GARDE);
    let a = arctan_inv_q_scaled(5, &scale);
    let b = arctan_inv_q_scaled(239, &scale);
    let pi = BigInt::from(16) * a - BigInt::from(4) * b;
    div_arrondie(&pi, &pow10(CHIFFRES_GARDE))
}

/// e arrondi à `precision` décimales, en entier scalé.
/// e = Σ 1/k!
pub fn e_scaled(precision: u32) -> BigInt {
    let scale = pow10(precision + CHIFFRES_GARDE);
    let mut term = scale.clone();
    let mut sum = BigInt::zero();
    let mut k: u64 = 1;

    while !term.is_zero() {
        sum += &term;
        term /= BigInt::from(k);
        k += 1;
    }

    div_arrondie(&sum, &pow10(CHIFFRES_GARDE))
}

/* ------------------------ √ approchée ------------------------ */

/// round( sqrt(n/d) * 10^digits ), n >= 0, d > 0.
///
/// floor(2·sqrt(x)·10^p) = isqrt(4·n·10^(2p) / d), puis arrondi du demi.
pub fn sqrt_scaled_arrondi(r: &BigRational, digits: u32) -> BigInt {
    let cible = (r.numer() * BigInt::from(4) * pow10(2 * digits)) / r.denom();
    let double = cible.sqrt();
    (double + BigInt::one()) >> 1
}

/* ------------------------ Réel -> fraction ------------------------ */

/// Approxime un réel par une fraction de dénominateur 10^precision
/// (avant réduction).
pub fn depuis_reel(val: f64, precision: u32) -> Resultat<BigRational> {
    if !val.is_finite() {
        return Err(Erreur::OperandeInvalide(format!(
            "résultat non fini ({val})"
        )));
    }
    let facteur = 10f64.powi(precision as i32);
    let n = BigInt::from_f64((val * facteur).round())
        .ok_or_else(|| Erreur::OperandeInvalide(format!("valeur hors bornes ({val})")))?;
    Ok(BigRational::new(n, pow10(precision)))
}
