// src/noyau/fraction.rs
//
// Rationnel exact (numérateur, dénominateur) en grands entiers.
//
// Invariants (vérifiés à chaque construction) :
// - dénominateur > 0
// - pgcd(|n|, d) == 1
// Une Fraction est une valeur immuable : chaque opération rend une nouvelle instance.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::erreur::{Erreur, Resultat};
use super::lecture::{pow10, sqrt_scaled_arrondi};

/// Précision (décimales) des approximations : π, e, √ non exactes, fonctions.
pub const PRECISION_DEFAUT: u32 = 10;

/// Taille max (en bits) d’un numérateur ou dénominateur produit par `puissance`.
pub const PUISSANCE_BITS_MAX: u64 = 1 << 17;

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fraction(BigRational);

/// PGCD d’Euclide sur les valeurs absolues.
pub fn pgcd(a: &BigInt, b: &BigInt) -> BigInt {
    let mut a = a.abs();
    let mut b = b.abs();
    while !b.is_zero() {
        let reste = &a % &b;
        a = b;
        b = reste;
    }
    a
}

/// Représentant réduit de n/d, dénominateur positif.
pub fn simplifier(n: BigInt, d: BigInt) -> Resultat<(BigInt, BigInt)> {
    if d.is_zero() {
        return Err(Erreur::DivisionParZero);
    }
    Ok(normaliser(n, d))
}

/// `d != 0` : donc pgcd >= 1.
fn normaliser(n: BigInt, d: BigInt) -> (BigInt, BigInt) {
    let (n, d) = if d.is_negative() { (-n, -d) } else { (n, d) };
    let g = pgcd(&n, &d);
    (n / &g, d / g)
}

impl Fraction {
    pub fn new(n: impl Into<BigInt>, d: impl Into<BigInt>) -> Resultat<Self> {
        let (n, d) = simplifier(n.into(), d.into())?;
        Ok(Fraction(BigRational::new_raw(n, d)))
    }

    pub fn entier(n: impl Into<BigInt>) -> Self {
        Fraction(BigRational::from_integer(n.into()))
    }

    pub fn zero() -> Self {
        Fraction(BigRational::zero())
    }

    pub fn un() -> Self {
        Fraction(BigRational::one())
    }

    /// Construction interne : `d` est déjà connu non nul.
    fn reduite(n: BigInt, d: BigInt) -> Self {
        let (n, d) = normaliser(n, d);
        Fraction(BigRational::new_raw(n, d))
    }

    pub(crate) fn depuis_ratio(r: BigRational) -> Self {
        let (n, d) = r.into_raw();
        Self::reduite(n, d)
    }

    pub fn numer(&self) -> &BigInt {
        self.0.numer()
    }

    pub fn denom(&self) -> &BigInt {
        self.0.denom()
    }

    pub(crate) fn ratio(&self) -> &BigRational {
        &self.0
    }

    pub fn est_zero(&self) -> bool {
        self.numer().is_zero()
    }

    /// Vrai seulement pour n/n, c.-à-d. 1/1 après réduction.
    pub fn est_un(&self) -> bool {
        self.numer() == self.denom()
    }

    pub fn est_entier(&self) -> bool {
        self.denom().is_one()
    }

    pub fn est_negatif(&self) -> bool {
        self.numer().is_negative()
    }

    pub fn abs(&self) -> Self {
        Fraction(self.0.abs())
    }

    pub fn inverse(&self) -> Resultat<Self> {
        if self.est_zero() {
            return Err(Erreur::DivisionParZero);
        }
        Ok(Self::reduite(self.denom().clone(), self.numer().clone()))
    }

    pub fn diviser(&self, autre: &Fraction) -> Resultat<Self> {
        if autre.est_zero() {
            return Err(Erreur::DivisionParZero);
        }
        Ok(Self::reduite(
            self.numer() * autre.denom(),
            self.denom() * autre.numer(),
        ))
    }

    /// Puissance entière. Exposant négatif : on inverse la base d’abord.
    pub fn puissance(&self, e: i64) -> Resultat<Self> {
        if e == 0 {
            return Ok(Fraction::un());
        }
        let (mut base_n, mut base_d) = (self.numer().clone(), self.denom().clone());
        if e < 0 {
            std::mem::swap(&mut base_n, &mut base_d);
            if base_d.is_zero() {
                return Err(Erreur::DivisionParZero);
            }
        }
        let k = u32::try_from(e.unsigned_abs()).map_err(|_| Erreur::ExposantNonEntier)?;
        // |base| = 1 : la taille ne croît pas
        let bits = base_n.bits().max(base_d.bits()).saturating_sub(1);
        if bits.saturating_mul(u64::from(k)) > PUISSANCE_BITS_MAX {
            return Err(Erreur::OperandeInvalide(format!(
                "puissance trop grande ({self}^{e})"
            )));
        }
        Ok(Self::reduite(base_n.pow(k), base_d.pow(k)))
    }

    /// Racine carrée : exacte si n et d sont des carrés parfaits,
    /// sinon approximation de dénominateur 10^precision.
    pub fn racine(&self, precision: u32) -> Resultat<Self> {
        if self.est_negatif() {
            return Err(Erreur::OperandeInvalide(format!(
                "racine carrée d’un nombre négatif ({self})"
            )));
        }
        if let (Some(rn), Some(rd)) = (carre_parfait(self.numer()), carre_parfait(self.denom())) {
            return Ok(Self::reduite(rn, rd));
        }
        Ok(Self::reduite(
            sqrt_scaled_arrondi(&self.0, precision),
            pow10(precision),
        ))
    }

    /// Valeur flottante (perte d’exactitude assumée : fonctions transcendantes).
    pub fn vers_f64(&self) -> Option<f64> {
        self.0.to_f64()
    }
}

fn carre_parfait(n: &BigInt) -> Option<BigInt> {
    if n.is_negative() {
        return None;
    }
    let r = n.sqrt();
    if &r * &r == *n {
        Some(r)
    } else {
        None
    }
}

/* ------------------------ Opérateurs infaillibles ------------------------ */

fn somme(a: &Fraction, b: &Fraction) -> Fraction {
    Fraction::reduite(
        a.numer() * b.denom() + b.numer() * a.denom(),
        a.denom() * b.denom(),
    )
}

fn difference(a: &Fraction, b: &Fraction) -> Fraction {
    Fraction::reduite(
        a.numer() * b.denom() - b.numer() * a.denom(),
        a.denom() * b.denom(),
    )
}

fn produit(a: &Fraction, b: &Fraction) -> Fraction {
    Fraction::reduite(a.numer() * b.numer(), a.denom() * b.denom())
}

macro_rules! impl_op {
    ($trait:ident, $method:ident, $f:ident) => {
        impl $trait<&Fraction> for &Fraction {
            type Output = Fraction;
            fn $method(self, rhs: &Fraction) -> Fraction {
                $f(self, rhs)
            }
        }
        impl $trait for Fraction {
            type Output = Fraction;
            fn $method(self, rhs: Fraction) -> Fraction {
                $f(&self, &rhs)
            }
        }
        impl $trait<&Fraction> for Fraction {
            type Output = Fraction;
            fn $method(self, rhs: &Fraction) -> Fraction {
                $f(&self, rhs)
            }
        }
    };
}

impl_op!(Add, add, somme);
impl_op!(Sub, sub, difference);
impl_op!(Mul, mul, produit);

impl Neg for Fraction {
    type Output = Fraction;
    fn neg(self) -> Fraction {
        Fraction(-self.0)
    }
}

impl Neg for &Fraction {
    type Output = Fraction;
    fn neg(self) -> Fraction {
        Fraction(-self.0.clone())
    }
}

impl Default for Fraction {
    fn default() -> Self {
        Fraction::zero()
    }
}

impl From<i64> for Fraction {
    fn from(n: i64) -> Self {
        Fraction::entier(n)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.est_entier() {
            write!(f, "{}", self.numer())
        } else {
            write!(f, "{}/{}", self.numer(), self.denom())
        }
    }
}
