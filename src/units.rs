//! Physical units as phantom types
//!
//! A [`Quantity<V, U>`] is a number `V` tagged with a unit marker `U`. The
//! marker has no runtime representation; it only decides which operations
//! type-check and what they return. Addition and subtraction require
//! identical units, while products and quotients follow a closed table
//! ([`UnitMul`], [`UnitDiv`]):
//!
//! ```
//! use tensex::units::{meters, Area, Quantity};
//!
//! let side = meters(3.0);
//! let surface: Quantity<f64, Area> = side * side;
//! assert_eq!(surface.value(), 9.0);
//! ```
//!
//! ```compile_fail
//! use tensex::units::{meters, square_meters};
//!
//! let _ = meters(3.0) + square_meters(9.0);
//! ```
//!
//! The same holds component by component: a vector of lengths and a vector
//! of areas can be put in one expression tree, but it cannot be evaluated.
//!
//! ```
//! use tensex::{construct, units::meters, Vector};
//!
//! let a = Vector::new([meters(1.0), meters(2.0)]);
//! let b = Vector::new([meters(3.0), meters(4.0)]);
//! let c: Vector<_, 2> = construct(&a + &b);
//! assert_eq!(c, Vector::new([meters(4.0), meters(6.0)]));
//! ```
//!
//! ```compile_fail
//! use tensex::{construct, units::{meters, square_meters}, Vector};
//!
//! let a = Vector::new([meters(1.0), meters(2.0)]);
//! let b = Vector::new([square_meters(1.0), square_meters(2.0)]);
//! let c: Vector<_, 2> = construct(&a + &b);
//! ```

use crate::numeric::*;
use std::{fmt, marker::PhantomData, ops};

// # TYPES & TRAITS //

/// A unit marker
pub trait Unit: Copy + Default + fmt::Debug + 'static {
    /// Suffix used by [`Display`](fmt::Display)
    const SYMBOL: &'static str;
}

macro_rules! units {
    ($($(#[$meta:meta])* $name:ident $symbol:literal),*) => {
        $(
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name;
        impl Unit for $name {
            const SYMBOL: &'static str = $symbol;
        }
        )*
    };
}

units! {
    /// A pure number
    Dimensionless "",
    Length "m",
    Area "m²",
    Volume "m³",
    /// Plane angle, in radians. Kept apart from [`Dimensionless`] so that
    /// angles and ratios are not mixed up by accident
    Angle "rad"
}

/// `Self * Rhs` gives a quantity in unit `Output`
pub trait UnitMul<Rhs: Unit>: Unit {
    type Output: Unit;
}

/// `Self / Rhs` gives a quantity in unit `Output`
pub trait UnitDiv<Rhs: Unit>: Unit {
    type Output: Unit;
}

/// A value `V` in unit `U`
#[derive(Clone, Copy, PartialEq, PartialOrd, Default, Hash)]
#[repr(transparent)]
pub struct Quantity<V, U> {
    value: V,
    unit: PhantomData<U>,
}

pub type Meters<V = f64> = Quantity<V, Length>;
pub type SquareMeters<V = f64> = Quantity<V, Area>;
pub type Radians<V = f64> = Quantity<V, Angle>;

impl<V, U: Unit> Quantity<V, U> {
    #[inline]
    pub const fn new(value: V) -> Self {
        Self {
            value,
            unit: PhantomData,
        }
    }

    /// The raw number, in this quantity's unit
    #[inline]
    pub fn value(self) -> V {
        self.value
    }
}

pub const fn meters<V>(v: V) -> Quantity<V, Length> {
    Quantity {
        value: v,
        unit: PhantomData,
    }
}

pub const fn square_meters<V>(v: V) -> Quantity<V, Area> {
    Quantity {
        value: v,
        unit: PhantomData,
    }
}

pub const fn cubic_meters<V>(v: V) -> Quantity<V, Volume> {
    Quantity {
        value: v,
        unit: PhantomData,
    }
}

pub const fn radians<V>(v: V) -> Quantity<V, Angle> {
    Quantity {
        value: v,
        unit: PhantomData,
    }
}

pub const fn dimensionless<V>(v: V) -> Quantity<V, Dimensionless> {
    Quantity {
        value: v,
        unit: PhantomData,
    }
}

// # UNIT TABLES //

macro_rules! unit_table {
    ($tr:ident: $($l:ident $r:ident => $out:ident),* $(,)?) => {
        $(
        impl $tr<$r> for $l {
            type Output = $out;
        }
        )*
    };
}

unit_table! { UnitMul:
    Dimensionless Dimensionless => Dimensionless,
    Dimensionless Length => Length,
    Length Dimensionless => Length,
    Dimensionless Area => Area,
    Area Dimensionless => Area,
    Dimensionless Volume => Volume,
    Volume Dimensionless => Volume,
    Dimensionless Angle => Angle,
    Angle Dimensionless => Angle,
    Length Length => Area,
    Length Area => Volume,
    Area Length => Volume,
    // arc length: radius times angle
    Length Angle => Length,
    Angle Length => Length,
}

unit_table! { UnitDiv:
    Dimensionless Dimensionless => Dimensionless,
    Length Length => Dimensionless,
    Area Area => Dimensionless,
    Volume Volume => Dimensionless,
    Angle Angle => Dimensionless,
    Length Dimensionless => Length,
    Area Dimensionless => Area,
    Volume Dimensionless => Volume,
    Angle Dimensionless => Angle,
    Area Length => Length,
    Volume Length => Area,
    Volume Area => Length,
}

// # IMPLEMENTATIONS //

impl<V: fmt::Debug, U: Unit> fmt::Debug for Quantity<V, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}{}", self.value, U::SYMBOL)
    }
}

impl<V: fmt::Display, U: Unit> fmt::Display for Quantity<V, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if U::SYMBOL.is_empty() {
            write!(f, "{}", self.value)
        } else {
            write!(f, "{} {}", self.value, U::SYMBOL)
        }
    }
}

impl<V: ops::Add<Output = V>, U: Unit> ops::Add for Quantity<V, U> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.value + rhs.value)
    }
}

impl<V: ops::Sub<Output = V>, U: Unit> ops::Sub for Quantity<V, U> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.value - rhs.value)
    }
}

impl<V: ops::Neg<Output = V>, U: Unit> ops::Neg for Quantity<V, U> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.value)
    }
}

impl<V, A, B> ops::Mul<Quantity<V, B>> for Quantity<V, A>
where
    V: ops::Mul<Output = V>,
    A: UnitMul<B>,
    B: Unit,
{
    type Output = Quantity<V, A::Output>;
    #[inline]
    fn mul(self, rhs: Quantity<V, B>) -> Self::Output {
        Quantity::new(self.value * rhs.value)
    }
}

impl<V, A, B> ops::Div<Quantity<V, B>> for Quantity<V, A>
where
    V: ops::Div<Output = V>,
    A: UnitDiv<B>,
    B: Unit,
{
    type Output = Quantity<V, A::Output>;
    #[inline]
    fn div(self, rhs: Quantity<V, B>) -> Self::Output {
        Quantity::new(self.value / rhs.value)
    }
}

/// Bare numbers scale a quantity without changing its unit
macro_rules! bare_scaling {
    ($($t:ty),*) => {
        $(
        impl<U: Unit> ops::Mul<$t> for Quantity<$t, U> {
            type Output = Self;
            #[inline]
            fn mul(self, rhs: $t) -> Self { Self::new(self.value * rhs) }
        }
        impl<U: Unit> ops::Mul<Quantity<$t, U>> for $t {
            type Output = Quantity<$t, U>;
            #[inline]
            fn mul(self, rhs: Quantity<$t, U>) -> Self::Output { Quantity::new(self * rhs.value) }
        }
        impl<U: Unit> ops::Div<$t> for Quantity<$t, U> {
            type Output = Self;
            #[inline]
            fn div(self, rhs: $t) -> Self { Self::new(self.value / rhs) }
        }
        impl<U: Unit> Times<$t> for Quantity<$t, U> {
            type Output = Self;
            #[inline]
            fn times(self, rhs: $t) -> Self { self * rhs }
        }
        impl<U: Unit> Times<Quantity<$t, U>> for $t {
            type Output = Quantity<$t, U>;
            #[inline]
            fn times(self, rhs: Quantity<$t, U>) -> Self::Output { self * rhs }
        }
        impl<U: Unit> Over<$t> for Quantity<$t, U> {
            type Output = Self;
            #[inline]
            fn over(self, rhs: $t) -> Self { self / rhs }
        }
        )*
    };
}
bare_scaling!(f32, f64);

impl<V: ops::Add<Output = V>, U: Unit> Plus for Quantity<V, U> {
    type Output = Self;
    #[inline]
    fn plus(self, rhs: Self) -> Self {
        self + rhs
    }
}

impl<V: ops::Sub<Output = V>, U: Unit> Minus for Quantity<V, U> {
    type Output = Self;
    #[inline]
    fn minus(self, rhs: Self) -> Self {
        self - rhs
    }
}

impl<V, A, B> Times<Quantity<V, B>> for Quantity<V, A>
where
    V: ops::Mul<Output = V>,
    A: UnitMul<B>,
    B: Unit,
{
    type Output = Quantity<V, A::Output>;
    #[inline]
    fn times(self, rhs: Quantity<V, B>) -> Self::Output {
        self * rhs
    }
}

impl<V, A, B> Over<Quantity<V, B>> for Quantity<V, A>
where
    V: ops::Div<Output = V>,
    A: UnitDiv<B>,
    B: Unit,
{
    type Output = Quantity<V, A::Output>;
    #[inline]
    fn over(self, rhs: Quantity<V, B>) -> Self::Output {
        self / rhs
    }
}

impl<V: Abs<Output = V>, U: Unit> Abs for Quantity<V, U> {
    type Output = Self;
    #[inline]
    fn abs(self) -> Self {
        Self::new(self.value.abs())
    }
}

impl<V: Sqrt<Output = V>> Sqrt for Quantity<V, Area> {
    type Output = Quantity<V, Length>;
    #[inline]
    fn sqrt(self) -> Self::Output {
        Quantity::new(self.value.sqrt())
    }
}

impl<V: Sqrt<Output = V>> Sqrt for Quantity<V, Dimensionless> {
    type Output = Self;
    #[inline]
    fn sqrt(self) -> Self {
        Quantity::new(self.value.sqrt())
    }
}

impl<V: Trig> Trig for Quantity<V, Angle> {
    type Output = V::Output;
    #[inline]
    fn sin_cos(self) -> (V::Output, V::Output) {
        self.value.sin_cos()
    }
}

impl<V: Atan2, U: Unit> Atan2 for Quantity<V, U> {
    type Output = V::Output;
    #[inline]
    fn atan2(self, x: Self) -> V::Output {
        self.value.atan2(x.value)
    }
}

impl<V: Zero, U: Unit> Zero for Quantity<V, U> {
    #[inline]
    fn zero() -> Self {
        Self::new(V::zero())
    }
}

/// Only a pure number has a multiplicative identity
impl<V: One> One for Quantity<V, Dimensionless> {
    #[inline]
    fn one() -> Self {
        Self::new(V::one())
    }
}

crate::impl_scalar_operand!([V, U: Unit,] Quantity<V, U>);
