//! Arithmetic on coordinate types, with result-type promotion
//!
//! The dispatch table never uses `std::ops` directly on coordinates: it goes
//! through [`Plus`], [`Minus`], [`Times`] and [`Over`], whose `Output` is the
//! promoted type of the two operands (`i32` with `f64` gives `f64`, a length
//! times a length gives an area, etc.). The traits are implemented here for
//! the primitive numeric types, and in [`units`](crate::units) for
//! [`Quantity`](crate::Quantity)

// # TYPES & TRAITS //

pub trait Plus<Rhs = Self> {
    type Output;
    fn plus(self, rhs: Rhs) -> Self::Output;
}

pub trait Minus<Rhs = Self> {
    type Output;
    fn minus(self, rhs: Rhs) -> Self::Output;
}

pub trait Times<Rhs = Self> {
    type Output;
    fn times(self, rhs: Rhs) -> Self::Output;
}

pub trait Over<Rhs = Self> {
    type Output;
    fn over(self, rhs: Rhs) -> Self::Output;
}

/// Absolute value
pub trait Abs {
    type Output;
    fn abs(self) -> Self::Output;
}

/// Square root. Its `Output` may change units (an area gives a length)
pub trait Sqrt {
    type Output;
    fn sqrt(self) -> Self::Output;
}

/// Sine and cosine of an angle. A typed angle gives bare numbers
pub trait Trig {
    type Output;
    fn sin_cos(self) -> (Self::Output, Self::Output);
}

/// The angle of the direction `(x, self)`, as `f64::atan2` computes it. Both
/// coordinates share a unit, which the angle does not carry
pub trait Atan2 {
    type Output;
    fn atan2(self, x: Self) -> Self::Output;
}

pub trait Zero {
    fn zero() -> Self;
}

pub trait One {
    fn one() -> Self;
}

/// The type of `a * b`
pub type Product<A, B> = <A as Times<B>>::Output;

/// The type of `a / b`
pub type Quotient<A, B> = <A as Over<B>>::Output;

/// The coordinate requirements of matrix-style algorithms (LUP, rotations):
/// a type closed under the four operations, ordered, with absolute value
pub trait Field:
    Copy
    + PartialOrd
    + Zero
    + One
    + Plus<Output = Self>
    + Minus<Output = Self>
    + Times<Output = Self>
    + Over<Output = Self>
    + Abs<Output = Self>
    + std::ops::Neg<Output = Self>
{
}

impl<T> Field for T where
    T: Copy
        + PartialOrd
        + Zero
        + One
        + Plus<Output = T>
        + Minus<Output = T>
        + Times<Output = T>
        + Over<Output = T>
        + Abs<Output = T>
        + std::ops::Neg<Output = T>
{
}

// # IMPLEMENTATIONS //

macro_rules! same_type_arith {
    ($($t:ty),*) => {
        $(
        impl Plus for $t {
            type Output = $t;
            #[inline]
            fn plus(self, rhs: $t) -> $t { self + rhs }
        }
        impl Minus for $t {
            type Output = $t;
            #[inline]
            fn minus(self, rhs: $t) -> $t { self - rhs }
        }
        impl Times for $t {
            type Output = $t;
            #[inline]
            fn times(self, rhs: $t) -> $t { self * rhs }
        }
        impl Over for $t {
            type Output = $t;
            #[inline]
            fn over(self, rhs: $t) -> $t { self / rhs }
        }
        impl Zero for $t {
            #[inline]
            fn zero() -> $t { 0 as $t }
        }
        impl One for $t {
            #[inline]
            fn one() -> $t { 1 as $t }
        }
        )*
    };
}
same_type_arith!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

macro_rules! signed_abs {
    ($($t:ty),*) => {
        $(
        impl Abs for $t {
            type Output = $t;
            #[inline]
            fn abs(self) -> $t { <$t>::abs(self) }
        }
        )*
    };
}
signed_abs!(i8, i16, i32, i64, i128, isize, f32, f64);

macro_rules! float_fns {
    ($($t:ty),*) => {
        $(
        impl Sqrt for $t {
            type Output = $t;
            #[inline]
            fn sqrt(self) -> $t { <$t>::sqrt(self) }
        }
        impl Trig for $t {
            type Output = $t;
            #[inline]
            fn sin_cos(self) -> ($t, $t) { <$t>::sin_cos(self) }
        }
        impl Atan2 for $t {
            type Output = $t;
            #[inline]
            fn atan2(self, x: $t) -> $t { <$t>::atan2(self, x) }
        }
        )*
    };
}
float_fns!(f32, f64);

/// Mixed pairs: both operands are converted to the wider type first, in
/// either order
macro_rules! promoted_arith {
    ($($a:ty, $b:ty => $out:ty);*) => {
        $(
        promoted_arith!(@one $a, $b => $out);
        promoted_arith!(@one $b, $a => $out);
        )*
    };
    (@one $l:ty, $r:ty => $out:ty) => {
        impl Plus<$r> for $l {
            type Output = $out;
            #[inline]
            fn plus(self, rhs: $r) -> $out { self as $out + rhs as $out }
        }
        impl Minus<$r> for $l {
            type Output = $out;
            #[inline]
            fn minus(self, rhs: $r) -> $out { self as $out - rhs as $out }
        }
        impl Times<$r> for $l {
            type Output = $out;
            #[inline]
            fn times(self, rhs: $r) -> $out { self as $out * rhs as $out }
        }
        impl Over<$r> for $l {
            type Output = $out;
            #[inline]
            fn over(self, rhs: $r) -> $out { self as $out / rhs as $out }
        }
    };
}
promoted_arith! {
    i32, i64 => i64;
    i32, f32 => f32;
    i32, f64 => f64;
    i64, f64 => f64;
    f32, f64 => f64
}
