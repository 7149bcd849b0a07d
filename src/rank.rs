//! Rank classification. Every type taking part in an expression declares,
//! through [`Classified`], which algebraic shape it has (scalar, vector, point
//! or matrix, with its dimensions) and whether all of its slots share one
//! coordinate type

// # RANK MARKERS //

/// Rank 0: a single value, indexed by `()`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScalarRank;

/// Rank 1: a free vector (a displacement) of dimension `D`, indexed by `usize`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VectorRank<const D: usize>;

/// Rank 1 as well, but an affine position rather than a displacement. Points
/// and vectors have the same layout and are told apart only by this marker,
/// which is what lets the dispatch table accept `point - point` and refuse
/// `point + point`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointRank<const D: usize>;

/// Rank 2: an `R`x`C` matrix, indexed by `(row, col)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatrixRank<const R: usize, const C: usize>;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::ScalarRank {}
    impl<const D: usize> Sealed for super::VectorRank<D> {}
    impl<const D: usize> Sealed for super::PointRank<D> {}
    impl<const R: usize, const C: usize> Sealed for super::MatrixRank<R, C> {}
    impl Sealed for super::Homogeneous {}
    impl Sealed for super::Diverse {}
}

/// The closed set of rank markers. Sealed: the operator table is only total
/// over these four shapes, so no other rank can be introduced downstream
pub trait Rank: sealed::Sealed + Copy + Default + 'static {
    /// What a component is addressed with at runtime
    type Index: Copy + std::fmt::Debug + PartialEq;
    /// 0 for scalars, 1 for vectors and points, 2 for matrices
    const ORDER: usize;
    /// Whether this is the affine (point) flavour of rank 1
    const IS_POINT: bool;
    /// Total number of components
    const LEN: usize;

    /// Whether `idx` addresses an existing component
    fn in_bounds(idx: Self::Index) -> bool;
}

impl Rank for ScalarRank {
    type Index = ();
    const ORDER: usize = 0;
    const IS_POINT: bool = false;
    const LEN: usize = 1;
    fn in_bounds(_: ()) -> bool {
        true
    }
}

macro_rules! rank1_impls {
    ($($marker:ident $is_point:literal),*) => {
        $(
        impl<const D: usize> Rank for $marker<D> {
            type Index = usize;
            const ORDER: usize = 1;
            const IS_POINT: bool = $is_point;
            const LEN: usize = D;
            #[inline]
            fn in_bounds(i: usize) -> bool {
                i < D
            }
        }
        impl<const D: usize> VectorShape for $marker<D> {
            const DIM: usize = D;
        }
        )*
    };
}
rank1_impls!(VectorRank false, PointRank true);

impl<const R: usize, const C: usize> Rank for MatrixRank<R, C> {
    type Index = (usize, usize);
    const ORDER: usize = 2;
    const IS_POINT: bool = false;
    const LEN: usize = R * C;
    #[inline]
    fn in_bounds((r, c): (usize, usize)) -> bool {
        r < R && c < C
    }
}

/// Ranks that have a length (vectors and points)
pub trait VectorShape: Rank<Index = usize> {
    const DIM: usize;
}

/// Ranks that have rows and columns
pub trait MatrixShape: Rank<Index = (usize, usize)> {
    const ROWS: usize;
    const COLS: usize;
}

impl<const R: usize, const C: usize> MatrixShape for MatrixRank<R, C> {
    const ROWS: usize = R;
    const COLS: usize = C;
}

// # DIVERSITY //

/// All slots hold the same coordinate type. Such types implement
/// [`Operand`](crate::Operand), and can be evaluated with a runtime index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Homogeneous;

/// Slots may each hold a different type (eg. two lengths and an angle). Such
/// types can only be read slot by slot, through [`Slot`](crate::Slot)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Diverse;

pub trait Diversity: sealed::Sealed + 'static {
    const HOMOGENEOUS: bool;
}
impl Diversity for Homogeneous {
    const HOMOGENEOUS: bool = true;
}
impl Diversity for Diverse {
    const HOMOGENEOUS: bool = false;
}

/// The diversity of an expression combining two operands: diverse as soon as
/// one of them is
pub trait Join<Other: Diversity>: Diversity {
    type Output: Diversity;
}
impl Join<Homogeneous> for Homogeneous {
    type Output = Homogeneous;
}
impl Join<Diverse> for Homogeneous {
    type Output = Diverse;
}
impl<D: Diversity> Join<D> for Diverse {
    type Output = Diverse;
}

// # CLASSIFICATION //

/// The entry point for any type (concrete storage, user type, scalar or
/// expression node) to take part in the arithmetic core. A single associated
/// [`Rank`] means a type is always exactly one of scalar, vector, point or
/// matrix
pub trait Classified {
    type Rank: Rank;
    type Diversity: Diversity;
}

impl<T: Classified + ?Sized> Classified for &T {
    type Rank = T::Rank;
    type Diversity = T::Diversity;
}

pub const fn is_scalar<T: Classified + ?Sized>() -> bool {
    <T::Rank as Rank>::ORDER == 0
}

pub const fn is_vector<T: Classified + ?Sized>() -> bool {
    <T::Rank as Rank>::ORDER == 1 && !<T::Rank as Rank>::IS_POINT
}

pub const fn is_point<T: Classified + ?Sized>() -> bool {
    <T::Rank as Rank>::IS_POINT
}

pub const fn is_matrix<T: Classified + ?Sized>() -> bool {
    <T::Rank as Rank>::ORDER == 2
}

pub const fn is_homogeneous<T: Classified + ?Sized>() -> bool {
    <T::Diversity as Diversity>::HOMOGENEOUS
}

/// Length of a vector or point type. Not callable on scalars or matrices:
///
/// ```compile_fail
/// tensex::dimension::<f64>();
/// ```
pub const fn dimension<T>() -> usize
where
    T: Classified + ?Sized,
    T::Rank: VectorShape,
{
    <T::Rank as VectorShape>::DIM
}

pub const fn rows<T>() -> usize
where
    T: Classified + ?Sized,
    T::Rank: MatrixShape,
{
    <T::Rank as MatrixShape>::ROWS
}

pub const fn cols<T>() -> usize
where
    T: Classified + ?Sized,
    T::Rank: MatrixShape,
{
    <T::Rank as MatrixShape>::COLS
}
