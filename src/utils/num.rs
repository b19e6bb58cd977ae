/// Returns the bit order (log2) of an unsigned integer if it is a
/// power of two, `None` otherwise.
///
/// > 0 is not a power of two.
pub fn pow2_order<Integral>(n: Integral) -> Option<u32>
where
    Integral: num_traits::int::PrimInt + num_traits::Unsigned,
{
    if n.is_zero() {
        return None;
    }
    if n & (n - Integral::one()) != Integral::zero() {
        return None;
    }
    Some(n.trailing_zeros())
}
