use crate::utils::buffer;

/// Precompute the result of a tilable computation
/// for faster memory access by row.
///
/// > A(x, y) * B(n, m) -> C(x, m)
#[inline(always)]
pub fn precompute_tiled_rows<T, MapFn>(tile_size: usize, row_size: usize, map: MapFn) -> Vec<T>
where
    MapFn: Fn(usize, usize, usize) -> T,
{
    // SAFETY: buffer is init by map fn
    let mut cache = unsafe { buffer::uninitialized_buffer(tile_size * row_size) };
    let mut idx = 0;
    for y in 0..tile_size {
        for x in 0..row_size {
            cache[idx] = map(x, y, idx);
            idx += 1;
        }
    }
    cache
}
