//! Low-level bit utilities shared by the cache engine and the transfer
//! analyzer: power-of-two checks, log2 helpers, and the Hamming-distance
//! lookup table used to count bit transitions between DRAM bus beats.

/// Returns `true` if `n` is a power of two. `0` is not a power of two.
pub const fn is_power_of_two(n: u64) -> bool {
    n != 0 && (n & (n - 1)) == 0
}

/// `floor(log2(n))`. Returns `-1` for `n == 0`, matching the convention used
/// throughout the system this crate models.
pub const fn floor_log2(n: u64) -> i32 {
    if n == 0 {
        return -1;
    }
    63 - n.leading_zeros() as i32
}

/// `ceil(log2(n))`, defined as `floor_log2(n - 1) + 1`.
pub const fn ceil_log2(n: u64) -> i32 {
    floor_log2(n - 1) + 1
}

/// Hamming distance between two bytes via Brian Kernighan's bit-counting
/// trick on `a ^ b`.
pub const fn hamming8(a: u8, b: u8) -> u8 {
    let mut diff = a ^ b;
    let mut count = 0u8;
    while diff != 0 {
        count += 1;
        diff &= diff - 1;
    }
    count
}

/// A precomputed 256x256 table of Hamming distances between byte pairs.
///
/// Built once at [`HammingLut::new`] and read-only for the remainder of the
/// process, mirroring `fill_hamming_lut` in the system this crate models.
pub struct HammingLut {
    table: Box<[[u8; 256]; 256]>,
}

impl HammingLut {
    pub fn new() -> Self {
        let mut rows: Vec<[u8; 256]> = Vec::with_capacity(256);
        for a in 0..256usize {
            let mut row = [0u8; 256];
            for (b, slot) in row.iter_mut().enumerate() {
                *slot = hamming8(a as u8, b as u8);
            }
            rows.push(row);
        }
        let table: Box<[[u8; 256]; 256]> = rows.into_boxed_slice().try_into().ok().unwrap();
        Self { table }
    }

    #[inline(always)]
    pub fn get(&self, a: u8, b: u8) -> u8 {
        self.table[a as usize][b as usize]
    }
}

impl Default for HammingLut {
    fn default() -> Self {
        Self::new()
    }
}
