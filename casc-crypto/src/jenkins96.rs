//! Jenkins hashing used to key CASC archive lookups.
//!
//! Two distinct algorithms live here under one name because both show up
//! in the CASC ecosystem: [`hashlittle`]/[`hashlittle2`] are Bob Jenkins'
//! `lookup3.c` as shipped by most modern NGDP tooling (arbitrary-length
//! tail handling inline in the main loop), while [`hash_path`] reproduces
//! the older `pywowlib` shape used by local CASC handlers, which pads to a
//! 12-byte multiple and processes the final block *outside* the loop. The
//! two are not interchangeable; `hash_path` is what this workspace's
//! `casc-storage` crate calls to key `RootByName`.

/// Normalize a path the way the local CASC handler's lookup expects:
/// uppercase ASCII, and `/` rewritten to `\`.
pub fn normalize_path(path: &[u8]) -> Vec<u8> {
    path.iter()
        .map(|&b| if b == b'/' { b'\\' } else { b.to_ascii_uppercase() })
        .collect()
}

/// Hash a path using the pywowlib-derived Jenkins96 variant, after
/// normalizing it (uppercase, `/` to `\`).
pub fn hash_path(path: &[u8]) -> u64 {
    jenkins96_pywow(&normalize_path(path))
}

fn read_u32_le(buf: &[u8], pos: usize) -> u32 {
    u32::from_le_bytes([buf[pos], buf[pos + 1], buf[pos + 2], buf[pos + 3]])
}

/// Jenkins96 as implemented by pywowlib's `Jenkins96::calcHash`.
///
/// Zero-pads the input to the next multiple of 12 bytes, mixes every
/// 12-byte block except the last inside the loop, and always finalizes
/// the last block afterwards with `final_mix` — even when the padded
/// length is already a multiple of 12, reproducing the loop-bound bug the
/// original source has (`i < newSize - 12`). Do not "fix" this by folding
/// the last block into the loop; callers depend on the exact bit pattern.
pub fn jenkins96_pywow(data: &[u8]) -> u64 {
    let len = u32::try_from(data.len()).unwrap_or(u32::MAX);
    let seed = 0xdead_beef_u32.wrapping_add(len);
    let mut a = seed;
    let mut b = seed;
    let mut c = seed;

    if data.is_empty() {
        return (u64::from(c) << 32) | u64::from(b);
    }

    let padded_len = data.len() + ((12 - (data.len() % 12)) % 12);
    let mut buf = vec![0u8; padded_len];
    buf[..data.len()].copy_from_slice(data);

    let mut pos = 0usize;
    while pos < padded_len - 12 {
        a = a.wrapping_add(read_u32_le(&buf, pos));
        b = b.wrapping_add(read_u32_le(&buf, pos + 4));
        c = c.wrapping_add(read_u32_le(&buf, pos + 8));
        mix(&mut a, &mut b, &mut c);
        pos += 12;
    }

    a = a.wrapping_add(read_u32_le(&buf, pos));
    b = b.wrapping_add(read_u32_le(&buf, pos + 4));
    c = c.wrapping_add(read_u32_le(&buf, pos + 8));
    final_mix(&mut a, &mut b, &mut c);

    (u64::from(c) << 32) | u64::from(b)
}

fn mix(a: &mut u32, b: &mut u32, c: &mut u32) {
    *a = a.wrapping_sub(*c);
    *a ^= c.rotate_left(4);
    *c = c.wrapping_add(*b);

    *b = b.wrapping_sub(*a);
    *b ^= a.rotate_left(6);
    *a = a.wrapping_add(*c);

    *c = c.wrapping_sub(*b);
    *c ^= b.rotate_left(8);
    *b = b.wrapping_add(*a);

    *a = a.wrapping_sub(*c);
    *a ^= c.rotate_left(16);
    *c = c.wrapping_add(*b);

    *b = b.wrapping_sub(*a);
    *b ^= a.rotate_left(19);
    *a = a.wrapping_add(*c);

    *c = c.wrapping_sub(*b);
    *c ^= b.rotate_left(4);
    *b = b.wrapping_add(*a);
}

fn final_mix(a: &mut u32, b: &mut u32, c: &mut u32) {
    *c ^= *b;
    *c = c.wrapping_sub(b.rotate_left(14));

    *a ^= *c;
    *a = a.wrapping_sub(c.rotate_left(11));

    *b ^= *a;
    *b = b.wrapping_sub(a.rotate_left(25));

    *c ^= *b;
    *c = c.wrapping_sub(b.rotate_left(16));

    *a ^= *c;
    *a = a.wrapping_sub(c.rotate_left(4));

    *b ^= *a;
    *b = b.wrapping_sub(a.rotate_left(14));

    *c ^= *b;
    *c = c.wrapping_sub(b.rotate_left(24));
}

/// Jenkins `lookup3.c` `hashlittle()`: a single 32-bit hash.
///
/// Kept alongside [`hash_path`] because other CASC index formats (not
/// covered by this workspace's read path) key on this variant instead;
/// the tail handling differs from `hash_path` in that it only touches
/// the bytes that actually exist, rather than padding to 12.
pub fn hashlittle(data: &[u8], initval: u32) -> u32 {
    let mut pc = initval;
    let mut pb = 0u32;
    hashlittle2_impl(data, &mut pc, &mut pb);
    pc
}

/// Jenkins `lookup3.c` `hashlittle2()`: two 32-bit hashes from one pass.
pub fn hashlittle2(data: &[u8], pc: &mut u32, pb: &mut u32) {
    hashlittle2_impl(data, pc, pb);
}

fn hashlittle2_impl(key: &[u8], pc: &mut u32, pb: &mut u32) {
    let mut a = 0xdead_beef_u32
        .wrapping_add(u32::try_from(key.len()).unwrap_or(u32::MAX))
        .wrapping_add(*pc);
    let mut b = a;
    let mut c = a.wrapping_add(*pb);
    let mut k = key;

    if k.is_empty() {
        *pc = c;
        *pb = b;
        return;
    }

    while k.len() > 12 {
        a = a.wrapping_add(u32::from_le_bytes([k[0], k[1], k[2], k[3]]));
        b = b.wrapping_add(u32::from_le_bytes([k[4], k[5], k[6], k[7]]));
        c = c.wrapping_add(u32::from_le_bytes([k[8], k[9], k[10], k[11]]));
        mix(&mut a, &mut b, &mut c);
        k = &k[12..];
    }

    macro_rules! add_tail {
        ($n:expr) => {
            for i in (0..$n).rev() {
                let shift = 8 * (i % 4);
                let value = u32::from(k[i]) << shift;
                match i / 4 {
                    0 => a = a.wrapping_add(value),
                    1 => b = b.wrapping_add(value),
                    _ => c = c.wrapping_add(value),
                }
            }
        };
    }

    if k.is_empty() {
        *pc = c;
        *pb = b;
        return;
    }
    add_tail!(k.len());

    final_mix(&mut a, &mut b, &mut c);
    *pc = c;
    *pb = b;
}
