//! The `fields!` macro reads a run of consecutive binary fields from a `Cur`.
//!
//! ```ignore
//! fields!(cur, header {
//!     unknown: [u8; 0x48],
//!     num_verts: u32,
//!     pad: (zeros(8)),
//!     end: Cur,
//! });
//! ```
//!
//! Each field is bound as a local and logged at trace level with its offset.
//! `(zeros(n))` consumes `n` bytes that must be zero, `(skip(n))` consumes
//! `n` bytes without looking at them, and `Cur` binds the cursor position
//! after the preceding fields.

macro_rules! field_helper2 {
    ($cur:ident, [u8; $n:expr]) => { $cur.next_n_u8s($n as usize)? };
    ($cur:ident, (zeros($n:expr))) => { $cur.skip_zeros($n as usize)? };
    ($cur:ident, (skip($n:expr))) => { $cur.jump_forward($n as usize)? };
    ($cur:ident, Cur) => { $cur.clone() };
    ($cur:ident, $t:ty) => { $cur.next::<$t>()? };
}

macro_rules! field_helper {
    ($c:ident, $name:ident, $field:ident, Cur) => {
        let $field = field_helper2!($c, Cur);
    };
    ($c:ident, $name:ident, $field:ident, $ty:tt) => {
        let pos = $c.pos();
        let $field = field_helper2!($c, $ty);
        trace!("{}.{}@{:#x}: {:?}",
            stringify!($name),
            stringify!($field),
            pos,
            $field,
        );
    }
}

macro_rules! fields {
    ($cur:expr, $name:ident { $($field:ident : $ty:tt,)* }) => {
        let mut c = $cur;
        $(field_helper!(c, $name, $field, $ty);)*
    };
    ($cur:ident, $name:ident { $($field:ident : $ty:tt),* }) => {
        fields!($cur, $name { $($field : $ty,)* });
    };
}
