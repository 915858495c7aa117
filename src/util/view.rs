use std::marker::PhantomData;

/// A fixed-size little-endian value that can be read straight out of a
/// byte slice.
pub trait Viewable: Sized {
    fn size() -> usize;
    /// `buf` is exactly `size()` bytes long.
    fn view(buf: &[u8]) -> Self;
}

macro_rules! viewable_int {
    ($t:ty, $n:expr) => {
        impl Viewable for $t {
            fn size() -> usize { $n }
            fn view(buf: &[u8]) -> $t {
                let mut bytes = [0u8; $n];
                bytes.copy_from_slice(&buf[..$n]);
                <$t>::from_le_bytes(bytes)
            }
        }
    }
}

viewable_int!(u8, 1);
viewable_int!(u16, 2);
viewable_int!(i16, 2);
viewable_int!(u32, 4);

impl<A: Viewable, B: Viewable> Viewable for (A, B) {
    fn size() -> usize { A::size() + B::size() }
    fn view(buf: &[u8]) -> (A, B) {
        let (a, b) = buf.split_at(A::size());
        (A::view(a), B::view(b))
    }
}

// Longer tuples peel off the first element and recurse
impl<A: Viewable, B: Viewable, C: Viewable> Viewable for (A, B, C) {
    fn size() -> usize { <(A, (B, C))>::size() }
    fn view(buf: &[u8]) -> (A, B, C) {
        let (a, (b, c)) = <(A, (B, C))>::view(buf);
        (a, b, c)
    }
}

impl<A: Viewable, B: Viewable, C: Viewable, D: Viewable> Viewable for (A, B, C, D) {
    fn size() -> usize { <(A, (B, C, D))>::size() }
    fn view(buf: &[u8]) -> (A, B, C, D) {
        let (a, (b, c, d)) = <(A, (B, C, D))>::view(buf);
        (a, b, c, d)
    }
}

/// Iterates over a run of `T`s packed back to back in a byte slice.
#[derive(Copy, Clone)]
pub struct View<'a, T> {
    buf: &'a [u8],
    _marker: PhantomData<fn() -> T>,
}

impl<'a, T: Viewable> View<'a, T> {
    pub fn from_buf(buf: &'a [u8]) -> View<'a, T> {
        debug_assert!(buf.len() % T::size() == 0);
        View { buf, _marker: PhantomData }
    }

    pub fn len(&self) -> usize {
        self.buf.len() / T::size()
    }
}

impl<'a, T: Viewable> Iterator for View<'a, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.buf.len() < T::size() {
            return None;
        }
        let (item, rest) = self.buf.split_at(T::size());
        self.buf = rest;
        Some(T::view(item))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}

impl<'a, T: Viewable> ExactSizeIterator for View<'a, T> {}

#[test]
fn test_signed() {
    let buf = [0x00, 0x10, 0xff, 0xff, 0x01, 0x80];
    let v: Vec<i16> = View::from_buf(&buf).collect();
    assert_eq!(v, vec![4096, -1, -32767]);
}

#[test]
fn test_tuples() {
    let buf = [1, 0, 2, 0, 3, 0, 0xff, 0xff];
    let mut view = View::<(u16, u16, u16, i16)>::from_buf(&buf);
    assert_eq!(view.len(), 1);
    assert_eq!(view.next(), Some((1, 2, 3, -1)));
    assert_eq!(view.next(), None);
}
