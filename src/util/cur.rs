use crate::errors::{ErrorKind, Result};
use std::fmt;
use crate::util::view::{View, Viewable};

/// A pointer into a buffer of bytes. Used for binary file parsing.
///
/// All reads are bounds-checked and fail with `TruncatedData` instead of
/// running off the end. Cursors are `Copy`, so any number of them can walk
/// the same buffer independently.
#[derive(Copy, Clone)]
pub struct Cur<'a> {
    buf_: &'a [u8],
    pos_: usize,
}

impl<'a> Cur<'a> {
    pub fn new(buf: &'a [u8]) -> Cur<'a> {
        Cur { buf_: buf, pos_: 0 }
    }

    /// A cursor at `pos` in `buf`.
    pub fn at(buf: &'a [u8], pos: usize) -> Result<Cur<'a>> {
        let mut cur = Cur::new(buf);
        cur.jump_to(pos)?;
        Ok(cur)
    }

    pub fn pos(&self) -> usize {
        self.pos_
    }

    pub fn bytes_remaining(&self) -> usize {
        self.buf_.len().saturating_sub(self.pos_)
    }

    pub fn next<T: Viewable>(&mut self) -> Result<T> {
        let size = <T as Viewable>::size();
        let buf = self.next_n_u8s(size)?;
        Ok(<T as Viewable>::view(buf))
    }

    pub fn next_n<T: Viewable>(&mut self, n: usize) -> Result<View<'a, T>> {
        let size = <T as Viewable>::size();
        let len = size.checked_mul(n)
            .ok_or_else(|| self.truncated(usize::max_value()))?;
        let buf = self.next_n_u8s(len)?;
        Ok(View::from_buf(buf))
    }

    pub fn next_n_u8s(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.bytes_remaining() {
            return Err(self.truncated(n).into());
        }
        let res = &self.buf_[self.pos_ .. self.pos_ + n];
        self.pos_ += n;
        Ok(res)
    }

    /// Consumes `n` bytes which must all be zero.
    pub fn skip_zeros(&mut self, n: usize) -> Result<()> {
        let pos = self.pos_;
        let bytes = self.next_n_u8s(n)?;
        if bytes.iter().any(|&b| b != 0) {
            bail!(ErrorKind::UnexpectedNonZeroPadding(pos, n));
        }
        Ok(())
    }

    pub fn jump_forward(&mut self, amt: usize) -> Result<()> {
        if amt > self.bytes_remaining() {
            return Err(self.truncated(amt).into());
        }
        self.pos_ += amt;
        Ok(())
    }

    pub fn jump_to(&mut self, pos: usize) -> Result<()> {
        if pos > self.buf_.len() {
            bail!(ErrorKind::TruncatedData(0, pos, self.buf_.len()));
        }
        self.pos_ = pos;
        Ok(())
    }

    fn truncated(&self, requested: usize) -> ErrorKind {
        ErrorKind::TruncatedData(self.pos_, requested, self.bytes_remaining())
    }
}

impl<'a> fmt::Debug for Cur<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Cur {{ pos: {:#x} }}", self.pos())
    }
}

#[test]
fn test_bounds() {
    let buf = [1u8, 0, 2, 0, 0, 0];
    let mut cur = Cur::new(&buf);
    assert_eq!(cur.next::<u16>().unwrap(), 1);
    assert_eq!(cur.next::<i16>().unwrap(), 2);
    assert!(cur.skip_zeros(2).is_ok());
    assert_eq!(cur.bytes_remaining(), 0);
    match *cur.next::<u8>().unwrap_err().kind() {
        ErrorKind::TruncatedData(pos, requested, remaining) => {
            assert_eq!((pos, requested, remaining), (6, 1, 0));
        }
        ref k => panic!("wrong error: {:?}", k),
    }
    assert!(Cur::at(&buf, 7).is_err());
}

#[test]
fn test_nonzero_padding() {
    let buf = [0u8, 0, 3, 0];
    let mut cur = Cur::new(&buf);
    match *cur.skip_zeros(4).unwrap_err().kind() {
        ErrorKind::UnexpectedNonZeroPadding(pos, len) => assert_eq!((pos, len), (0, 4)),
        ref k => panic!("wrong error: {:?}", k),
    }
}
