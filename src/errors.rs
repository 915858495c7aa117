error_chain! {
    foreign_links {
        Fmt(::std::fmt::Error);
        Io(::std::io::Error);
        Png(::png::EncodingError);
    }

    errors {
        BlockNotFound(tag: String) {
            description("block not found")
            display("no {} block found in file", tag)
        }
        InvalidHeader(offset: u64, found: Vec<u8>) {
            description("invalid block header")
            display("expected XSPD tag at {:#x}, found {:?}", offset, found)
        }
        TruncatedBlock(offset: u64, expected: u64, available: u64) {
            description("block truncated")
            display("block at {:#x} needs {} bytes but only {} are left in the file",
                offset, expected, available)
        }
        TruncatedData(pos: usize, requested: usize, remaining: usize) {
            description("buffer was too short")
            display("read of {} bytes at {:#x} runs past the end of the buffer ({} bytes left)",
                requested, pos, remaining)
        }
        UnexpectedNonZeroPadding(pos: usize, len: usize) {
            description("padding was not zero")
            display("expected {} zero bytes at {:#x} -- maybe this is a different game release?",
                len, pos)
        }
        GroupMismatch(msg: String) {
            description("vertex groups don't match animation frame")
            display("group mismatch: {}", msg)
        }
    }
}

/// Fails with "expected: <condition>" unless the condition holds.
macro_rules! check {
    ($b:expr) => {
        if !$b {
            use crate::errors::{Error, ErrorKind};
            Err(Error::from_kind(ErrorKind::Msg(format!(
                "expected: {}",
                stringify!($b)
            ))))
        } else {
            Ok(())
        }
    };
}
