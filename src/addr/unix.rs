//! `sockaddr_un` layout, filesystem and abstract-namespace paths.

use crate::error::AddrError;

use super::SockAddr;

pub(crate) const WIRE_LEN: usize = std::mem::size_of::<libc::sockaddr_un>();
pub(crate) const PATH_OFFSET: usize = std::mem::offset_of!(libc::sockaddr_un, sun_path);
pub(crate) const PATH_CAP: usize = WIRE_LEN - PATH_OFFSET;

/*
Two kinds of unix address share the sun_path field:

- Filesystem path: NUL-terminated inside a fixed-capacity field, and the
  whole struct is the address. Encoded length is always WIRE_LEN.
- Abstract name (Linux): sun_path[0] is NUL and the rest is an opaque
  name with NO terminator. Its length is carried by the address length
  passed to or returned from the syscall, so the encoded length is exact:
  PATH_OFFSET + name length.

In the SockAddr model both are one `path` byte string; a leading NUL is
the abstract marker.
*/

/// Exact encoded size for a path: header plus raw bytes for abstract
/// names, the full fixed struct for filesystem paths.
pub(crate) fn wire_len(path: &[u8]) -> usize {
	if path.first() == Some(&0) {
		PATH_OFFSET + path.len()
	} else {
		WIRE_LEN
	}
}

/// Checks that the path fits the fixed sun_path capacity.
///
/// A filesystem path needs one extra byte for its terminator. Overlong
/// paths fail here rather than being truncated — a truncated address
/// would silently name a different socket.
pub(crate) fn check(path: &[u8]) -> Result<(), AddrError> {
	let is_abstract = path.first() == Some(&0);
	let needed = if is_abstract { path.len() } else { path.len() + 1 };
	if needed > PATH_CAP {
		return Err(AddrError::PathTooLong {
			len: path.len(),
			max: if is_abstract { PATH_CAP } else { PATH_CAP - 1 },
		});
	}
	Ok(())
}

/// Writes the path field. The caller has run [`check`], zeroed the
/// destination (which provides the terminator and padding) and
/// bounds-checked `buf`.
pub(crate) fn write(buf: &mut [u8], path: &[u8]) {
	super::write_header(buf, libc::AF_UNIX as libc::sa_family_t, wire_len(path));
	buf[PATH_OFFSET..PATH_OFFSET + path.len()].copy_from_slice(path);
}

/// Parses a `sockaddr_un` buffer. The discriminator has already matched.
///
/// The buffer length carries the exact length of an abstract name, so
/// abstract addresses round-trip byte-for-byte, embedded NULs included.
/// An all-zero path field is the unnamed address (empty path), not an
/// abstract name.
pub(crate) fn decode(buf: &[u8]) -> Result<SockAddr, AddrError> {
	if buf.len() < PATH_OFFSET {
		return Err(AddrError::BufferTooSmall {
			needed: PATH_OFFSET,
			got: buf.len(),
		});
	}
	let field = &buf[PATH_OFFSET..buf.len().min(WIRE_LEN)];
	let path = if field.first() == Some(&0) && field.iter().any(|&b| b != 0) {
		// Abstract: exact length, no terminator to look for.
		field.to_vec()
	} else {
		let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
		field[..end].to_vec()
	};
	Ok(SockAddr::Unix { path })
}
