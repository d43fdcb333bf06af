//! Generic `sockaddr` layout, the fallback for unstructured families.

use crate::error::AddrError;

use super::SockAddr;

/// Smallest buffer any sockaddr occupies on the wire.
pub(crate) const MIN_LEN: usize = std::mem::size_of::<libc::sockaddr>();

/// Exact encoded size for a raw payload: at least the generic sockaddr,
/// more when the data outgrows its `sa_data` region.
pub(crate) fn wire_len(data: &[u8]) -> usize {
	MIN_LEN.max(super::DATA_OFFSET + data.len())
}

/// Smallest address the declared family is allowed to occupy. The
/// structured internet families have fixed struct sizes; everything else
/// gets the generic sockaddr minimum.
fn min_wire_len(code: libc::sa_family_t) -> usize {
	const AF_INET: libc::sa_family_t = libc::AF_INET as libc::sa_family_t;
	const AF_INET6: libc::sa_family_t = libc::AF_INET6 as libc::sa_family_t;
	match code {
		AF_INET => super::inet::WIRE_LEN,
		AF_INET6 => super::inet6::WIRE_LEN,
		_ => MIN_LEN,
	}
}

/// Checks that the payload reaches the declared family's minimum size.
///
/// A short payload must not be padded out silently: the kernel walks the
/// declared family's full layout, and bytes we never set would be read as
/// address data.
pub(crate) fn check(code: libc::sa_family_t, data: &[u8]) -> Result<(), AddrError> {
	let min = min_wire_len(code);
	if super::DATA_OFFSET + data.len() < min {
		return Err(AddrError::UndersizedRawAddress {
			family: code,
			len: data.len(),
			min: min - super::DATA_OFFSET,
		});
	}
	Ok(())
}

/// Writes the family code and the verbatim payload. The caller has run
/// [`check`], zeroed the destination and bounds-checked `buf`.
pub(crate) fn write(buf: &mut [u8], code: libc::sa_family_t, data: &[u8]) {
	super::write_header(buf, code, wire_len(data));
	buf[super::DATA_OFFSET..super::DATA_OFFSET + data.len()].copy_from_slice(data);
}

/// Captures an unrecognized-family buffer verbatim: the code as found,
/// plus everything after the header. Re-encoding reproduces the buffer.
pub(crate) fn decode(code: libc::sa_family_t, buf: &[u8]) -> Result<SockAddr, AddrError> {
	if buf.len() < MIN_LEN {
		return Err(AddrError::BufferTooSmall {
			needed: MIN_LEN,
			got: buf.len(),
		});
	}
	Ok(SockAddr::Raw {
		family: code,
		data: buf[super::DATA_OFFSET..].to_vec(),
	})
}
