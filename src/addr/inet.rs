//! `sockaddr_in` layout.

use crate::error::AddrError;
use crate::port::Port;

use super::SockAddr;

pub(crate) const WIRE_LEN: usize = std::mem::size_of::<libc::sockaddr_in>();
const PORT_OFFSET: usize = std::mem::offset_of!(libc::sockaddr_in, sin_port);
const ADDR_OFFSET: usize = std::mem::offset_of!(libc::sockaddr_in, sin_addr);

/*
Field offsets come straight from the libc struct, so the bytes written here
land exactly where a C program reading a sockaddr_in would look for them:
family, port, address, then sin_zero padding (already zeroed by the caller).
Port and address are stored in network order, so both go out verbatim.
*/

/// Writes the IPv4 fields. The caller has zeroed and bounds-checked `buf`.
pub(crate) fn write(buf: &mut [u8], port: Port, addr: u32) {
	super::write_header(buf, libc::AF_INET as libc::sa_family_t, WIRE_LEN);
	buf[PORT_OFFSET..PORT_OFFSET + 2].copy_from_slice(&port.raw().to_ne_bytes());
	buf[ADDR_OFFSET..ADDR_OFFSET + 4].copy_from_slice(&addr.to_ne_bytes());
}

/// Parses a `sockaddr_in` buffer. The discriminator has already matched.
pub(crate) fn decode(buf: &[u8]) -> Result<SockAddr, AddrError> {
	if buf.len() < WIRE_LEN {
		return Err(AddrError::BufferTooSmall {
			needed: WIRE_LEN,
			got: buf.len(),
		});
	}
	let port = Port::from_raw(u16::from_ne_bytes([buf[PORT_OFFSET], buf[PORT_OFFSET + 1]]));
	let addr = u32::from_ne_bytes([
		buf[ADDR_OFFSET],
		buf[ADDR_OFFSET + 1],
		buf[ADDR_OFFSET + 2],
		buf[ADDR_OFFSET + 3],
	]);
	Ok(SockAddr::Inet { port, addr })
}
