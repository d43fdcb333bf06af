//! `sockaddr_in6` layout.

use crate::error::AddrError;
use crate::port::Port;

use super::SockAddr;

pub(crate) const WIRE_LEN: usize = std::mem::size_of::<libc::sockaddr_in6>();
const PORT_OFFSET: usize = std::mem::offset_of!(libc::sockaddr_in6, sin6_port);
const FLOWINFO_OFFSET: usize = std::mem::offset_of!(libc::sockaddr_in6, sin6_flowinfo);
const ADDR_OFFSET: usize = std::mem::offset_of!(libc::sockaddr_in6, sin6_addr);
const SCOPE_OFFSET: usize = std::mem::offset_of!(libc::sockaddr_in6, sin6_scope_id);

/// Assembles the in-memory word form from the 16 wire octets: four
/// host-order words, each built big-endian byte-by-byte, so no alignment
/// or endianness of the source buffer is assumed.
pub(crate) fn words_from_octets(ip: [u8; 16]) -> [u32; 4] {
	let mut words = [0u32; 4];
	for (i, word) in words.iter_mut().enumerate() {
		*word = u32::from_be_bytes([ip[i * 4], ip[i * 4 + 1], ip[i * 4 + 2], ip[i * 4 + 3]]);
	}
	words
}

/// Inverse of [`words_from_octets`].
pub(crate) fn octets_from_words(words: [u32; 4]) -> [u8; 16] {
	let mut ip = [0u8; 16];
	for (i, word) in words.iter().enumerate() {
		ip[i * 4..i * 4 + 4].copy_from_slice(&word.to_be_bytes());
	}
	ip
}

/// Writes the IPv6 fields. The caller has zeroed and bounds-checked `buf`.
///
/// `flowinfo` and `scope_id` are copied verbatim, matching how the
/// `sin6_flowinfo`/`sin6_scope_id` struct fields are treated everywhere.
pub(crate) fn write(buf: &mut [u8], port: Port, flowinfo: u32, addr: [u32; 4], scope_id: u32) {
	super::write_header(buf, libc::AF_INET6 as libc::sa_family_t, WIRE_LEN);
	buf[PORT_OFFSET..PORT_OFFSET + 2].copy_from_slice(&port.raw().to_ne_bytes());
	buf[FLOWINFO_OFFSET..FLOWINFO_OFFSET + 4].copy_from_slice(&flowinfo.to_ne_bytes());
	for (i, word) in addr.iter().enumerate() {
		let off = ADDR_OFFSET + i * 4;
		buf[off..off + 4].copy_from_slice(&word.to_be_bytes());
	}
	buf[SCOPE_OFFSET..SCOPE_OFFSET + 4].copy_from_slice(&scope_id.to_ne_bytes());
}

/// Parses a `sockaddr_in6` buffer. The discriminator has already matched.
pub(crate) fn decode(buf: &[u8]) -> Result<SockAddr, AddrError> {
	if buf.len() < WIRE_LEN {
		return Err(AddrError::BufferTooSmall {
			needed: WIRE_LEN,
			got: buf.len(),
		});
	}
	let port = Port::from_raw(u16::from_ne_bytes([buf[PORT_OFFSET], buf[PORT_OFFSET + 1]]));
	let flowinfo = u32::from_ne_bytes([
		buf[FLOWINFO_OFFSET],
		buf[FLOWINFO_OFFSET + 1],
		buf[FLOWINFO_OFFSET + 2],
		buf[FLOWINFO_OFFSET + 3],
	]);
	let mut addr = [0u32; 4];
	for (i, word) in addr.iter_mut().enumerate() {
		let off = ADDR_OFFSET + i * 4;
		*word = u32::from_be_bytes([buf[off], buf[off + 1], buf[off + 2], buf[off + 3]]);
	}
	let scope_id = u32::from_ne_bytes([
		buf[SCOPE_OFFSET],
		buf[SCOPE_OFFSET + 1],
		buf[SCOPE_OFFSET + 2],
		buf[SCOPE_OFFSET + 3],
	]);
	Ok(SockAddr::Inet6 {
		port,
		flowinfo,
		addr,
		scope_id,
	})
}
