//! Socket address representation and its byte-exact wire conversion.
//!
//! A [`SockAddr`] is the tagged in-memory form; [`SockAddr::encode`] and
//! [`SockAddr::decode`] translate it to and from the fixed C struct layout
//! the kernel's socket calls walk. One submodule per layout:
//! - `inet` — `sockaddr_in`
//! - `inet6` — `sockaddr_in6`
//! - `unix` — `sockaddr_un` (filesystem and abstract paths)
//! - `raw` — generic `sockaddr` fallback for everything else

pub(crate) mod inet;
pub(crate) mod inet6;
pub(crate) mod raw;
pub(crate) mod unix;

use crate::error::AddrError;
use crate::family::Family;
use crate::port::Port;

/// Offset of the family discriminator within every sockaddr flavor.
/// 0 on Linux; 1 on the BSDs, where a length byte comes first.
pub(crate) const FAMILY_OFFSET: usize = std::mem::offset_of!(libc::sockaddr, sa_family);
pub(crate) const FAMILY_SIZE: usize = std::mem::size_of::<libc::sa_family_t>();

/// Offset of the opaque data region of the generic `sockaddr`.
pub(crate) const DATA_OFFSET: usize = std::mem::offset_of!(libc::sockaddr, sa_data);

/// Writes the fields every sockaddr flavor shares: the BSD length byte
/// where the platform has one, then the family discriminator in the
/// platform's native representation.
pub(crate) fn write_header(buf: &mut [u8], code: libc::sa_family_t, wire_len: usize) {
	if cfg!(any(
		target_os = "dragonfly",
		target_os = "freebsd",
		target_os = "ios",
		target_os = "macos",
		target_os = "netbsd",
		target_os = "openbsd"
	)) {
		// sa_len / sin_len / sun_len, always the struct's first byte.
		buf[0] = wire_len as u8;
	}
	buf[FAMILY_OFFSET..FAMILY_OFFSET + FAMILY_SIZE].copy_from_slice(&code.to_ne_bytes());
}

/// Reads the family discriminator back out of a wire buffer.
pub(crate) fn read_family(buf: &[u8]) -> Result<libc::sa_family_t, AddrError> {
	let end = FAMILY_OFFSET + FAMILY_SIZE;
	if buf.len() < end {
		return Err(AddrError::BufferTooSmall { needed: end, got: buf.len() });
	}
	let mut bits = [0u8; FAMILY_SIZE];
	bits.copy_from_slice(&buf[FAMILY_OFFSET..end]);
	Ok(libc::sa_family_t::from_ne_bytes(bits))
}

/// A socket address, one variant per struct layout this crate understands,
/// plus [`SockAddr::Raw`] as the escape hatch for every family it does not.
///
/// Values are plain immutable data; nothing here touches a socket. Encode
/// one into a buffer before handing it to `bind`/`connect`/`sendto`, decode
/// the buffer `accept`/`recvfrom`/`getpeername` filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SockAddr {
	/// IPv4. `addr` holds the same bits as `in_addr.s_addr` — network
	/// byte order, written to the wire verbatim.
	Inet { port: Port, addr: u32 },

	/// IPv6. The address is four host-order words, each assembled
	/// big-endian from its wire bytes; `flowinfo` and `scope_id` are
	/// copied verbatim like their struct fields.
	Inet6 {
		port: Port,
		flowinfo: u32,
		addr: [u32; 4],
		scope_id: u32,
	},

	/// Unix-domain. A leading NUL byte marks a Linux abstract-namespace
	/// name; otherwise the bytes are a filesystem path.
	Unix { path: Vec<u8> },

	/// Any family this crate does not structure: the numeric code and the
	/// verbatim bytes of the data region. Decoding an unknown family
	/// produces this, and re-encoding it reproduces the original buffer,
	/// so unknown families round-trip losslessly.
	Raw {
		family: libc::sa_family_t,
		data: Vec<u8>,
	},
}

impl SockAddr {
	/// Creates an IPv4 address from octets and a host-order port.
	pub fn inet(ip: [u8; 4], port: u16) -> Self {
		SockAddr::Inet {
			port: Port::from_host(port),
			addr: u32::from_ne_bytes(ip),
		}
	}

	/// Creates an IPv6 address with zero flow info and scope.
	pub fn inet6(ip: [u8; 16], port: u16) -> Self {
		Self::inet6_full(ip, port, 0, 0)
	}

	/// Creates an IPv6 address with explicit flow info and scope id.
	pub fn inet6_full(ip: [u8; 16], port: u16, flowinfo: u32, scope_id: u32) -> Self {
		SockAddr::Inet6 {
			port: Port::from_host(port),
			flowinfo,
			addr: inet6::words_from_octets(ip),
			scope_id,
		}
	}

	/// Creates a Unix-domain address from a filesystem path.
	pub fn unix<P: AsRef<[u8]>>(path: P) -> Self {
		SockAddr::Unix {
			path: path.as_ref().to_vec(),
		}
	}

	/// Creates an abstract-namespace address (Linux-only convention).
	/// The leading NUL marker is prepended here; `name` is the bare name.
	pub fn unix_abstract<N: AsRef<[u8]>>(name: N) -> Self {
		let mut path = Vec::with_capacity(name.as_ref().len() + 1);
		path.push(0);
		path.extend_from_slice(name.as_ref());
		SockAddr::Unix { path }
	}

	/// Creates a raw address for a symbolic family tag.
	///
	/// Fails with [`AddrError::UnsupportedFamily`] when the tag has no
	/// code on this platform. Decoded unknown families skip this path and
	/// carry their numeric code directly.
	pub fn raw(family: Family, data: Vec<u8>) -> Result<Self, AddrError> {
		let code = family.require_code("SockAddr::raw")?;
		Ok(SockAddr::Raw {
			family: code as libc::sa_family_t,
			data,
		})
	}

	/// Returns the symbolic family tag, or `None` for a raw address whose
	/// code no tag is registered for.
	pub fn family(&self) -> Option<Family> {
		match self {
			SockAddr::Inet { .. } => Some(Family::Inet),
			SockAddr::Inet6 { .. } => Some(Family::Inet6),
			SockAddr::Unix { .. } => Some(Family::Unix),
			SockAddr::Raw { family, .. } => Family::from_code(*family as libc::c_int).ok(),
		}
	}

	/// Returns the numeric family code that goes in the discriminator
	/// field.
	pub fn family_code(&self) -> libc::sa_family_t {
		match self {
			SockAddr::Inet { .. } => libc::AF_INET as libc::sa_family_t,
			SockAddr::Inet6 { .. } => libc::AF_INET6 as libc::sa_family_t,
			SockAddr::Unix { .. } => libc::AF_UNIX as libc::sa_family_t,
			SockAddr::Raw { family, .. } => *family,
		}
	}

	/// Returns the port for the internet variants.
	pub fn port(&self) -> Option<Port> {
		match self {
			SockAddr::Inet { port, .. } | SockAddr::Inet6 { port, .. } => Some(*port),
			_ => None,
		}
	}

	/// Returns the path bytes of a Unix-domain address, marker byte
	/// included for abstract names.
	pub fn path(&self) -> Option<&[u8]> {
		match self {
			SockAddr::Unix { path } => Some(path),
			_ => None,
		}
	}

	/// True for a Unix-domain address in the abstract namespace.
	pub fn is_abstract(&self) -> bool {
		matches!(self, SockAddr::Unix { path } if path.first() == Some(&0))
	}

	/// Returns the exact number of bytes [`SockAddr::encode`] will write.
	///
	/// Callers size their buffer with this before encoding; it is also the
	/// address length to pass alongside the buffer to a system call.
	pub fn wire_len(&self) -> usize {
		match self {
			SockAddr::Inet { .. } => inet::WIRE_LEN,
			SockAddr::Inet6 { .. } => inet6::WIRE_LEN,
			SockAddr::Unix { path } => unix::wire_len(path),
			SockAddr::Raw { data, .. } => raw::wire_len(data),
		}
	}

	/// Writes this address into `buf` using the platform's native struct
	/// layout, returning the number of bytes written (always
	/// [`SockAddr::wire_len`]).
	///
	/// The written prefix is zeroed first, so struct padding and the tail
	/// of a short Unix path read back as zeros, exactly as the kernel
	/// expects. Nothing is written on error.
	pub fn encode(&self, buf: &mut [u8]) -> Result<usize, AddrError> {
		// Validate the value itself before looking at the buffer, so an
		// unencodable address reports its own error rather than a size one.
		match self {
			SockAddr::Unix { path } => unix::check(path)?,
			SockAddr::Raw { family, data } => raw::check(*family, data)?,
			_ => {}
		}

		let len = self.wire_len();
		if buf.len() < len {
			return Err(AddrError::BufferTooSmall {
				needed: len,
				got: buf.len(),
			});
		}
		buf[..len].fill(0);

		match self {
			SockAddr::Inet { port, addr } => inet::write(buf, *port, *addr),
			SockAddr::Inet6 {
				port,
				flowinfo,
				addr,
				scope_id,
			} => inet6::write(buf, *port, *flowinfo, *addr, *scope_id),
			SockAddr::Unix { path } => unix::write(buf, path),
			SockAddr::Raw { family, data } => raw::write(buf, *family, data),
		}
		Ok(len)
	}

	/// Parses a wire buffer back into a [`SockAddr`], dispatching on the
	/// family discriminator.
	///
	/// `buf` must be exactly the address — for a kernel-filled buffer,
	/// slice it to the length the system call reported. A discriminator
	/// with no structured layout here decodes to [`SockAddr::Raw`] rather
	/// than failing, so any family the kernel produces survives a
	/// decode/encode trip byte-for-byte.
	pub fn decode(buf: &[u8]) -> Result<SockAddr, AddrError> {
		const AF_INET: libc::sa_family_t = libc::AF_INET as libc::sa_family_t;
		const AF_INET6: libc::sa_family_t = libc::AF_INET6 as libc::sa_family_t;
		const AF_UNIX: libc::sa_family_t = libc::AF_UNIX as libc::sa_family_t;

		let code = read_family(buf)?;
		match code {
			AF_INET => inet::decode(buf),
			AF_INET6 => inet6::decode(buf),
			AF_UNIX => unix::decode(buf),
			other => raw::decode(other, buf),
		}
	}

	/// Encodes into stack storage and calls `f` with the pointer/length
	/// pair a socket system call takes.
	///
	/// The closure pattern exists because the struct behind the pointer
	/// only lives for this call — the pointer must not escape `f`. A raw
	/// address larger than `sockaddr_storage` spills to the heap.
	pub fn with_raw<F, R>(&self, f: F) -> Result<R, AddrError>
	where
		F: FnOnce(*const libc::sockaddr, libc::socklen_t) -> R,
	{
		let len = self.wire_len();
		if len <= std::mem::size_of::<libc::sockaddr_storage>() {
			let mut storage: libc::sockaddr_storage = unsafe { std::mem::zeroed() };
			let buf = unsafe {
				std::slice::from_raw_parts_mut(
					(&raw mut storage).cast::<u8>(),
					std::mem::size_of::<libc::sockaddr_storage>(),
				)
			};
			let written = self.encode(buf)?;
			Ok(f(
				(&raw const storage).cast::<libc::sockaddr>(),
				written as libc::socklen_t,
			))
		} else {
			let mut buf = vec![0u8; len];
			let written = self.encode(&mut buf)?;
			Ok(f(
				buf.as_ptr().cast::<libc::sockaddr>(),
				written as libc::socklen_t,
			))
		}
	}

	/// Converts the internet variants to their `std::net` counterpart.
	pub fn to_std(&self) -> Option<std::net::SocketAddr> {
		match self {
			SockAddr::Inet { port, addr } => Some(std::net::SocketAddr::V4(
				std::net::SocketAddrV4::new(
					std::net::Ipv4Addr::from(addr.to_ne_bytes()),
					port.to_host(),
				),
			)),
			SockAddr::Inet6 {
				port,
				flowinfo,
				addr,
				scope_id,
			} => Some(std::net::SocketAddr::V6(std::net::SocketAddrV6::new(
				std::net::Ipv6Addr::from(inet6::octets_from_words(*addr)),
				port.to_host(),
				*flowinfo,
				*scope_id,
			))),
			_ => None,
		}
	}
}

impl From<std::net::SocketAddrV4> for SockAddr {
	fn from(addr: std::net::SocketAddrV4) -> Self {
		SockAddr::inet(addr.ip().octets(), addr.port())
	}
}

impl From<std::net::SocketAddrV6> for SockAddr {
	fn from(addr: std::net::SocketAddrV6) -> Self {
		SockAddr::inet6_full(
			addr.ip().octets(),
			addr.port(),
			addr.flowinfo(),
			addr.scope_id(),
		)
	}
}

impl From<std::net::SocketAddr> for SockAddr {
	fn from(addr: std::net::SocketAddr) -> Self {
		match addr {
			std::net::SocketAddr::V4(v4) => v4.into(),
			std::net::SocketAddr::V6(v6) => v6.into(),
		}
	}
}

impl std::fmt::Display for SockAddr {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			SockAddr::Inet { port, addr } => {
				let ip = addr.to_ne_bytes();
				write!(f, "{}.{}.{}.{}:{}", ip[0], ip[1], ip[2], ip[3], port)
			}
			SockAddr::Inet6 {
				port,
				addr,
				scope_id,
				..
			} => {
				write!(f, "[")?;
				for (i, word) in addr.iter().enumerate() {
					if i > 0 {
						write!(f, ":")?;
					}
					write!(f, "{:x}:{:x}", word >> 16, word & 0xffff)?;
				}
				if *scope_id != 0 {
					write!(f, "%{}", scope_id)?;
				}
				write!(f, "]:{}", port)
			}
			SockAddr::Unix { path } => {
				if path.is_empty() {
					write!(f, "(unnamed)")
				} else if path[0] == 0 {
					write!(f, "@{}", String::from_utf8_lossy(&path[1..]))
				} else {
					write!(f, "{}", String::from_utf8_lossy(path))
				}
			}
			SockAddr::Raw { family, data } => {
				write!(f, "(family {}, {} bytes)", family, data.len())
			}
		}
	}
}
