//! Address family and socket type registries.
//!
//! Every symbolic tag exists on every build; whether it has an OS code is a
//! property of the platform, answered by a table built once per process.
//! A tag that is absent from the table is simply unsupported here — it is
//! not a special enum member, and `code()` returns `None` rather than
//! failing.

use std::sync::OnceLock;

use crate::error::AddrError;

/// Address family tag, the domain a socket address belongs to.
///
/// Only `Unix`, `Inet` and `Inet6` have struct layouts this crate
/// understands; the rest exist so the registry can name the code the
/// kernel hands back, and marshal through the `Raw` escape hatch.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
	Unspec,
	Unix,
	/// BSD-flavored alias for [`Family::Unix`]; same code everywhere.
	Local,
	Inet,
	Inet6,
	Ax25,
	Ipx,
	Appletalk,
	Netrom,
	Bridge,
	Atmpvc,
	X25,
	Rose,
	Decnet,
	Netbeui,
	Security,
	Key,
	Netlink,
	/// On Linux this is an alias for [`Family::Netlink`]; on the BSDs it
	/// is the routing socket family in its own right.
	Route,
	Packet,
	Ash,
	Econet,
	Atmsvc,
	Rds,
	Sna,
	Irda,
	Pppox,
	Wanpipe,
	Llc,
	Ib,
	Mpls,
	Can,
	Tipc,
	Bluetooth,
	Iucv,
	Rxrpc,
	Isdn,
	Phonet,
	Ieee802154,
	Caif,
	Alg,
	Nfc,
	Vsock,
	Xdp,
	/// BSD link-layer family; no code on Linux.
	Link,
}

impl Family {
	/// Every tag, in declaration order. Handy for exhaustive checks.
	pub const ALL: &'static [Family] = &[
		Family::Unspec,
		Family::Unix,
		Family::Local,
		Family::Inet,
		Family::Inet6,
		Family::Ax25,
		Family::Ipx,
		Family::Appletalk,
		Family::Netrom,
		Family::Bridge,
		Family::Atmpvc,
		Family::X25,
		Family::Rose,
		Family::Decnet,
		Family::Netbeui,
		Family::Security,
		Family::Key,
		Family::Netlink,
		Family::Route,
		Family::Packet,
		Family::Ash,
		Family::Econet,
		Family::Atmsvc,
		Family::Rds,
		Family::Sna,
		Family::Irda,
		Family::Pppox,
		Family::Wanpipe,
		Family::Llc,
		Family::Ib,
		Family::Mpls,
		Family::Can,
		Family::Tipc,
		Family::Bluetooth,
		Family::Iucv,
		Family::Rxrpc,
		Family::Isdn,
		Family::Phonet,
		Family::Ieee802154,
		Family::Caif,
		Family::Alg,
		Family::Nfc,
		Family::Vsock,
		Family::Xdp,
		Family::Link,
	];

	/// Returns the platform's `AF_*` code for this tag, or `None` when the
	/// platform has none. Never fails.
	pub fn code(self) -> Option<libc::c_int> {
		family_table()
			.iter()
			.find(|&&(tag, _)| tag == self)
			.map(|&(_, code)| code)
	}

	/// Like [`Family::code`], but failing with an error that names
	/// `caller`, for embedding in higher-level messages.
	pub fn require_code(self, caller: &'static str) -> Result<libc::c_int, AddrError> {
		self.code()
			.ok_or(AddrError::UnsupportedFamily { family: self, caller })
	}

	/// Looks up the tag registered for an `AF_*` code.
	///
	/// Where two tags share a code (Unix/Local everywhere, Netlink/Route
	/// on Linux) the canonical tag is registered first and wins.
	pub fn from_code(code: libc::c_int) -> Result<Family, AddrError> {
		family_table()
			.iter()
			.find(|&&(_, c)| c == code)
			.map(|&(tag, _)| tag)
			.ok_or(AddrError::UnrecognizedFamilyCode { code })
	}

	/// Returns the fixed sockaddr size for the families whose layout this
	/// crate understands structurally. Anything else is an error — the
	/// caller must fall back to a `Raw`-style allocation.
	pub fn wire_len(self) -> Result<usize, AddrError> {
		match self {
			Family::Unix | Family::Local => Ok(std::mem::size_of::<libc::sockaddr_un>()),
			Family::Inet6 => Ok(std::mem::size_of::<libc::sockaddr_in6>()),
			Family::Inet => Ok(std::mem::size_of::<libc::sockaddr_in>()),
			other => Err(AddrError::UnsupportedFamily {
				family: other,
				caller: "Family::wire_len",
			}),
		}
	}
}

/// Socket type tag — the communication semantics, orthogonal to family.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SockType {
	/// No type requested; maps to 0 (there is no `SOCK_*` constant for it).
	Unspec,
	Stream,
	Datagram,
	Raw,
	Rdm,
	SeqPacket,
}

impl SockType {
	pub const ALL: &'static [SockType] = &[
		SockType::Unspec,
		SockType::Stream,
		SockType::Datagram,
		SockType::Raw,
		SockType::Rdm,
		SockType::SeqPacket,
	];

	/// Returns the platform's `SOCK_*` code, or `None` when the platform
	/// has none.
	pub fn code(self) -> Option<libc::c_int> {
		socktype_table()
			.iter()
			.find(|&&(tag, _)| tag == self)
			.map(|&(_, code)| code)
	}

	/// Like [`SockType::code`], but failing with an error that names
	/// `caller`.
	pub fn require_code(self, caller: &'static str) -> Result<libc::c_int, AddrError> {
		self.code()
			.ok_or(AddrError::UnsupportedSockType { kind: self, caller })
	}

	/// Looks up the tag registered for a `SOCK_*` code.
	pub fn from_code(code: libc::c_int) -> Result<SockType, AddrError> {
		socktype_table()
			.iter()
			.find(|&&(_, c)| c == code)
			.map(|&(tag, _)| tag)
			.ok_or(AddrError::UnrecognizedSockTypeCode { code })
	}
}

/*
The tables below replace per-constant conditional compilation with one
runtime-populated registry per process. Order matters for decoding:
`from_code` scans front to back, so the canonical tag for an aliased code
must be registered before its alias — Unix before Local, and on Linux
Netlink before Route (AF_ROUTE == AF_NETLINK there).
*/

fn family_table() -> &'static [(Family, libc::c_int)] {
	static TABLE: OnceLock<Vec<(Family, libc::c_int)>> = OnceLock::new();
	TABLE.get_or_init(|| {
		let mut table: Vec<(Family, libc::c_int)> = vec![
			(Family::Unspec, libc::AF_UNSPEC),
			(Family::Unix, libc::AF_UNIX),
			(Family::Local, libc::AF_LOCAL),
			(Family::Inet, libc::AF_INET),
			(Family::Inet6, libc::AF_INET6),
		];

		#[cfg(any(target_os = "linux", target_os = "android"))]
		table.extend_from_slice(&[
			(Family::Ax25, libc::AF_AX25),
			(Family::Ipx, libc::AF_IPX),
			(Family::Appletalk, libc::AF_APPLETALK),
			(Family::Netrom, libc::AF_NETROM),
			(Family::Bridge, libc::AF_BRIDGE),
			(Family::Atmpvc, libc::AF_ATMPVC),
			(Family::X25, libc::AF_X25),
			(Family::Rose, libc::AF_ROSE),
			(Family::Decnet, libc::AF_DECnet),
			(Family::Netbeui, libc::AF_NETBEUI),
			(Family::Security, libc::AF_SECURITY),
			(Family::Key, libc::AF_KEY),
			(Family::Netlink, libc::AF_NETLINK),
			(Family::Route, libc::AF_ROUTE),
			(Family::Packet, libc::AF_PACKET),
			(Family::Ash, libc::AF_ASH),
			(Family::Econet, libc::AF_ECONET),
			(Family::Atmsvc, libc::AF_ATMSVC),
			(Family::Rds, libc::AF_RDS),
			(Family::Sna, libc::AF_SNA),
			(Family::Irda, libc::AF_IRDA),
			(Family::Pppox, libc::AF_PPPOX),
			(Family::Wanpipe, libc::AF_WANPIPE),
			(Family::Llc, libc::AF_LLC),
			(Family::Ib, libc::AF_IB),
			(Family::Mpls, libc::AF_MPLS),
			(Family::Can, libc::AF_CAN),
			(Family::Tipc, libc::AF_TIPC),
			(Family::Bluetooth, libc::AF_BLUETOOTH),
			(Family::Iucv, libc::AF_IUCV),
			(Family::Rxrpc, libc::AF_RXRPC),
			(Family::Isdn, libc::AF_ISDN),
			(Family::Phonet, libc::AF_PHONET),
			(Family::Ieee802154, libc::AF_IEEE802154),
			(Family::Caif, libc::AF_CAIF),
			(Family::Alg, libc::AF_ALG),
			(Family::Nfc, libc::AF_NFC),
			(Family::Vsock, libc::AF_VSOCK),
			(Family::Xdp, libc::AF_XDP),
		]);

		#[cfg(any(
			target_os = "dragonfly",
			target_os = "freebsd",
			target_os = "ios",
			target_os = "macos",
			target_os = "netbsd",
			target_os = "openbsd"
		))]
		table.extend_from_slice(&[
			(Family::Link, libc::AF_LINK),
			(Family::Route, libc::AF_ROUTE),
			(Family::Ipx, libc::AF_IPX),
			(Family::Appletalk, libc::AF_APPLETALK),
			(Family::Sna, libc::AF_SNA),
			(Family::Decnet, libc::AF_DECnet),
			(Family::Isdn, libc::AF_ISDN),
		]);

		table
	})
}

fn socktype_table() -> &'static [(SockType, libc::c_int)] {
	static TABLE: OnceLock<Vec<(SockType, libc::c_int)>> = OnceLock::new();
	TABLE.get_or_init(|| {
		let mut table: Vec<(SockType, libc::c_int)> = vec![
			(SockType::Unspec, 0),
			(SockType::Stream, libc::SOCK_STREAM),
			(SockType::Datagram, libc::SOCK_DGRAM),
			(SockType::Raw, libc::SOCK_RAW),
			(SockType::SeqPacket, libc::SOCK_SEQPACKET),
		];

		#[cfg(any(
			target_os = "linux",
			target_os = "android",
			target_os = "dragonfly",
			target_os = "freebsd",
			target_os = "netbsd"
		))]
		table.push((SockType::Rdm, libc::SOCK_RDM));

		table
	})
}
