/// TCP/UDP port number, stored in network byte order.
///
/// The payload keeps the exact bit pattern that goes on the wire, so it can
/// be written verbatim into the `sin_port`/`sin6_port` field of a sockaddr.
/// Every integer-producing operation converts back to host order first —
/// you cannot accidentally compare or print the byte-swapped value.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Port(u16);

impl Port {
	/// Creates a port from a host-order integer.
	///
	/// Callers holding a wider integer must truncate to `u16` themselves;
	/// out-of-range values wrap per standard fixed-width conversion.
	pub fn from_host(n: u16) -> Self {
		Self(n.to_be())
	}

	/// Returns the port as a host-order integer.
	///
	/// Inverse of [`Port::from_host`] for every value in 0–65535.
	pub fn to_host(self) -> u16 {
		u16::from_be(self.0)
	}

	/// Creates a port from the verbatim network-order bits, e.g. the
	/// `sin_port` field of a kernel-filled sockaddr.
	pub fn from_raw(raw: u16) -> Self {
		Self(raw)
	}

	/// Returns the verbatim network-order bits.
	pub fn raw(self) -> u16 {
		self.0
	}

	/// Identity — ports are unsigned. Kept so port arithmetic mirrors the
	/// full set of integer operations.
	pub fn abs(self) -> Self {
		self
	}

	/// 0 for port zero, 1 otherwise.
	pub fn signum(self) -> u16 {
		if self.to_host() == 0 { 0 } else { 1 }
	}
}

/*
Why the manual Ord below: the derived one would compare the stored bits.
On a little-endian host port 80 is stored as 0x5000 and port 443 as 0xBB01,
so the derived ordering would claim 80 > 443. Comparing host-order values
gives the ordering a human expects. Equality is safe to derive — the byte
swap is a bijection, equal bits means equal ports.
*/

impl Ord for Port {
	fn cmp(&self, other: &Self) -> std::cmp::Ordering {
		self.to_host().cmp(&other.to_host())
	}
}

impl PartialOrd for Port {
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		Some(self.cmp(other))
	}
}

// Arithmetic happens in host-order space and re-wraps the result.
impl std::ops::Add for Port {
	type Output = Port;
	fn add(self, rhs: Port) -> Port {
		Port::from_host(self.to_host().wrapping_add(rhs.to_host()))
	}
}

impl std::ops::Sub for Port {
	type Output = Port;
	fn sub(self, rhs: Port) -> Port {
		Port::from_host(self.to_host().wrapping_sub(rhs.to_host()))
	}
}

impl std::ops::Mul for Port {
	type Output = Port;
	fn mul(self, rhs: Port) -> Port {
		Port::from_host(self.to_host().wrapping_mul(rhs.to_host()))
	}
}

impl std::ops::Neg for Port {
	type Output = Port;
	fn neg(self) -> Port {
		Port::from_host(self.to_host().wrapping_neg())
	}
}

impl From<u16> for Port {
	fn from(n: u16) -> Self {
		Port::from_host(n)
	}
}

impl From<Port> for u16 {
	fn from(port: Port) -> u16 {
		port.to_host()
	}
}

impl std::fmt::Display for Port {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.to_host())
	}
}

impl std::fmt::Debug for Port {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("Port").field(&self.to_host()).finish()
	}
}
