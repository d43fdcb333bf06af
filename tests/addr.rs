use std::mem::{offset_of, size_of};

use sockwire::{AddrError, Family, Port, SockAddr, SockType};

const FAMILY_OFFSET: usize = offset_of!(libc::sockaddr, sa_family);
const DATA_OFFSET: usize = offset_of!(libc::sockaddr, sa_data);
const SUN_PATH_OFFSET: usize = offset_of!(libc::sockaddr_un, sun_path);
const SUN_PATH_CAP: usize = size_of::<libc::sockaddr_un>() - SUN_PATH_OFFSET;

/// Reads the discriminator the way the kernel would.
fn family_of(buf: &[u8]) -> libc::sa_family_t {
    let mut bits = [0u8; size_of::<libc::sa_family_t>()];
    let end = FAMILY_OFFSET + bits.len();
    bits.copy_from_slice(&buf[FAMILY_OFFSET..end]);
    libc::sa_family_t::from_ne_bytes(bits)
}

fn encode_to_vec(addr: &SockAddr) -> Vec<u8> {
    let mut buf = vec![0u8; addr.wire_len()];
    let written = addr.encode(&mut buf).unwrap();
    assert_eq!(written, buf.len());
    buf
}

#[test]
fn port_host_round_trip_is_exhaustive() {
    for n in 0..=u16::MAX {
        assert_eq!(Port::from_host(n).to_host(), n);
    }
}

#[test]
fn port_ordering_uses_host_values() {
    // 1 and 256 swap places under byte reversal, so a bit-pattern
    // comparison would order them backwards on little-endian hosts.
    assert!(Port::from_host(1) < Port::from_host(256));
    assert!(Port::from_host(80) < Port::from_host(443));
    assert_eq!(Port::from_host(53), Port::from_raw(53u16.to_be()));
}

#[test]
fn port_arithmetic_wraps_in_host_space() {
    let p = |n: u16| Port::from_host(n);
    assert_eq!(p(65535) + p(1), p(0));
    assert_eq!(p(0) - p(1), p(65535));
    assert_eq!(p(300) * p(2), p(600));
    assert_eq!(-p(1), p(65535));
    assert_eq!(p(80).abs(), p(80));
    assert_eq!(p(0).signum(), 0);
    assert_eq!(p(8080).signum(), 1);
}

#[test]
fn port_display_shows_host_value() {
    assert_eq!(Port::from_host(80).to_string(), "80");
    assert_eq!(format!("{:?}", Port::from_host(443)), "Port(443)");
}

#[test]
fn family_codes_round_trip_through_registry() {
    for &family in Family::ALL {
        let Some(code) = family.code() else { continue };
        let back = Family::from_code(code).unwrap();
        // Aliased codes resolve to their canonical tag, which must at
        // least map back to the same code.
        assert_eq!(back.code(), Some(code), "{family:?} -> {code} -> {back:?}");
    }
}

#[test]
fn aliased_family_codes_resolve_canonically() {
    assert_eq!(Family::Unix.code(), Family::Local.code());
    assert_eq!(Family::from_code(libc::AF_UNIX).unwrap(), Family::Unix);
    #[cfg(any(target_os = "linux", target_os = "android"))]
    {
        assert_eq!(Family::Netlink.code(), Family::Route.code());
        assert_eq!(Family::from_code(libc::AF_ROUTE).unwrap(), Family::Netlink);
    }
}

#[test]
fn unregistered_family_code_is_an_error() {
    assert_eq!(
        Family::from_code(0x7f00),
        Err(AddrError::UnrecognizedFamilyCode { code: 0x7f00 })
    );
}

#[cfg(any(target_os = "linux", target_os = "android"))]
#[test]
fn require_code_names_the_caller() {
    // AF_LINK does not exist on Linux.
    assert_eq!(Family::Link.code(), None);
    let err = Family::Link.require_code("bind").unwrap_err();
    assert_eq!(
        err,
        AddrError::UnsupportedFamily {
            family: Family::Link,
            caller: "bind"
        }
    );
    assert!(err.to_string().contains("bind"));
}

#[test]
fn socktype_codes_round_trip_through_registry() {
    assert_eq!(SockType::Unspec.code(), Some(0));
    for &kind in SockType::ALL {
        let Some(code) = kind.code() else { continue };
        assert_eq!(SockType::from_code(code).unwrap(), kind);
    }
    assert_eq!(
        SockType::from_code(0x7f00),
        Err(AddrError::UnrecognizedSockTypeCode { code: 0x7f00 })
    );
}

#[test]
fn family_wire_len_covers_structured_families_only() {
    assert_eq!(Family::Inet.wire_len().unwrap(), size_of::<libc::sockaddr_in>());
    assert_eq!(Family::Inet6.wire_len().unwrap(), size_of::<libc::sockaddr_in6>());
    assert_eq!(Family::Unix.wire_len().unwrap(), size_of::<libc::sockaddr_un>());
    assert!(matches!(
        Family::Packet.wire_len(),
        Err(AddrError::UnsupportedFamily { family: Family::Packet, .. })
    ));
}

#[test]
fn inet_wire_layout_matches_sockaddr_in() {
    let addr = SockAddr::inet([127, 0, 0, 1], 80);
    let buf = encode_to_vec(&addr);

    assert_eq!(buf.len(), size_of::<libc::sockaddr_in>());
    assert_eq!(family_of(&buf), libc::AF_INET as libc::sa_family_t);

    let port_off = offset_of!(libc::sockaddr_in, sin_port);
    assert_eq!(&buf[port_off..port_off + 2], &[0, 80], "port 80 in network order");
    let addr_off = offset_of!(libc::sockaddr_in, sin_addr);
    assert_eq!(&buf[addr_off..addr_off + 4], &[127, 0, 0, 1]);

    assert_eq!(SockAddr::decode(&buf).unwrap(), addr);
}

#[test]
fn inet6_round_trips_with_flowinfo_and_scope() {
    let ip = [
        0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0xde, 0xad, 0xbe, 0xef,
    ];
    let addr = SockAddr::inet6_full(ip, 8443, 0x12345, 7);
    let buf = encode_to_vec(&addr);

    assert_eq!(buf.len(), size_of::<libc::sockaddr_in6>());
    assert_eq!(family_of(&buf), libc::AF_INET6 as libc::sa_family_t);

    let port_off = offset_of!(libc::sockaddr_in6, sin6_port);
    assert_eq!(&buf[port_off..port_off + 2], &8443u16.to_be_bytes());
    // The address bytes go out exactly as the octets came in.
    let addr_off = offset_of!(libc::sockaddr_in6, sin6_addr);
    assert_eq!(&buf[addr_off..addr_off + 16], &ip);

    assert_eq!(SockAddr::decode(&buf).unwrap(), addr);
}

#[test]
fn unix_path_round_trips_nul_terminated() {
    let addr = SockAddr::unix("/tmp/sockwire-test.sock");
    assert!(!addr.is_abstract());

    let buf = encode_to_vec(&addr);
    assert_eq!(buf.len(), size_of::<libc::sockaddr_un>());
    assert_eq!(family_of(&buf), libc::AF_UNIX as libc::sa_family_t);

    let path = b"/tmp/sockwire-test.sock";
    assert_eq!(&buf[SUN_PATH_OFFSET..SUN_PATH_OFFSET + path.len()], path);
    assert_eq!(buf[SUN_PATH_OFFSET + path.len()], 0, "terminator present");

    assert_eq!(SockAddr::decode(&buf).unwrap(), addr);
}

#[test]
fn unix_abstract_name_round_trips_exactly() {
    let addr = SockAddr::unix_abstract(b"sockwire\0with-nul");
    assert!(addr.is_abstract());
    assert_eq!(addr.wire_len(), SUN_PATH_OFFSET + 1 + 17);

    let buf = encode_to_vec(&addr);
    assert_eq!(buf[SUN_PATH_OFFSET], 0, "abstract marker");
    assert_eq!(&buf[SUN_PATH_OFFSET + 1..], b"sockwire\0with-nul");

    // The buffer length carries the exact name length, embedded NUL and
    // all, so the decode is lossless.
    assert_eq!(SockAddr::decode(&buf).unwrap(), addr);
}

#[test]
fn unix_unnamed_address_round_trips() {
    let addr = SockAddr::unix("");
    let buf = encode_to_vec(&addr);
    assert_eq!(buf.len(), size_of::<libc::sockaddr_un>());
    assert_eq!(SockAddr::decode(&buf).unwrap(), addr);
}

#[test]
fn unix_path_capacity_boundary() {
    // Longest filesystem path: capacity minus the terminator.
    let fits = SockAddr::unix(vec![b'x'; SUN_PATH_CAP - 1]);
    assert_eq!(encode_to_vec(&fits).len(), size_of::<libc::sockaddr_un>());

    let over = SockAddr::unix(vec![b'x'; SUN_PATH_CAP]);
    let mut buf = vec![0u8; over.wire_len()];
    assert_eq!(
        over.encode(&mut buf),
        Err(AddrError::PathTooLong {
            len: SUN_PATH_CAP,
            max: SUN_PATH_CAP - 1
        })
    );

    // Abstract names skip the terminator, so they get the marker byte
    // plus capacity-minus-one name bytes.
    let fits = SockAddr::unix_abstract(vec![b'x'; SUN_PATH_CAP - 1]);
    assert_eq!(encode_to_vec(&fits).len(), size_of::<libc::sockaddr_un>());

    let over = SockAddr::unix_abstract(vec![b'x'; SUN_PATH_CAP]);
    let mut buf = vec![0u8; over.wire_len()];
    assert_eq!(
        over.encode(&mut buf),
        Err(AddrError::PathTooLong {
            len: SUN_PATH_CAP + 1,
            max: SUN_PATH_CAP
        })
    );
}

#[test]
fn raw_payload_boundary_against_family_minimum() {
    let code = libc::AF_INET6 as libc::sa_family_t;
    let min_data = size_of::<libc::sockaddr_in6>() - DATA_OFFSET;

    let exact = SockAddr::Raw {
        family: code,
        data: vec![0xab; min_data],
    };
    assert_eq!(encode_to_vec(&exact).len(), size_of::<libc::sockaddr_in6>());

    let short = SockAddr::Raw {
        family: code,
        data: vec![0xab; min_data - 1],
    };
    let mut buf = vec![0u8; size_of::<libc::sockaddr_in6>()];
    assert_eq!(
        short.encode(&mut buf),
        Err(AddrError::UndersizedRawAddress {
            family: code,
            len: min_data - 1,
            min: min_data
        })
    );
}

#[test]
fn raw_symbolic_constructor_goes_through_the_registry() {
    let data = vec![0u8; size_of::<libc::sockaddr>() - DATA_OFFSET];
    let addr = SockAddr::raw(Family::Unspec, data).unwrap();
    assert_eq!(addr.family_code(), libc::AF_UNSPEC as libc::sa_family_t);

    #[cfg(any(target_os = "linux", target_os = "android"))]
    assert!(matches!(
        SockAddr::raw(Family::Link, Vec::new()),
        Err(AddrError::UnsupportedFamily { family: Family::Link, .. })
    ));
}

#[cfg(any(target_os = "linux", target_os = "android"))]
#[test]
fn unknown_family_decodes_to_raw_and_reencodes_byte_for_byte() {
    // A code no table on Linux knows, as if the kernel spoke a family
    // newer than this crate.
    let mut buf = vec![0u8; size_of::<libc::sockaddr>()];
    buf[..2].copy_from_slice(&200u16.to_ne_bytes());
    for (i, byte) in buf.iter_mut().enumerate().skip(DATA_OFFSET) {
        *byte = i as u8;
    }

    let addr = SockAddr::decode(&buf).unwrap();
    match &addr {
        SockAddr::Raw { family, data } => {
            assert_eq!(*family, 200);
            assert_eq!(data.as_slice(), &buf[DATA_OFFSET..]);
        }
        other => panic!("expected Raw, got {other:?}"),
    }
    assert_eq!(addr.family(), None, "no symbolic tag for code 200");

    assert_eq!(encode_to_vec(&addr), buf);
}

#[test]
fn wire_len_matches_encode_for_every_variant() {
    let addrs = [
        SockAddr::inet([10, 0, 0, 1], 8080),
        SockAddr::inet6([0; 16], 53),
        SockAddr::unix("/run/demo.sock"),
        SockAddr::unix_abstract("demo"),
        SockAddr::Raw {
            family: 200,
            data: vec![7; 14],
        },
        SockAddr::Raw {
            family: 200,
            data: vec![7; 64],
        },
    ];
    for addr in &addrs {
        // A buffer of exactly wire_len is enough...
        let buf = encode_to_vec(addr);
        assert_eq!(buf.len(), addr.wire_len());
        // ...and one byte less is not.
        let mut short = vec![0u8; addr.wire_len() - 1];
        assert_eq!(
            addr.encode(&mut short),
            Err(AddrError::BufferTooSmall {
                needed: addr.wire_len(),
                got: addr.wire_len() - 1
            })
        );
    }
}

#[test]
fn decode_rejects_truncated_structured_buffers() {
    let buf = encode_to_vec(&SockAddr::inet([1, 2, 3, 4], 9));
    assert_eq!(
        SockAddr::decode(&buf[..buf.len() - 1]),
        Err(AddrError::BufferTooSmall {
            needed: size_of::<libc::sockaddr_in>(),
            got: buf.len() - 1
        })
    );
    assert!(matches!(
        SockAddr::decode(&[]),
        Err(AddrError::BufferTooSmall { .. })
    ));
}

#[test]
fn with_raw_hands_out_kernel_ready_pointers() {
    let addr = SockAddr::inet([127, 0, 0, 1], 4242);
    let (family, len) = addr
        .with_raw(|ptr, len| {
            let family = unsafe { (*ptr).sa_family };
            (family, len)
        })
        .unwrap();
    assert_eq!(family, libc::AF_INET as libc::sa_family_t);
    assert_eq!(len as usize, size_of::<libc::sockaddr_in>());

    // Oversized raw payloads spill off the stack but still encode.
    let big = SockAddr::Raw {
        family: 200,
        data: vec![1; size_of::<libc::sockaddr_storage>() * 2],
    };
    let len = big.with_raw(|_, len| len).unwrap();
    assert_eq!(len as usize, big.wire_len());
}

#[test]
fn std_net_conversions_round_trip() {
    let v4: std::net::SocketAddr = "10.1.2.3:8080".parse().unwrap();
    let addr = SockAddr::from(v4);
    assert_eq!(addr, SockAddr::inet([10, 1, 2, 3], 8080));
    assert_eq!(addr.to_std(), Some(v4));

    let v6: std::net::SocketAddr = "[2001:db8::1]:443".parse().unwrap();
    let addr = SockAddr::from(v6);
    assert_eq!(addr.to_std(), Some(v6));
    assert_eq!(addr.port(), Some(Port::from_host(443)));

    assert_eq!(SockAddr::unix("/tmp/x").to_std(), None);
}

#[test]
fn display_is_human_readable() {
    assert_eq!(SockAddr::inet([127, 0, 0, 1], 80).to_string(), "127.0.0.1:80");
    let mut ip = [0u8; 16];
    ip[15] = 1;
    assert_eq!(SockAddr::inet6(ip, 443).to_string(), "[0:0:0:0:0:0:0:1]:443");
    assert_eq!(
        SockAddr::inet6_full(ip, 443, 0, 3).to_string(),
        "[0:0:0:0:0:0:0:1%3]:443"
    );
    assert_eq!(SockAddr::unix("/run/x.sock").to_string(), "/run/x.sock");
    assert_eq!(SockAddr::unix_abstract("name").to_string(), "@name");
    assert_eq!(SockAddr::unix("").to_string(), "(unnamed)");
    assert_eq!(
        SockAddr::Raw {
            family: 200,
            data: vec![0; 14]
        }
        .to_string(),
        "(family 200, 14 bytes)"
    );
}

#[test]
fn errors_convert_to_io_error_kinds() {
    let err: std::io::Error = AddrError::UnrecognizedFamilyCode { code: 999 }.into();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    let err: std::io::Error = AddrError::PathTooLong { len: 200, max: 107 }.into();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
}
