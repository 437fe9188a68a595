//! Local socket helpers.

use std::net::{SocketAddr, TcpListener, TcpStream};

/// Reserves a loopback port that is free at the time of the call.
///
/// The probe listener is dropped before returning, so the address can be handed to code
/// under test that binds it itself.
///
/// # Returns
/// - `Ok(SocketAddr)` - Loopback address with a currently unused port
/// - `Err(std::io::Error)` - No port could be reserved
pub fn unused_local_addr() -> std::io::Result<SocketAddr> {
    let probe = TcpListener::bind("127.0.0.1:0")?;
    probe.local_addr()
}

/// Reports whether anything accepts TCP connections on `addr`.
pub fn is_accepting(addr: SocketAddr) -> bool {
    TcpStream::connect(addr).is_ok()
}
