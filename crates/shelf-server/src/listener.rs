use std::io;
use std::net::{SocketAddr, TcpListener};

use socket2::{Domain, Protocol, Socket, Type};

/// Whether [`bind_shared`] lets several processes bind one port.
///
/// `SO_REUSEPORT` only exists on unix targets. Elsewhere the coordinator
/// runs a single worker instead.
pub const SHARES_PORT: bool = cfg!(unix);

/// Bind a non-blocking TCP listener that other processes may bind too.
///
/// Every socket bound to the same address with `SO_REUSEPORT` joins one
/// kernel group, and the kernel spreads new connections across the group.
pub fn bind_shared(addr: SocketAddr, backlog: i32) -> io::Result<TcpListener> {
    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    socket.listen(backlog)?;
    Ok(socket.into())
}
