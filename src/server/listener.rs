use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;
use crate::http::connection::Connection;
use crate::server::ServerContext;

/// Accepts connections forever, serving each on the blocking pool.
///
/// Request parsing is synchronous, so every socket is turned back into a
/// blocking std stream with the configured read deadline before it is handed
/// to a [`Connection`].
pub async fn run(cfg: &Config, ctx: ServerContext) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.server.listen_addr).await?;
    info!("Listening on {}", cfg.server.listen_addr);

    let read_timeout = cfg.server.read_timeout();

    loop {
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let stream = socket.into_std()?;
        stream.set_nonblocking(false)?;
        stream.set_read_timeout(read_timeout)?;

        let ctx = ctx.clone();
        tokio::task::spawn_blocking(move || {
            let result = Connection::from_tcp(stream, ctx).and_then(|mut conn| conn.run());
            if let Err(e) = result {
                tracing::error!("Connection error from {}: {:#}", peer, e);
            }
        });
    }
}
