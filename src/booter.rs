use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;

pub struct Booter {
    pub addr: SocketAddr,
    tcp_listener: TcpListener,
}

impl Booter {
    pub async fn new(port: u16) -> Result<Self, anyhow::Error> {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let tcp_listener = TcpListener::bind(addr).await?;
        // port 0 resolves to whatever the OS picked
        let addr = tcp_listener.local_addr()?;

        Ok(Self { addr, tcp_listener })
    }

    pub async fn start(self, router: Router) -> Result<(), anyhow::Error> {
        axum::serve(self.tcp_listener, router).await?;

        Ok(())
    }
}
