use crate::config::ClientConfig;
use crate::dispatch::Dispatcher;
use crate::error::ClientError;
use crate::input::Intent;
use crate::presentation::Presentation;
use futures_util::{SinkExt, StreamExt};
use log::{debug, info, warn};
use shared::commands;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// One websocket session with the match server.
///
/// Reconnecting is not handled here: a lost connection ends [`Client::run`]
/// and a new session starts from a new `Client`.
pub struct Client<P: Presentation> {
    ws: WsStream,
    config: ClientConfig,
    dispatcher: Dispatcher<P>,

    frames_received: u64,
    frames_dropped: u64,
}

impl<P: Presentation> Client<P> {
    pub async fn connect(config: ClientConfig, presentation: P) -> Result<Self, ClientError> {
        info!("Connecting to {}", config.server_url);
        let (ws, _) = connect_async(config.server_url.as_str()).await?;
        info!("Connected");

        let dispatcher = Dispatcher::new(config.nickname.clone(), presentation);

        Ok(Client {
            ws,
            config,
            dispatcher,
            frames_received: 0,
            frames_dropped: 0,
        })
    }

    async fn send_frame(&mut self, frame: Vec<u8>) -> Result<(), ClientError> {
        self.ws.send(Message::Binary(frame.into())).await?;
        Ok(())
    }

    async fn join(&mut self) -> Result<(), ClientError> {
        info!("Joining as {}", self.config.nickname);
        let frame = commands::join_request(&self.config.nickname)?;
        self.send_frame(frame).await?;

        if self.config.auto_ready {
            self.send_frame(commands::player_ready()?).await?;
        }
        Ok(())
    }

    async fn send_intent(&mut self, intent: Intent) -> Result<(), ClientError> {
        debug!("Sending {:?}", intent);
        let frame = intent.encode()?;
        self.send_frame(frame).await?;

        if let Intent::Join(name) = intent {
            info!("Rejoining as {}", name);
            self.config.nickname = name.clone();
            self.dispatcher.set_nickname(name);
        }
        Ok(())
    }

    fn handle_frame(&mut self, data: &[u8]) {
        self.frames_received += 1;
        if let Err(e) = self.dispatcher.handle_frame(data) {
            self.frames_dropped += 1;
            warn!("Dropping frame: {}", e);
        }
    }

    /// Joins the match and processes traffic until the server closes the
    /// connection. Returns the final session state.
    ///
    /// Inbound frames are handled one at a time, in arrival order. Intents are
    /// sent as they arrive; once the intent channel closes the client keeps
    /// listening.
    pub async fn run(
        mut self,
        mut intents: mpsc::UnboundedReceiver<Intent>,
    ) -> Result<Dispatcher<P>, ClientError> {
        self.join().await?;

        let mut intents_open = true;

        loop {
            tokio::select! {
                message = self.ws.next() => {
                    match message {
                        Some(Ok(Message::Binary(data))) => self.handle_frame(&data),
                        Some(Ok(Message::Close(_))) | None => {
                            info!("Server closed the connection");
                            break;
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => return Err(e.into()),
                    }
                },

                intent = intents.recv(), if intents_open => {
                    match intent {
                        Some(intent) => self.send_intent(intent).await?,
                        None => intents_open = false,
                    }
                },
            }
        }

        info!(
            "Session over: {} frames received, {} dropped, {} snapshots applied",
            self.frames_received,
            self.frames_dropped,
            self.dispatcher.game().snapshots_applied()
        );

        Ok(self.dispatcher)
    }
}
