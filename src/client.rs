use std::{
    ffi::{CStr, CString},
    io::{BufReader, Read, Write},
};

use mio::net::UnixStream;

use super::protocol;

mod playback_source;
mod playback_stream;
mod reactor;
mod record_sink;
mod record_stream;

pub use playback_source::*;
pub use playback_stream::*;
pub use record_sink::*;
pub use record_stream::*;

/// An error encountered by a [Client].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The PulseAudio server socket couldn't be located..
    #[error("PulseAudio server unavailable")]
    ServerUnavailable,
    /// The server sent an invalid sequence number in reply to a command.
    #[error("Unexpected sequence number")]
    UnexpectedSequenceNumber,
    /// A protocol-level error, like an invalid message.
    #[error("Protocol error")]
    Protocol(#[from] protocol::ProtocolError),
    /// An error message sent by the server in response to a command.
    #[error("Server error: {0:?}")]
    ServerError(protocol::PulseError),
    /// An error occurred reading or writing to the socket, or communicating
    /// with the worker thread.
    #[error("I/O error")]
    Io(#[from] std::io::Error),
    /// The client has disconnected, usually because an error occurred.
    #[error("Client disconnected")]
    Disconnected,
}

/// The result of a [Client] operation.
pub type Result<T> = std::result::Result<T, ClientError>;

/// A PulseAudio client.
///
/// The client object can be freely cloned and shared between threads.
#[derive(Clone)]
pub struct Client {
    desc: String,
    handle: reactor::ReactorHandle,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Client").field(&self.desc).finish()
    }
}

impl Client {
    /// Creates a new client, using the environment to find the socket and cookie file.
    ///
    /// See the documentation for [socket_path_from_env](super::socket_path_from_env) and
    /// [cookie_path_from_env](super::cookie_path_from_env) for an explanation
    /// of how the socket path and cookie are determined.
    pub fn from_env(client_name: impl AsRef<CStr>) -> Result<Self> {
        let socket_path = super::socket_path_from_env().ok_or(ClientError::ServerUnavailable)?;
        let cookie = super::cookie_path_from_env().and_then(|p| std::fs::read(p).ok());

        log::info!(
            "connecting to PulseAudio server at {}",
            socket_path.display()
        );
        let socket = std::os::unix::net::UnixStream::connect(socket_path)?;
        Self::new_unix(client_name, socket, cookie)
    }

    /// Creates a new client, using the given connected unix domain socket to
    /// communicate with the PulseAudio server.
    pub fn new_unix(
        client_name: impl AsRef<CStr>,
        mut socket: std::os::unix::net::UnixStream,
        cookie: Option<impl AsRef<[u8]>>,
    ) -> std::result::Result<Self, ClientError> {
        let desc = if let Some(path) = socket.peer_addr()?.as_pathname() {
            format!("unix:{}", path.display())
        } else {
            "<unknown>".into()
        };

        // Perform the handshake.
        let protocol_version;
        {
            let mut reader = BufReader::new(&mut socket);
            let cookie = cookie.as_ref().map(AsRef::as_ref).unwrap_or(&[]).to_owned();
            let auth = protocol::AuthParams {
                version: protocol::MAX_VERSION,
                cookie,
            };

            let auth_reply: protocol::AuthReply = roundtrip_blocking(
                &mut reader,
                protocol::Command::Auth(auth),
                0,
                protocol::MAX_VERSION,
            )?;

            protocol_version = std::cmp::min(protocol::MAX_VERSION, auth_reply.version);

            let mut props = protocol::Props::new();
            props.set(protocol::Prop::ApplicationName, client_name.as_ref());

            let _: protocol::SetClientNameReply = roundtrip_blocking(
                &mut reader,
                protocol::Command::SetClientName(props),
                1,
                protocol_version,
            )?;
        }

        // Set up the reactor.
        socket.set_nonblocking(true)?;
        let socket = UnixStream::from_std(socket);
        let handle = reactor::Reactor::spawn(socket, protocol_version)?;

        Ok(Self { desc, handle })
    }

    /// Fetches basic information on the server.
    pub async fn server_info(&self) -> Result<protocol::ServerInfo> {
        self.handle
            .roundtrip_reply(protocol::Command::GetServerInfo)
            .await
    }

    /// Fetches all sinks available on the server.
    pub async fn list_sinks(&self) -> Result<Vec<protocol::SinkInfo>> {
        self.handle
            .roundtrip_reply(protocol::Command::GetSinkInfoList)
            .await
    }

    /// Fetches all sources available on the server.
    pub async fn list_sources(&self) -> Result<Vec<protocol::SourceInfo>> {
        self.handle
            .roundtrip_reply(protocol::Command::GetSourceInfoList)
            .await
    }

    /// Fetches a specific sink by its index.
    pub async fn sink_info(&self, index: u32) -> Result<protocol::SinkInfo> {
        self.handle
            .roundtrip_reply(protocol::Command::GetSinkInfo(protocol::GetSinkInfo {
                index: Some(index),
                name: None,
            }))
            .await
    }

    /// Fetches a specific sink by name.
    pub async fn sink_info_by_name(&self, name: CString) -> Result<protocol::SinkInfo> {
        self.handle
            .roundtrip_reply(protocol::Command::GetSinkInfo(protocol::GetSinkInfo {
                index: None,
                name: Some(name),
            }))
            .await
    }

    /// Fetches a specific source by its index.
    pub async fn source_info(&self, index: u32) -> Result<protocol::SourceInfo> {
        self.handle
            .roundtrip_reply(protocol::Command::GetSourceInfo(protocol::GetSourceInfo {
                index: Some(index),
                name: None,
            }))
            .await
    }

    /// Fetches a specific source by name.
    pub async fn source_info_by_name(&self, name: CString) -> Result<protocol::SourceInfo> {
        self.handle
            .roundtrip_reply(protocol::Command::GetSourceInfo(protocol::GetSourceInfo {
                index: None,
                name: Some(name),
            }))
            .await
    }

    /// Loads a module by name, with an optional argument string. Returns the index of the
    /// newly loaded module.
    pub async fn load_module(&self, name: CString, arguments: Option<CString>) -> Result<u32> {
        let reply = self
            .handle
            .roundtrip_reply::<protocol::LoadModuleReply>(protocol::Command::LoadModule(
                protocol::LoadModuleParams { name, arguments },
            ))
            .await?;
        Ok(reply.0)
    }

    /// Plays a previously uploaded sample on a sink.
    pub async fn play_sample(&self, params: protocol::PlaySampleParams) -> Result<()> {
        self.handle
            .roundtrip_ack(protocol::Command::PlaySample(params))
            .await
    }

    /// Sets the volume of a sink, by index.
    pub async fn set_sink_volume(&self, index: u32, volume: protocol::ChannelVolume) -> Result<()> {
        self.handle
            .roundtrip_ack(protocol::Command::SetSinkVolume(
                protocol::SetDeviceVolumeParams {
                    device_index: Some(index),
                    device_name: None,
                    volume,
                },
            ))
            .await
    }

    /// Sets the volume of a source, by index.
    pub async fn set_source_volume(
        &self,
        index: u32,
        volume: protocol::ChannelVolume,
    ) -> Result<()> {
        self.handle
            .roundtrip_ack(protocol::Command::SetSourceVolume(
                protocol::SetDeviceVolumeParams {
                    device_index: Some(index),
                    device_name: None,
                    volume,
                },
            ))
            .await
    }

    /// Sets the volume of a sink input.
    pub async fn set_sink_input_volume(
        &self,
        index: u32,
        volume: protocol::ChannelVolume,
    ) -> Result<()> {
        self.handle
            .roundtrip_ack(protocol::Command::SetSinkInputVolume(
                protocol::SetStreamVolumeParams { index, volume },
            ))
            .await
    }

    /// Sets the volume of a source output.
    pub async fn set_source_output_volume(
        &self,
        index: u32,
        volume: protocol::ChannelVolume,
    ) -> Result<()> {
        self.handle
            .roundtrip_ack(protocol::Command::SetSourceOutputVolume(
                protocol::SetStreamVolumeParams { index, volume },
            ))
            .await
    }

    /// Mutes or unmutes a sink, by index.
    pub async fn set_sink_mute(&self, index: u32, mute: bool) -> Result<()> {
        self.handle
            .roundtrip_ack(protocol::Command::SetSinkMute(
                protocol::SetDeviceMuteParams {
                    device_index: Some(index),
                    device_name: None,
                    mute,
                },
            ))
            .await
    }

    /// Mutes or unmutes a source, by index.
    pub async fn set_source_mute(&self, index: u32, mute: bool) -> Result<()> {
        self.handle
            .roundtrip_ack(protocol::Command::SetSourceMute(
                protocol::SetDeviceMuteParams {
                    device_index: Some(index),
                    device_name: None,
                    mute,
                },
            ))
            .await
    }

    /// Mutes or unmutes a sink input.
    pub async fn set_sink_input_mute(&self, index: u32, mute: bool) -> Result<()> {
        self.handle
            .roundtrip_ack(protocol::Command::SetSinkInputMute(
                protocol::SetStreamMuteParams { index, mute },
            ))
            .await
    }

    /// Mutes or unmutes a source output.
    pub async fn set_source_output_mute(&self, index: u32, mute: bool) -> Result<()> {
        self.handle
            .roundtrip_ack(protocol::Command::SetSourceOutputMute(
                protocol::SetStreamMuteParams { index, mute },
            ))
            .await
    }

    /// Corks or uncorks a playback stream.
    pub async fn cork_playback_stream(&self, channel: u32, cork: bool) -> Result<()> {
        self.handle
            .roundtrip_ack(protocol::Command::CorkPlaybackStream(
                protocol::CorkStreamParams { channel, cork },
            ))
            .await
    }

    /// Corks or uncorks a record stream.
    pub async fn cork_record_stream(&self, channel: u32, cork: bool) -> Result<()> {
        self.handle
            .roundtrip_ack(protocol::Command::CorkRecordStream(
                protocol::CorkStreamParams { channel, cork },
            ))
            .await
    }

    /// Discards any buffered data for a playback stream.
    pub async fn flush_playback_stream(&self, channel: u32) -> Result<()> {
        self.handle
            .roundtrip_ack(protocol::Command::FlushPlaybackStream(channel))
            .await
    }

    /// Discards any buffered data for a record stream.
    pub async fn flush_record_stream(&self, channel: u32) -> Result<()> {
        self.handle
            .roundtrip_ack(protocol::Command::FlushRecordStream(channel))
            .await
    }

    /// Renames a playback stream.
    pub async fn set_playback_stream_name(&self, channel: u32, name: CString) -> Result<()> {
        self.handle
            .roundtrip_ack(protocol::Command::SetPlaybackStreamName(
                protocol::SetStreamNameParams { channel, name },
            ))
            .await
    }

    /// Renames a record stream.
    pub async fn set_record_stream_name(&self, channel: u32, name: CString) -> Result<()> {
        self.handle
            .roundtrip_ack(protocol::Command::SetRecordStreamName(
                protocol::SetStreamNameParams { channel, name },
            ))
            .await
    }

    /// Uploads a sample to the server under `params`, writing `data` to it and finishing the
    /// upload. The sample is then playable by name via [`Client::play_sample`].
    pub async fn upload_sample(
        &self,
        params: protocol::UploadStreamParams,
        data: &[u8],
    ) -> Result<()> {
        let reply = self.handle.insert_upload_stream(params).await?;
        self.handle.write_upload_data(reply.channel, data)?;
        self.handle.finish_upload_stream(reply.channel).await
    }

    /// Subscribes to server events matching `mask`. The subscription ends when the returned
    /// stream is dropped.
    pub async fn subscribe(
        &self,
        mask: protocol::SubscriptionMask,
    ) -> Result<impl futures::Stream<Item = protocol::SubscriptionEvent>> {
        let rx = self.handle.subscribe()?;
        self.handle
            .roundtrip_ack(protocol::Command::Subscribe(mask))
            .await?;

        let (tx, stream_rx) = futures::channel::mpsc::unbounded();
        std::thread::spawn(move || {
            while let Ok(event) = rx.recv() {
                if tx.unbounded_send(event).is_err() {
                    break;
                }
            }
        });

        Ok(stream_rx)
    }

    /// Creates a new playback stream. The given callback will be called when the
    /// server requests data for the stream.
    pub async fn create_playback_stream(
        &self,
        params: protocol::PlaybackStreamParams,
        source: impl PlaybackSource,
    ) -> Result<PlaybackStream> {
        PlaybackStream::new(self.handle.clone(), params, source).await
    }

    /// Creates a new record stream. The returned handle implements
    /// [AsyncRead](futures::io::AsyncRead) for extracting the raw audio data.
    pub async fn create_record_stream(
        &self,
        params: protocol::RecordStreamParams,
        sink: impl RecordSink,
    ) -> Result<RecordStream> {
        RecordStream::new(self.handle.clone(), params, sink).await
    }
}

fn roundtrip_blocking<R: protocol::CommandReply>(
    socket: &mut BufReader<impl Read + Write>,
    cmd: protocol::Command,
    req_seq: u32,
    protocol_version: u16,
) -> Result<R> {
    log::debug!("CLIENT [{req_seq}]: {cmd:?}");
    protocol::write_command_message(socket.get_mut(), req_seq, &cmd, protocol_version)?;

    let (reply_seq, reply) = protocol::read_reply_message(socket, protocol_version)?;
    if req_seq != reply_seq {
        return Err(ClientError::UnexpectedSequenceNumber);
    }

    Ok(reply)
}
#[cfg(all(test, feature = "_integration-tests"))]
mod tests {
    use super::*;
    use anyhow::Context as _;
    use futures::executor::block_on;
    use rand::Rng;

    fn random_client_name() -> CString {
        CString::new(format!(
            "pulseaudio-rs-test-{}",
            rand::rng().random_range(0..10000)
        ))
        .unwrap()
    }

    #[test_log::test]
    fn server_info() -> anyhow::Result<()> {
        let client =
            Client::from_env(random_client_name()).context("connecting to PulseAudio server")?;

        let server_info = block_on(client.server_info())?;
        assert!(server_info.server_name.is_some());

        Ok(())
    }

    #[test_log::test]
    fn list_sinks() -> anyhow::Result<()> {
        let client =
            Client::from_env(random_client_name()).context("connecting to PulseAudio server")?;

        let info_list = block_on(client.list_sinks())?;
        assert!(!info_list.is_empty());

        Ok(())
    }

    #[test_log::test]
    fn list_sources() -> anyhow::Result<()> {
        let client =
            Client::from_env(random_client_name()).context("connecting to PulseAudio server")?;

        let info_list = block_on(client.list_sources())?;
        assert!(!info_list.is_empty());

        Ok(())
    }

    #[test_log::test]
    fn sink_info() -> anyhow::Result<()> {
        let client =
            Client::from_env(random_client_name()).context("connecting to PulseAudio server")?;

        let sink_list = block_on(client.list_sinks())?;
        assert!(!sink_list.is_empty());

        let mut expected = sink_list[0].clone();
        let mut sink_info = block_on(client.sink_info(expected.index))?;

        expected.actual_latency = 0;
        sink_info.actual_latency = 0;
        assert_eq!(expected, sink_info);

        Ok(())
    }

    #[test_log::test]
    fn sink_info_by_name() -> anyhow::Result<()> {
        let client =
            Client::from_env(random_client_name()).context("connecting to PulseAudio server")?;

        let sink_list = block_on(client.list_sinks())?;
        assert!(!sink_list.is_empty());

        let mut expected = sink_list[0].clone();
        let mut sink_info = block_on(client.sink_info_by_name(expected.name.clone()))?;

        expected.actual_latency = 0;
        sink_info.actual_latency = 0;
        assert_eq!(expected, sink_info);

        Ok(())
    }

    #[test_log::test]
    fn source_info() -> anyhow::Result<()> {
        let client =
            Client::from_env(random_client_name()).context("connecting to PulseAudio server")?;

        let source_list = block_on(client.list_sources())?;
        assert!(!source_list.is_empty());

        let expected = &source_list[0];
        let source_info = block_on(client.source_info(expected.index))?;

        assert_eq!(expected, &source_info);

        Ok(())
    }

    #[test_log::test]
    fn source_info_by_name() -> anyhow::Result<()> {
        let client =
            Client::from_env(random_client_name()).context("connecting to PulseAudio server")?;

        let source_list = block_on(client.list_sources())?;
        assert!(!source_list.is_empty());

        let expected = &source_list[0];
        let source_info = block_on(client.source_info_by_name(expected.name.clone()))?;

        assert_eq!(expected, &source_info);

        Ok(())
    }

    #[test_log::test]
    fn set_sink_volume() -> anyhow::Result<()> {
        let client =
            Client::from_env(random_client_name()).context("connecting to PulseAudio server")?;

        let sink_list = block_on(client.list_sinks())?;
        assert!(!sink_list.is_empty());

        let sink = &sink_list[0];
        block_on(client.set_sink_volume(sink.index, sink.cvolume))?;

        Ok(())
    }

    #[test_log::test]
    fn set_sink_mute() -> anyhow::Result<()> {
        let client =
            Client::from_env(random_client_name()).context("connecting to PulseAudio server")?;

        let sink_list = block_on(client.list_sinks())?;
        assert!(!sink_list.is_empty());

        let sink = &sink_list[0];
        block_on(client.set_sink_mute(sink.index, sink.muted))?;

        Ok(())
    }

    #[test_log::test]
    fn load_and_play_sample() -> anyhow::Result<()> {
        let client =
            Client::from_env(random_client_name()).context("connecting to PulseAudio server")?;

        let sink_list = block_on(client.list_sinks())?;
        assert!(!sink_list.is_empty());

        let params = protocol::UploadStreamParams {
            media_name: Some(CString::new("pulsepipe-test-tone").unwrap()),
            sample_spec: protocol::SampleSpec {
                format: protocol::SampleFormat::S16Le,
                channels: 1,
                sample_rate: 44100,
            },
            channel_map: protocol::ChannelMap::mono(),
            length: 4,
            props: protocol::Props::new(),
        };

        block_on(client.upload_sample(params, &[0, 0, 0, 0]))?;
        block_on(client.play_sample(protocol::PlaySampleParams {
            sink_index: Some(sink_list[0].index),
            sink_name: None,
            volume: protocol::Volume::NORM.as_u32(),
            name: CString::new("pulsepipe-test-tone").unwrap(),
            props: protocol::Props::new(),
        }))?;

        Ok(())
    }

    #[test_log::test]
    fn subscribe_sees_own_load_module() -> anyhow::Result<()> {
        use futures::StreamExt;

        let client =
            Client::from_env(random_client_name()).context("connecting to PulseAudio server")?;

        let mut events = block_on(client.subscribe(protocol::SubscriptionMask::all()))?;

        block_on(client.load_module(CString::new("module-null-sink").unwrap(), None))?;

        let event = block_on(events.next()).context("subscription closed with no events")?;
        assert_eq!(
            event.event_type,
            protocol::SubscriptionEventType::New
        );

        Ok(())
    }
}
